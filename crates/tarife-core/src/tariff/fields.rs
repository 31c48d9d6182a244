//! Field extraction from the free-text part of a tariff line.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::models::config::ParserConfig;
use crate::models::tariff::Currency;

use super::rules::patterns::TOKEN;
use super::rules::{TokenKind, classify_token, is_numeric_token};

/// Fields found in one line body.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractedFields {
    pub service_name: String,
    pub currency: Currency,
    pub min_amount: Option<Decimal>,
    pub max_amount: Option<Decimal>,
    pub min_rate: Option<Decimal>,
    pub max_rate: Option<Decimal>,
    pub notes: String,
    pub updated_at: Option<NaiveDate>,
}

impl ExtractedFields {
    /// Whether anything besides the name was found.
    pub fn has_data(&self) -> bool {
        !self.currency.is_unset()
            || self.min_amount.is_some()
            || self.min_rate.is_some()
            || !self.notes.is_empty()
            || self.updated_at.is_some()
    }
}

/// Splits a line body into service name and typed fields.
#[derive(Debug, Clone)]
pub struct FieldExtractor {
    notes_keywords: Vec<String>,
}

impl FieldExtractor {
    /// Create an extractor with the default notes vocabulary.
    pub fn new() -> Self {
        Self::from_config(&ParserConfig::default())
    }

    pub fn from_config(config: &ParserConfig) -> Self {
        Self {
            notes_keywords: config.notes_keywords.clone(),
        }
    }

    /// Extract fields from `body`. Never fails; unknown tokens are skipped.
    pub fn extract(&self, body: &str) -> ExtractedFields {
        let (name, data) = split_service_name(body);
        let mut fields = ExtractedFields {
            service_name: name.to_string(),
            ..ExtractedFields::default()
        };

        let mut amounts: Vec<Decimal> = Vec::new();
        let mut notes: Vec<&str> = Vec::new();

        for token in data.split_whitespace() {
            match classify_token(token, &self.notes_keywords) {
                TokenKind::Currency(currency) => {
                    if fields.currency.is_unset() {
                        fields.currency = currency;
                    }
                }
                TokenKind::Amount(amount) => amounts.push(amount),
                TokenKind::Rate(rate) => {
                    if fields.min_rate.is_none() {
                        fields.min_rate = Some(rate);
                    } else {
                        fields.max_rate = Some(rate);
                    }
                }
                TokenKind::Date(date) => fields.updated_at = Some(date),
                TokenKind::Note => notes.push(token),
                TokenKind::Other => {}
            }
        }

        let mut amounts = amounts.into_iter();
        fields.min_amount = amounts.next();
        fields.max_amount = amounts.next();
        fields.notes = notes.join(" ");

        fields
    }
}

impl Default for FieldExtractor {
    fn default() -> Self {
        Self::new()
    }
}

/// Split `body` into `(service name, data)`.
///
/// The data part starts at the first currency token if there is one,
/// otherwise at the first numeric-shaped token. Without either, the whole
/// body is the name.
pub fn split_service_name(body: &str) -> (&str, &str) {
    let split_at = TOKEN
        .find_iter(body)
        .find(|m| Currency::from_token(m.as_str()).is_some())
        .or_else(|| TOKEN.find_iter(body).find(|m| is_numeric_token(m.as_str())))
        .map(|m| m.start());

    match split_at {
        Some(at) => (body[..at].trim(), body[at..].trim()),
        None => (body.trim(), ""),
    }
}
