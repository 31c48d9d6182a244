//! Token rules for the data part of tariff lines.

pub mod amounts;
pub mod dates;
pub mod patterns;
pub mod rates;

pub use amounts::{AmountRule, parse_decimal};
pub use dates::{DateRule, looks_like_date};
pub use patterns::*;
pub use rates::RateRule;

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::models::tariff::Currency;

/// A rule that recognizes one whitespace-separated token shape.
pub trait TokenRule {
    /// The type of value this rule produces.
    type Output;

    /// Parse the token, `None` when the shape does not match.
    fn parse(&self, token: &str) -> Option<Self::Output>;
}

/// Exact currency code rule.
pub struct CurrencyRule;

impl TokenRule for CurrencyRule {
    type Output = Currency;

    fn parse(&self, token: &str) -> Option<Currency> {
        Currency::from_token(token)
    }
}

/// What a single data token turned out to be.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenKind {
    Currency(Currency),
    Amount(Decimal),
    Rate(Decimal),
    Date(NaiveDate),
    Note,
    Other,
}

/// Classify a data token. Checks run in a fixed order: currency, integer
/// amount, percentage, date, notes keyword.
pub fn classify_token(token: &str, notes_keywords: &[String]) -> TokenKind {
    if let Some(currency) = CurrencyRule.parse(token) {
        return TokenKind::Currency(currency);
    }
    if let Some(amount) = AmountRule.parse(token) {
        return TokenKind::Amount(amount);
    }
    if let Some(rate) = RateRule.parse(token) {
        return TokenKind::Rate(rate);
    }
    if let Some(date) = DateRule.parse(token) {
        return TokenKind::Date(date);
    }
    if notes_keywords.iter().any(|k| k == token) {
        return TokenKind::Note;
    }
    TokenKind::Other
}

/// Whether a token is numeric-shaped: integer, decimal, percentage or date.
/// Such a token marks the end of a service name when no currency is present.
pub fn is_numeric_token(token: &str) -> bool {
    INTEGER_TOKEN.is_match(token)
        || DECIMAL_TOKEN.is_match(token)
        || PERCENT_TOKEN.is_match(token)
        || looks_like_date(token)
}
