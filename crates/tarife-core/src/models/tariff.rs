//! Tariff record data models.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Dot-separated position of an item in the nested tariff catalog
/// (e.g. `1.1.2`). Never empty; components are positive.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct HierarchicalId(Vec<u32>);

impl HierarchicalId {
    /// Build an id from its components. Returns `None` for an empty slice
    /// or a zero component.
    pub fn from_components(components: &[u32]) -> Option<Self> {
        if components.is_empty() || components.contains(&0) {
            None
        } else {
            Some(Self(components.to_vec()))
        }
    }

    /// `prefix` followed by `leaf`.
    pub fn with_leaf(prefix: &[u32], leaf: u32) -> Self {
        let mut components = Vec::with_capacity(prefix.len() + 1);
        components.extend_from_slice(prefix);
        components.push(leaf);
        Self(components)
    }

    /// Parse a dotted rendering such as `"1.1.2"`. Leading zeros are
    /// dropped, so `"1.01.2"` renders back as `1.1.2`.
    pub fn parse(s: &str) -> Option<Self> {
        let components = s
            .trim()
            .split('.')
            .map(|part| part.parse::<u32>().ok())
            .collect::<Option<Vec<_>>>()?;
        Self::from_components(&components)
    }

    pub fn components(&self) -> &[u32] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Ids always have at least one component.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Last component.
    pub fn leaf(&self) -> u32 {
        self.0[self.0.len() - 1]
    }

    /// All components but the last.
    pub fn prefix(&self) -> &[u32] {
        &self.0[..self.0.len() - 1]
    }

    /// A new id with `component` appended.
    pub fn child(&self, component: u32) -> Self {
        Self::with_leaf(&self.0, component)
    }
}

impl fmt::Display for HierarchicalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, component) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(".")?;
            }
            write!(f, "{}", component)?;
        }
        Ok(())
    }
}

impl FromStr for HierarchicalId {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| ConfigError::HierarchicalId(s.to_string()))
    }
}

impl From<HierarchicalId> for String {
    fn from(id: HierarchicalId) -> Self {
        id.to_string()
    }
}

impl TryFrom<String> for HierarchicalId {
    type Error = ConfigError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// A two-level grouping header, e.g. `1.1 Kredi Tahsis ve Kredi Kullandırım`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    /// Two-component id of the section.
    pub id: HierarchicalId,
    /// Section title as printed.
    pub title: String,
}

/// Currency of a tariff item.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Currency {
    #[serde(rename = "TRY")]
    Try,
    #[serde(rename = "USD")]
    Usd,
    #[serde(rename = "EUR")]
    Eur,
    #[serde(rename = "TL")]
    Tl,
    /// No currency token was found on the line.
    #[default]
    #[serde(rename = "UNSET")]
    Unset,
}

impl Currency {
    /// Parse an exact currency token. Matching is case-sensitive.
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "TRY" => Some(Currency::Try),
            "USD" => Some(Currency::Usd),
            "EUR" => Some(Currency::Eur),
            "TL" => Some(Currency::Tl),
            _ => None,
        }
    }

    /// Tabular rendering; `Unset` is the empty string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Currency::Try => "TRY",
            Currency::Usd => "USD",
            Currency::Eur => "EUR",
            Currency::Tl => "TL",
            Currency::Unset => "",
        }
    }

    pub fn is_unset(&self) -> bool {
        matches!(self, Currency::Unset)
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One reconstructed row of the tariff list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TariffRecord {
    /// Position in the nested catalog.
    pub hierarchical_id: HierarchicalId,

    /// Flat, human-facing row counter. May repeat when the source
    /// prints the same report number for two service variants.
    pub report_sequence: u32,

    /// Service name as found on the line.
    pub service_name: String,

    /// Currency, `Unset` when the line carried none.
    pub currency: Currency,

    /// Minimum fee amount.
    pub min_amount: Option<Decimal>,

    /// Maximum fee amount.
    pub max_amount: Option<Decimal>,

    /// Minimum rate in percent (`0.5` means 0.5%).
    pub min_rate: Option<Decimal>,

    /// Maximum rate in percent.
    pub max_rate: Option<Decimal>,

    /// Tax and exemption remarks, space-joined.
    pub notes: String,

    /// Date the tariff item was last updated.
    pub updated_at: Option<NaiveDate>,
}

impl TariffRecord {
    /// A record carrying identifiers and a name only.
    pub fn new(
        hierarchical_id: HierarchicalId,
        report_sequence: u32,
        service_name: impl Into<String>,
    ) -> Self {
        Self {
            hierarchical_id,
            report_sequence,
            service_name: service_name.into(),
            currency: Currency::Unset,
            min_amount: None,
            max_amount: None,
            min_rate: None,
            max_rate: None,
            notes: String::new(),
            updated_at: None,
        }
    }

    /// Whether anything besides identifiers and name was extracted.
    pub fn has_data(&self) -> bool {
        !self.currency.is_unset()
            || self.min_amount.is_some()
            || self.max_amount.is_some()
            || self.min_rate.is_some()
            || self.max_rate.is_some()
            || !self.notes.is_empty()
            || self.updated_at.is_some()
    }

    pub fn with_currency(mut self, currency: Currency) -> Self {
        self.currency = currency;
        self
    }
}
