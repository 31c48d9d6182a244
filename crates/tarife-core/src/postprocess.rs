//! Record post-processing.
//!
//! These rules sit outside the line fold: the parser reports what the line
//! said, and [`PostProcessor`] applies the corrections a consumer of the
//! tariff list usually wants.

use tracing::debug;

use crate::models::config::{CleanupStage, PostprocessConfig, Replacement};
use crate::models::document::{Page, TextDocument};
use crate::models::tariff::{Currency, TariffRecord};

/// Assigns a currency to records that carry an amount but no currency code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CurrencyDefaultRule {
    currency: Currency,
}

impl CurrencyDefaultRule {
    pub fn new(currency: Currency) -> Self {
        Self { currency }
    }

    /// Returns `true` if the record was changed.
    pub fn apply(&self, record: &mut TariffRecord) -> bool {
        if record.currency.is_unset() && record.min_amount.is_some() {
            record.currency = self.currency;
            true
        } else {
            false
        }
    }
}

/// Ordered substring replacements for tokens text extraction is known to
/// corrupt.
#[derive(Debug, Clone, Default)]
pub struct TokenCleanup {
    replacements: Vec<Replacement>,
    strip_leading_dots: bool,
}

impl TokenCleanup {
    pub fn new(replacements: Vec<Replacement>) -> Self {
        Self {
            replacements,
            strip_leading_dots: false,
        }
    }

    pub fn with_leading_dots_stripped(mut self, strip: bool) -> Self {
        self.strip_leading_dots = strip;
        self
    }

    /// Apply the replacements in order. Later replacements see the output
    /// of earlier ones.
    pub fn clean_line(&self, line: &str) -> String {
        self.replacements
            .iter()
            .filter(|r| !r.from.is_empty())
            .fold(line.to_string(), |text, r| text.replace(&r.from, &r.to))
    }

    /// Replacements plus optional removal of leading dots.
    pub fn clean_service_name(&self, name: &str) -> String {
        let cleaned = self.clean_line(name);
        if self.strip_leading_dots {
            cleaned.trim_start_matches('.').trim_start().to_string()
        } else {
            cleaned
        }
    }
}

/// Applies [`PostprocessConfig`] around the parser.
#[derive(Debug, Clone)]
pub struct PostProcessor {
    currency_default: Option<CurrencyDefaultRule>,
    cleanup: TokenCleanup,
    stage: CleanupStage,
}

impl PostProcessor {
    pub fn new() -> Self {
        Self::from_config(&PostprocessConfig::default())
    }

    pub fn from_config(config: &PostprocessConfig) -> Self {
        Self {
            currency_default: config.default_currency.map(CurrencyDefaultRule::new),
            cleanup: TokenCleanup::new(config.token_cleanup.clone())
                .with_leading_dots_stripped(config.strip_leading_dots),
            stage: config.cleanup_stage,
        }
    }

    /// Rewrite input lines when cleanup runs at the line stage. Otherwise
    /// the document is returned unchanged.
    pub fn prepare_document(&self, document: TextDocument) -> TextDocument {
        if self.stage != CleanupStage::Lines {
            return document;
        }
        TextDocument {
            pages: document
                .pages
                .into_iter()
                .map(|page| Page {
                    number: page.number,
                    lines: page
                        .lines
                        .iter()
                        .map(|line| self.cleanup.clean_line(line))
                        .collect(),
                })
                .collect(),
        }
    }

    /// Apply record-level rules.
    pub fn finish(&self, mut records: Vec<TariffRecord>) -> Vec<TariffRecord> {
        let mut defaulted = 0usize;
        for record in &mut records {
            if self.stage == CleanupStage::ServiceNames {
                record.service_name = self.cleanup.clean_service_name(&record.service_name);
            } else if self.cleanup.strip_leading_dots {
                record.service_name = record
                    .service_name
                    .trim_start_matches('.')
                    .trim_start()
                    .to_string();
            }
            if let Some(rule) = &self.currency_default {
                if rule.apply(record) {
                    defaulted += 1;
                }
            }
        }
        if defaulted > 0 {
            debug!("Defaulted currency on {} records", defaulted);
        }
        records
    }
}

impl Default for PostProcessor {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::tariff::HierarchicalId;
    use rust_decimal::Decimal;

    fn record(name: &str) -> TariffRecord {
        TariffRecord::new(HierarchicalId::with_leaf(&[1, 1], 1), 1, name)
    }

    #[test]
    fn test_currency_default_needs_amount() {
        let rule = CurrencyDefaultRule::new(Currency::Try);

        let mut with_amount = record("İşlem Ücreti");
        with_amount.min_amount = Some(Decimal::from(250));
        assert!(rule.apply(&mut with_amount));
        assert_eq!(with_amount.currency, Currency::Try);

        let mut without_amount = record("Kredi Kullandırım Ücreti");
        assert!(!rule.apply(&mut without_amount));
        assert_eq!(without_amount.currency, Currency::Unset);

        let mut explicit = record("Havale").with_currency(Currency::Usd);
        explicit.min_amount = Some(Decimal::from(5));
        assert!(!rule.apply(&mut explicit));
        assert_eq!(explicit.currency, Currency::Usd);
    }

    #[test]
    fn test_cleanup_replacements_in_order() {
        let cleanup = TokenCleanup::new(vec![
            Replacement::new("ÜcrTeRtYi", "Ücreti"),
            Replacement::new("Ücreti", "Ücreti (yıllık)"),
        ]);
        assert_eq!(cleanup.clean_line("Kart ÜcrTeRtYi"), "Kart Ücreti (yıllık)");
    }

    #[test]
    fn test_strip_leading_dots() {
        let cleanup = TokenCleanup::default().with_leading_dots_stripped(true);
        assert_eq!(cleanup.clean_service_name("..1 Ekspertiz"), "1 Ekspertiz");
        assert_eq!(cleanup.clean_service_name(". Tahsis"), "Tahsis");
    }

    #[test]
    fn test_finish_with_defaults() {
        let processor = PostProcessor::new();
        let mut first = record(".Para Çe Ücreti");
        first.min_amount = Some(Decimal::from(10));
        let records = processor.finish(vec![first, record("Kart ÜcrTeRtYi")]);

        assert_eq!(records[0].service_name, "Para Çekme Ücreti");
        assert_eq!(records[0].currency, Currency::Try);
        assert_eq!(records[1].service_name, "Kart Ücreti");
        assert_eq!(records[1].currency, Currency::Unset);
    }

    #[test]
    fn test_line_stage_leaves_names_alone() {
        let config = PostprocessConfig {
            cleanup_stage: CleanupStage::Lines,
            default_currency: None,
            ..PostprocessConfig::default()
        };
        let processor = PostProcessor::from_config(&config);

        let doc = processor.prepare_document(TextDocument::from_lines(["Kart ÜcrTeRtYi TRY 5"]));
        assert_eq!(doc.pages[0].lines, vec!["Kart Ücreti TRY 5"]);

        let mut amount_only = record("Kart ÜcrTeRtYi");
        amount_only.min_amount = Some(Decimal::from(5));
        let records = processor.finish(vec![amount_only]);
        assert_eq!(records[0].service_name, "Kart ÜcrTeRtYi");
        assert_eq!(records[0].currency, Currency::Unset);
    }

    #[test]
    fn test_service_name_stage_leaves_document_alone() {
        let processor = PostProcessor::new();
        let doc = TextDocument::from_lines(["Kart ÜcrTeRtYi"]);
        assert_eq!(processor.prepare_document(doc.clone()), doc);
    }
}
