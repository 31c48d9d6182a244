//! Configuration structures for the tariff pipeline.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{ConfigError, TarifeError};
use crate::models::tariff::Currency;

/// Main configuration for the tarife pipeline.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TarifeConfig {
    /// Line classification and identifier inheritance.
    pub parser: ParserConfig,

    /// Record post-processing applied outside the core.
    pub postprocess: PostprocessConfig,

    /// PDF text extraction.
    pub pdf: PdfConfig,

    /// Tabular output.
    pub output: OutputConfig,
}

/// Line classifier and identifier tracker configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ParserConfig {
    /// Keywords that mark an id-less line as a service continuation.
    /// Matched case-insensitively as substrings.
    pub service_keywords: Vec<String>,

    /// Tokens copied into a record's notes when seen in the data part.
    /// Matched exactly.
    pub notes_keywords: Vec<String>,

    /// Substrings marking form headers and column captions.
    pub boilerplate_markers: Vec<String>,

    /// Extra fused report/id patterns, in addition to the built-in one.
    /// Each must have one capture group holding the service text.
    pub fused_id_patterns: Vec<String>,

    /// Prefix used when a continuation line appears before any section.
    pub fallback_prefix: String,

    /// Start every page with a fresh tracker state.
    pub reset_state_per_page: bool,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            service_keywords: vec![
                "ücreti".to_string(),
                "kullandırım".to_string(),
                "tahsis".to_string(),
            ],
            notes_keywords: vec![
                "BSMV".to_string(),
                "KKDF".to_string(),
                "Hariç".to_string(),
                "Dahil".to_string(),
            ],
            boilerplate_markers: vec![
                "FORM ADI".to_string(),
                "FORM KODU".to_string(),
                "BANKA".to_string(),
                "VegaSıraNoRaporSıraNo".to_string(),
            ],
            fused_id_patterns: Vec::new(),
            fallback_prefix: "1.1".to_string(),
            reset_state_per_page: false,
        }
    }
}

/// Where token cleanup is applied.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CleanupStage {
    /// Rewrite input lines before classification.
    Lines,
    /// Rewrite service names of finished records.
    #[default]
    ServiceNames,
}

/// A single known corruption and its correction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Replacement {
    pub from: String,
    pub to: String,
}

impl Replacement {
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
        }
    }
}

/// Post-processing configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PostprocessConfig {
    /// Currency assigned to records that have an amount but no currency.
    /// `None` disables the rule.
    pub default_currency: Option<Currency>,

    /// Ordered substring replacements.
    pub token_cleanup: Vec<Replacement>,

    /// Stage the replacements run at.
    pub cleanup_stage: CleanupStage,

    /// Drop leading dots left over from split ids in service names.
    pub strip_leading_dots: bool,
}

impl Default for PostprocessConfig {
    fn default() -> Self {
        Self {
            default_currency: Some(Currency::Try),
            token_cleanup: vec![
                Replacement::new("ÜcrTeRtYi", "Ücreti"),
                Replacement::new("Para Çe ", "Para Çekme "),
            ],
            cleanup_stage: CleanupStage::ServiceNames,
            strip_leading_dots: true,
        }
    }
}

/// PDF processing configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PdfConfig {
    /// Maximum pages to read (0 = unlimited).
    pub max_pages: usize,
}

impl Default for PdfConfig {
    fn default() -> Self {
        Self { max_pages: 0 }
    }
}

/// Tabular output configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Prefix CSV output with a UTF-8 byte order mark.
    pub utf8_bom: bool,

    /// `chrono` format string for the update date column.
    pub date_format: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            utf8_bom: true,
            date_format: "%d.%m.%Y".to_string(),
        }
    }
}

impl TarifeConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self, TarifeError> {
        let content = std::fs::read_to_string(path)?;
        let config = serde_json::from_str(&content).map_err(ConfigError::from)?;
        Ok(config)
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &Path) -> Result<(), TarifeError> {
        let content = serde_json::to_string_pretty(self).map_err(ConfigError::from)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}
