//! Sequential line fold from text to tariff records.

use std::time::Instant;

use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::error::ConfigError;
use crate::models::config::ParserConfig;
use crate::models::document::TextDocument;
use crate::models::tariff::TariffRecord;

use super::builder::RecordBuilder;
use super::classifier::{LineClass, LineClassifier};
use super::fields::FieldExtractor;
use super::tracker::{IdentifierTracker, TrackerState};

/// Soft failures. None of them stop parsing.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize)]
pub enum ParseWarning {
    /// A continuation line appeared before any section or detailed entry;
    /// its id was built on the fallback prefix.
    #[error("page {page}, line {line}: no section context, fell back to prefix {fallback}")]
    UnresolvedIdentifier {
        page: u32,
        line: usize,
        fallback: String,
    },

    /// A record-producing line carried nothing but a service name.
    #[error("page {page}, line {line}: only a service name could be extracted")]
    EmptyExtraction { page: u32, line: usize },

    /// The document produced no records at all.
    #[error("document produced no records ({lines} lines read)")]
    MalformedDocument { lines: usize },
}

/// Line counts for one parsing pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ParseStats {
    pub pages: usize,
    pub lines: usize,
    pub sections: usize,
    pub detailed_entries: usize,
    pub continuation_entries: usize,
    pub noise_lines: usize,
    pub records: usize,
}

/// Result of parsing one document.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ParseOutcome {
    /// Records in input order.
    pub records: Vec<TariffRecord>,
    pub warnings: Vec<ParseWarning>,
    pub stats: ParseStats,
    /// Processing time in milliseconds.
    pub processing_time_ms: u64,
}

impl ParseOutcome {
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Trait for tariff document parsing.
pub trait TariffParser {
    /// Parse a page-structured document.
    fn parse_document(&self, document: &TextDocument) -> ParseOutcome;

    /// Parse raw text, pages separated by form feeds.
    fn parse_text(&self, text: &str) -> ParseOutcome {
        self.parse_document(&TextDocument::from_text(text))
    }

    /// Parse a single page of lines.
    fn parse_lines(&self, lines: &[&str]) -> ParseOutcome {
        self.parse_document(&TextDocument::from_lines(lines.iter().copied()))
    }
}

/// Classifier → tracker → field extractor → record builder, one line at a
/// time, in input order.
///
/// Holds no per-document state: every call starts from a fresh
/// [`TrackerState`], so one pipeline can serve many documents, including
/// from several threads.
#[derive(Debug, Clone)]
pub struct TariffPipeline {
    classifier: LineClassifier,
    tracker: IdentifierTracker,
    extractor: FieldExtractor,
    reset_state_per_page: bool,
}

impl TariffPipeline {
    /// Create a pipeline with default vocabulary and fallback prefix.
    pub fn new() -> Self {
        Self {
            classifier: LineClassifier::new(),
            tracker: IdentifierTracker::new(),
            extractor: FieldExtractor::new(),
            reset_state_per_page: false,
        }
    }

    /// Create a pipeline from parser configuration.
    pub fn from_config(config: &ParserConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            classifier: LineClassifier::from_config(config)?,
            tracker: IdentifierTracker::from_config(config)?,
            extractor: FieldExtractor::from_config(config),
            reset_state_per_page: config.reset_state_per_page,
        })
    }

    /// Start each page from an empty tracker state.
    pub fn with_state_reset_per_page(mut self, reset: bool) -> Self {
        self.reset_state_per_page = reset;
        self
    }
}

impl Default for TariffPipeline {
    fn default() -> Self {
        Self::new()
    }
}

impl TariffParser for TariffPipeline {
    fn parse_document(&self, document: &TextDocument) -> ParseOutcome {
        let start = Instant::now();
        let mut builder = RecordBuilder::new();
        let mut warnings = Vec::new();
        let mut stats = ParseStats {
            pages: document.pages.len(),
            ..ParseStats::default()
        };
        let mut state = TrackerState::new();

        for page in &document.pages {
            if self.reset_state_per_page {
                state = TrackerState::new();
            }

            for (index, line) in page.lines.iter().enumerate() {
                let line_no = index + 1;
                stats.lines += 1;

                let class = self.classifier.classify(line, &state);
                match &class {
                    LineClass::SectionHeader { .. } => stats.sections += 1,
                    LineClass::DetailedEntry { .. } => stats.detailed_entries += 1,
                    LineClass::ContinuationEntry { .. } => stats.continuation_entries += 1,
                    LineClass::Noise(_) => stats.noise_lines += 1,
                }

                let advance = self.tracker.advance(state, &class);
                state = advance.state;

                if advance.unresolved {
                    let warning = ParseWarning::UnresolvedIdentifier {
                        page: page.number,
                        line: line_no,
                        fallback: self.tracker.fallback_prefix().to_string(),
                    };
                    warn!("{}", warning);
                    warnings.push(warning);
                }

                let (Some(ids), Some(body)) = (advance.assigned, class.body()) else {
                    continue;
                };

                let fields = self.extractor.extract(body);
                if !fields.has_data() {
                    let warning = ParseWarning::EmptyExtraction {
                        page: page.number,
                        line: line_no,
                    };
                    debug!("{}", warning);
                    warnings.push(warning);
                }

                let record = builder.push(ids, fields);
                debug!(
                    "record {} | {} | {}",
                    record.report_sequence, record.hierarchical_id, record.service_name
                );
            }
        }

        stats.records = builder.len();
        if builder.is_empty() {
            let warning = ParseWarning::MalformedDocument { lines: stats.lines };
            warn!("{}", warning);
            warnings.push(warning);
        }

        info!(
            "Parsed {} records from {} lines on {} pages ({} sections, {} continuations)",
            stats.records, stats.lines, stats.pages, stats.sections, stats.continuation_entries
        );

        ParseOutcome {
            records: builder.finish(),
            warnings,
            stats,
            processing_time_ms: start.elapsed().as_millis() as u64,
        }
    }
}
