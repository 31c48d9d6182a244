//! End-to-end reading of tariff files.

use std::path::Path;

use tracing::info;

use crate::error::Result;
use crate::models::config::{PdfConfig, TarifeConfig};
use crate::models::document::TextDocument;
use crate::postprocess::PostProcessor;
use crate::source::read_document;
use crate::tariff::{ParseOutcome, TariffParser, TariffPipeline};

/// Source, parser and post-processing configured from one [`TarifeConfig`].
#[derive(Debug, Clone)]
pub struct TariffReader {
    pipeline: TariffPipeline,
    postprocess: PostProcessor,
    pdf: PdfConfig,
}

impl TariffReader {
    /// Create a reader with default configuration.
    pub fn new() -> Self {
        Self {
            pipeline: TariffPipeline::new(),
            postprocess: PostProcessor::new(),
            pdf: PdfConfig::default(),
        }
    }

    /// Create a reader from configuration. Fails on invalid parser patterns
    /// or fallback prefix.
    pub fn from_config(config: &TarifeConfig) -> Result<Self> {
        Ok(Self {
            pipeline: TariffPipeline::from_config(&config.parser)?,
            postprocess: PostProcessor::from_config(&config.postprocess),
            pdf: config.pdf.clone(),
        })
    }

    /// Parse an already loaded document.
    pub fn parse(&self, document: TextDocument) -> ParseOutcome {
        let document = self.postprocess.prepare_document(document);
        let mut outcome = self.pipeline.parse_document(&document);
        outcome.records = self.postprocess.finish(outcome.records);
        outcome
    }

    /// Load and parse a PDF or text file.
    pub fn read_file(&self, path: &Path) -> Result<ParseOutcome> {
        let document = read_document(path, &self.pdf)?;
        let outcome = self.parse(document);
        info!(
            "{}: {} records, {} warnings",
            path.display(),
            outcome.records.len(),
            outcome.warnings.len()
        );
        Ok(outcome)
    }
}

impl Default for TariffReader {
    fn default() -> Self {
        Self::new()
    }
}
