//! Loading input files as page-structured text.

use std::path::Path;

use tracing::info;

use crate::error::{Result, TarifeError};
use crate::models::config::PdfConfig;
use crate::models::document::TextDocument;

/// Kind of input file, by extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    Pdf,
    /// Extracted text, pages separated by form feeds.
    Text,
}

impl SourceKind {
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "pdf" => Some(SourceKind::Pdf),
            "txt" | "text" => Some(SourceKind::Text),
            _ => None,
        }
    }
}

/// Read `path` into a [`TextDocument`].
pub fn read_document(path: &Path, config: &PdfConfig) -> Result<TextDocument> {
    let kind = SourceKind::from_path(path)
        .ok_or_else(|| TarifeError::UnsupportedInput(path.display().to_string()))?;

    let document = match kind {
        SourceKind::Text => {
            let text = std::fs::read_to_string(path)?;
            let mut document = TextDocument::from_text(&text);
            if config.max_pages > 0 {
                document.pages.truncate(config.max_pages);
            }
            document
        }
        SourceKind::Pdf => {
            let data = std::fs::read(path)?;
            read_pdf(&data, config)?
        }
    };

    info!(
        "Read {} pages, {} lines from {}",
        document.pages.len(),
        document.line_count(),
        path.display()
    );
    Ok(document)
}

/// Extract a [`TextDocument`] from PDF bytes.
#[cfg(feature = "pdf")]
pub fn read_pdf(data: &[u8], config: &PdfConfig) -> Result<TextDocument> {
    use crate::pdf::{PdfProcessor, PdfTextSource};

    let source = PdfTextSource::from_bytes(data)?;
    Ok(source.extract_document(config.max_pages)?)
}

#[cfg(not(feature = "pdf"))]
pub fn read_pdf(_data: &[u8], _config: &PdfConfig) -> Result<TextDocument> {
    Err(crate::error::PdfError::Disabled.into())
}
