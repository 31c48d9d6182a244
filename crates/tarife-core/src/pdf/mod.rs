//! PDF text extraction.

#[cfg(feature = "pdf")]
mod extractor;

#[cfg(feature = "pdf")]
pub use extractor::PdfTextSource;

use tracing::{debug, warn};

use crate::error::PdfError;
use crate::models::document::TextDocument;

/// Result type for PDF operations.
pub type Result<T> = std::result::Result<T, PdfError>;

/// Trait for PDF text sources.
pub trait PdfProcessor {
    /// Load a PDF from bytes.
    fn load(&mut self, data: &[u8]) -> Result<()>;

    /// Get the number of pages in the PDF.
    fn page_count(&self) -> u32;

    /// Extract text from the entire PDF in one pass.
    fn extract_text(&self) -> Result<String>;

    /// Extract text from a specific page (1-indexed).
    fn extract_page_text(&self, page: u32) -> Result<String>;

    /// Extract a page-structured document, reading at most `max_pages`
    /// pages (0 = all).
    ///
    /// Pages are read one at a time. When no page yields any text, the whole
    /// document is extracted in one pass and split on form feeds instead.
    fn extract_document(&self, max_pages: usize) -> Result<TextDocument> {
        let page_count = self.page_count();
        if page_count == 0 {
            return Err(PdfError::NoPages);
        }
        let limit = match max_pages {
            0 => page_count,
            n => page_count.min(n as u32),
        };

        let mut pages = Vec::with_capacity(limit as usize);
        for page in 1..=limit {
            match self.extract_page_text(page) {
                Ok(text) => pages.push(text),
                Err(e) => {
                    warn!("Page {}: {}", page, e);
                    pages.push(String::new());
                }
            }
        }

        if pages.iter().any(|text| !text.trim().is_empty()) {
            return Ok(TextDocument::from_pages(pages));
        }

        debug!("Per-page extraction found no text, extracting whole document");
        let mut document = TextDocument::from_text(&self.extract_text()?);
        document.pages.truncate(limit as usize);
        Ok(document)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct StubPdf {
        pages: Vec<&'static str>,
        whole: &'static str,
    }

    impl PdfProcessor for StubPdf {
        fn load(&mut self, _data: &[u8]) -> Result<()> {
            Ok(())
        }

        fn page_count(&self) -> u32 {
            self.pages.len() as u32
        }

        fn extract_text(&self) -> Result<String> {
            Ok(self.whole.to_string())
        }

        fn extract_page_text(&self, page: u32) -> Result<String> {
            match self.pages[(page - 1) as usize] {
                "!" => Err(PdfError::TextExtraction("broken stream".to_string())),
                text => Ok(text.to_string()),
            }
        }
    }

    #[test]
    fn test_extract_document_per_page() {
        let pdf = StubPdf {
            pages: vec!["1.1 Kredi\n", "!", "Tahsis Ücreti"],
            whole: "",
        };
        let doc = pdf.extract_document(0).unwrap();
        assert_eq!(doc.pages.len(), 3);
        assert!(doc.pages[1].lines.is_empty());
        assert_eq!(doc.pages[2].number, 3);

        let doc = pdf.extract_document(1).unwrap();
        assert_eq!(doc.pages.len(), 1);
    }

    #[test]
    fn test_extract_document_falls_back_to_whole_text() {
        let pdf = StubPdf {
            pages: vec!["", " "],
            whole: "1.1 Kredi\u{000C}Tahsis Ücreti\u{000C}Ek",
        };
        let doc = pdf.extract_document(2).unwrap();
        assert_eq!(doc.pages.len(), 2);
        assert_eq!(doc.pages[1].lines, vec!["Tahsis Ücreti"]);
    }

    #[test]
    fn test_extract_document_without_pages() {
        let pdf = StubPdf {
            pages: Vec::new(),
            whole: "",
        };
        assert!(matches!(pdf.extract_document(0), Err(PdfError::NoPages)));
    }
}
