//! Page-structured text input.

use serde::{Deserialize, Serialize};

/// Form feed, the page separator in extracted text files.
pub const PAGE_BREAK: char = '\u{000C}';

/// One page of trimmed, non-empty lines.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page {
    /// Page number (1-indexed).
    pub number: u32,
    pub lines: Vec<String>,
}

impl Page {
    /// Build a page from raw text, trimming lines and dropping empty ones.
    pub fn from_text(number: u32, text: &str) -> Self {
        Self {
            number,
            lines: text
                .lines()
                .map(str::trim)
                .filter(|line| !line.is_empty())
                .map(str::to_string)
                .collect(),
        }
    }
}

/// The text of one logical document, in reading order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextDocument {
    pub pages: Vec<Page>,
}

impl TextDocument {
    /// Split `text` into pages on form feeds.
    pub fn from_text(text: &str) -> Self {
        Self::from_pages(text.split(PAGE_BREAK))
    }

    /// One page per item.
    pub fn from_pages<I, S>(pages: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            pages: pages
                .into_iter()
                .enumerate()
                .map(|(i, text)| Page::from_text(i as u32 + 1, text.as_ref()))
                .collect(),
        }
    }

    /// A single-page document from already split lines.
    pub fn from_lines<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let lines = lines
            .into_iter()
            .map(|line| line.as_ref().trim().to_string())
            .filter(|line| !line.is_empty())
            .collect();
        Self {
            pages: vec![Page { number: 1, lines }],
        }
    }

    pub fn line_count(&self) -> usize {
        self.pages.iter().map(|p| p.lines.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.line_count() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_text_splits_pages_and_trims() {
        let doc = TextDocument::from_text("  1.1 Kredi \n\n a \u{000C}\n  b\n");
        assert_eq!(doc.pages.len(), 2);
        assert_eq!(doc.pages[0].lines, vec!["1.1 Kredi", "a"]);
        assert_eq!(doc.pages[1].number, 2);
        assert_eq!(doc.pages[1].lines, vec!["b"]);
        assert_eq!(doc.line_count(), 3);
    }

    #[test]
    fn test_blank_text_is_empty() {
        assert!(TextDocument::from_text(" \n \u{000C} ").is_empty());
        assert!(TextDocument::from_lines(["", "  "]).is_empty());
    }
}
