//! Error types for the tarife-core library.

use thiserror::Error;

/// Main error type for the tarife library.
///
/// Line parsing itself never fails; these errors come from the
/// collaborators around it (text sources, configuration, I/O).
#[derive(Error, Debug)]
pub enum TarifeError {
    /// PDF processing error.
    #[error("PDF error: {0}")]
    Pdf(#[from] PdfError),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Input file type is not recognized.
    #[error("unsupported input: {0}")]
    UnsupportedInput(String),
}

/// Errors related to PDF processing.
#[derive(Error, Debug)]
pub enum PdfError {
    /// Failed to open/parse the PDF file.
    #[error("failed to parse PDF: {0}")]
    Parse(String),

    /// Failed to extract text from PDF.
    #[error("failed to extract text: {0}")]
    TextExtraction(String),

    /// The PDF is encrypted and cannot be processed.
    #[error("PDF is encrypted")]
    Encrypted,

    /// The PDF is empty or has no pages.
    #[error("PDF has no pages")]
    NoPages,

    /// Built without the `pdf` feature.
    #[error("PDF support is not enabled in this build")]
    Disabled,
}

/// Errors raised while loading or compiling configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The configuration file could not be decoded.
    #[error("invalid configuration file: {0}")]
    Decode(#[from] serde_json::Error),

    /// A configured pattern is not a valid regular expression.
    #[error("invalid pattern {pattern:?}: {reason}")]
    Pattern { pattern: String, reason: String },

    /// A configured hierarchical id could not be parsed.
    #[error("invalid hierarchical id {0:?}")]
    HierarchicalId(String),
}

/// Result type for the tarife library.
pub type Result<T> = std::result::Result<T, TarifeError>;
