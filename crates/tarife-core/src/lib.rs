//! Core library for bank tariff list parsing.
//!
//! This crate provides:
//! - Line classification for text extracted from tariff PDFs
//! - Hierarchical identifier inheritance across id-less lines
//! - Field extraction (currency, amounts, rates, notes, update date)
//! - Post-processing (currency default, token cleanup)
//! - PDF and plain-text sources

pub mod error;
pub mod models;
pub mod pdf;
pub mod postprocess;
pub mod reader;
pub mod source;
pub mod tariff;

pub use error::{ConfigError, PdfError, Result, TarifeError};
pub use models::config::TarifeConfig;
pub use models::document::{Page, TextDocument};
pub use models::tariff::{Currency, HierarchicalId, Section, TariffRecord};
pub use postprocess::PostProcessor;
pub use reader::TariffReader;
pub use source::{SourceKind, read_document};
pub use tariff::{ParseOutcome, ParseStats, ParseWarning, TariffParser, TariffPipeline};
