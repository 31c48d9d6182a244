//! Data models for tariff documents and records.

pub mod config;
pub mod document;
pub mod tariff;

pub use config::{
    CleanupStage, OutputConfig, ParserConfig, PdfConfig, PostprocessConfig, Replacement,
    TarifeConfig,
};
pub use document::{PAGE_BREAK, Page, TextDocument};
pub use tariff::{Currency, HierarchicalId, Section, TariffRecord};
