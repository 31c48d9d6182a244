//! Tariff line parsing.
//!
//! A document is folded line by line: [`LineClassifier`] decides what a line
//! is, [`IdentifierTracker`] assigns or inherits its identifiers,
//! [`FieldExtractor`] reads the typed fields and [`RecordBuilder`] collects
//! the result. [`TariffPipeline`] wires the four together.

pub mod builder;
pub mod classifier;
pub mod fields;
mod pipeline;
pub mod rules;
pub mod tracker;

pub use builder::RecordBuilder;
pub use classifier::{ContinuationTrigger, FusedIdPattern, LineClass, LineClassifier, NoiseKind};
pub use fields::{ExtractedFields, FieldExtractor, split_service_name};
pub use pipeline::{ParseOutcome, ParseStats, ParseWarning, TariffParser, TariffPipeline};
pub use tracker::{Advance, AssignedIds, IdentifierTracker, TrackerState};
