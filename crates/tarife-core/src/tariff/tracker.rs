//! Identifier inheritance.
//!
//! [`TrackerState`] is an explicit value threaded through the line fold.
//! [`IdentifierTracker::advance`] consumes the previous state and returns the
//! next one, so each transition can be tested in isolation.

use tracing::debug;

use crate::error::ConfigError;
use crate::models::config::ParserConfig;
use crate::models::tariff::{HierarchicalId, Section};

use super::classifier::LineClass;

/// Per-document inheritance state.
///
/// An empty `current_prefix` is the "no section yet" state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TrackerState {
    /// Section opened by the last header line.
    pub current_section: Option<Section>,
    /// Leading components of the last seen id.
    pub current_prefix: Vec<u32>,
    /// Report sequence of the last record.
    pub report_counter: u32,
}

impl TrackerState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a section or detailed entry has been seen.
    pub fn has_prefix(&self) -> bool {
        !self.current_prefix.is_empty()
    }
}

/// Identifiers a record-producing line ends up with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssignedIds {
    pub hierarchical_id: HierarchicalId,
    pub report_sequence: u32,
    /// Synthesized from tracker state rather than read off the line.
    pub inherited: bool,
}

/// Result of one transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Advance {
    pub state: TrackerState,
    pub assigned: Option<AssignedIds>,
    /// A continuation arrived before any prefix existed and the fallback
    /// prefix was used.
    pub unresolved: bool,
}

/// Applies line classes to [`TrackerState`].
#[derive(Debug, Clone)]
pub struct IdentifierTracker {
    fallback_prefix: HierarchicalId,
}

impl IdentifierTracker {
    /// Create a tracker whose fallback prefix is `1.1`.
    pub fn new() -> Self {
        Self {
            fallback_prefix: HierarchicalId::with_leaf(&[1], 1),
        }
    }

    /// Create a tracker from parser configuration.
    pub fn from_config(config: &ParserConfig) -> Result<Self, ConfigError> {
        let prefix: HierarchicalId = config.fallback_prefix.parse()?;
        Ok(Self::new().with_fallback_prefix(prefix))
    }

    /// Prefix used for continuation lines seen before any section.
    pub fn with_fallback_prefix(mut self, prefix: HierarchicalId) -> Self {
        self.fallback_prefix = prefix;
        self
    }

    pub fn fallback_prefix(&self) -> &HierarchicalId {
        &self.fallback_prefix
    }

    /// Apply one classified line.
    pub fn advance(&self, mut state: TrackerState, class: &LineClass<'_>) -> Advance {
        match class {
            LineClass::SectionHeader { id, title } => {
                debug!("section {} {}", id, title);
                state.current_prefix = id.components().to_vec();
                state.current_section = Some(Section {
                    id: id.clone(),
                    title: title.to_string(),
                });
                state.report_counter = 0;
                Advance {
                    state,
                    assigned: None,
                    unresolved: false,
                }
            }

            LineClass::DetailedEntry {
                report_sequence,
                id,
                ..
            } => {
                state.current_prefix = id.prefix().to_vec();
                state.report_counter = *report_sequence;
                Advance {
                    state,
                    assigned: Some(AssignedIds {
                        hierarchical_id: id.clone(),
                        report_sequence: *report_sequence,
                        inherited: false,
                    }),
                    unresolved: false,
                }
            }

            LineClass::ContinuationEntry { .. } => {
                state.report_counter = state.report_counter.saturating_add(1);
                let unresolved = !state.has_prefix();
                let base = if unresolved {
                    self.fallback_prefix.components()
                } else {
                    &state.current_prefix
                };
                let hierarchical_id = synthesize(base, state.report_counter);
                let report_sequence = state.report_counter;
                Advance {
                    state,
                    assigned: Some(AssignedIds {
                        hierarchical_id,
                        report_sequence,
                        inherited: true,
                    }),
                    unresolved,
                }
            }

            LineClass::Noise(_) => Advance {
                state,
                assigned: None,
                unresolved: false,
            },
        }
    }
}

impl Default for IdentifierTracker {
    fn default() -> Self {
        Self::new()
    }
}

/// `prefix.counter`, with the prefix padded at the front with `1`s to two
/// components.
fn synthesize(prefix: &[u32], counter: u32) -> HierarchicalId {
    let mut components = Vec::with_capacity(prefix.len().max(2) + 1);
    components.extend(std::iter::repeat_n(1, 2usize.saturating_sub(prefix.len())));
    components.extend_from_slice(prefix);
    HierarchicalId::with_leaf(&components, counter)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tariff::classifier::{ContinuationTrigger, NoiseKind};

    fn id(s: &str) -> HierarchicalId {
        HierarchicalId::parse(s).unwrap()
    }

    fn continuation(body: &str) -> LineClass<'_> {
        LineClass::ContinuationEntry {
            trigger: ContinuationTrigger::ServiceKeyword,
            body,
        }
    }

    #[test]
    fn test_section_header_resets_counter() {
        let tracker = IdentifierTracker::new();
        let state = TrackerState {
            current_prefix: vec![1, 1],
            report_counter: 9,
            ..TrackerState::default()
        };

        let advance = tracker.advance(
            state,
            &LineClass::SectionHeader {
                id: id("2.3"),
                title: "Dış Ticaret",
            },
        );

        assert_eq!(advance.assigned, None);
        assert_eq!(advance.state.current_prefix, vec![2, 3]);
        assert_eq!(advance.state.report_counter, 0);
        assert_eq!(
            advance.state.current_section.map(|s| s.title),
            Some("Dış Ticaret".to_string())
        );
    }

    #[test]
    fn test_detailed_entry_uses_explicit_ids() {
        let tracker = IdentifierTracker::new();
        let advance = tracker.advance(
            TrackerState::new(),
            &LineClass::DetailedEntry {
                report_sequence: 4,
                duplicate_report: Some(4),
                id: id("1.2.3"),
                body: "Teminat Mektubu Ücreti",
            },
        );

        assert_eq!(
            advance.assigned,
            Some(AssignedIds {
                hierarchical_id: id("1.2.3"),
                report_sequence: 4,
                inherited: false,
            })
        );
        assert_eq!(advance.state.current_prefix, vec![1, 2]);
        assert_eq!(advance.state.report_counter, 4);
    }

    #[test]
    fn test_continuation_increments_counter() {
        let tracker = IdentifierTracker::new();
        let state = TrackerState {
            current_prefix: vec![1, 1],
            report_counter: 1,
            ..TrackerState::default()
        };

        let advance = tracker.advance(state, &continuation("Kredi Kullandırım Ücreti"));
        assert_eq!(advance.state.report_counter, 2);
        assert!(!advance.unresolved);

        let assigned = advance.assigned.unwrap();
        assert_eq!(assigned.hierarchical_id, id("1.1.2"));
        assert_eq!(assigned.report_sequence, 2);
        assert!(assigned.inherited);

        let advance = tracker.advance(advance.state, &continuation("Tahsis"));
        assert_eq!(advance.assigned.unwrap().hierarchical_id, id("1.1.3"));
    }

    #[test]
    fn test_continuation_without_prefix_uses_fallback() {
        let tracker = IdentifierTracker::new();
        let advance = tracker.advance(TrackerState::new(), &continuation("Tahsis"));

        assert!(advance.unresolved);
        assert_eq!(advance.assigned.unwrap().hierarchical_id, id("1.1.1"));
        // The fallback is not adopted as the current prefix.
        assert!(!advance.state.has_prefix());
        assert_eq!(advance.state.report_counter, 1);
    }

    #[test]
    fn test_configured_fallback_prefix() {
        let config = ParserConfig {
            fallback_prefix: "9.4".to_string(),
            ..ParserConfig::default()
        };
        let tracker = IdentifierTracker::from_config(&config).unwrap();
        let advance = tracker.advance(TrackerState::new(), &continuation("Tahsis"));
        assert_eq!(advance.assigned.unwrap().hierarchical_id, id("9.4.1"));

        let config = ParserConfig {
            fallback_prefix: "x".to_string(),
            ..ParserConfig::default()
        };
        assert!(IdentifierTracker::from_config(&config).is_err());
    }

    #[test]
    fn test_short_prefix_is_padded() {
        assert_eq!(synthesize(&[], 3), id("1.1.3"));
        assert_eq!(synthesize(&[5], 2), id("1.5.2"));
        assert_eq!(synthesize(&[2, 4], 1), id("2.4.1"));
        assert_eq!(synthesize(&[2, 4, 6], 1), id("2.4.6.1"));
    }

    #[test]
    fn test_noise_leaves_state_untouched() {
        let tracker = IdentifierTracker::new();
        let state = TrackerState {
            current_prefix: vec![3, 1],
            report_counter: 12,
            ..TrackerState::default()
        };

        let advance = tracker.advance(state.clone(), &LineClass::Noise(NoiseKind::Boilerplate));
        assert_eq!(advance.state, state);
        assert_eq!(advance.assigned, None);
    }
}
