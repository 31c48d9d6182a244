//! Line classification.
//!
//! Every line maps to exactly one [`LineClass`]. Matchers are evaluated in
//! the fixed order of [`MATCHERS`] and the first one that fires wins; a line
//! no matcher accepts is noise. Boilerplate markers only guard the
//! continuation matchers, so a header or detailed entry that happens to
//! contain one is still structural.

use regex::Regex;
use tracing::trace;

use crate::error::ConfigError;
use crate::models::config::ParserConfig;
use crate::models::tariff::HierarchicalId;

use super::rules::patterns::{
    DETAILED_ENTRY, DOTTED_TRIPLE, FUSED_REPORT_ID, LEADING_DIGIT, SECTION_HEADER,
};
use super::tracker::TrackerState;

/// Category of a single input line, with the substrings it captured.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineClass<'a> {
    /// `1.1 Kredi Tahsis ve Kredi Kullandırım`
    SectionHeader {
        id: HierarchicalId,
        title: &'a str,
    },

    /// `1 1 1.1.1Kredi Tahsis Ücreti TRY 100 ...`
    DetailedEntry {
        report_sequence: u32,
        /// Second report number some lists print next to the first.
        duplicate_report: Option<u32>,
        id: HierarchicalId,
        body: &'a str,
    },

    /// A line without identifiers that inherits them from tracker state.
    ContinuationEntry {
        trigger: ContinuationTrigger,
        body: &'a str,
    },

    Noise(NoiseKind),
}

impl<'a> LineClass<'a> {
    /// Text handed to field extraction, for record-producing lines.
    pub fn body(&self) -> Option<&'a str> {
        match self {
            LineClass::DetailedEntry { body, .. } | LineClass::ContinuationEntry { body, .. } => {
                Some(*body)
            }
            _ => None,
        }
    }
}

/// Why a line was taken as a continuation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContinuationTrigger {
    /// Report number and id fused with service text by the extractor.
    FusedId,
    /// Service-name keyword on an id-less line inside a section.
    ServiceKeyword,
}

/// Why a line was discarded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoiseKind {
    /// Form header or column caption.
    Boilerplate,
    /// Nothing matched.
    Unmatched,
}

/// Structural matchers in priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Matcher {
    SectionHeader,
    DetailedEntry,
    Boilerplate,
    FusedId,
    ServiceKeyword,
}

const MATCHERS: [Matcher; 5] = [
    Matcher::SectionHeader,
    Matcher::DetailedEntry,
    Matcher::Boilerplate,
    Matcher::FusedId,
    Matcher::ServiceKeyword,
];

/// Recognizes lines where text extraction interleaved the report number,
/// the id and the first word of the service name, e.g.
/// `1K.r1e.1d.i2 Kullandırım`.
///
/// Each pattern must capture the trailing service text in group 1.
#[derive(Debug, Clone)]
pub struct FusedIdPattern {
    patterns: Vec<Regex>,
}

impl FusedIdPattern {
    /// The built-in pattern only.
    pub fn builtin() -> Self {
        Self {
            patterns: vec![FUSED_REPORT_ID.clone()],
        }
    }

    /// No patterns; disables fused-id detection.
    pub fn none() -> Self {
        Self { patterns: Vec::new() }
    }

    /// Add a pattern. Fails if it does not compile or lacks a capture group.
    pub fn with_pattern(mut self, pattern: &str) -> Result<Self, ConfigError> {
        let regex = Regex::new(pattern).map_err(|e| ConfigError::Pattern {
            pattern: pattern.to_string(),
            reason: e.to_string(),
        })?;
        if regex.captures_len() < 2 {
            return Err(ConfigError::Pattern {
                pattern: pattern.to_string(),
                reason: "pattern needs a capture group for the service text".to_string(),
            });
        }
        self.patterns.push(regex);
        Ok(self)
    }

    /// Service text of a fused line, `None` if no pattern matches.
    pub fn service_text<'a>(&self, line: &'a str) -> Option<&'a str> {
        self.patterns.iter().find_map(|pattern| {
            pattern
                .captures(line)
                .and_then(|caps| caps.get(1))
                .map(|m| m.as_str().trim())
        })
    }
}

impl Default for FusedIdPattern {
    fn default() -> Self {
        Self::builtin()
    }
}

/// Assigns each line to a [`LineClass`].
#[derive(Debug, Clone)]
pub struct LineClassifier {
    fused: FusedIdPattern,
    /// Lowercased.
    service_keywords: Vec<String>,
    boilerplate_markers: Vec<String>,
}

impl LineClassifier {
    /// Create a classifier with the default vocabulary.
    pub fn new() -> Self {
        Self::with_vocabulary(&ParserConfig::default())
    }

    /// Create a classifier from parser configuration.
    pub fn from_config(config: &ParserConfig) -> Result<Self, ConfigError> {
        let mut fused = FusedIdPattern::builtin();
        for pattern in &config.fused_id_patterns {
            fused = fused.with_pattern(pattern)?;
        }
        Ok(Self::with_vocabulary(config).with_fused_pattern(fused))
    }

    fn with_vocabulary(config: &ParserConfig) -> Self {
        Self {
            fused: FusedIdPattern::builtin(),
            service_keywords: config
                .service_keywords
                .iter()
                .map(|k| k.to_lowercase())
                .collect(),
            boilerplate_markers: config.boilerplate_markers.clone(),
        }
    }

    /// Replace the fused-id predicate.
    pub fn with_fused_pattern(mut self, fused: FusedIdPattern) -> Self {
        self.fused = fused;
        self
    }

    /// Classify one trimmed, non-empty line against the current state.
    pub fn classify<'a>(&self, line: &'a str, state: &TrackerState) -> LineClass<'a> {
        let class = MATCHERS
            .iter()
            .find_map(|matcher| self.try_match(*matcher, line, state))
            .unwrap_or(LineClass::Noise(NoiseKind::Unmatched));
        trace!("classified {:?} as {:?}", line, class);
        class
    }

    fn try_match<'a>(
        &self,
        matcher: Matcher,
        line: &'a str,
        state: &TrackerState,
    ) -> Option<LineClass<'a>> {
        match matcher {
            Matcher::Boilerplate => self
                .boilerplate_markers
                .iter()
                .any(|marker| line.contains(marker.as_str()))
                .then_some(LineClass::Noise(NoiseKind::Boilerplate)),

            Matcher::SectionHeader => {
                if DOTTED_TRIPLE.is_match(line) {
                    return None;
                }
                let caps = SECTION_HEADER.captures(line)?;
                let id = HierarchicalId::parse(caps.get(1)?.as_str())?;
                Some(LineClass::SectionHeader {
                    id,
                    title: caps.get(2)?.as_str().trim(),
                })
            }

            Matcher::DetailedEntry => {
                let caps = DETAILED_ENTRY.captures(line)?;
                let report_sequence = parse_report(caps.get(1)?.as_str())?;
                let duplicate_report = match caps.get(2) {
                    Some(m) => Some(parse_report(m.as_str())?),
                    None => None,
                };
                let id = HierarchicalId::parse(caps.get(3)?.as_str())?;
                Some(LineClass::DetailedEntry {
                    report_sequence,
                    duplicate_report,
                    id,
                    body: caps.get(4).map_or("", |m| m.as_str().trim()),
                })
            }

            Matcher::FusedId => {
                self.fused
                    .service_text(line)
                    .map(|body| LineClass::ContinuationEntry {
                        trigger: ContinuationTrigger::FusedId,
                        body,
                    })
            }

            Matcher::ServiceKeyword => {
                if LEADING_DIGIT.is_match(line) || !state.has_prefix() {
                    return None;
                }
                let lowered = line.to_lowercase();
                self.service_keywords
                    .iter()
                    .any(|keyword| lowered.contains(keyword.as_str()))
                    .then_some(LineClass::ContinuationEntry {
                        trigger: ContinuationTrigger::ServiceKeyword,
                        body: line,
                    })
            }
        }
    }
}

/// Report numbers are positive; leading zeros are dropped.
fn parse_report(s: &str) -> Option<u32> {
    s.parse().ok().filter(|n| *n > 0)
}

impl Default for LineClassifier {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn in_section() -> TrackerState {
        TrackerState {
            current_prefix: vec![1, 1],
            ..TrackerState::default()
        }
    }

    fn id(s: &str) -> HierarchicalId {
        HierarchicalId::parse(s).unwrap()
    }

    #[test]
    fn test_section_header() {
        let classifier = LineClassifier::new();
        let class = classifier.classify("1.1 Kredi Tahsis ve Kredi Kullandırım", &TrackerState::default());
        assert_eq!(
            class,
            LineClass::SectionHeader {
                id: id("1.1"),
                title: "Kredi Tahsis ve Kredi Kullandırım",
            }
        );
    }

    #[test]
    fn test_dotted_triple_excludes_section_header() {
        let classifier = LineClassifier::new();
        // A section-shaped prefix followed by a full id is not a header.
        let class = classifier.classify("1.1 1.1.1 Kredi", &TrackerState::default());
        assert!(!matches!(class, LineClass::SectionHeader { .. }));
    }

    #[test]
    fn test_detailed_entry_with_duplicate_report() {
        let classifier = LineClassifier::new();
        let class = classifier.classify(
            "3 3 1.1.2İtibar/Niyet/Referans Mektubu Ücreti TRY 250",
            &TrackerState::default(),
        );
        assert_eq!(
            class,
            LineClass::DetailedEntry {
                report_sequence: 3,
                duplicate_report: Some(3),
                id: id("1.1.2"),
                body: "İtibar/Niyet/Referans Mektubu Ücreti TRY 250",
            }
        );
    }

    #[test]
    fn test_detailed_entry_single_report() {
        let classifier = LineClassifier::new();
        let class = classifier.classify("7 2.1.4 EFT Ücreti", &TrackerState::default());
        assert_eq!(
            class,
            LineClass::DetailedEntry {
                report_sequence: 7,
                duplicate_report: None,
                id: id("2.1.4"),
                body: "EFT Ücreti",
            }
        );
    }

    #[test]
    fn test_overflowing_report_is_noise() {
        let classifier = LineClassifier::new();
        let class = classifier.classify("99999999999 1.1.1Kredi", &TrackerState::default());
        assert_eq!(class, LineClass::Noise(NoiseKind::Unmatched));
    }

    #[test]
    fn test_fused_id_continuation_without_section() {
        let classifier = LineClassifier::new();
        let class = classifier.classify("1K.r1e.1d.i1 Tahsis", &TrackerState::default());
        assert_eq!(
            class,
            LineClass::ContinuationEntry {
                trigger: ContinuationTrigger::FusedId,
                body: "Tahsis",
            }
        );
    }

    #[test]
    fn test_keyword_continuation_requires_prefix() {
        let classifier = LineClassifier::new();
        let line = "Kredi Kullandırım Ücreti";

        assert_eq!(
            classifier.classify(line, &TrackerState::default()),
            LineClass::Noise(NoiseKind::Unmatched)
        );
        assert_eq!(
            classifier.classify(line, &in_section()),
            LineClass::ContinuationEntry {
                trigger: ContinuationTrigger::ServiceKeyword,
                body: line,
            }
        );
    }

    #[test]
    fn test_keyword_match_is_case_insensitive() {
        let classifier = LineClassifier::new();
        let class = classifier.classify("EKSPERTIZ ÜCRETI", &in_section());
        assert!(matches!(class, LineClass::ContinuationEntry { .. }));

        let class = classifier.classify("Limit TAHSIS", &in_section());
        assert!(matches!(class, LineClass::ContinuationEntry { .. }));
    }

    #[test]
    fn test_keyword_line_starting_with_digit_is_noise() {
        let classifier = LineClassifier::new();
        let class = classifier.classify("5 adet Kredi Tahsis", &in_section());
        assert_eq!(class, LineClass::Noise(NoiseKind::Unmatched));
    }

    #[test]
    fn test_boilerplate_wins_over_keywords() {
        let classifier = LineClassifier::new();
        assert_eq!(
            classifier.classify("FORM ADI: Ticari Müşteri Tarifesi", &in_section()),
            LineClass::Noise(NoiseKind::Boilerplate)
        );
        assert_eq!(
            classifier.classify("BANKA Kredi Tahsis Ücreti", &in_section()),
            LineClass::Noise(NoiseKind::Boilerplate)
        );
    }

    #[test]
    fn test_structural_lines_win_over_boilerplate() {
        let classifier = LineClassifier::new();
        assert_eq!(
            classifier.classify("2.3 BANKA KARTLARI", &TrackerState::default()),
            LineClass::SectionHeader {
                id: id("2.3"),
                title: "BANKA KARTLARI",
            }
        );
        assert_eq!(
            classifier.classify("5 5 2.3.5DİĞER BANKA ATM Ücreti TRY 10", &in_section()),
            LineClass::DetailedEntry {
                report_sequence: 5,
                duplicate_report: Some(5),
                id: id("2.3.5"),
                body: "DİĞER BANKA ATM Ücreti TRY 10",
            }
        );
    }

    #[test]
    fn test_zero_report_or_component_is_noise() {
        let classifier = LineClassifier::new();
        let state = TrackerState::default();
        assert_eq!(
            classifier.classify("0 0 0.0.0Sıfır TRY 1", &state),
            LineClass::Noise(NoiseKind::Unmatched)
        );
        assert_eq!(
            classifier.classify("0 1.1.1Kredi Tahsis Ücreti", &state),
            LineClass::Noise(NoiseKind::Unmatched)
        );
        assert_eq!(
            classifier.classify("4 4 1.0.2Kredi Tahsis Ücreti", &state),
            LineClass::Noise(NoiseKind::Unmatched)
        );
        assert_eq!(
            classifier.classify("0.1 Mevduat", &state),
            LineClass::Noise(NoiseKind::Unmatched)
        );
    }

    #[test]
    fn test_leading_zeros_are_normalized() {
        let classifier = LineClassifier::new();
        let class = classifier.classify("03 1.01.2Havale Ücreti TRY 5", &TrackerState::default());
        assert_eq!(
            class,
            LineClass::DetailedEntry {
                report_sequence: 3,
                duplicate_report: None,
                id: id("1.1.2"),
                body: "Havale Ücreti TRY 5",
            }
        );
    }

    #[test]
    fn test_custom_fused_pattern() {
        let mut config = ParserConfig::default();
        config.fused_id_patterns = vec![r"^\d+H\.a1v\.1a\.l\d+\s+(.+)$".to_string()];
        let classifier = LineClassifier::from_config(&config).unwrap();

        let class = classifier.classify("2H.a1v.1a.l3 Havale", &TrackerState::default());
        assert_eq!(
            class,
            LineClass::ContinuationEntry {
                trigger: ContinuationTrigger::FusedId,
                body: "Havale",
            }
        );
    }

    #[test]
    fn test_invalid_fused_pattern() {
        assert!(FusedIdPattern::builtin().with_pattern("(").is_err());
        assert!(FusedIdPattern::builtin().with_pattern(r"^\d+X").is_err());
    }

    #[test]
    fn test_disabled_fused_pattern() {
        let classifier = LineClassifier::new().with_fused_pattern(FusedIdPattern::none());
        let class = classifier.classify("1K.r1e.1d.i1 Tahsis", &TrackerState::default());
        assert_eq!(class, LineClass::Noise(NoiseKind::Unmatched));
    }
}
