//! Work-authorization blocker detection over raw job-posting text.
//!
//! A fixed phrase table is scanned in declaration order; the first phrase
//! found anywhere in the lower-cased posting wins. No scoring and no
//! severity ranking among kinds — a hit is a hard stop for the pipeline.

use serde::{Deserialize, Serialize};

/// Categories of work-authorization restrictions that OPT/F-1 candidates
/// cannot satisfy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlockerKind {
    SecurityClearance,
    CitizenshipRequired,
    PermanentResidency,
    GovernmentRestriction,
    ExportControl,
}

impl BlockerKind {
    /// Human-readable phrasing used in rejection copy.
    pub fn human_label(&self) -> &'static str {
        match self {
            BlockerKind::SecurityClearance => "security clearance",
            BlockerKind::CitizenshipRequired => "U.S. citizenship",
            BlockerKind::PermanentResidency => "permanent residency (green card/LPR)",
            BlockerKind::GovernmentRestriction => "government/federal authorization restrictions",
            BlockerKind::ExportControl => "ITAR/export control restrictions",
        }
    }
}

/// A detected blocker: the kind plus the original-case line that tripped it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockerMatch {
    pub kind: BlockerKind,
    pub matched_line: String,
}

struct BlockerRule {
    kind: BlockerKind,
    /// Lower-case phrases, checked in order.
    phrases: &'static [&'static str],
}

const BLOCKER_RULES: &[BlockerRule] = &[
    BlockerRule {
        kind: BlockerKind::SecurityClearance,
        phrases: &[
            "security clearance",
            "secret clearance",
            "top secret",
            "ts/sci",
            "public trust",
            "ssbi",
            "clearable",
            "able to obtain clearance",
            "dod clearance",
            "government clearance",
        ],
    },
    BlockerRule {
        kind: BlockerKind::CitizenshipRequired,
        phrases: &[
            "u.s. citizen",
            "us citizen",
            "united states citizen",
            "citizenship required",
            "must be a citizen",
            "only us citizens",
            "american citizen",
        ],
    },
    BlockerRule {
        kind: BlockerKind::PermanentResidency,
        phrases: &[
            "green card required",
            "permanent resident",
            "lawful permanent resident",
            "lpr",
            "gc holder",
        ],
    },
    BlockerRule {
        kind: BlockerKind::GovernmentRestriction,
        phrases: &[
            "federal employee",
            "government position",
            "federal agency",
            "dod contractor",
            "defense contractor",
            "federal contract",
            "government contractor",
        ],
    },
    BlockerRule {
        kind: BlockerKind::ExportControl,
        phrases: &["itar", "export control"],
    },
];

/// Scans job-posting text for authorization-restriction phrases.
///
/// Matching is case-insensitive. Rules and their phrases are tried in
/// declaration order; the first phrase present anywhere in the text wins,
/// regardless of where later-declared phrases occur. `None` means no
/// blocker — a definitive answer, not an uncertainty signal. Total over any
/// input, including the empty string.
pub fn detect_blocker(job_text: &str) -> Option<BlockerMatch> {
    let lower = job_text.to_lowercase();

    for rule in BLOCKER_RULES {
        for phrase in rule.phrases {
            if let Some(idx) = lower.find(phrase) {
                // The offset comes from the lower-cased text; the line is
                // extracted from the original so reported evidence keeps its
                // capitalization.
                let line = line_containing(job_text, idx);
                let matched_line = if line.is_empty() {
                    (*phrase).to_string()
                } else {
                    line.to_string()
                };
                return Some(BlockerMatch {
                    kind: rule.kind,
                    matched_line,
                });
            }
        }
    }

    None
}

/// Returns the trimmed line of `text` containing byte offset `idx`.
///
/// Lower-casing can shift byte lengths for some scripts, so `idx` may not be
/// a char boundary of `text`; scanning for ASCII `\n` over raw bytes keeps
/// the slice boundaries valid either way.
fn line_containing(text: &str, idx: usize) -> &str {
    let idx = idx.min(text.len());
    let bytes = text.as_bytes();

    let start = bytes[..idx]
        .iter()
        .rposition(|&b| b == b'\n')
        .map_or(0, |p| p + 1);
    let end = bytes[idx..]
        .iter()
        .position(|&b| b == b'\n')
        .map_or(text.len(), |p| idx + p);

    text[start..end].trim()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detects_security_clearance_case_insensitively() {
        let jd = "Responsibilities:\nMust hold an active DoD SECURITY CLEARANCE\nBuild things";
        let m = detect_blocker(jd).expect("blocker detected");
        assert_eq!(m.kind, BlockerKind::SecurityClearance);
        assert_eq!(m.matched_line, "Must hold an active DoD SECURITY CLEARANCE");
    }

    #[test]
    fn test_detects_each_kind() {
        let cases = [
            ("Requires TS/SCI eligibility", BlockerKind::SecurityClearance),
            ("Only US citizens may apply", BlockerKind::CitizenshipRequired),
            ("Green card required for this role", BlockerKind::PermanentResidency),
            ("You will join a defense contractor team", BlockerKind::GovernmentRestriction),
            ("Subject to ITAR regulations", BlockerKind::ExportControl),
        ];
        for (text, kind) in cases {
            let m = detect_blocker(text).unwrap_or_else(|| panic!("no blocker in {text:?}"));
            assert_eq!(m.kind, kind, "wrong kind for {text:?}");
        }
    }

    #[test]
    fn test_first_rule_wins_over_later_rules() {
        // Citizenship appears first in the text, but the clearance rule is
        // declared first and scans the whole text before citizenship does.
        let jd = "US citizen required.\nAlso needs a top secret clearance.";
        let m = detect_blocker(jd).unwrap();
        assert_eq!(m.kind, BlockerKind::SecurityClearance);
    }

    #[test]
    fn test_phrase_declaration_order_beats_text_position() {
        // "top secret" occurs earlier in the text, but "security clearance"
        // is declared earlier in the rule's phrase list.
        let jd = "top secret work\nlater line mentions security clearance";
        let m = detect_blocker(jd).unwrap();
        assert_eq!(m.matched_line, "later line mentions security clearance");
    }

    #[test]
    fn test_matched_line_is_trimmed_original_case() {
        let jd = "intro\n   Lawful Permanent Resident status needed   \noutro";
        let m = detect_blocker(jd).unwrap();
        assert_eq!(m.kind, BlockerKind::PermanentResidency);
        assert_eq!(m.matched_line, "Lawful Permanent Resident status needed");
    }

    #[test]
    fn test_single_line_input_without_newlines() {
        let m = detect_blocker("ITAR compliance is mandatory").unwrap();
        assert_eq!(m.kind, BlockerKind::ExportControl);
        assert_eq!(m.matched_line, "ITAR compliance is mandatory");
    }

    #[test]
    fn test_clean_posting_returns_none() {
        let jd = "Senior Rust Engineer\nRemote friendly\n5+ years systems experience";
        assert!(detect_blocker(jd).is_none());
    }

    #[test]
    fn test_empty_input_returns_none() {
        assert!(detect_blocker("").is_none());
    }

    #[test]
    fn test_kind_serializes_snake_case() {
        let json = serde_json::to_string(&BlockerKind::SecurityClearance).unwrap();
        assert_eq!(json, r#""security_clearance""#);
        let back: BlockerKind = serde_json::from_str(r#""export_control""#).unwrap();
        assert_eq!(back, BlockerKind::ExportControl);
    }

    #[test]
    fn test_human_labels() {
        assert_eq!(
            BlockerKind::CitizenshipRequired.human_label(),
            "U.S. citizenship"
        );
        assert_eq!(
            BlockerKind::GovernmentRestriction.human_label(),
            "government/federal authorization restrictions"
        );
    }

    #[test]
    fn test_line_containing_handles_out_of_range_offset() {
        assert_eq!(line_containing("abc", 10), "abc");
    }
}
