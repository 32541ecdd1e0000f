//! Post-oracle validation. The oracle's output is untrusted input: every
//! evidence quote is re-checked against the restricted résumé text, list
//! sizes are re-capped, and free-text fields are normalized. No field from
//! the oracle reaches a response payload without passing through here.

use std::collections::HashSet;

use crate::matching::oracle::{MatchLevel, RawComparison, RequirementItem};

/// Shown when the oracle returns a blank summary.
const FALLBACK_SUMMARY: &str = "Overall fit looks workable; tighten keyword alignment and ensure every claimed match has explicit resume evidence.";

const MAX_SKILLS: usize = 5;
const MAX_GAPS: usize = 6;
const MAX_IMPROVEMENTS: usize = 6;
const MAX_REQUIREMENTS: usize = 10;
const MAX_SUGGESTIONS: usize = 3;

/// Applies every hygiene rule to a raw comparison, yielding the only form
/// the scorer and report builder ever see.
pub fn sanitize_comparison(raw: RawComparison, allowed_text: &str) -> RawComparison {
    RawComparison {
        matched_skills_top5: dedupe_capped(raw.matched_skills_top5, MAX_SKILLS),
        missing_must_have_skills_top5: dedupe_capped(raw.missing_must_have_skills_top5, MAX_SKILLS),
        missing_preferred_skills_top5: dedupe_capped(raw.missing_preferred_skills_top5, MAX_SKILLS),
        experience_required: raw.experience_required.trim().to_string(),
        experience_candidate: raw.experience_candidate.trim().to_string(),
        experience_match: raw.experience_match,
        location_required: raw.location_required.trim().to_string(),
        location_candidate: raw.location_candidate.trim().to_string(),
        location_match: raw.location_match,
        gaps_top6: raw.gaps_top6.into_iter().take(MAX_GAPS).collect(),
        improvements_top6: raw.improvements_top6.into_iter().take(MAX_IMPROVEMENTS).collect(),
        requirements_top10: validate_requirements(raw.requirements_top10, allowed_text),
        summary: normalize_summary(&raw.summary),
    }
}

/// Enforces the evidence integrity rule on each requirement and re-caps the
/// list at ten items.
pub fn validate_requirements(
    items: Vec<RequirementItem>,
    allowed_text: &str,
) -> Vec<RequirementItem> {
    items
        .into_iter()
        .take(MAX_REQUIREMENTS)
        .map(|item| validate_item(item, allowed_text))
        .collect()
}

/// The evidence rule, applied in order:
///
/// 1. Evidence that is not a verbatim substring of the restricted résumé
///    text is fabricated: it is cleared and the item is forced to `Missing`.
/// 2. A claimed match above `Missing` without non-empty evidence is
///    unsupported and is downgraded to `Missing` (the empty quote itself is
///    left in place, distinguishing "claimed nothing" from "claimed badly").
/// 3. `Exact` items carry no suggestions; everything else keeps at most 3.
fn validate_item(mut item: RequirementItem, allowed_text: &str) -> RequirementItem {
    if let Some(evidence) = &item.resume_evidence {
        if !allowed_text.contains(evidence.as_str()) {
            item.resume_evidence = None;
            item.match_level = MatchLevel::Missing;
        }
    }

    let has_evidence = item
        .resume_evidence
        .as_deref()
        .is_some_and(|evidence| !evidence.is_empty());
    if item.match_level > MatchLevel::Missing && !has_evidence {
        item.match_level = MatchLevel::Missing;
    }

    if item.match_level == MatchLevel::Exact {
        item.suggestions.clear();
    } else {
        item.suggestions.truncate(MAX_SUGGESTIONS);
    }

    item
}

/// Trims entries, drops blanks, removes exact duplicates (first occurrence
/// wins), and truncates to `cap`.
pub fn dedupe_capped(values: Vec<String>, cap: usize) -> Vec<String> {
    let mut seen: HashSet<String> = HashSet::new();
    let mut out: Vec<String> = Vec::new();

    for value in values {
        let trimmed = value.trim();
        if trimmed.is_empty() || !seen.insert(trimmed.to_string()) {
            continue;
        }
        out.push(trimmed.to_string());
        if out.len() == cap {
            break;
        }
    }

    out
}

fn normalize_summary(summary: &str) -> String {
    let trimmed = summary.trim();
    if trimmed.is_empty() {
        FALLBACK_SUMMARY.to_string()
    } else {
        trimmed.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matching::oracle::{GapItem, ImprovementItem};

    const ALLOWED: &str = "SUMMARY:\nBackend engineer.\n\nSKILLS:\nPython, Kafka\n\nEXPERIENCE:\nAcme Corp\n";

    fn requirement(level: MatchLevel, evidence: Option<&str>) -> RequirementItem {
        RequirementItem {
            category: "Tools & Technologies".to_string(),
            requirement: "Python".to_string(),
            match_level: level,
            resume_evidence: evidence.map(str::to_string),
            suggestions: vec!["Add a bullet".to_string()],
            priority: Default::default(),
        }
    }

    #[test]
    fn test_verbatim_evidence_survives() {
        let out = validate_requirements(
            vec![requirement(MatchLevel::Exact, Some("Python, Kafka"))],
            ALLOWED,
        );
        assert_eq!(out[0].match_level, MatchLevel::Exact);
        assert_eq!(out[0].resume_evidence.as_deref(), Some("Python, Kafka"));
    }

    #[test]
    fn test_fabricated_evidence_clears_quote_and_forces_missing() {
        let out = validate_requirements(
            vec![requirement(MatchLevel::Exact, Some("10 years of Python"))],
            ALLOWED,
        );
        assert_eq!(out[0].match_level, MatchLevel::Missing);
        assert!(out[0].resume_evidence.is_none());
    }

    #[test]
    fn test_claimed_match_without_evidence_is_downgraded() {
        let out = validate_requirements(vec![requirement(MatchLevel::Close, None)], ALLOWED);
        assert_eq!(out[0].match_level, MatchLevel::Missing);
        assert!(out[0].resume_evidence.is_none());
    }

    #[test]
    fn test_empty_evidence_downgrades_but_keeps_the_empty_quote() {
        // "" is a substring of everything, so rule 1 passes; rule 2 still
        // refuses to credit a match backed by an empty quote.
        let out = validate_requirements(vec![requirement(MatchLevel::Exact, Some(""))], ALLOWED);
        assert_eq!(out[0].match_level, MatchLevel::Missing);
        assert_eq!(out[0].resume_evidence.as_deref(), Some(""));
    }

    #[test]
    fn test_missing_item_without_evidence_is_untouched() {
        let out = validate_requirements(vec![requirement(MatchLevel::Missing, None)], ALLOWED);
        assert_eq!(out[0].match_level, MatchLevel::Missing);
    }

    #[test]
    fn test_exact_items_lose_suggestions() {
        let out = validate_requirements(
            vec![requirement(MatchLevel::Exact, Some("Python"))],
            ALLOWED,
        );
        assert!(out[0].suggestions.is_empty());
    }

    #[test]
    fn test_non_exact_items_keep_at_most_three_suggestions() {
        let mut item = requirement(MatchLevel::Partial, Some("Kafka"));
        item.suggestions = vec![
            "one".to_string(),
            "two".to_string(),
            "three".to_string(),
            "four".to_string(),
        ];
        let out = validate_requirements(vec![item], ALLOWED);
        assert_eq!(out[0].suggestions, vec!["one", "two", "three"]);
    }

    #[test]
    fn test_requirements_capped_at_ten() {
        let items = (0..14)
            .map(|i| {
                let mut item = requirement(MatchLevel::Missing, None);
                item.requirement = format!("req-{i}");
                item
            })
            .collect();
        assert_eq!(validate_requirements(items, ALLOWED).len(), 10);
    }

    #[test]
    fn test_dedupe_capped_trims_drops_blanks_and_dedupes() {
        let values = vec![
            "  Python ".to_string(),
            "".to_string(),
            "   ".to_string(),
            "Python".to_string(),
            "SQL".to_string(),
        ];
        assert_eq!(dedupe_capped(values, 5), vec!["Python", "SQL"]);
    }

    #[test]
    fn test_dedupe_capped_is_case_sensitive_and_ordered() {
        let values = vec![
            "python".to_string(),
            "Python".to_string(),
            "a".to_string(),
            "b".to_string(),
            "c".to_string(),
            "d".to_string(),
        ];
        assert_eq!(dedupe_capped(values, 5), vec!["python", "Python", "a", "b", "c"]);
    }

    #[test]
    fn test_sanitize_caps_lists_and_falls_back_on_blank_summary() {
        let raw = RawComparison {
            matched_skills_top5: vec!["Python".to_string(); 9],
            gaps_top6: vec![GapItem::default(); 8],
            improvements_top6: vec![ImprovementItem::default(); 8],
            summary: "   ".to_string(),
            experience_required: " 3+ years ".to_string(),
            ..Default::default()
        };
        let clean = sanitize_comparison(raw, ALLOWED);
        assert_eq!(clean.matched_skills_top5, vec!["Python"]);
        assert_eq!(clean.gaps_top6.len(), 6);
        assert_eq!(clean.improvements_top6.len(), 6);
        assert_eq!(clean.experience_required, "3+ years");
        assert_eq!(clean.summary, FALLBACK_SUMMARY);
    }

    #[test]
    fn test_sanitize_keeps_a_real_summary() {
        let raw = RawComparison {
            summary: " Strong skills coverage. ".to_string(),
            ..Default::default()
        };
        let clean = sanitize_comparison(raw, ALLOWED);
        assert_eq!(clean.summary, "Strong skills coverage.");
    }
}
