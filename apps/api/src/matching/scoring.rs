//! Deterministic scoring over validated requirements. Given the same
//! requirement list this module always produces the same score,
//! recommendation, and ordering; nothing here consults the oracle.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::matching::oracle::{MatchLevel, RequirementItem};

/// Final verdict attached to every response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Recommendation {
    Apply,
    ApplyWithAdjustments,
    Borderline,
    DoNotApply,
}

/// Mean of the per-requirement points, as a percentage rounded to one
/// decimal place. An empty list scores 0.0, never a division error.
pub fn compute_match_score(requirements: &[RequirementItem]) -> f64 {
    if requirements.is_empty() {
        return 0.0;
    }
    let total: f64 = requirements
        .iter()
        .map(|item| item.match_level.points())
        .sum();
    (total / requirements.len() as f64 * 1000.0).round() / 10.0
}

/// Maps a score onto the recommendation ladder. Thresholds are inclusive:
/// exactly 80.0 is APPLY, exactly 65.0 is APPLY_WITH_ADJUSTMENTS.
pub fn recommendation_from_score(score: f64) -> Recommendation {
    if score >= 80.0 {
        Recommendation::Apply
    } else if score >= 65.0 {
        Recommendation::ApplyWithAdjustments
    } else {
        Recommendation::Borderline
    }
}

/// Whole-number percentage for the response envelope, clamped to 0..=100.
pub fn score_percentage(score: f64) -> u8 {
    score.round().clamp(0.0, 100.0) as u8
}

// ────────────────────────── category heuristics ──────────────────────────
//
// Categories are free text from the oracle; classification is by substring
// so "Tools & Technologies", "Developer Tools" and "tools" all rank alike.

const HIGH_IMPACT_MARKERS: [&str; 7] = [
    "tools",
    "domain",
    "industry",
    "regulatory",
    "compliance",
    "outcomes",
    "impact",
];

/// Whether a category is prominent enough for the gap section of the report.
pub fn is_high_impact_category(category: &str) -> bool {
    let lowered = category.to_lowercase();
    HIGH_IMPACT_MARKERS
        .iter()
        .any(|marker| lowered.contains(marker))
}

/// Display rank for report grouping; lower sorts first.
pub fn category_rank(category: &str) -> u8 {
    let lowered = category.to_lowercase();
    if lowered.contains("tools") {
        1
    } else if lowered.contains("domain") || lowered.contains("industry") {
        2
    } else if lowered.contains("regulatory") || lowered.contains("compliance") {
        3
    } else if lowered.contains("outcomes") || lowered.contains("impact") {
        4
    } else {
        5
    }
}

/// A near-miss in a category that hiring managers weigh heavily.
pub fn is_key_close_or_partial(item: &RequirementItem) -> bool {
    let lowered = item.category.to_lowercase();
    let key_category = lowered.contains("tools")
        || lowered.contains("regulatory")
        || lowered.contains("compliance")
        || lowered.contains("domain")
        || lowered.contains("industry");
    key_category && matches!(item.match_level, MatchLevel::Close | MatchLevel::Partial)
}

/// Requirements worth surfacing as gaps: high-impact categories that are
/// either outright missing or key near-misses.
pub fn select_gaps(requirements: &[RequirementItem]) -> Vec<&RequirementItem> {
    requirements
        .iter()
        .filter(|item| {
            is_high_impact_category(&item.category)
                && (item.match_level == MatchLevel::Missing || is_key_close_or_partial(item))
        })
        .collect()
}

/// Near-misses listed separately in the report.
pub fn select_close_matches(requirements: &[RequirementItem]) -> Vec<&RequirementItem> {
    requirements
        .iter()
        .filter(|item| is_key_close_or_partial(item))
        .collect()
}

/// Report ordering: category rank, then weakest match level, then
/// requirement text for a stable tiebreak.
pub fn requirement_order(a: &RequirementItem, b: &RequirementItem) -> Ordering {
    category_rank(&a.category)
        .cmp(&category_rank(&b.category))
        .then(a.match_level.cmp(&b.match_level))
        .then_with(|| a.requirement.cmp(&b.requirement))
}
