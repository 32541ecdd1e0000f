//! The match pipeline. One request flows: section restriction, starred-item
//! extraction, one oracle call, sanitation, scoring, report rendering.
//! Blocker rejection short-circuits in the handler before this module runs.

use serde::Serialize;
use tracing::info;

use crate::errors::AppError;
use crate::matching::blockers::{BlockerKind, BlockerMatch};
use crate::matching::oracle::{
    ComparisonOracle, GapItem, ImprovementItem, OracleInput, RawComparison, RequirementItem,
};
use crate::matching::report::{build_blocker_report, build_match_report};
use crate::matching::scoring::{
    compute_match_score, recommendation_from_score, score_percentage, select_close_matches,
    select_gaps, Recommendation,
};
use crate::matching::sections::extract_sections;
use crate::matching::starred::extract_starred_items;
use crate::matching::validate::sanitize_comparison;

// ────────────────────────── response payloads ──────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MatchStatus {
    Eligible,
    Rejected,
}

/// Terminal payload for a posting stopped by the blocker scan. Carries a
/// top-level `status` so chat surfaces can branch without reading `json`.
#[derive(Debug, Clone, Serialize)]
pub struct RejectedResponse {
    pub status: MatchStatus,
    pub p: u8,
    pub report: String,
    pub json: RejectedDetails,
}

#[derive(Debug, Clone, Serialize)]
pub struct RejectedDetails {
    pub status: MatchStatus,
    pub blocker_type: BlockerKind,
    pub blocker_text: String,
    pub match_score: Option<f64>,
    pub eligible_for_opt: bool,
    pub recommendation: Recommendation,
    pub reason: String,
}

/// Full scoring payload for an eligible posting.
#[derive(Debug, Clone, Serialize)]
pub struct EligibleResponse {
    pub p: u8,
    pub report: String,
    pub json: EligibleDetails,
}

#[derive(Debug, Clone, Serialize)]
pub struct EligibleDetails {
    pub status: MatchStatus,
    pub blocker_type: Option<BlockerKind>,
    pub blocker_text: Option<String>,
    pub eligible_for_opt: bool,
    pub match_score: f64,
    pub recommendation: Recommendation,

    pub matched_skills_top5: Vec<String>,
    pub missing_must_have_skills_top5: Vec<String>,
    pub missing_preferred_skills_top5: Vec<String>,

    pub experience_required: String,
    pub experience_candidate: String,
    pub experience_match: bool,

    pub location_required: String,
    pub location_candidate: String,
    pub location_match: bool,

    pub gaps_top6: Vec<GapItem>,
    pub improvements_top6: Vec<ImprovementItem>,

    // Aliases kept so existing payload consumers keep working.
    pub matched_skills: Vec<String>,
    pub missing_must_have_skills: Vec<String>,
    pub missing_preferred_skills: Vec<String>,

    pub requirements_top10: Vec<RequirementItem>,
    pub summary: String,
}

/// What `/match-resume` returns: one of two shapes, serialized as-is.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum MatchResponse {
    Rejected(RejectedResponse),
    Eligible(EligibleResponse),
}

// ────────────────────────── pipeline ──────────────────────────

/// Assembles the rejection payload for a detected blocker.
pub fn build_rejected_response(blocker: &BlockerMatch, job_title: &str) -> RejectedResponse {
    RejectedResponse {
        status: MatchStatus::Rejected,
        p: 0,
        report: build_blocker_report(blocker, job_title),
        json: RejectedDetails {
            status: MatchStatus::Rejected,
            blocker_type: blocker.kind,
            blocker_text: blocker.matched_line.clone(),
            match_score: None,
            eligible_for_opt: false,
            recommendation: Recommendation::DoNotApply,
            reason: format!(
                "Position requires {} which OPT/F-1 visa holders cannot fulfill",
                blocker.kind.human_label()
            ),
        },
    }
}

/// Runs the eligible-path pipeline end to end. Exactly one oracle call per
/// invocation; every oracle field passes through `sanitize_comparison`
/// before scoring or rendering.
pub async fn match_resume_to_job(
    oracle: &dyn ComparisonOracle,
    resume_text: &str,
    job_text: &str,
    job_url: &str,
    job_title: &str,
) -> Result<EligibleResponse, AppError> {
    let sections = extract_sections(resume_text);
    let starred = extract_starred_items(job_text);

    let detected: Vec<&str> = sections
        .detected_sections
        .iter()
        .map(|kind| kind.as_str())
        .collect();
    info!(
        "Resume restricted to sections {:?}; {} starred item(s) in posting",
        detected,
        starred.len()
    );

    let raw = oracle
        .compare(&OracleInput {
            job_title,
            job_url,
            job_text,
            starred_items: &starred,
            allowed_resume_text: &sections.allowed_text,
        })
        .await?;

    let comparison = sanitize_comparison(raw, &sections.allowed_text);

    let match_score = compute_match_score(&comparison.requirements_top10);
    let recommendation = recommendation_from_score(match_score);

    let gaps = select_gaps(&comparison.requirements_top10);
    let close_matches = select_close_matches(&comparison.requirements_top10);
    let report = build_match_report(match_score, &gaps, &close_matches, &comparison.summary);

    info!(
        "Match scored {match_score:.1} -> {recommendation:?} ({} requirement(s), {} gap(s))",
        comparison.requirements_top10.len(),
        gaps.len()
    );

    let RawComparison {
        matched_skills_top5,
        missing_must_have_skills_top5,
        missing_preferred_skills_top5,
        experience_required,
        experience_candidate,
        experience_match,
        location_required,
        location_candidate,
        location_match,
        gaps_top6,
        improvements_top6,
        requirements_top10,
        summary,
    } = comparison;

    Ok(EligibleResponse {
        p: score_percentage(match_score),
        report,
        json: EligibleDetails {
            status: MatchStatus::Eligible,
            blocker_type: None,
            blocker_text: None,
            eligible_for_opt: true,
            match_score,
            recommendation,
            matched_skills: matched_skills_top5.clone(),
            missing_must_have_skills: missing_must_have_skills_top5.clone(),
            missing_preferred_skills: missing_preferred_skills_top5.clone(),
            matched_skills_top5,
            missing_must_have_skills_top5,
            missing_preferred_skills_top5,
            experience_required,
            experience_candidate,
            experience_match,
            location_required,
            location_candidate,
            location_match,
            gaps_top6,
            improvements_top6,
            requirements_top10,
            summary,
        },
    })
}
