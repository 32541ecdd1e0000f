//! Comparison oracle — the single generative boundary of the match pipeline.
//!
//! Everything upstream (blocker scan, section restriction, starred items) is
//! deterministic; everything downstream (validation, scoring, reporting) is
//! deterministic. Only this trait call is not, so its output is treated as
//! untrusted input and re-validated by `matching::validate`.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::errors::AppError;
use crate::llm_client::LlmClient;
use crate::matching::prompts::{COMPARE_PROMPT_TEMPLATE, COMPARE_SYSTEM};

// ────────────────────────── wire contract ──────────────────────────

/// How well a single job requirement is covered by the résumé.
///
/// Declared weakest-first so the derived ordering ranks severity:
/// `Missing < Partial < Close < Exact`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
pub enum MatchLevel {
    #[default]
    Missing,
    Partial,
    Close,
    Exact,
}

impl MatchLevel {
    /// Contribution to the aggregate match score.
    pub fn points(&self) -> f64 {
        match self {
            MatchLevel::Exact => 1.0,
            MatchLevel::Close => 0.8,
            MatchLevel::Partial => 0.5,
            MatchLevel::Missing => 0.0,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            MatchLevel::Exact => "Exact",
            MatchLevel::Close => "Close",
            MatchLevel::Partial => "Partial",
            MatchLevel::Missing => "Missing",
        }
    }
}

/// Requirement priority, derived by the oracle from JD wording and the
/// recruiter's starred items.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    MustHave,
    Preferred,
    #[default]
    Unspecified,
}

/// One scored job requirement.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RequirementItem {
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub requirement: String,
    #[serde(default)]
    pub match_level: MatchLevel,
    /// Must be an exact substring of the restricted résumé text; enforced
    /// after the fact by the validator, not trusted from the oracle.
    #[serde(default)]
    pub resume_evidence: Option<String>,
    #[serde(default)]
    pub suggestions: Vec<String>,
    #[serde(default)]
    pub priority: Priority,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GapItem {
    #[serde(default)]
    pub gap: String,
    #[serde(default)]
    pub why_it_matters: String,
    #[serde(default)]
    pub quick_fix: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ImprovementItem {
    #[serde(default)]
    pub improvement: String,
    #[serde(default)]
    pub example_bullet: String,
}

/// Raw oracle output, before any validation.
///
/// Every field defaults when absent, so a sparse-but-wellformed object still
/// parses. A present field of the wrong shape (e.g. an unknown `match_level`
/// variant) is a contract violation and fails the whole parse.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RawComparison {
    #[serde(default)]
    pub matched_skills_top5: Vec<String>,
    #[serde(default)]
    pub missing_must_have_skills_top5: Vec<String>,
    #[serde(default)]
    pub missing_preferred_skills_top5: Vec<String>,
    #[serde(default)]
    pub experience_required: String,
    #[serde(default)]
    pub experience_candidate: String,
    #[serde(default)]
    pub experience_match: bool,
    #[serde(default)]
    pub location_required: String,
    #[serde(default)]
    pub location_candidate: String,
    #[serde(default)]
    pub location_match: bool,
    #[serde(default)]
    pub gaps_top6: Vec<GapItem>,
    #[serde(default)]
    pub improvements_top6: Vec<ImprovementItem>,
    #[serde(default)]
    pub requirements_top10: Vec<RequirementItem>,
    #[serde(default)]
    pub summary: String,
}

// ────────────────────────── oracle boundary ──────────────────────────

/// Inputs handed to the oracle for one comparison.
#[derive(Debug, Clone, Copy)]
pub struct OracleInput<'a> {
    pub job_title: &'a str,
    pub job_url: &'a str,
    pub job_text: &'a str,
    pub starred_items: &'a [String],
    /// Restricted résumé text; the only material evidence may quote from.
    pub allowed_resume_text: &'a str,
}

/// Pluggable comparison backend. Production wires an LLM; tests substitute
/// deterministic fakes.
#[async_trait]
pub trait ComparisonOracle: Send + Sync {
    async fn compare(&self, input: &OracleInput<'_>) -> Result<RawComparison, AppError>;
}

/// The production oracle: one chat-completions call, JSON-object output,
/// no retries. A malformed response surfaces as an error rather than being
/// silently patched up.
pub struct LlmComparisonOracle {
    llm: LlmClient,
}

impl LlmComparisonOracle {
    pub fn new(llm: LlmClient) -> Self {
        Self { llm }
    }
}

#[async_trait]
impl ComparisonOracle for LlmComparisonOracle {
    async fn compare(&self, input: &OracleInput<'_>) -> Result<RawComparison, AppError> {
        debug!(
            "Running comparison: jd={} chars, resume={} chars, starred={}",
            input.job_text.chars().count(),
            input.allowed_resume_text.chars().count(),
            input.starred_items.len()
        );

        let prompt = build_compare_prompt(input)?;
        let raw = self
            .llm
            .call_json::<RawComparison>(&prompt, COMPARE_SYSTEM)
            .await
            .map_err(|e| AppError::Llm(format!("Comparison call failed: {e}")))?;

        Ok(raw)
    }
}

fn build_compare_prompt(input: &OracleInput<'_>) -> Result<String, AppError> {
    let starred_json = serde_json::to_string(input.starred_items).map_err(|e| {
        AppError::Internal(anyhow::anyhow!("Failed to serialize starred items: {e}"))
    })?;

    Ok(COMPARE_PROMPT_TEMPLATE
        .replace("{job_title}", input.job_title)
        .replace("{job_url}", input.job_url)
        .replace("{job_text}", input.job_text)
        .replace("{starred_items}", &starred_json)
        .replace("{resume_allowed_text}", input.allowed_resume_text))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_input<'a>(starred: &'a [String]) -> OracleInput<'a> {
        OracleInput {
            job_title: "Data Engineer",
            job_url: "https://jobs.example.com/42",
            job_text: "Build pipelines.\n* Python",
            starred_items: starred,
            allowed_resume_text: "SUMMARY:\nBuilds pipelines.\n",
        }
    }

    #[test]
    fn test_match_level_points() {
        assert_eq!(MatchLevel::Exact.points(), 1.0);
        assert_eq!(MatchLevel::Close.points(), 0.8);
        assert_eq!(MatchLevel::Partial.points(), 0.5);
        assert_eq!(MatchLevel::Missing.points(), 0.0);
    }

    #[test]
    fn test_match_level_orders_by_strength() {
        assert!(MatchLevel::Missing < MatchLevel::Partial);
        assert!(MatchLevel::Partial < MatchLevel::Close);
        assert!(MatchLevel::Close < MatchLevel::Exact);
    }

    #[test]
    fn test_wire_names() {
        assert_eq!(
            serde_json::to_string(&MatchLevel::Exact).unwrap(),
            "\"Exact\""
        );
        assert_eq!(
            serde_json::to_string(&Priority::MustHave).unwrap(),
            "\"must_have\""
        );
        assert_eq!(
            serde_json::to_string(&Priority::Unspecified).unwrap(),
            "\"unspecified\""
        );
    }

    #[test]
    fn test_sparse_payload_parses_with_defaults() {
        let raw: RawComparison = serde_json::from_str(r#"{"summary":"Decent fit."}"#).unwrap();
        assert_eq!(raw.summary, "Decent fit.");
        assert!(raw.requirements_top10.is_empty());
        assert!(!raw.experience_match);
        assert!(raw.matched_skills_top5.is_empty());
    }

    #[test]
    fn test_requirement_defaults() {
        let item: RequirementItem = serde_json::from_str(r#"{"requirement":"Python"}"#).unwrap();
        assert_eq!(item.match_level, MatchLevel::Missing);
        assert_eq!(item.priority, Priority::Unspecified);
        assert!(item.resume_evidence.is_none());
        assert!(item.suggestions.is_empty());
    }

    #[test]
    fn test_unknown_match_level_is_a_contract_violation() {
        let err = serde_json::from_str::<RawComparison>(
            r#"{"requirements_top10":[{"requirement":"Python","match_level":"exact"}]}"#,
        );
        assert!(err.is_err());
    }

    #[test]
    fn test_full_payload_parses() {
        let raw: RawComparison = serde_json::from_str(
            r#"{
                "matched_skills_top5": ["Python"],
                "missing_must_have_skills_top5": ["Airflow"],
                "missing_preferred_skills_top5": [],
                "experience_required": "3+ years",
                "experience_candidate": "4 years",
                "experience_match": true,
                "location_required": "Remote",
                "location_candidate": "Austin, TX",
                "location_match": true,
                "gaps_top6": [{"gap":"Airflow","why_it_matters":"Core scheduler","quick_fix":"Add a DAG project"}],
                "improvements_top6": [{"improvement":"Quantify impact","example_bullet":"Cut latency 40%"}],
                "requirements_top10": [{
                    "category": "Tools & Technologies",
                    "requirement": "Python",
                    "match_level": "Exact",
                    "resume_evidence": "Python",
                    "suggestions": [],
                    "priority": "must_have"
                }],
                "summary": "Strong core skills."
            }"#,
        )
        .unwrap();
        assert_eq!(raw.requirements_top10.len(), 1);
        assert_eq!(raw.requirements_top10[0].match_level, MatchLevel::Exact);
        assert_eq!(raw.requirements_top10[0].priority, Priority::MustHave);
        assert!(raw.experience_match);
        assert_eq!(raw.gaps_top6[0].gap, "Airflow");
    }

    #[test]
    fn test_build_compare_prompt_fills_every_placeholder() {
        let starred = vec!["Python".to_string(), "Airflow".to_string()];
        let prompt = build_compare_prompt(&sample_input(&starred)).unwrap();

        assert!(prompt.contains("Data Engineer"));
        assert!(prompt.contains("https://jobs.example.com/42"));
        assert!(prompt.contains("Build pipelines."));
        assert!(prompt.contains(r#"["Python","Airflow"]"#));
        assert!(prompt.contains("SUMMARY:\nBuilds pipelines."));
        assert!(!prompt.contains("{job_title}"));
        assert!(!prompt.contains("{starred_items}"));
        assert!(!prompt.contains("{resume_allowed_text}"));
    }

    #[test]
    fn test_build_compare_prompt_with_no_starred_items() {
        let prompt = build_compare_prompt(&sample_input(&[])).unwrap();
        assert!(prompt.contains("STARRED_ITEMS"));
        assert!(prompt.contains("[]"));
    }
}
