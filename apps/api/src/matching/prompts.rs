//! Prompt templates for the comparison oracle.
//!
//! Templates use `{placeholder}` markers filled by simple string replacement.
//! The output contract is pinned to the exact top-level keys the validator
//! understands; anything else the model emits is ignored by deserialization.

/// System prompt. Locks the oracle to evidence-quoting JSON output over the
/// restricted résumé text only.
pub const COMPARE_SYSTEM: &str = "You are a senior recruiter and ATS expert specialized in OPT/STEM OPT candidate placement. \
DO NOT output reasoning. Return ONLY JSON that matches the schema. \
Use ONLY the provided RESUME_ALLOWED_TEXT (Summary/Skills/Experience). Ignore projects or certifications even if mentioned elsewhere. \
resume_evidence must be an EXACT SUBSTRING of RESUME_ALLOWED_TEXT or null. Do not invent facts, durations, companies, tools, or outcomes. \
Preserve exact JD wording in each requirement string. \
match_level must be one of: Exact | Close | Partial | Missing. \
Tool rules: variants/extensions => Close; same-ecosystem tool => Partial; competitors/alternatives => Missing (AWS is not Azure/GCP, React is not Angular/Vue, MongoDB is not PostgreSQL). \
Industry or regulatory terms require explicit substring evidence to be anything other than Missing. \
Max 3 suggestions per requirement; keep them conservative and role-credible. For Exact matches, suggestions must be an empty array. \
Return SHORT output only: top skills plus at most 10 requirement items. \
Also extract the years-of-experience and location requirements if present and compare them with the resume, strictly. \
Output must contain ONLY these top-level keys: matched_skills_top5, missing_must_have_skills_top5, missing_preferred_skills_top5, \
experience_required, experience_candidate, experience_match, location_required, location_candidate, location_match, \
gaps_top6, improvements_top6, requirements_top10, summary.";

/// User prompt template.
///
/// Placeholders: `{job_title}`, `{job_url}`, `{job_text}`,
/// `{starred_items}` (JSON array), `{resume_allowed_text}`.
pub const COMPARE_PROMPT_TEMPLATE: &str = r#"JOB_TITLE:
{job_title}

JOB_URL:
{job_url}

JD_TEXT:
{job_text}

STARRED_ITEMS (priority skills the recruiter marked with "*"):
{starred_items}

RESUME_ALLOWED_TEXT:
{resume_allowed_text}

TASK (token-light, gap-first output):
0) Experience and location:
   - If the JD states required years (e.g. "2+ years", "3-5 years"), copy the EXACT JD text into experience_required; else "".
   - Extract the candidate's years/duration from RESUME_ALLOWED_TEXT if stated; else "". Set experience_match true only when the candidate clearly meets or exceeds the requirement.
   - Extract the JD location requirement (Remote/Hybrid/Onsite plus city/state if present) into location_required; the candidate location into location_candidate; set location_match true only when clearly compatible.
1) Extract ONLY the JD skills (named tools and skills) that matter for the role. Keep the JD wording EXACT for every extracted requirement.
2) Assign priority per skill:
   - preferred: the skill text matches a STARRED_ITEMS entry (case-insensitive)
   - must_have: the JD wording marks it required (must, required, minimum, need, mandatory)
   - unspecified: otherwise
3) Compare each JD skill against RESUME_ALLOWED_TEXT, strictly:
   match_level = Exact | Close | Partial | Missing
   resume_evidence = exact substring of RESUME_ALLOWED_TEXT, or null.
4) Build the skill lists (deduplicated, most important first):
   - matched_skills_top5: up to 5 skills with match_level Exact/Close/Partial
   - missing_must_have_skills_top5: up to 5 Missing skills with priority must_have
   - missing_preferred_skills_top5: up to 5 Missing skills with priority preferred
5) Build requirements_top10 (at most 10 items), each:
   { category, requirement, match_level, resume_evidence, suggestions, priority }
   category = "Tools & Technologies" for a named tool/platform/language/framework, else "Skills".
   Order gap-first: Missing must_have, then Missing preferred, then Missing unspecified, then Close/Partial must_have or preferred if space remains.
   suggestions only for Missing/Close/Partial (max 3 each).
6) Build:
   - gaps_top6: up to 6 high-impact missing items { gap, why_it_matters, quick_fix }, Tools & Technologies first
   - improvements_top6: up to 6 short resume edits { improvement, example_bullet }, deduplicated
   - summary: 2-3 sentences.

Return ONLY the JSON object."#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_template_carries_all_placeholders() {
        for placeholder in [
            "{job_title}",
            "{job_url}",
            "{job_text}",
            "{starred_items}",
            "{resume_allowed_text}",
        ] {
            assert!(
                COMPARE_PROMPT_TEMPLATE.contains(placeholder),
                "missing placeholder {placeholder}"
            );
        }
    }

    #[test]
    fn test_system_prompt_pins_output_keys() {
        for key in [
            "matched_skills_top5",
            "missing_must_have_skills_top5",
            "missing_preferred_skills_top5",
            "requirements_top10",
            "gaps_top6",
            "improvements_top6",
            "summary",
        ] {
            assert!(COMPARE_SYSTEM.contains(key), "missing key {key}");
        }
    }
}
