//! Conversational report rendering. Reports are plain strings assembled
//! from validated data; the layout is fixed so downstream chat surfaces can
//! rely on the section headers.

use crate::matching::blockers::BlockerMatch;
use crate::matching::oracle::RequirementItem;
use crate::matching::scoring::requirement_order;

/// Category label used when the oracle left a gap's category blank.
const UNCATEGORIZED: &str = "Other";

fn wrap_report(label: &str, body: &str) -> String {
    format!("{label}:\n\"\"\"\n{body}\n\"\"\"")
}

/// Renders the eligible-path report: score, high-impact gaps grouped by
/// category, notable near-misses, and the summary.
pub fn build_match_report(
    match_score: f64,
    gaps: &[&RequirementItem],
    close_matches: &[&RequirementItem],
    summary: &str,
) -> String {
    let mut lines: Vec<String> = Vec::new();
    lines.push("✅ OPT/STEM OPT ELIGIBLE - No critical blockers detected".to_string());
    lines.push(String::new());
    lines.push(format!("Match Score: {match_score:.1}%"));
    lines.push(String::new());
    lines.push("HIGH-IMPACT GAPS:".to_string());
    lines.push(String::new());

    if gaps.is_empty() {
        lines.push("(No high-impact gaps detected based on current filtering.)".to_string());
        lines.push(String::new());
    } else {
        let mut sorted: Vec<&RequirementItem> = gaps.to_vec();
        sorted.sort_by(|a, b| requirement_order(a, b));

        for (category, items) in group_by_category(&sorted) {
            lines.push(format!("{category}:"));
            for item in items {
                lines.push(format!("- {}: {}", item.requirement, item.match_level.as_str()));
                let evidence = item
                    .resume_evidence
                    .as_deref()
                    .filter(|quote| !quote.is_empty())
                    .unwrap_or("Not found");
                lines.push(format!("  Resume evidence: {evidence}"));
                if !item.suggestions.is_empty() {
                    lines.push("  Suggestions:".to_string());
                    for suggestion in item.suggestions.iter().take(3) {
                        lines.push(format!("  - {suggestion}"));
                    }
                }
            }
            lines.push(String::new());
        }
    }

    lines.push("CLOSE MATCHES WORTH NOTING:".to_string());
    if close_matches.is_empty() {
        lines.push("- (None worth noting based on current filtering.)".to_string());
    } else {
        let mut sorted: Vec<&RequirementItem> = close_matches.to_vec();
        sorted.sort_by(|a, b| requirement_order(a, b));
        for item in sorted {
            lines.push(format!("- {} ({})", item.requirement, item.match_level.as_str()));
        }
    }

    lines.push(String::new());
    lines.push("SUMMARY:".to_string());
    lines.push(summary.to_string());

    wrap_report("REPORT (conversational analysis)", &lines.join("\n"))
}

/// Groups sorted gaps by category, preserving the order in which categories
/// first appear.
fn group_by_category<'a>(
    sorted: &[&'a RequirementItem],
) -> Vec<(&'a str, Vec<&'a RequirementItem>)> {
    let mut groups: Vec<(&str, Vec<&RequirementItem>)> = Vec::new();

    for &item in sorted {
        let category = if item.category.is_empty() {
            UNCATEGORIZED
        } else {
            item.category.as_str()
        };
        match groups.iter_mut().find(|(existing, _)| *existing == category) {
            Some((_, bucket)) => bucket.push(item),
            None => groups.push((category, vec![item])),
        }
    }

    groups
}

/// Renders the hard-stop report for a posting rejected by the blocker scan.
pub fn build_blocker_report(blocker: &BlockerMatch, job_title: &str) -> String {
    let position = if job_title.is_empty() {
        "Not provided"
    } else {
        job_title
    };

    let body = format!(
        r#"🚫 APPLICATION REJECTED - CRITICAL BLOCKER DETECTED

Position: {position}
Company: Not provided

BLOCKER IDENTIFIED:
- {matched_line}

REASON FOR REJECTION:
This position requires {requirement} which is NOT available to OPT/STEM OPT candidates on F-1 visa status.

OPT/F-1 visa holders CANNOT:
- Obtain security clearances (any level)
- Meet U.S. citizenship requirements
- Work on federal government contracts requiring citizenship
- Comply with ITAR/export control restrictions
- Meet "green card required" stipulations

RECOMMENDATION: ⛔ DO NOT APPLY - Skip this position entirely

---
Would you like me to analyze a different job posting?"#,
        matched_line = blocker.matched_line,
        requirement = blocker.kind.human_label(),
    );

    wrap_report("BLOCKER ALERT", &body)
}
