//! Résumé section restriction — partitions a résumé into the buckets the
//! comparison oracle is allowed to see.
//!
//! Downstream comparison must be limited to career-relevant, recruiter-legible
//! content; sections like certifications/projects are excluded because they
//! are more prone to inflated or unverifiable claims.

use once_cell::sync::Lazy;
use regex::Regex;

/// The résumé sections eligible for comparison, in their fixed output order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionKind {
    Summary,
    Skills,
    Experience,
}

impl SectionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SectionKind::Summary => "summary",
            SectionKind::Skills => "skills",
            SectionKind::Experience => "experience",
        }
    }
}

/// Result of partitioning a résumé.
///
/// `allowed_text` is what the oracle may quote evidence from. If no heading
/// was recognized anywhere, it falls back to the entire raw résumé — the
/// pipeline never silently discards content it cannot classify.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResumeSections {
    pub summary: String,
    pub skills: String,
    pub experience: String,
    pub allowed_text: String,
    pub detected_sections: Vec<SectionKind>,
}

/// Heading patterns, tested in order per line. Each accepts an optional
/// trailing colon/dash and optional same-line content after the heading word.
static HEADING_PATTERNS: Lazy<[(SectionKind, Regex); 3]> = Lazy::new(|| {
    [
        (
            SectionKind::Summary,
            Regex::new(r"(?i)^\s*(professional\s+summary|summary)\s*[:-]?\s*(.*)$")
                .expect("valid summary heading pattern"),
        ),
        (
            SectionKind::Skills,
            Regex::new(r"(?i)^\s*(technical\s+skills|skills)\s*[:-]?\s*(.*)$")
                .expect("valid skills heading pattern"),
        ),
        (
            SectionKind::Experience,
            Regex::new(
                r"(?i)^\s*(work\s+experience|professional\s+experience|experience)\s*[:-]?\s*(.*)$",
            )
            .expect("valid experience heading pattern"),
        ),
    ]
});

/// Partitions résumé text into Summary/Skills/Experience buckets.
///
/// Single pass over physical lines with one piece of state: the currently
/// active section. A heading line switches sections (carrying any same-line
/// content into the new bucket); other lines are appended verbatim to the
/// active bucket. Lines before the first heading belong to no section and
/// are dropped. Total over any input, including the empty string.
pub fn extract_sections(resume_text: &str) -> ResumeSections {
    let mut summary: Vec<&str> = Vec::new();
    let mut skills: Vec<&str> = Vec::new();
    let mut experience: Vec<&str> = Vec::new();
    let mut current: Option<SectionKind> = None;

    for raw_line in resume_text.split('\n') {
        let line = raw_line.strip_suffix('\r').unwrap_or(raw_line);

        let mut switched = false;
        for (kind, pattern) in HEADING_PATTERNS.iter() {
            if let Some(caps) = pattern.captures(line) {
                current = Some(*kind);
                let same_line = caps.get(2).map_or("", |m| m.as_str()).trim();
                if !same_line.is_empty() {
                    bucket_for(*kind, &mut summary, &mut skills, &mut experience)
                        .push(same_line);
                }
                switched = true;
                break;
            }
        }
        if switched {
            continue;
        }

        if let Some(kind) = current {
            bucket_for(kind, &mut summary, &mut skills, &mut experience).push(line);
        }
    }

    let summary = summary.join("\n").trim().to_string();
    let skills = skills.join("\n").trim().to_string();
    let experience = experience.join("\n").trim().to_string();

    // No heading recognized anywhere: pass the whole résumé through so the
    // comparison still has a target, with no sections claimed.
    if summary.is_empty() && skills.is_empty() && experience.is_empty() {
        return ResumeSections {
            summary,
            skills,
            experience,
            allowed_text: resume_text.to_string(),
            detected_sections: Vec::new(),
        };
    }

    let detected_sections = [
        (SectionKind::Summary, &summary),
        (SectionKind::Skills, &skills),
        (SectionKind::Experience, &experience),
    ]
    .into_iter()
    .filter(|(_, text)| !text.is_empty())
    .map(|(kind, _)| kind)
    .collect();

    let allowed_text =
        format!("SUMMARY:\n{summary}\n\nSKILLS:\n{skills}\n\nEXPERIENCE:\n{experience}\n");

    ResumeSections {
        summary,
        skills,
        experience,
        allowed_text,
        detected_sections,
    }
}

fn bucket_for<'v, 's>(
    kind: SectionKind,
    summary: &'v mut Vec<&'s str>,
    skills: &'v mut Vec<&'s str>,
    experience: &'v mut Vec<&'s str>,
) -> &'v mut Vec<&'s str> {
    match kind {
        SectionKind::Summary => summary,
        SectionKind::Skills => skills,
        SectionKind::Experience => experience,
    }
}
