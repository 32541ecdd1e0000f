//! Starred-item extraction — recruiters mark priority skills in a posting
//! with a leading `*`, optionally behind a `-` or `•` bullet.

use std::collections::HashSet;

use once_cell::sync::Lazy;
use regex::Regex;

/// Matches the star marker at the start of a trimmed line: an optional
/// bullet (`-` or `•`), then `*` followed by at least one space. Lines like
/// `*emphasis*` carry no trailing space and are not priority markers.
static STAR_MARKER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?:[-•]\s*)?\*\s+").expect("valid star marker pattern"));

/// Collects starred priority items from a job posting, in order of first
/// appearance. Duplicates (exact text after trimming) are dropped, as are
/// markers with nothing after them.
pub fn extract_starred_items(job_text: &str) -> Vec<String> {
    let mut seen: HashSet<String> = HashSet::new();
    let mut items: Vec<String> = Vec::new();

    for raw_line in job_text.split('\n') {
        let line = raw_line.trim();
        let Some(marker) = STAR_MARKER.find(line) else {
            continue;
        };
        let item = line[marker.end()..].trim();
        if item.is_empty() {
            continue;
        }
        if seen.insert(item.to_string()) {
            items.push(item.to_string());
        }
    }

    items
}
