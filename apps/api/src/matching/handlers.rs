//! HTTP surface of the match pipeline.

use axum::extract::State;
use axum::Json;
use serde::Deserialize;
use tracing::warn;

use crate::errors::AppError;
use crate::matching::blockers::detect_blocker;
use crate::matching::matcher::{build_rejected_response, match_resume_to_job, MatchResponse};
use crate::state::AppState;

/// The blocker scan sees more of the posting than the oracle does: it is
/// free, and a blocker buried past the oracle cap must still reject.
const BLOCKER_SCAN_CAP: usize = 60_000;
/// Cap on the texts forwarded to the comparison oracle.
const MATCH_TEXT_CAP: usize = 18_000;

/// Request body for `POST /match-resume`. All fields are optional at the
/// JSON level; emptiness is checked after trimming so whitespace-only input
/// is rejected the same way as absent input.
#[derive(Debug, Deserialize)]
pub struct MatchResumeRequest {
    #[serde(default)]
    pub resume_text: String,
    #[serde(default)]
    pub job_text: String,
    #[serde(default)]
    pub job_url: String,
    #[serde(default)]
    pub job_title: String,
}

/// POST /match-resume
///
/// Step 0 is the blocker scan: a hit terminates the request with a REJECTED
/// payload before any oracle spend. Otherwise the full pipeline runs.
pub async fn handle_match_resume(
    State(state): State<AppState>,
    Json(request): Json<MatchResumeRequest>,
) -> Result<Json<MatchResponse>, AppError> {
    let blocker_scan_text = cap_chars(&request.job_text, BLOCKER_SCAN_CAP).trim();
    let resume_text = cap_chars(&request.resume_text, MATCH_TEXT_CAP).trim();
    let job_text = cap_chars(&request.job_text, MATCH_TEXT_CAP).trim();

    if resume_text.is_empty() {
        return Err(AppError::Validation("missing resume_text".to_string()));
    }
    if blocker_scan_text.is_empty() {
        return Err(AppError::Validation("missing job_text".to_string()));
    }

    if let Some(blocker) = detect_blocker(blocker_scan_text) {
        warn!(
            "Blocker detected ({:?}): {}",
            blocker.kind, blocker.matched_line
        );
        return Ok(Json(MatchResponse::Rejected(build_rejected_response(
            &blocker,
            &request.job_title,
        ))));
    }

    let eligible = match_resume_to_job(
        state.oracle.as_ref(),
        resume_text,
        job_text,
        &request.job_url,
        &request.job_title,
    )
    .await?;

    Ok(Json(MatchResponse::Eligible(eligible)))
}

/// Truncates to at most `max` characters without splitting a code point.
fn cap_chars(text: &str, max: usize) -> &str {
    match text.char_indices().nth(max) {
        Some((byte_idx, _)) => &text[..byte_idx],
        None => text,
    }
}
