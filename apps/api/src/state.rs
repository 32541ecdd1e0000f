use std::sync::Arc;

use crate::matching::oracle::ComparisonOracle;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Pluggable comparison oracle. Production wires the OpenAI-backed
    /// implementation; tests swap in deterministic fakes.
    pub oracle: Arc<dyn ComparisonOracle>,
}
