use axum::Json;
use serde_json::{json, Value};

/// GET /
/// Bare liveness line kept for existing uptime monitors.
pub async fn root_handler() -> &'static str {
    "OK: jobmatch running"
}

/// GET /health
/// Returns a simple status object with service version.
pub async fn health_handler() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "service": "jobmatch"
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_root_reports_running() {
        assert_eq!(root_handler().await, "OK: jobmatch running");
    }

    #[tokio::test]
    async fn test_health_reports_ok() {
        let Json(body) = health_handler().await;
        assert_eq!(body["status"], "ok");
        assert_eq!(body["service"], "jobmatch");
    }
}
