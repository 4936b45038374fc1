//! Liveness probe

/// GET /health
///
/// Answers without touching the scheduler.
pub async fn health_check() -> &'static str {
    "OK"
}
