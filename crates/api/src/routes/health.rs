//! Liveness check.

use axum::http::StatusCode;

/// GET /health - liveness probe. Does not touch the database: a degraded
/// pool surfaces through `/metrics` and through 5xx responses from the
/// scheduling routes, not through this endpoint.
pub async fn health_check() -> StatusCode {
    StatusCode::OK
}
