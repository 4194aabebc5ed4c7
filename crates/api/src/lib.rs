pub mod error;
pub mod metrics;
pub mod routes;
pub mod state;

pub use error::ApiError;
pub use metrics::init_metrics;
pub use state::AppState;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

/// Create the application router
pub fn create_app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Health check
        .route("/health", get(routes::health::health_check))
        // Prometheus metrics
        .route("/metrics", get(routes::prometheus::metrics))
        // Available-Time Computation (C4) and Booking Commit (C6)
        .route(
            "/tenants/:tenant_id/workers/:worker_id/available-slots",
            get(routes::scheduling::get_available_slots),
        )
        .route(
            "/tenants/:tenant_id/workers/:worker_id/schedulings",
            post(routes::scheduling::create_scheduling),
        )
        // Add middleware
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
