use std::sync::Arc;
use std::time::Duration;

use db::WorkerLockManager;
use metrics_exporter_prometheus::PrometheusHandle;
use sqlx::PgPool;

/// Application state shared across all handlers.
///
/// `lock_manager` is shared behind an `Arc` rather than cloned per-request
/// because it is stateless beyond its pool handle (a `PgPool` is itself a
/// cheap `Arc`-backed clone), matching how the teacher's own connection
/// pool is threaded through `AppState`.
#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub lock_manager: Arc<WorkerLockManager>,
    pub ownership_ttl: Duration,
    pub acquire_deadline: Duration,
    pub metrics_handle: PrometheusHandle,
}

impl AppState {
    pub fn new(
        pool: PgPool,
        ownership_ttl: Duration,
        acquire_deadline: Duration,
        metrics_handle: PrometheusHandle,
    ) -> Self {
        let lock_manager = Arc::new(WorkerLockManager::new(pool.clone()));
        Self {
            pool,
            lock_manager,
            ownership_ttl,
            acquire_deadline,
            metrics_handle,
        }
    }
}
