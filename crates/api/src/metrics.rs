//! Prometheus metrics for the scheduling engine.
//!
//! Ambient observability, not excluded by spec.md's Non-goals (which name
//! notification delivery, waitlists, recurring appointments — not basic
//! operational metrics). Mirrors the teacher's `metrics`/`metrics-exporter-
//! prometheus` setup in shape, scoped down to the two counters and the one
//! histogram this core actually emits.

use metrics::{counter, histogram};
use std::time::Instant;

/// Metric names recorded around the Booking Committer (C6).
pub mod names {
    pub const SCHEDULING_COMMITS: &str = "scheduling_commits_total";
    pub const LOCK_WAIT_SECONDS: &str = "scheduling_lock_wait_seconds";
}

/// Records a terminal outcome of `CreateScheduling`: `"success"`,
/// `"slot_unavailable"`, `"lock_unavailable"`, or `"error"`.
pub fn record_commit_outcome(tenant_id: &str, outcome: &str) {
    counter!(names::SCHEDULING_COMMITS, "tenant_id" => tenant_id.to_string(), "outcome" => outcome.to_string())
        .increment(1);
}

/// Records how long lock acquisition took before the commit attempt began.
pub fn record_lock_wait(tenant_id: &str, duration_secs: f64) {
    histogram!(names::LOCK_WAIT_SECONDS, "tenant_id" => tenant_id.to_string()).record(duration_secs);
}

/// Times a block of code and reports the elapsed seconds to `record_lock_wait`.
pub struct LockWaitTimer {
    start: Instant,
    tenant_id: String,
}

impl LockWaitTimer {
    pub fn start(tenant_id: &str) -> Self {
        Self {
            start: Instant::now(),
            tenant_id: tenant_id.to_string(),
        }
    }

    pub fn record(self) {
        record_lock_wait(&self.tenant_id, self.start.elapsed().as_secs_f64());
    }
}

/// Initializes the Prometheus metrics exporter, returning a render handle
/// for the `/metrics` route.
pub fn init_metrics() -> metrics_exporter_prometheus::PrometheusHandle {
    let builder = metrics_exporter_prometheus::PrometheusBuilder::new();
    builder
        .install_recorder()
        .expect("Failed to install Prometheus metrics recorder")
}
