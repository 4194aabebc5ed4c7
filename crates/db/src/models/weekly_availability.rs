use chrono::NaiveTime;
use serde::{Deserialize, Serialize};
use shared::types::{TenantId, WeeklyAvailabilityId, WorkerId};
use sqlx::FromRow;

/// One weekday's row of a worker's weekly availability pattern, as stored at
/// rest: up to two `[start, end)` intervals, either of which may be null.
///
/// `weekday` follows spec.md's fixed ordinal table, Monday = 0 .. Sunday = 6
/// (`domain::availability::weekday_index`), rather than a string-keyed
/// lookup — one row per `(tenant_id, worker_id, weekday)`.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct WeeklyAvailabilityRow {
    pub id: WeeklyAvailabilityId,
    pub tenant_id: TenantId,
    pub worker_id: WorkerId,
    pub weekday: i16,
    pub interval_1_start: Option<NaiveTime>,
    pub interval_1_end: Option<NaiveTime>,
    pub interval_2_start: Option<NaiveTime>,
    pub interval_2_end: Option<NaiveTime>,
}
