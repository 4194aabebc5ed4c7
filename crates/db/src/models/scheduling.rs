use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use shared::types::{AppointmentId, ClientId, SchedulingId, TenantId, WorkerId};
use sqlx::FromRow;

/// Lifecycle state of a committed booking.
///
/// spec.md §4.3's invariants only ever speak of "non-cancelled" schedulings
/// (P2's no-overlap guarantee, the busy projector's input set); the
/// distilled spec never defines how a scheduling is cancelled, so this is
/// the minimal state needed for the busy projector to have something to
/// filter on (see SPEC_FULL.md §3).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "scheduling_status", rename_all = "lowercase")]
pub enum SchedulingStatus {
    Active,
    Cancelled,
}

/// A committed booking. `end_time` and `duration_minutes` are derived from
/// the linked appointment set and written once, at insert time, alongside
/// every other field — never recomputed-after-insert (spec.md §9's
/// recompute-after-insert redesign flag).
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Scheduling {
    pub id: SchedulingId,
    pub tenant_id: TenantId,
    pub worker_id: WorkerId,
    pub client_id: ClientId,
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub duration_minutes: i32,
    pub status: SchedulingStatus,
    pub notes: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

/// Input for committing a new scheduling (C6's step 5).
#[derive(Debug, Clone, Deserialize)]
pub struct CreateScheduling {
    pub tenant_id: TenantId,
    pub worker_id: WorkerId,
    pub client_id: ClientId,
    pub appointment_ids: Vec<AppointmentId>,
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub notes: Option<String>,
}
