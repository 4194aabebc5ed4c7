//! C7 HTTP surface: `GetAvailableSlots` and `CreateScheduling` (spec.md §6).

use axum::extract::{Path, Query, State};
use axum::Json;
use domain::wire::{format_hhmm, parse_br_date, parse_flexible_date, parse_hhmm};
use serde::{Deserialize, Serialize, Serializer};
use shared::types::{AppointmentId, ClientId, TenantId, WorkerId};
use shared::DomainError;
use validator::Validate;

use crate::error::{ApiError, ApiResult};
use crate::metrics::{record_commit_outcome, LockWaitTimer};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct AvailableSlotsQuery {
    pub date: String,
    #[serde(default)]
    pub appointment_ids: String,
}

#[derive(Debug, Serialize)]
pub struct SlotResponse {
    pub start: String,
    pub end: String,
}

/// Ordered `{"1": {...}, "2": {...}}` mapping, 1-indexed in slot order.
///
/// The teacher's stack has no `indexmap` dependency, so insertion order is
/// preserved by serializing a `Vec` as a JSON object by hand rather than
/// collecting into a `BTreeMap` (which would sort lexicographically and
/// scramble "10" ahead of "2").
pub struct SlotMap(pub Vec<(String, SlotResponse)>);

impl Serialize for SlotMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeMap;
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (key, value) in &self.0 {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

fn empty_slots() -> Json<SlotMap> {
    Json(SlotMap(Vec::new()))
}

/// GET /tenants/:tenant_id/workers/:worker_id/available-slots
///
/// Preserves the original's lenient behavior (spec.md §6, §9): any
/// malformed input — bad UUID, bad date, bad appointment id — returns an
/// empty mapping rather than an error. Only `CreateScheduling` treats
/// malformed input as a hard `InvalidInput`.
pub async fn get_available_slots(
    State(state): State<AppState>,
    Path((tenant_id, worker_id)): Path<(String, String)>,
    Query(params): Query<AvailableSlotsQuery>,
) -> Json<SlotMap> {
    let Ok(tenant_id) = tenant_id.parse::<TenantId>() else {
        return empty_slots();
    };
    let Ok(worker_id) = worker_id.parse::<WorkerId>() else {
        return empty_slots();
    };
    let Some(date) = parse_br_date(&params.date) else {
        return empty_slots();
    };

    let appointment_ids: Option<Vec<AppointmentId>> = if params.appointment_ids.is_empty() {
        Some(Vec::new())
    } else {
        params
            .appointment_ids
            .split(',')
            .map(|id| id.trim().parse::<AppointmentId>().ok())
            .collect()
    };
    let Some(appointment_ids) = appointment_ids else {
        return empty_slots();
    };

    let now = chrono::Utc::now();
    let ranges = match db::SchedulingRepository::available_slots(
        &state.pool,
        tenant_id,
        worker_id,
        date,
        &appointment_ids,
        now,
    )
    .await
    {
        Ok(ranges) => ranges,
        Err(err) => {
            tracing::error!(?err, "available_slots query failed");
            return empty_slots();
        }
    };

    let slots = ranges
        .into_iter()
        .enumerate()
        .map(|(index, (start, end))| {
            (
                (index + 1).to_string(),
                SlotResponse {
                    start: format_hhmm(start),
                    end: format_hhmm(end),
                },
            )
        })
        .collect();

    Json(SlotMap(slots))
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateSchedulingRequest {
    pub client_id: String,
    #[validate(length(min = 1, message = "appointment_ids must not be empty"))]
    pub appointment_ids: Vec<String>,
    pub date: String,
    pub start_time: String,
    #[validate(length(max = 2000))]
    pub notes: Option<String>,
}

/// POST /tenants/:tenant_id/workers/:worker_id/schedulings
pub async fn create_scheduling(
    State(state): State<AppState>,
    Path((tenant_id, worker_id)): Path<(String, String)>,
    Json(body): Json<CreateSchedulingRequest>,
) -> ApiResult<Json<db::Scheduling>> {
    body.validate()
        .map_err(|err| DomainError::InvalidInput(err.to_string()))?;

    let tenant_id: TenantId = tenant_id
        .parse()
        .map_err(|_| DomainError::InvalidInput("tenant_id is not a valid identifier".into()))?;
    let worker_id: WorkerId = worker_id
        .parse()
        .map_err(|_| DomainError::InvalidInput("worker_id is not a valid identifier".into()))?;
    let client_id: ClientId = body
        .client_id
        .parse()
        .map_err(|_| DomainError::InvalidInput("client_id is not a valid identifier".into()))?;
    let appointment_ids: Vec<AppointmentId> = body
        .appointment_ids
        .iter()
        .map(|id| {
            id.parse()
                .map_err(|_| DomainError::InvalidInput("appointment_ids contains an invalid identifier".into()))
        })
        .collect::<Result<_, _>>()?;
    let date = parse_flexible_date(&body.date)
        .ok_or_else(|| DomainError::InvalidInput("date is not DD/MM/YYYY or YYYY-MM-DD".into()))?;
    let start_time = parse_hhmm(&body.start_time)
        .ok_or_else(|| DomainError::InvalidInput("start_time is not HH:MM".into()))?;

    let input = db::CreateScheduling {
        tenant_id,
        worker_id,
        client_id,
        appointment_ids,
        date,
        start_time,
        notes: body.notes,
    };

    let lock_timer = LockWaitTimer::start(&tenant_id.to_string());
    let result = db::SchedulingRepository::create(
        &state.lock_manager,
        input,
        chrono::Utc::now(),
        state.ownership_ttl,
        state.acquire_deadline,
    )
    .await;
    lock_timer.record();

    let outcome = match &result {
        Ok(_) => "success",
        Err(db::SchedulingError::Domain(DomainError::SlotUnavailable)) => "slot_unavailable",
        Err(db::SchedulingError::Domain(DomainError::LockUnavailable)) => "lock_unavailable",
        Err(_) => "error",
    };
    record_commit_outcome(&tenant_id.to_string(), outcome);

    Ok(Json(result.map_err(ApiError::from)?))
}
