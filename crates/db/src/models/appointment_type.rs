use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use shared::types::{AppointmentId, TenantId};
use sqlx::FromRow;

/// A bookable service with a fixed duration.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct AppointmentType {
    pub id: AppointmentId,
    pub tenant_id: TenantId,
    pub name: String,
    pub duration_minutes: i32,
    pub created_at: DateTime<Utc>,
}
