use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use shared::types::{TenantId, WorkerId};
use sqlx::FromRow;

/// A service provider who can be booked. Opaque to the core beyond identity
/// and tenant membership; display fields exist only so the HTTP surface has
/// something to render.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Worker {
    pub id: WorkerId,
    pub tenant_id: TenantId,
    pub name: String,
    pub created_at: DateTime<Utc>,
}
