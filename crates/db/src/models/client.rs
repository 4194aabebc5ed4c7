use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use shared::types::{ClientId, TenantId};
use sqlx::FromRow;

/// A client who books appointments. Opaque to the core beyond identity and
/// tenant membership.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Client {
    pub id: ClientId,
    pub tenant_id: TenantId,
    pub name: String,
    pub created_at: DateTime<Utc>,
}
