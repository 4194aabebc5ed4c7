use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use shared::types::TenantId;
use sqlx::FromRow;

/// A tenant organization. The core treats this as an identifier only — every
/// other row in the scheduling schema carries a `tenant_id` and no query
/// ever crosses tenants within a single call.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Tenant {
    pub id: TenantId,
    pub name: String,
    pub created_at: DateTime<Utc>,
}
