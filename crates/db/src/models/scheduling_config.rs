use serde::{Deserialize, Serialize};
use shared::types::TenantId;
use sqlx::FromRow;

/// One row per tenant: the overlap-tolerance policy applied when generating
/// slots (spec.md §4.4 step 5). `overlap_tolerance_minutes` is non-negative,
/// enforced at the repository boundary rather than with a SQL `CHECK`
/// constraint, matching how the rest of this schema validates at the Rust
/// layer.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct SchedulingConfigRow {
    pub tenant_id: TenantId,
    pub overlap_tolerance_minutes: i32,
}
