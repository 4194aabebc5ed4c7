use shared::types::{AppointmentId, TenantId};
use sqlx::PgPool;

use crate::models::AppointmentType;

pub struct AppointmentTypeRepository;

impl AppointmentTypeRepository {
    pub async fn find_by_ids(
        pool: &PgPool,
        tenant_id: TenantId,
        ids: &[AppointmentId],
    ) -> Result<Vec<AppointmentType>, sqlx::Error> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let uuids: Vec<uuid::Uuid> = ids.iter().map(|id| *id.as_uuid()).collect();

        sqlx::query_as::<_, AppointmentType>(
            r#"
            SELECT id, tenant_id, name, duration_minutes, created_at
            FROM appointment_types
            WHERE tenant_id = $1 AND id = ANY($2)
            "#,
        )
        .bind(tenant_id.as_uuid())
        .bind(&uuids)
        .fetch_all(pool)
        .await
    }

    /// Sums `duration_minutes` across the given appointment types, as C4's
    /// `total_duration` (spec.md §4.4 step 1). Returns 0 if any requested id
    /// does not resolve within the tenant, matching the caller's contract
    /// that an unresolved appointment set yields no slots.
    pub async fn total_duration_minutes(
        pool: &PgPool,
        tenant_id: TenantId,
        ids: &[AppointmentId],
    ) -> Result<u16, sqlx::Error> {
        let found = Self::find_by_ids(pool, tenant_id, ids).await?;
        if found.len() != ids.len() {
            return Ok(0);
        }
        Ok(found.iter().map(|a| a.duration_minutes.max(0) as u16).sum())
    }
}
