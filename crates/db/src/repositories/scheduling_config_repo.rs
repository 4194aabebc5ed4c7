use domain::SchedulingConfig;
use shared::types::TenantId;
use sqlx::PgPool;

use crate::models::SchedulingConfigRow;

pub struct SchedulingConfigRepository;

impl SchedulingConfigRepository {
    /// Loads the tenant's overlap tolerance, defaulting to 0 if the tenant
    /// has never configured one (spec.md §3's "default 0").
    pub async fn find_for_tenant(
        pool: &PgPool,
        tenant_id: TenantId,
    ) -> Result<SchedulingConfig, sqlx::Error> {
        let row = sqlx::query_as::<_, SchedulingConfigRow>(
            r#"
            SELECT tenant_id, overlap_tolerance_minutes
            FROM scheduling_configs
            WHERE tenant_id = $1
            "#,
        )
        .bind(tenant_id.as_uuid())
        .fetch_optional(pool)
        .await?;

        Ok(match row {
            Some(r) => SchedulingConfig::new(r.overlap_tolerance_minutes),
            None => SchedulingConfig::default(),
        })
    }
}
