use shared::types::TenantId;
use sqlx::PgPool;

use crate::models::Tenant;

pub struct TenantRepository;

impl TenantRepository {
    pub async fn find_by_id(pool: &PgPool, id: TenantId) -> Result<Option<Tenant>, sqlx::Error> {
        sqlx::query_as::<_, Tenant>(
            r#"
            SELECT id, name, created_at
            FROM tenants
            WHERE id = $1
            "#,
        )
        .bind(id.as_uuid())
        .fetch_optional(pool)
        .await
    }

    pub async fn exists(pool: &PgPool, id: TenantId) -> Result<bool, sqlx::Error> {
        let row: (bool,) =
            sqlx::query_as("SELECT EXISTS(SELECT 1 FROM tenants WHERE id = $1)")
                .bind(id.as_uuid())
                .fetch_one(pool)
                .await?;
        Ok(row.0)
    }
}
