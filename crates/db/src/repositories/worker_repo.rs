use shared::types::{TenantId, WorkerId};
use sqlx::PgPool;

use crate::models::Worker;

pub struct WorkerRepository;

impl WorkerRepository {
    pub async fn find_by_id(
        pool: &PgPool,
        tenant_id: TenantId,
        id: WorkerId,
    ) -> Result<Option<Worker>, sqlx::Error> {
        sqlx::query_as::<_, Worker>(
            r#"
            SELECT id, tenant_id, name, created_at
            FROM workers
            WHERE id = $1 AND tenant_id = $2
            "#,
        )
        .bind(id.as_uuid())
        .bind(tenant_id.as_uuid())
        .fetch_optional(pool)
        .await
    }
}
