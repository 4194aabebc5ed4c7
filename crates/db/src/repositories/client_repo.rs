use shared::types::{ClientId, TenantId};
use sqlx::PgPool;

use crate::models::Client;

pub struct ClientRepository;

impl ClientRepository {
    pub async fn find_by_id(
        pool: &PgPool,
        tenant_id: TenantId,
        id: ClientId,
    ) -> Result<Option<Client>, sqlx::Error> {
        sqlx::query_as::<_, Client>(
            r#"
            SELECT id, tenant_id, name, created_at
            FROM clients
            WHERE id = $1 AND tenant_id = $2
            "#,
        )
        .bind(id.as_uuid())
        .bind(tenant_id.as_uuid())
        .fetch_optional(pool)
        .await
    }
}
