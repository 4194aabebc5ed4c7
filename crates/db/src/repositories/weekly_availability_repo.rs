use domain::RawWeekdayAvailability;
use shared::types::{TenantId, WorkerId};
use sqlx::PgPool;

use crate::models::WeeklyAvailabilityRow;

pub struct WeeklyAvailabilityRepository;

impl WeeklyAvailabilityRepository {
    /// Loads the worker's configured row for a single weekday and converts
    /// it to the `domain` crate's parse-ready shape. Returns the "no row"
    /// default (all four columns absent) if the worker has never configured
    /// that weekday — C2 treats that identically to a malformed row: empty
    /// availability (spec.md §4.2's "missing availability → empty list").
    pub async fn find_for_worker_weekday(
        pool: &PgPool,
        tenant_id: TenantId,
        worker_id: WorkerId,
        weekday: i16,
    ) -> Result<RawWeekdayAvailability, sqlx::Error> {
        let row = sqlx::query_as::<_, WeeklyAvailabilityRow>(
            r#"
            SELECT id, tenant_id, worker_id, weekday,
                   interval_1_start, interval_1_end,
                   interval_2_start, interval_2_end
            FROM weekly_availability
            WHERE tenant_id = $1 AND worker_id = $2 AND weekday = $3
            "#,
        )
        .bind(tenant_id.as_uuid())
        .bind(worker_id.as_uuid())
        .bind(weekday)
        .fetch_optional(pool)
        .await?;

        Ok(match row {
            Some(r) => RawWeekdayAvailability {
                interval_1_start: r.interval_1_start.map(|t| t.format("%H:%M").to_string()),
                interval_1_end: r.interval_1_end.map(|t| t.format("%H:%M").to_string()),
                interval_2_start: r.interval_2_start.map(|t| t.format("%H:%M").to_string()),
                interval_2_end: r.interval_2_end.map(|t| t.format("%H:%M").to_string()),
            },
            None => RawWeekdayAvailability::default(),
        })
    }
}
