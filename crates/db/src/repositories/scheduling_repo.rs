use std::time::Duration;

use chrono::{DateTime, NaiveDate, NaiveTime, Timelike, Utc};
use domain::{weekday_index, AvailabilityEngine, BusyScheduling};
use shared::types::{AppointmentId, ClientId, TenantId, WorkerId};
use shared::DomainError;
use sqlx::{PgPool, Postgres, Transaction};

use crate::error::SchedulingError;
use crate::lock::WorkerLockManager;
use crate::models::{CreateScheduling, Scheduling};
use crate::repositories::appointment_type_repo::AppointmentTypeRepository;
use crate::repositories::client_repo::ClientRepository;
use crate::repositories::scheduling_config_repo::SchedulingConfigRepository;
use crate::repositories::tenant_repo::TenantRepository;
use crate::repositories::weekly_availability_repo::WeeklyAvailabilityRepository;
use crate::repositories::worker_repo::WorkerRepository;

pub struct SchedulingRepository;

impl SchedulingRepository {
    /// C2 + C3 + C4, read-only, no lock held. Used by `GetAvailableSlots`
    /// (spec.md §6), where a stale read racing a concurrent booking is an
    /// accepted inconsistency — only `create` needs the lock.
    pub async fn available_slots(
        pool: &PgPool,
        tenant_id: TenantId,
        worker_id: WorkerId,
        date: NaiveDate,
        appointment_ids: &[AppointmentId],
        now: DateTime<Utc>,
    ) -> Result<Vec<(NaiveTime, NaiveTime)>, sqlx::Error> {
        let total_duration =
            AppointmentTypeRepository::total_duration_minutes(pool, tenant_id, appointment_ids)
                .await?;
        if total_duration == 0 {
            return Ok(Vec::new());
        }

        let raw = WeeklyAvailabilityRepository::find_for_worker_weekday(
            pool,
            tenant_id,
            worker_id,
            weekday_index(date) as i16,
        )
        .await?;
        let config = SchedulingConfigRepository::find_for_tenant(pool, tenant_id).await?;
        let busy = load_busy(pool, tenant_id, worker_id, date).await?;
        let (now_date, now_minutes) = split_now(now);

        let starts = AvailabilityEngine::compute_available_slots(
            &raw,
            &busy,
            config.overlap_tolerance_minutes,
            total_duration,
            date,
            now_date,
            now_minutes,
        );

        Ok(starts
            .into_iter()
            .map(|start| minutes_to_range(start, total_duration))
            .collect())
    }

    /// C5 + C4 + C6 fused into a single lock-held transaction, exactly as
    /// spec.md §5 requires: "the read, decision, and write all occur under
    /// the same lock acquisition." Re-validates against the requested
    /// `start_time` rather than trusting whatever slot list the caller saw
    /// moments earlier, since that list can go stale the instant another
    /// request commits.
    pub async fn create(
        lock_manager: &WorkerLockManager,
        input: CreateScheduling,
        now: DateTime<Utc>,
        ownership_ttl: Duration,
        acquire_deadline: Duration,
    ) -> Result<Scheduling, SchedulingError> {
        if input.appointment_ids.is_empty() {
            return Err(DomainError::InvalidInput("appointment_ids must not be empty".into()).into());
        }

        validate_references(lock_manager.pool(), &input).await?;

        let mut tx = lock_manager
            .acquire(input.worker_id, ownership_ttl, acquire_deadline)
            .await?;

        match commit_scheduling(&mut tx, &input, now).await {
            Ok(scheduling) => {
                tx.commit().await?;
                Ok(scheduling)
            }
            Err(err) => {
                tx.rollback().await.ok();
                Err(err)
            }
        }
    }

    /// Marks a scheduling cancelled. Spec.md never defines a cancellation
    /// protocol beyond excluding cancelled rows from the busy projector
    /// (see SPEC_FULL.md §3), so this does not re-acquire the worker lock —
    /// there is no availability recomputation to protect here.
    pub async fn cancel(
        pool: &PgPool,
        tenant_id: TenantId,
        scheduling_id: shared::types::SchedulingId,
    ) -> Result<Option<Scheduling>, sqlx::Error> {
        sqlx::query_as::<_, Scheduling>(
            r#"
            UPDATE schedulings
            SET status = 'cancelled', updated_at = now()
            WHERE tenant_id = $1 AND id = $2 AND status = 'active'
            RETURNING id, tenant_id, worker_id, client_id, date, start_time, end_time,
                      duration_minutes, status, notes, created_at, updated_at
            "#,
        )
        .bind(tenant_id.as_uuid())
        .bind(scheduling_id.as_uuid())
        .fetch_optional(pool)
        .await
    }
}

/// Validates that `tenant_id`, `worker_id` and `client_id` resolve before
/// ever acquiring the worker lock. spec.md §7 classifies a non-existent
/// reference as `InvalidInput` ("surface to caller; not retryable"), so a
/// well-formed but unknown id must never reach the `INSERT` and fail as a
/// raw foreign-key violation (which would surface as a 500).
async fn validate_references(pool: &PgPool, input: &CreateScheduling) -> Result<(), SchedulingError> {
    if !TenantRepository::exists(pool, input.tenant_id).await? {
        return Err(DomainError::InvalidInput("tenant_id does not exist".into()).into());
    }
    if WorkerRepository::find_by_id(pool, input.tenant_id, input.worker_id)
        .await?
        .is_none()
    {
        return Err(DomainError::InvalidInput("worker_id does not exist".into()).into());
    }
    if ClientRepository::find_by_id(pool, input.tenant_id, input.client_id)
        .await?
        .is_none()
    {
        return Err(DomainError::InvalidInput("client_id does not exist".into()).into());
    }
    Ok(())
}

async fn commit_scheduling(
    tx: &mut Transaction<'_, Postgres>,
    input: &CreateScheduling,
    now: DateTime<Utc>,
) -> Result<Scheduling, SchedulingError> {
    let appointment_count: i64 = sqlx::query_scalar(
        r#"SELECT count(*) FROM appointment_types WHERE tenant_id = $1 AND id = ANY($2)"#,
    )
    .bind(input.tenant_id.as_uuid())
    .bind(
        input
            .appointment_ids
            .iter()
            .map(|id| *id.as_uuid())
            .collect::<Vec<_>>(),
    )
    .fetch_one(&mut **tx)
    .await?;

    if appointment_count as usize != input.appointment_ids.len() {
        return Err(DomainError::InvalidInput(
            "one or more appointment_ids do not belong to this tenant".into(),
        )
        .into());
    }

    let total_duration: i32 = sqlx::query_scalar(
        r#"SELECT coalesce(sum(duration_minutes), 0) FROM appointment_types WHERE tenant_id = $1 AND id = ANY($2)"#,
    )
    .bind(input.tenant_id.as_uuid())
    .bind(
        input
            .appointment_ids
            .iter()
            .map(|id| *id.as_uuid())
            .collect::<Vec<_>>(),
    )
    .fetch_one(&mut **tx)
    .await?;
    let total_duration = total_duration.max(0) as u16;

    let raw = weekly_availability_in_tx(tx, input.tenant_id, input.worker_id, input.date).await?;
    let config = scheduling_config_in_tx(tx, input.tenant_id).await?;
    let busy = load_busy_in_tx(tx, input.tenant_id, input.worker_id, input.date).await?;
    let (now_date, now_minutes) = split_now(now);

    let starts = AvailabilityEngine::compute_available_slots(
        &raw,
        &busy,
        config.overlap_tolerance_minutes,
        total_duration,
        input.date,
        now_date,
        now_minutes,
    );

    let requested_start = to_minutes(input.start_time);
    if !starts.contains(&requested_start) {
        return Err(DomainError::SlotUnavailable.into());
    }

    let end_time = minutes_to_naive_time(requested_start + total_duration);
    let id = shared::types::SchedulingId::new();

    let scheduling = sqlx::query_as::<_, Scheduling>(
        r#"
        INSERT INTO schedulings
            (id, tenant_id, worker_id, client_id, date, start_time, end_time, duration_minutes, status, notes)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, 'active', $9)
        RETURNING id, tenant_id, worker_id, client_id, date, start_time, end_time,
                  duration_minutes, status, notes, created_at, updated_at
        "#,
    )
    .bind(id.as_uuid())
    .bind(input.tenant_id.as_uuid())
    .bind(input.worker_id.as_uuid())
    .bind(input.client_id.as_uuid())
    .bind(input.date)
    .bind(input.start_time)
    .bind(end_time)
    .bind(total_duration as i32)
    .bind(&input.notes)
    .fetch_one(&mut **tx)
    .await?;

    for appointment_id in &input.appointment_ids {
        sqlx::query(
            r#"INSERT INTO scheduling_appointments (scheduling_id, appointment_id) VALUES ($1, $2)"#,
        )
        .bind(id.as_uuid())
        .bind(appointment_id.as_uuid())
        .execute(&mut **tx)
        .await?;
    }

    Ok(scheduling)
}

async fn load_busy(
    pool: &PgPool,
    tenant_id: TenantId,
    worker_id: WorkerId,
    date: NaiveDate,
) -> Result<Vec<BusyScheduling>, sqlx::Error> {
    let rows: Vec<(NaiveDate, NaiveTime, NaiveTime)> = sqlx::query_as(
        r#"
        SELECT date, start_time, end_time
        FROM schedulings
        WHERE tenant_id = $1 AND worker_id = $2 AND date = $3 AND status = 'active'
        "#,
    )
    .bind(tenant_id.as_uuid())
    .bind(worker_id.as_uuid())
    .bind(date)
    .fetch_all(pool)
    .await?;

    Ok(rows_to_busy(rows))
}

async fn load_busy_in_tx(
    tx: &mut Transaction<'_, Postgres>,
    tenant_id: TenantId,
    worker_id: WorkerId,
    date: NaiveDate,
) -> Result<Vec<BusyScheduling>, sqlx::Error> {
    let rows: Vec<(NaiveDate, NaiveTime, NaiveTime)> = sqlx::query_as(
        r#"
        SELECT date, start_time, end_time
        FROM schedulings
        WHERE tenant_id = $1 AND worker_id = $2 AND date = $3 AND status = 'active'
        FOR UPDATE
        "#,
    )
    .bind(tenant_id.as_uuid())
    .bind(worker_id.as_uuid())
    .bind(date)
    .fetch_all(&mut **tx)
    .await?;

    Ok(rows_to_busy(rows))
}

fn rows_to_busy(rows: Vec<(NaiveDate, NaiveTime, NaiveTime)>) -> Vec<BusyScheduling> {
    rows.into_iter()
        .map(|(date, start_time, end_time)| BusyScheduling {
            date,
            start_time,
            end_time,
        })
        .collect()
}

async fn weekly_availability_in_tx(
    tx: &mut Transaction<'_, Postgres>,
    tenant_id: TenantId,
    worker_id: WorkerId,
    date: NaiveDate,
) -> Result<domain::RawWeekdayAvailability, sqlx::Error> {
    let row: Option<(
        Option<NaiveTime>,
        Option<NaiveTime>,
        Option<NaiveTime>,
        Option<NaiveTime>,
    )> = sqlx::query_as(
        r#"
        SELECT interval_1_start, interval_1_end, interval_2_start, interval_2_end
        FROM weekly_availability
        WHERE tenant_id = $1 AND worker_id = $2 AND weekday = $3
        "#,
    )
    .bind(tenant_id.as_uuid())
    .bind(worker_id.as_uuid())
    .bind(weekday_index(date) as i16)
    .fetch_optional(&mut **tx)
    .await?;

    Ok(match row {
        Some((s1, e1, s2, e2)) => domain::RawWeekdayAvailability {
            interval_1_start: s1.map(|t| t.format("%H:%M").to_string()),
            interval_1_end: e1.map(|t| t.format("%H:%M").to_string()),
            interval_2_start: s2.map(|t| t.format("%H:%M").to_string()),
            interval_2_end: e2.map(|t| t.format("%H:%M").to_string()),
        },
        None => domain::RawWeekdayAvailability::default(),
    })
}

async fn scheduling_config_in_tx(
    tx: &mut Transaction<'_, Postgres>,
    tenant_id: TenantId,
) -> Result<domain::SchedulingConfig, sqlx::Error> {
    let row: Option<(i32,)> = sqlx::query_as(
        r#"SELECT overlap_tolerance_minutes FROM scheduling_configs WHERE tenant_id = $1"#,
    )
    .bind(tenant_id.as_uuid())
    .fetch_optional(&mut **tx)
    .await?;

    Ok(match row {
        Some((tolerance,)) => domain::SchedulingConfig::new(tolerance),
        None => domain::SchedulingConfig::default(),
    })
}

/// Treats the wall-clock instant as the tenant's own local time directly,
/// per SPEC_FULL.md's non-goal of timezone translation: every actor is
/// assumed to already agree on a single tenant-local clock.
fn split_now(now: DateTime<Utc>) -> (NaiveDate, u16) {
    let naive = now.naive_utc();
    (naive.date(), to_minutes(naive.time()))
}

fn to_minutes(time: NaiveTime) -> u16 {
    (time.hour() * 60 + time.minute()) as u16
}

fn minutes_to_naive_time(minutes: u16) -> NaiveTime {
    NaiveTime::from_hms_opt((minutes / 60) as u32, (minutes % 60) as u32, 0)
        .unwrap_or_else(|| NaiveTime::from_hms_opt(23, 59, 0).unwrap())
}

fn minutes_to_range(start: u16, duration: u16) -> (NaiveTime, NaiveTime) {
    (minutes_to_naive_time(start), minutes_to_naive_time(start + duration))
}
