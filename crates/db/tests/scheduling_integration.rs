//! Integration-style tests for P4 (idempotent read), P5 (lock
//! serialization) and P6 (worker independence), spec.md §8.
//!
//! These require a running Postgres reachable via `DATABASE_URL` and are
//! `#[ignore]`d by default, matching the teacher's own note in
//! `tenant_pool.rs` that "integration tests would require a running
//! database" — run explicitly with `cargo test -- --ignored`.

use chrono::{Duration as ChronoDuration, NaiveTime, Utc};
use db::{CreateScheduling, SchedulingError, SchedulingRepository, WorkerLockManager};
use shared::types::{AppointmentId, ClientId, TenantId, WorkerId};
use sqlx::PgPool;
use std::time::Duration;

async fn pool() -> PgPool {
    let url = std::env::var("DATABASE_URL")
        .expect("DATABASE_URL must be set to run scheduling integration tests");
    db::create_pool(&url).await.expect("failed to connect")
}

/// Raw SQL fixture setup, not the repositories: administrative CRUD is
/// deliberately outside this core's scope (spec.md §1).
async fn seed_tenant(pool: &PgPool) -> TenantId {
    let tenant_id = TenantId::new();
    sqlx::query("INSERT INTO tenants (id, name) VALUES ($1, 'integration-tenant')")
        .bind(tenant_id.as_uuid())
        .execute(pool)
        .await
        .unwrap();
    tenant_id
}

/// Inserts a worker, client and one 30-minute appointment type under
/// `tenant_id`, plus a weekly-availability row open 09:00-17:00 every day
/// of the upcoming week.
async fn seed_worker_in_tenant(
    pool: &PgPool,
    tenant_id: TenantId,
) -> (WorkerId, ClientId, AppointmentId) {
    let worker_id = WorkerId::new();
    let client_id = ClientId::new();
    let appointment_id = AppointmentId::new();

    sqlx::query("INSERT INTO workers (id, tenant_id, name) VALUES ($1, $2, 'integration-worker')")
        .bind(worker_id.as_uuid())
        .bind(tenant_id.as_uuid())
        .execute(pool)
        .await
        .unwrap();
    sqlx::query("INSERT INTO clients (id, tenant_id, name) VALUES ($1, $2, 'integration-client')")
        .bind(client_id.as_uuid())
        .bind(tenant_id.as_uuid())
        .execute(pool)
        .await
        .unwrap();
    sqlx::query(
        "INSERT INTO appointment_types (id, tenant_id, name, duration_minutes) VALUES ($1, $2, 'haircut', 30)",
    )
    .bind(appointment_id.as_uuid())
    .bind(tenant_id.as_uuid())
    .execute(pool)
    .await
    .unwrap();

    for weekday in 0..7i16 {
        sqlx::query(
            "INSERT INTO weekly_availability (id, tenant_id, worker_id, weekday, interval_1_start, interval_1_end)
             VALUES (uuid_generate_v4(), $1, $2, $3, '09:00', '17:00')",
        )
        .bind(tenant_id.as_uuid())
        .bind(worker_id.as_uuid())
        .bind(weekday)
        .execute(pool)
        .await
        .unwrap();
    }

    (worker_id, client_id, appointment_id)
}

async fn seed_worker(pool: &PgPool) -> (TenantId, WorkerId, ClientId, AppointmentId) {
    let tenant_id = seed_tenant(pool).await;
    let (worker_id, client_id, appointment_id) = seed_worker_in_tenant(pool, tenant_id).await;
    (tenant_id, worker_id, client_id, appointment_id)
}

fn next_monday() -> chrono::NaiveDate {
    let today = Utc::now().date_naive();
    let days_ahead = (7 - today.weekday().num_days_from_monday() as i64) % 7;
    let days_ahead = if days_ahead == 0 { 7 } else { days_ahead };
    today + ChronoDuration::days(days_ahead)
}

/// P4: two successive `GetAvailableSlots` reads on a quiescent worker
/// return identical slot sets.
#[tokio::test]
#[ignore]
async fn p4_idempotent_read_on_a_quiescent_worker() {
    let pool = pool().await;
    let (tenant_id, worker_id, _client_id, appointment_id) = seed_worker(&pool).await;
    let date = next_monday();

    let first = SchedulingRepository::available_slots(
        &pool,
        tenant_id,
        worker_id,
        date,
        &[appointment_id],
        Utc::now(),
    )
    .await
    .unwrap();
    let second = SchedulingRepository::available_slots(
        &pool,
        tenant_id,
        worker_id,
        date,
        &[appointment_id],
        Utc::now(),
    )
    .await
    .unwrap();

    assert_eq!(first, second);
}

/// P5: two concurrent `CreateScheduling` calls for the same worker and the
/// same requested slot — exactly one succeeds, the other sees
/// `SlotUnavailable`.
#[tokio::test]
#[ignore]
async fn p5_concurrent_same_slot_requests_serialize_to_one_winner() {
    let pool = pool().await;
    let (tenant_id, worker_id, client_id, appointment_id) = seed_worker(&pool).await;
    let date = next_monday();
    let lock_manager = WorkerLockManager::new(pool.clone());

    let make_input = || CreateScheduling {
        tenant_id,
        worker_id,
        client_id,
        appointment_ids: vec![appointment_id],
        date,
        start_time: NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
        notes: None,
    };

    let (r1, r2) = tokio::join!(
        SchedulingRepository::create(
            &lock_manager,
            make_input(),
            Utc::now(),
            Duration::from_secs(20),
            Duration::from_secs(20),
        ),
        SchedulingRepository::create(
            &lock_manager,
            make_input(),
            Utc::now(),
            Duration::from_secs(20),
            Duration::from_secs(20),
        ),
    );

    let successes = [&r1, &r2].iter().filter(|r| r.is_ok()).count();
    assert_eq!(successes, 1, "exactly one concurrent booking should win");

    let loser = if r1.is_err() { r1 } else { r2 };
    assert!(matches!(
        loser,
        Err(SchedulingError::Domain(shared::DomainError::SlotUnavailable))
    ));
}

/// P6: concurrent `CreateScheduling` calls for two different workers never
/// contend — both succeed.
#[tokio::test]
#[ignore]
async fn p6_concurrent_different_workers_both_succeed() {
    let pool = pool().await;
    let tenant_id = seed_tenant(&pool).await;
    let (worker_a, client_id, appointment_id) = seed_worker_in_tenant(&pool, tenant_id).await;
    let (worker_b, _, appointment_id_b) = seed_worker_in_tenant(&pool, tenant_id).await;
    let date = next_monday();
    let lock_manager = WorkerLockManager::new(pool.clone());

    let input_a = CreateScheduling {
        tenant_id,
        worker_id: worker_a,
        client_id,
        appointment_ids: vec![appointment_id],
        date,
        start_time: NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
        notes: None,
    };
    let input_b = CreateScheduling {
        tenant_id,
        worker_id: worker_b,
        client_id,
        appointment_ids: vec![appointment_id_b],
        date,
        start_time: NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
        notes: None,
    };

    let (r1, r2) = tokio::join!(
        SchedulingRepository::create(
            &lock_manager,
            input_a,
            Utc::now(),
            Duration::from_secs(20),
            Duration::from_secs(20),
        ),
        SchedulingRepository::create(
            &lock_manager,
            input_b,
            Utc::now(),
            Duration::from_secs(20),
            Duration::from_secs(20),
        ),
    );

    assert!(r1.is_ok());
    assert!(r2.is_ok());
}
