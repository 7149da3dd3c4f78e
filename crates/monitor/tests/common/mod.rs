//! Shared test harness: seeded entities and a running violation worker.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use sqlx::PgPool;
use tokio_util::sync::CancellationToken;

use coldwatch_db::models::freezer::CreateFreezer;
use coldwatch_db::models::profile_assignment::CreateProfileAssignment;
use coldwatch_db::models::threshold_profile::CreateThresholdProfile;
use coldwatch_db::repositories::{FreezerRepo, ProfileAssignmentRepo, ThresholdProfileRepo};
use coldwatch_events::EventBus;
use coldwatch_monitor::{AlertService, ViolationWorker};

/// A running violation worker wired to a fresh bus.
///
/// Alert evaluation is asynchronous relative to `ingest`; tests await
/// visibility with [`wait_until`] instead of assuming synchronous state.
pub struct Harness {
    pub bus: Arc<EventBus>,
    cancel: CancellationToken,
}

impl Harness {
    pub fn start(pool: &PgPool) -> Self {
        let bus = Arc::new(EventBus::default());
        let receiver = bus.subscribe();
        let worker = ViolationWorker::new(AlertService::new(pool.clone(), bus.clone()));
        let cancel = CancellationToken::new();
        let worker_cancel = cancel.clone();
        tokio::spawn(async move { worker.run(receiver, worker_cancel).await });
        Self { bus, cancel }
    }
}

impl Drop for Harness {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

/// Poll `condition` until it holds or ~2.5s elapse.
pub async fn wait_until<F, Fut>(mut condition: F) -> bool
where
    F: FnMut() -> Fut,
    Fut: Future<Output = bool>,
{
    for _ in 0..100 {
        if condition().await {
            return true;
        }
        tokio::time::sleep(Duration::from_millis(25)).await;
    }
    false
}

pub async fn seed_freezer(pool: &PgPool, name: &str) -> i64 {
    FreezerRepo::insert(
        pool,
        &CreateFreezer {
            name: name.to_string(),
            target_temperature: Some(-25.0),
            is_active: None,
        },
    )
    .await
    .unwrap()
    .id
}

/// Standard freezer profile: normal band above -25, critical above -20.
pub fn standard_profile(name: &str) -> CreateThresholdProfile {
    CreateThresholdProfile {
        name: name.to_string(),
        description: None,
        warning_min: Some(-30.0),
        warning_max: Some(-25.0),
        critical_min: Some(-35.0),
        critical_max: Some(-20.0),
        humidity_warning_min: None,
        humidity_warning_max: None,
        min_excursion_minutes: None,
        max_duration_minutes: None,
    }
}

/// Ultra-low freezer profile: -80 is comfortably normal.
pub fn ultra_low_profile(name: &str) -> CreateThresholdProfile {
    CreateThresholdProfile {
        name: name.to_string(),
        description: None,
        warning_min: Some(-82.0),
        warning_max: Some(-78.0),
        critical_min: Some(-85.0),
        critical_max: Some(-75.0),
        humidity_warning_min: None,
        humidity_warning_max: None,
        min_excursion_minutes: None,
        max_duration_minutes: None,
    }
}

/// Create `profile` and assign it to `freezer_id` as the open-ended
/// default. Returns the profile id.
pub async fn assign_default_profile(
    pool: &PgPool,
    freezer_id: i64,
    profile: &CreateThresholdProfile,
) -> i64 {
    let profile = ThresholdProfileRepo::insert(pool, profile, "admin").await.unwrap();
    ProfileAssignmentRepo::insert(
        pool,
        &CreateProfileAssignment {
            freezer_id,
            profile_id: profile.id,
            effective_start: None,
            effective_end: None,
            is_default: true,
        },
    )
    .await
    .unwrap();
    profile.id
}
