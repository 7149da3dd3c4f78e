//! Corrective action service tests: the forward-only work-item state
//! machine and its queries.

mod common;

use assert_matches::assert_matches;
use chrono::{Duration, Utc};
use sqlx::PgPool;

use coldwatch_core::CoreError;
use coldwatch_monitor::{CorrectiveActionService, MonitorError};

use common::seed_freezer;

// ---------------------------------------------------------------------------
// Creation
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn create_starts_pending_with_audit_fields(pool: PgPool) {
    let service = CorrectiveActionService::new(pool.clone());
    let freezer_id = seed_freezer(&pool, "Freezer 100").await;

    let action = service
        .create_corrective_action(
            freezer_id,
            "TEMPERATURE_ADJUSTMENT",
            "Adjust thermostat to -20\u{b0}C",
            "1",
        )
        .await
        .unwrap();

    assert_eq!(action.status, "PENDING");
    assert_eq!(action.action_type, "TEMPERATURE_ADJUSTMENT");
    assert_eq!(action.description, "Adjust thermostat to -20\u{b0}C");
    assert_eq!(action.created_by, "1");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn create_rejects_unknown_type_and_missing_freezer(pool: PgPool) {
    let service = CorrectiveActionService::new(pool.clone());
    let freezer_id = seed_freezer(&pool, "Freezer 100").await;

    let err = service
        .create_corrective_action(freezer_id, "CALIBRATION", "Recalibrate", "1")
        .await
        .unwrap_err();
    assert_matches!(err, MonitorError::Core(CoreError::Validation(_)));

    let err = service
        .create_corrective_action(9999, "MAINTENANCE", "Routine check", "1")
        .await
        .unwrap_err();
    assert_matches!(err, MonitorError::Core(CoreError::NotFound { entity: "freezer", .. }));
}

// ---------------------------------------------------------------------------
// State machine
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn pending_moves_to_in_progress(pool: PgPool) {
    let service = CorrectiveActionService::new(pool.clone());
    let freezer_id = seed_freezer(&pool, "Freezer 100").await;
    let action = service
        .create_corrective_action(freezer_id, "EQUIPMENT_REPAIR", "Repair compressor", "1")
        .await
        .unwrap();

    let updated = service
        .update_corrective_action_status(action.id, "IN_PROGRESS", "1")
        .await
        .unwrap();
    assert_eq!(updated.status, "IN_PROGRESS");
    assert!(updated.updated_at.is_some());

    // No-op refresh stays legal.
    let refreshed = service
        .update_corrective_action_status(action.id, "IN_PROGRESS", "2")
        .await
        .unwrap();
    assert_eq!(refreshed.status, "IN_PROGRESS");
    assert_eq!(refreshed.updated_by.as_deref(), Some("2"));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn completing_a_pending_action_is_rejected(pool: PgPool) {
    let service = CorrectiveActionService::new(pool.clone());
    let freezer_id = seed_freezer(&pool, "Freezer 100").await;
    let action = service
        .create_corrective_action(freezer_id, "TEMPERATURE_ADJUSTMENT", "Adjust thermostat", "1")
        .await
        .unwrap();

    let err = service
        .complete_corrective_action(action.id, "1", "done")
        .await
        .unwrap_err();
    assert_matches!(err, MonitorError::Core(CoreError::InvalidTransition { .. }));

    // The generic update cannot skip to COMPLETED either.
    let err = service
        .update_corrective_action_status(action.id, "COMPLETED", "1")
        .await
        .unwrap_err();
    assert_matches!(err, MonitorError::Core(CoreError::InvalidTransition { .. }));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn in_progress_completes_with_notes(pool: PgPool) {
    let service = CorrectiveActionService::new(pool.clone());
    let freezer_id = seed_freezer(&pool, "Freezer 100").await;
    let action = service
        .create_corrective_action(freezer_id, "TEMPERATURE_ADJUSTMENT", "Adjust thermostat", "1")
        .await
        .unwrap();
    service
        .update_corrective_action_status(action.id, "IN_PROGRESS", "1")
        .await
        .unwrap();

    let completed = service
        .complete_corrective_action(action.id, "1", "Temperature stabilized")
        .await
        .unwrap();
    assert_eq!(completed.status, "COMPLETED");
    assert!(completed.completed_at.is_some());
    assert_eq!(completed.completion_notes.as_deref(), Some("Temperature stabilized"));

    // Completed is terminal.
    let err = service
        .update_corrective_action_status(action.id, "IN_PROGRESS", "1")
        .await
        .unwrap_err();
    assert_matches!(err, MonitorError::Core(CoreError::InvalidTransition { .. }));

    let err = service
        .complete_corrective_action(action.id, "1", "again")
        .await
        .unwrap_err();
    assert_matches!(err, MonitorError::Core(CoreError::InvalidTransition { .. }));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn generic_update_cannot_complete_in_progress_action(pool: PgPool) {
    let service = CorrectiveActionService::new(pool.clone());
    let freezer_id = seed_freezer(&pool, "Freezer 100").await;
    let action = service
        .create_corrective_action(freezer_id, "MAINTENANCE", "Routine check", "1")
        .await
        .unwrap();
    service
        .update_corrective_action_status(action.id, "IN_PROGRESS", "1")
        .await
        .unwrap();

    // Completion carries notes, so the generic update refuses it.
    let err = service
        .update_corrective_action_status(action.id, "COMPLETED", "1")
        .await
        .unwrap_err();
    assert_matches!(err, MonitorError::Core(CoreError::Validation(_)));
}

// ---------------------------------------------------------------------------
// Description editing and queries
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn description_edit_marks_action_edited(pool: PgPool) {
    let service = CorrectiveActionService::new(pool.clone());
    let freezer_id = seed_freezer(&pool, "Freezer 100").await;
    let action = service
        .create_corrective_action(freezer_id, "OTHER", "Original", "1")
        .await
        .unwrap();
    assert!(!action.is_edited);

    let edited = service
        .update_corrective_action_description(action.id, "Corrected", "2")
        .await
        .unwrap();
    assert_eq!(edited.description, "Corrected");
    assert!(edited.is_edited);

    // Completed actions are read-only.
    service
        .update_corrective_action_status(action.id, "IN_PROGRESS", "1")
        .await
        .unwrap();
    service
        .complete_corrective_action(action.id, "1", "done")
        .await
        .unwrap();
    let err = service
        .update_corrective_action_description(action.id, "Too late", "2")
        .await
        .unwrap_err();
    assert_matches!(err, MonitorError::Core(CoreError::Validation(_)));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn queries_filter_by_status_freezer_and_range(pool: PgPool) {
    let service = CorrectiveActionService::new(pool.clone());
    let freezer_a = seed_freezer(&pool, "Freezer 100").await;
    let freezer_b = seed_freezer(&pool, "Freezer 101").await;

    let pending = service
        .create_corrective_action(freezer_a, "TEMPERATURE_ADJUSTMENT", "Pending action", "1")
        .await
        .unwrap();
    let started = service
        .create_corrective_action(freezer_b, "EQUIPMENT_REPAIR", "In progress action", "1")
        .await
        .unwrap();
    service
        .update_corrective_action_status(started.id, "IN_PROGRESS", "1")
        .await
        .unwrap();

    let pending_list = service.get_corrective_actions_by_status("PENDING").await.unwrap();
    assert!(pending_list.iter().all(|a| a.status == "PENDING"));
    assert!(pending_list.iter().any(|a| a.id == pending.id));

    let err = service.get_corrective_actions_by_status("RETRACTED").await.unwrap_err();
    assert_matches!(err, MonitorError::Core(CoreError::Validation(_)));

    let for_a = service.get_corrective_actions_for_freezer(freezer_a).await.unwrap();
    assert_eq!(for_a.len(), 1);
    assert_eq!(for_a[0].id, pending.id);

    let now = Utc::now();
    let in_range = service
        .get_corrective_actions_in_range(now - Duration::hours(1), now + Duration::hours(1))
        .await
        .unwrap();
    assert_eq!(in_range.len(), 2);

    let out_of_range = service
        .get_corrective_actions_in_range(now + Duration::hours(1), now + Duration::hours(2))
        .await
        .unwrap();
    assert!(out_of_range.is_empty());
}
