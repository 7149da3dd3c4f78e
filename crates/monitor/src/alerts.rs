//! Alert creation, deduplication, acknowledgment, and resolution.

use std::sync::Arc;

use coldwatch_core::alert::{
    severity_for_threshold_type, validate_severity, validate_transition, validate_type,
    ENTITY_FREEZER, STATUS_ACKNOWLEDGED, STATUS_RESOLVED, TYPE_FREEZER_TEMPERATURE,
};
use coldwatch_core::evaluation::ThresholdType;
use coldwatch_core::types::DbId;
use coldwatch_core::CoreError;
use coldwatch_db::models::alert::{Alert, CreateAlert};
use coldwatch_db::repositories::AlertRepo;
use coldwatch_db::DbPool;
use coldwatch_events::bus::{EVENT_ALERT_ACKNOWLEDGED, EVENT_ALERT_CREATED, EVENT_ALERT_RESOLVED};
use coldwatch_events::{EventBus, MonitorEvent};

use crate::error::MonitorError;

/// Owns the alert lifecycle.
///
/// The deduplication invariant — at most one non-RESOLVED alert per
/// `(entity_type, entity_id, alert_type)` — is enforced by the partial
/// unique index in the database together with the single-statement upsert
/// in [`AlertRepo`]; no in-process lock is held and unrelated entities
/// never contend.
pub struct AlertService {
    pool: DbPool,
    bus: Arc<EventBus>,
}

impl AlertService {
    /// Create a new service with the given pool and event bus.
    pub fn new(pool: DbPool, bus: Arc<EventBus>) -> Self {
        Self { pool, bus }
    }

    /// Record a distinct alert event.
    ///
    /// This is a plain insert: callers use it for event kinds that are
    /// never merged (equipment failure vs. temperature, for example,
    /// never deduplicate against each other because the alert type
    /// differs). Racing a live alert of the same key is a conflict, not
    /// a silent merge.
    pub async fn create_alert(&self, dto: &CreateAlert) -> Result<Alert, MonitorError> {
        validate_type(&dto.alert_type)?;
        validate_severity(&dto.severity)?;

        let alert = AlertRepo::insert(&self.pool, dto).await.map_err(|e| {
            if is_unique_violation(&e) {
                MonitorError::Core(CoreError::Conflict(format!(
                    "An unresolved {} alert already exists for {} {}",
                    dto.alert_type, dto.alert_entity_type, dto.alert_entity_id
                )))
            } else {
                e.into()
            }
        })?;

        tracing::info!(
            alert_id = alert.id,
            alert_type = %alert.alert_type,
            entity_type = %alert.alert_entity_type,
            entity_id = alert.alert_entity_id,
            severity = %alert.severity,
            "Alert created"
        );
        self.publish_lifecycle(EVENT_ALERT_CREATED, &alert);
        Ok(alert)
    }

    /// Raise (or absorb) a freezer temperature threshold violation.
    ///
    /// While an alert for `(Freezer, freezer_id, FREEZER_TEMPERATURE)`
    /// remains unresolved — OPEN or ACKNOWLEDGED — repeated violations
    /// increment its duplicate count instead of creating new rows. There
    /// is no wall-clock dedup expiry: only resolution ends the episode.
    pub async fn create_freezer_temperature_alert(
        &self,
        freezer_id: DbId,
        temperature: f64,
        threshold_value: f64,
        threshold_type: ThresholdType,
    ) -> Result<Alert, MonitorError> {
        let dto = CreateAlert {
            alert_type: TYPE_FREEZER_TEMPERATURE.to_string(),
            alert_entity_type: ENTITY_FREEZER.to_string(),
            alert_entity_id: freezer_id,
            severity: severity_for_threshold_type(threshold_type).to_string(),
            message: violation_message(temperature, threshold_value, threshold_type),
            context_data: serde_json::json!({
                "temperature": temperature,
                "thresholdValue": threshold_value,
                "thresholdType": threshold_type.as_str(),
            }),
        };

        let alert = AlertRepo::insert_or_increment(&self.pool, &dto).await?;

        if alert.duplicate_count == 0 && alert.last_duplicate_time.is_none() {
            tracing::info!(
                alert_id = alert.id,
                freezer_id,
                severity = %alert.severity,
                "Temperature alert created"
            );
            self.publish_lifecycle(EVENT_ALERT_CREATED, &alert);
        } else {
            tracing::debug!(
                alert_id = alert.id,
                freezer_id,
                duplicate_count = alert.duplicate_count,
                "Temperature violation absorbed into existing alert"
            );
        }
        Ok(alert)
    }

    /// All alerts for an entity, any status, in deterministic order.
    pub async fn get_alerts_by_entity(
        &self,
        entity_type: &str,
        entity_id: DbId,
    ) -> Result<Vec<Alert>, MonitorError> {
        Ok(AlertRepo::list_by_entity(&self.pool, entity_type, entity_id).await?)
    }

    /// Count alerts still OPEN for an entity.
    ///
    /// Acknowledged alerts are being handled and do not count as active;
    /// resolved alerts never do.
    pub async fn count_active_alerts_for_entity(
        &self,
        entity_type: &str,
        entity_id: DbId,
    ) -> Result<i64, MonitorError> {
        Ok(AlertRepo::count_open_for_entity(&self.pool, entity_type, entity_id).await?)
    }

    /// Acknowledge an OPEN alert.
    pub async fn acknowledge_alert(
        &self,
        alert_id: DbId,
        user_id: &str,
    ) -> Result<Alert, MonitorError> {
        let current = self.get_alert(alert_id).await?;
        validate_transition(&current.status, STATUS_ACKNOWLEDGED)?;

        match AlertRepo::set_acknowledged(&self.pool, alert_id, user_id).await? {
            Some(alert) => {
                tracing::info!(alert_id, user_id, "Alert acknowledged");
                self.publish_lifecycle(EVENT_ALERT_ACKNOWLEDGED, &alert);
                Ok(alert)
            }
            // Lost a race: the row moved on between the read and the
            // guarded update. Report the transition against its state now.
            None => Err(self.stale_transition(alert_id, STATUS_ACKNOWLEDGED).await),
        }
    }

    /// Resolve an ACKNOWLEDGED alert, closing the violation episode.
    pub async fn resolve_alert(
        &self,
        alert_id: DbId,
        user_id: &str,
        resolution_notes: &str,
    ) -> Result<Alert, MonitorError> {
        let current = self.get_alert(alert_id).await?;
        validate_transition(&current.status, STATUS_RESOLVED)?;

        match AlertRepo::set_resolved(&self.pool, alert_id, user_id, resolution_notes).await? {
            Some(alert) => {
                tracing::info!(alert_id, user_id, "Alert resolved");
                self.publish_lifecycle(EVENT_ALERT_RESOLVED, &alert);
                Ok(alert)
            }
            None => Err(self.stale_transition(alert_id, STATUS_RESOLVED).await),
        }
    }

    /// Get an alert by ID.
    pub async fn get_alert(&self, alert_id: DbId) -> Result<Alert, MonitorError> {
        AlertRepo::get_by_id(&self.pool, alert_id)
            .await?
            .ok_or_else(|| MonitorError::not_found("alert", alert_id))
    }

    /// Build the error for a guarded update that matched no row.
    async fn stale_transition(&self, alert_id: DbId, target: &str) -> MonitorError {
        match AlertRepo::get_by_id(&self.pool, alert_id).await {
            Ok(Some(alert)) => CoreError::InvalidTransition {
                entity: "alert",
                from: alert.status,
                to: target.to_string(),
            }
            .into(),
            Ok(None) => MonitorError::not_found("alert", alert_id),
            Err(e) => e.into(),
        }
    }

    fn publish_lifecycle(&self, event_type: &str, alert: &Alert) {
        self.bus.publish(
            MonitorEvent::new(event_type)
                .with_entity(alert.alert_entity_type.clone(), alert.alert_entity_id)
                .with_payload(serde_json::json!({
                    "alertId": alert.id,
                    "alertType": alert.alert_type,
                    "severity": alert.severity,
                    "status": alert.status,
                })),
        );
    }
}

/// Human-readable message for a temperature threshold violation.
fn violation_message(
    temperature: f64,
    threshold_value: f64,
    threshold_type: ThresholdType,
) -> String {
    format!(
        "Temperature threshold violated: {temperature:.1}\u{b0}C \
         (threshold: {threshold_value:.1}\u{b0}C, type: {})",
        threshold_type.as_str()
    )
}

fn is_unique_violation(error: &sqlx::Error) -> bool {
    matches!(error, sqlx::Error::Database(db) if db.is_unique_violation())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
