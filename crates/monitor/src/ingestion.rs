//! Reading ingestion pipeline.
//!
//! One call per telemetry sample: resolve the policy in force, classify
//! the reading, persist it, and hand any threshold violation off to the
//! event bus. The handoff is fire-and-forget — `ingest` returns as soon
//! as the reading row is durably stored, and alert creation happens on
//! the violation worker's execution path. Alert-side failures can never
//! roll back a reading.

use std::sync::Arc;

use coldwatch_core::evaluation::{evaluate_status, temperature_violation, ReadingStatus};
use coldwatch_core::types::{DbId, Timestamp};
use coldwatch_db::models::reading::{CreateReading, Reading};
use coldwatch_db::repositories::{FreezerRepo, ReadingRepo};
use coldwatch_db::DbPool;
use coldwatch_events::{EventBus, ThresholdViolatedPayload};

use crate::error::MonitorError;
use crate::profiles::ThresholdProfileService;

/// One telemetry sample as delivered by a poller or gateway.
#[derive(Debug, Clone)]
pub struct IncomingReading {
    pub recorded_at: Timestamp,
    pub temperature_celsius: Option<f64>,
    pub humidity_percent: Option<f64>,
    pub transmission_ok: bool,
    pub error_message: Option<String>,
}

/// Accepts telemetry samples and drives the evaluate-persist-notify
/// pipeline.
pub struct ReadingIngestionService {
    pool: DbPool,
    bus: Arc<EventBus>,
    profiles: ThresholdProfileService,
}

impl ReadingIngestionService {
    /// Create a new service with the given pool and event bus.
    pub fn new(pool: DbPool, bus: Arc<EventBus>) -> Self {
        let profiles = ThresholdProfileService::new(pool.clone());
        Self { pool, bus, profiles }
    }

    /// Ingest one reading for a freezer.
    ///
    /// A failed transmission is recorded as-is (temperature may be null
    /// or a stale last-known value) with status CRITICAL; the pipeline
    /// never rejects it. Readings are classified against the profile in
    /// force at `recorded_at`, so late-arriving samples are judged by
    /// the policy of their own instant, not today's.
    pub async fn ingest(
        &self,
        freezer_id: DbId,
        sample: IncomingReading,
    ) -> Result<Reading, MonitorError> {
        let freezer = FreezerRepo::get_by_id(&self.pool, freezer_id)
            .await?
            .ok_or_else(|| MonitorError::not_found("freezer", freezer_id))?;

        let profile = self
            .profiles
            .resolve_active_profile(freezer.id, sample.recorded_at)
            .await?;
        if profile.is_none() {
            tracing::debug!(
                freezer_id,
                freezer_name = %freezer.name,
                "No threshold profile in force, reading evaluates as NORMAL"
            );
        }
        let bounds = profile.as_ref().map(|p| p.bounds());

        let status = if sample.transmission_ok {
            evaluate_status(
                sample.temperature_celsius,
                sample.humidity_percent,
                bounds.as_ref(),
            )
        } else {
            ReadingStatus::Critical
        };

        let reading = ReadingRepo::insert(
            &self.pool,
            &CreateReading {
                freezer_id,
                recorded_at: sample.recorded_at,
                temperature_celsius: sample.temperature_celsius,
                humidity_percent: sample.humidity_percent,
                status: status.as_str().to_string(),
                transmission_ok: sample.transmission_ok,
                error_message: sample.error_message,
            },
        )
        .await?;

        // The reading is durably stored; everything past this point is
        // notification only.
        if let Some(bounds) = &bounds {
            if let (Some(temperature), Some(violation)) = (
                sample.temperature_celsius,
                temperature_violation(sample.temperature_celsius, bounds),
            ) {
                tracing::info!(
                    freezer_id,
                    reading_id = reading.id,
                    temperature,
                    threshold_value = violation.threshold_value,
                    threshold_type = violation.threshold_type.as_str(),
                    "Temperature threshold violated, notifying alert evaluation"
                );
                self.bus.publish(
                    ThresholdViolatedPayload {
                        freezer_id,
                        reading_id: reading.id,
                        temperature,
                        threshold_value: violation.threshold_value,
                        threshold_type: violation.threshold_type.as_str().to_string(),
                    }
                    .into_event(),
                );
            }
        }

        Ok(reading)
    }
}
