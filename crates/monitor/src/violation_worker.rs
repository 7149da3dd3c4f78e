//! Background consumer turning threshold-violation events into alerts.
//!
//! [`ViolationWorker`] subscribes to the event bus and drives the alert
//! manager for every `freezer.threshold_violated` event. It runs as a
//! long-lived task: ingestion has already stored the reading by the time
//! an event arrives here, so alert-side failures are logged and the loop
//! keeps going — they must never surface back to the ingesting caller.

use tokio::sync::broadcast;
use tokio_util::sync::CancellationToken;

use coldwatch_core::CoreError;
use coldwatch_events::bus::EVENT_THRESHOLD_VIOLATED;
use coldwatch_events::{MonitorEvent, ThresholdViolatedPayload};

use crate::alerts::AlertService;
use crate::error::MonitorError;

/// Background service that evaluates threshold-violation events.
pub struct ViolationWorker {
    alerts: AlertService,
}

impl ViolationWorker {
    /// Create a worker driving the given alert service.
    pub fn new(alerts: AlertService) -> Self {
        Self { alerts }
    }

    /// Run the evaluation loop.
    ///
    /// Consumes events from `receiver` until the bus is closed or
    /// `cancel` is triggered.
    pub async fn run(&self, mut receiver: broadcast::Receiver<MonitorEvent>, cancel: CancellationToken) {
        loop {
            tokio::select! {
                _ = cancel.cancelled() => {
                    tracing::info!("Violation worker cancelled");
                    break;
                }
                result = receiver.recv() => match result {
                    Ok(event) => {
                        if event.event_type != EVENT_THRESHOLD_VIOLATED {
                            continue;
                        }
                        if let Err(e) = self.handle_violation(&event).await {
                            tracing::error!(
                                error = %e,
                                entity_id = event.entity_id,
                                "Failed to evaluate threshold violation"
                            );
                        }
                    }
                    Err(broadcast::error::RecvError::Lagged(n)) => {
                        tracing::warn!(
                            skipped = n,
                            "Violation worker lagged, some violations were not evaluated"
                        );
                    }
                    Err(broadcast::error::RecvError::Closed) => {
                        tracing::info!("Event bus closed, violation worker shutting down");
                        break;
                    }
                },
            }
        }
    }

    /// Create or deduplicate the alert for a single violation event.
    async fn handle_violation(&self, event: &MonitorEvent) -> Result<(), MonitorError> {
        let payload = ThresholdViolatedPayload::from_event(event).map_err(|e| {
            CoreError::Validation(format!("Malformed threshold violation payload: {e}"))
        })?;
        let threshold_type = payload.threshold_type().ok_or_else(|| {
            CoreError::Validation(format!(
                "Unknown threshold type '{}' on violation event",
                payload.threshold_type
            ))
        })?;

        self.alerts
            .create_freezer_temperature_alert(
                payload.freezer_id,
                payload.temperature,
                payload.threshold_value,
                threshold_type,
            )
            .await?;
        Ok(())
    }
}
