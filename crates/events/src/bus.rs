//! In-process event bus backed by a `tokio::sync::broadcast` channel.
//!
//! [`EventBus`] is the central publish/subscribe hub for
//! [`MonitorEvent`]s. It is designed to be shared via `Arc<EventBus>`
//! across the application. Publishing never blocks the publisher:
//! ingestion hands a violation off and returns without waiting for alert
//! evaluation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

use coldwatch_core::evaluation::ThresholdType;
use coldwatch_core::types::DbId;

// ---------------------------------------------------------------------------
// Event names
// ---------------------------------------------------------------------------

/// A reading crossed a temperature bound of its active profile.
pub const EVENT_THRESHOLD_VIOLATED: &str = "freezer.threshold_violated";
/// An alert row was created.
pub const EVENT_ALERT_CREATED: &str = "alert.created";
/// An alert moved to ACKNOWLEDGED.
pub const EVENT_ALERT_ACKNOWLEDGED: &str = "alert.acknowledged";
/// An alert moved to RESOLVED.
pub const EVENT_ALERT_RESOLVED: &str = "alert.resolved";

// ---------------------------------------------------------------------------
// MonitorEvent
// ---------------------------------------------------------------------------

/// A domain event that occurred in the monitoring engine.
///
/// Constructed via [`MonitorEvent::new`] and enriched with
/// [`with_entity`](MonitorEvent::with_entity) and
/// [`with_payload`](MonitorEvent::with_payload).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonitorEvent {
    /// Dot-separated event name, e.g. `"freezer.threshold_violated"`.
    pub event_type: String,

    /// Optional source entity kind (e.g. `"Freezer"`).
    pub entity_type: Option<String>,

    /// Optional source entity database id.
    pub entity_id: Option<DbId>,

    /// Free-form JSON payload carrying event-specific data.
    pub payload: serde_json::Value,

    /// When the event was created (UTC).
    pub timestamp: DateTime<Utc>,
}

impl MonitorEvent {
    /// Create a new event with only the required `event_type`.
    pub fn new(event_type: impl Into<String>) -> Self {
        Self {
            event_type: event_type.into(),
            entity_type: None,
            entity_id: None,
            payload: serde_json::Value::Object(Default::default()),
            timestamp: Utc::now(),
        }
    }

    /// Attach the source entity to the event.
    pub fn with_entity(mut self, entity_type: impl Into<String>, entity_id: DbId) -> Self {
        self.entity_type = Some(entity_type.into());
        self.entity_id = Some(entity_id);
        self
    }

    /// Set the JSON payload for the event.
    pub fn with_payload(mut self, payload: serde_json::Value) -> Self {
        self.payload = payload;
        self
    }
}

// ---------------------------------------------------------------------------
// Threshold violation payload
// ---------------------------------------------------------------------------

/// Typed payload of a [`EVENT_THRESHOLD_VIOLATED`] event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThresholdViolatedPayload {
    pub freezer_id: DbId,
    pub reading_id: DbId,
    pub temperature: f64,
    pub threshold_value: f64,
    pub threshold_type: String,
}

impl ThresholdViolatedPayload {
    /// Build the violation event for a crossed bound.
    pub fn into_event(self) -> MonitorEvent {
        let freezer_id = self.freezer_id;
        let payload = serde_json::to_value(&self).unwrap_or_default();
        MonitorEvent::new(EVENT_THRESHOLD_VIOLATED)
            .with_entity("Freezer", freezer_id)
            .with_payload(payload)
    }

    /// Parse the payload back out of a violation event.
    pub fn from_event(event: &MonitorEvent) -> Result<Self, serde_json::Error> {
        serde_json::from_value(event.payload.clone())
    }

    /// The crossed bound as a typed tag.
    pub fn threshold_type(&self) -> Option<ThresholdType> {
        ThresholdType::parse(&self.threshold_type).ok()
    }
}

// ---------------------------------------------------------------------------
// EventBus
// ---------------------------------------------------------------------------

/// Default buffer capacity for the broadcast channel.
const DEFAULT_CAPACITY: usize = 1024;

/// In-process fan-out event bus.
///
/// Wraps a [`broadcast::Sender`] so that any number of subscribers can
/// independently receive every published [`MonitorEvent`].
pub struct EventBus {
    sender: broadcast::Sender<MonitorEvent>,
}

impl EventBus {
    /// Create a bus with a specific channel capacity.
    ///
    /// When the buffer is full, the oldest un-consumed messages are
    /// dropped and slow receivers will observe a `RecvError::Lagged`.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Publish an event to all current subscribers.
    ///
    /// If there are no active subscribers the event is silently dropped.
    pub fn publish(&self, event: MonitorEvent) {
        // Ignore the SendError — it only means there are zero receivers.
        let _ = self.sender.send(event);
    }

    /// Subscribe to all events published on this bus.
    pub fn subscribe(&self) -> broadcast::Receiver<MonitorEvent> {
        self.sender.subscribe()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
