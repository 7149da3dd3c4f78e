//! Alert entity models.
//!
//! Alerts link to any monitored entity through `(alert_entity_type,
//! alert_entity_id)`; `context_data` is an opaque JSONB payload carrying
//! type-specific details (e.g. the violating temperature and the crossed
//! threshold) stored verbatim for display and audit.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use coldwatch_core::types::{DbId, Timestamp};

/// An alert lifecycle record.
///
/// Never physically deleted: resolved alerts remain queryable history.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Alert {
    pub id: DbId,
    pub alert_type: String,
    pub alert_entity_type: String,
    pub alert_entity_id: DbId,
    pub severity: String,
    pub status: String,
    pub message: String,
    pub context_data: serde_json::Value,
    pub start_time: Timestamp,
    pub end_time: Option<Timestamp>,
    pub duplicate_count: i32,
    pub last_duplicate_time: Option<Timestamp>,
    pub acknowledged_at: Option<Timestamp>,
    pub acknowledged_by: Option<String>,
    pub resolved_at: Option<Timestamp>,
    pub resolved_by: Option<String>,
    pub resolution_notes: Option<String>,
    pub created_at: Timestamp,
}

/// DTO for raising a new alert.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateAlert {
    pub alert_type: String,
    pub alert_entity_type: String,
    pub alert_entity_id: DbId,
    pub severity: String,
    pub message: String,
    pub context_data: serde_json::Value,
}
