//! Telemetry reading models (append-only).

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use coldwatch_core::types::{DbId, Timestamp};

/// A single telemetry sample recorded for a freezer.
///
/// Immutable fact: the status is computed at ingestion time and frozen
/// into the row; re-evaluation never rewrites history.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Reading {
    pub id: DbId,
    pub freezer_id: DbId,
    pub recorded_at: Timestamp,
    pub temperature_celsius: Option<f64>,
    pub humidity_percent: Option<f64>,
    pub status: String,
    pub transmission_ok: bool,
    pub error_message: Option<String>,
    pub created_at: Timestamp,
}

/// DTO for inserting a new reading row.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateReading {
    pub freezer_id: DbId,
    pub recorded_at: Timestamp,
    pub temperature_celsius: Option<f64>,
    pub humidity_percent: Option<f64>,
    pub status: String,
    pub transmission_ok: bool,
    pub error_message: Option<String>,
}
