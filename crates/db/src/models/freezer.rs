//! Monitored cold-storage unit registry entries.
//!
//! The full device registry (connection parameters, storage hierarchy)
//! lives outside this subsystem; this table carries only what the
//! monitoring engine needs: identity, the target temperature, and the
//! active flag used for filtering.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use coldwatch_core::types::{DbId, Timestamp};

/// A monitored freezer or refrigerator.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Freezer {
    pub id: DbId,
    pub name: String,
    pub target_temperature: Option<f64>,
    pub is_active: bool,
    pub created_at: Timestamp,
}

/// DTO for registering a freezer.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateFreezer {
    pub name: String,
    pub target_temperature: Option<f64>,
    pub is_active: Option<bool>,
}
