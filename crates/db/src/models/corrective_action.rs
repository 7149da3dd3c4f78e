//! Corrective action entity models.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use coldwatch_core::types::{DbId, Timestamp};

/// A remediation work item for a freezer, typically raised against an
/// open alert (no hard foreign key — the link is the entity identifier).
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct CorrectiveAction {
    pub id: DbId,
    pub freezer_id: DbId,
    pub action_type: String,
    pub description: String,
    pub status: String,
    pub is_edited: bool,
    pub created_by: String,
    pub created_at: Timestamp,
    pub updated_at: Option<Timestamp>,
    pub updated_by: Option<String>,
    pub completed_at: Option<Timestamp>,
    pub completion_notes: Option<String>,
}

/// DTO for creating a corrective action.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateCorrectiveAction {
    pub freezer_id: DbId,
    pub action_type: String,
    pub description: String,
    pub created_by: String,
}
