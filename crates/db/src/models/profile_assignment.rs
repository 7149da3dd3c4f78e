//! Effective-dated links between freezers and threshold profiles.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use coldwatch_core::effective::AssignmentWindow;
use coldwatch_core::types::{DbId, Timestamp};

/// A profile assignment valid over an effective-dated window.
///
/// Multiple historical assignments may coexist for the same freezer; the
/// ranking in [`coldwatch_core::effective`] decides which one is in force
/// at a given instant.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ProfileAssignment {
    pub id: DbId,
    pub freezer_id: DbId,
    pub profile_id: DbId,
    pub effective_start: Option<Timestamp>,
    pub effective_end: Option<Timestamp>,
    pub is_default: bool,
    pub created_at: Timestamp,
}

impl ProfileAssignment {
    /// The ranking-relevant slice of this assignment.
    pub fn window(&self) -> AssignmentWindow {
        AssignmentWindow {
            id: self.id,
            profile_id: self.profile_id,
            effective_start: self.effective_start,
            effective_end: self.effective_end,
            is_default: self.is_default,
        }
    }
}

/// DTO for assigning a profile to a freezer.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateProfileAssignment {
    pub freezer_id: DbId,
    pub profile_id: DbId,
    pub effective_start: Option<Timestamp>,
    pub effective_end: Option<Timestamp>,
    pub is_default: bool,
}
