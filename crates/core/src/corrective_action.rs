//! Corrective action status/type constants and transition rules.
//!
//! Remediation work items move forward-only: PENDING → IN_PROGRESS →
//! COMPLETED. Completion carries notes and a timestamp, so it has its own
//! service entry point; the generic status update only ever targets
//! IN_PROGRESS.

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Status constants
// ---------------------------------------------------------------------------

/// Created but nobody has started working on it.
pub const STATUS_PENDING: &str = "PENDING";
/// An operator is actively working the item.
pub const STATUS_IN_PROGRESS: &str = "IN_PROGRESS";
/// Work finished; completion notes recorded.
pub const STATUS_COMPLETED: &str = "COMPLETED";

/// All valid corrective action statuses.
pub const VALID_STATUSES: &[&str] = &[STATUS_PENDING, STATUS_IN_PROGRESS, STATUS_COMPLETED];

// ---------------------------------------------------------------------------
// Action types
// ---------------------------------------------------------------------------

pub const ACTION_TEMPERATURE_ADJUSTMENT: &str = "TEMPERATURE_ADJUSTMENT";
pub const ACTION_EQUIPMENT_REPAIR: &str = "EQUIPMENT_REPAIR";
pub const ACTION_SAMPLE_RELOCATION: &str = "SAMPLE_RELOCATION";
pub const ACTION_MAINTENANCE: &str = "MAINTENANCE";
pub const ACTION_OTHER: &str = "OTHER";

/// All valid corrective action types.
pub const VALID_ACTION_TYPES: &[&str] = &[
    ACTION_TEMPERATURE_ADJUSTMENT,
    ACTION_EQUIPMENT_REPAIR,
    ACTION_SAMPLE_RELOCATION,
    ACTION_MAINTENANCE,
    ACTION_OTHER,
];

// ---------------------------------------------------------------------------
// Status transitions
// ---------------------------------------------------------------------------

/// Returns the set of statuses that `from_status` may transition to.
///
/// Transition rules:
/// - `PENDING`     -> `IN_PROGRESS`
/// - `IN_PROGRESS` -> `IN_PROGRESS` (no-op refresh), `COMPLETED`
/// - `COMPLETED`   -> (terminal)
///
/// `PENDING -> COMPLETED` is deliberately absent: completing an item that
/// was never started is rejected.
pub fn valid_transitions(from_status: &str) -> &'static [&'static str] {
    match from_status {
        STATUS_PENDING => &[STATUS_IN_PROGRESS],
        STATUS_IN_PROGRESS => &[STATUS_IN_PROGRESS, STATUS_COMPLETED],
        _ => &[],
    }
}

/// Validate that a status transition from `current` to `next` is allowed.
pub fn validate_transition(current: &str, next: &str) -> Result<(), CoreError> {
    if valid_transitions(current).contains(&next) {
        Ok(())
    } else {
        Err(CoreError::InvalidTransition {
            entity: "corrective action",
            from: current.to_string(),
            to: next.to_string(),
        })
    }
}

/// Validate that a status string is one of the known statuses.
pub fn validate_status(status: &str) -> Result<(), CoreError> {
    if VALID_STATUSES.contains(&status) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Invalid corrective action status '{status}'. Must be one of: {VALID_STATUSES:?}"
        )))
    }
}

/// Validate that an action type string is one of the known types.
pub fn validate_action_type(action_type: &str) -> Result<(), CoreError> {
    if VALID_ACTION_TYPES.contains(&action_type) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Invalid corrective action type '{action_type}'. Must be one of: {VALID_ACTION_TYPES:?}"
        )))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pending_can_only_move_to_in_progress() {
        assert!(validate_transition(STATUS_PENDING, STATUS_IN_PROGRESS).is_ok());
        assert!(validate_transition(STATUS_PENDING, STATUS_COMPLETED).is_err());
        assert!(validate_transition(STATUS_PENDING, STATUS_PENDING).is_err());
    }

    #[test]
    fn in_progress_allows_refresh_and_completion() {
        assert!(validate_transition(STATUS_IN_PROGRESS, STATUS_IN_PROGRESS).is_ok());
        assert!(validate_transition(STATUS_IN_PROGRESS, STATUS_COMPLETED).is_ok());
        assert!(validate_transition(STATUS_IN_PROGRESS, STATUS_PENDING).is_err());
    }

    #[test]
    fn completed_is_terminal() {
        assert!(validate_transition(STATUS_COMPLETED, STATUS_PENDING).is_err());
        assert!(validate_transition(STATUS_COMPLETED, STATUS_IN_PROGRESS).is_err());
        assert!(validate_transition(STATUS_COMPLETED, STATUS_COMPLETED).is_err());
    }

    #[test]
    fn known_statuses_and_types_validate() {
        for s in VALID_STATUSES {
            assert!(validate_status(s).is_ok());
        }
        for t in VALID_ACTION_TYPES {
            assert!(validate_action_type(t).is_ok());
        }
        assert!(validate_status("RETRACTED").is_err());
        assert!(validate_action_type("CALIBRATION").is_err());
    }
}
