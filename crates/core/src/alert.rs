//! Alert status constants, lifecycle transition rules, and severity
//! derivation.
//!
//! An alert is a mutable lifecycle record keyed by
//! `(entity_type, entity_id, alert_type)`. The lifecycle is forward-only:
//! OPEN → ACKNOWLEDGED → RESOLVED.

use crate::error::CoreError;
use crate::evaluation::ThresholdType;

// ---------------------------------------------------------------------------
// Alert types
// ---------------------------------------------------------------------------

/// Threshold violation on a monitored cold-storage unit.
pub const TYPE_FREEZER_TEMPERATURE: &str = "FREEZER_TEMPERATURE";
/// Hardware malfunction reported by an operator or external system.
pub const TYPE_EQUIPMENT_FAILURE: &str = "EQUIPMENT_FAILURE";
/// Stock below the configured minimum.
pub const TYPE_INVENTORY_LOW: &str = "INVENTORY_LOW";

/// All valid alert types.
pub const VALID_TYPES: &[&str] = &[
    TYPE_FREEZER_TEMPERATURE,
    TYPE_EQUIPMENT_FAILURE,
    TYPE_INVENTORY_LOW,
];

/// Entity type tag for cold-storage units.
pub const ENTITY_FREEZER: &str = "Freezer";

// ---------------------------------------------------------------------------
// Severity
// ---------------------------------------------------------------------------

/// The value crossed a warning bound.
pub const SEVERITY_WARNING: &str = "WARNING";
/// The value crossed a critical bound.
pub const SEVERITY_CRITICAL: &str = "CRITICAL";

/// All valid severities.
pub const VALID_SEVERITIES: &[&str] = &[SEVERITY_WARNING, SEVERITY_CRITICAL];

/// Severity of a threshold-violation alert, derived from the crossed bound.
pub fn severity_for_threshold_type(threshold_type: ThresholdType) -> &'static str {
    if threshold_type.is_critical() {
        SEVERITY_CRITICAL
    } else {
        SEVERITY_WARNING
    }
}

// ---------------------------------------------------------------------------
// Status and transitions
// ---------------------------------------------------------------------------

/// Newly raised, nobody is handling it yet.
pub const STATUS_OPEN: &str = "OPEN";
/// An operator has taken ownership; the incident is being handled.
pub const STATUS_ACKNOWLEDGED: &str = "ACKNOWLEDGED";
/// The incident is over; the record remains as history.
pub const STATUS_RESOLVED: &str = "RESOLVED";

/// All valid alert statuses.
pub const VALID_STATUSES: &[&str] = &[STATUS_OPEN, STATUS_ACKNOWLEDGED, STATUS_RESOLVED];

/// Returns the set of statuses that `from_status` may transition to.
///
/// Transition rules (forward-only, no re-open):
/// - `OPEN`         -> `ACKNOWLEDGED`
/// - `ACKNOWLEDGED` -> `RESOLVED`
/// - `RESOLVED`     -> (terminal)
pub fn valid_transitions(from_status: &str) -> &'static [&'static str] {
    match from_status {
        STATUS_OPEN => &[STATUS_ACKNOWLEDGED],
        STATUS_ACKNOWLEDGED => &[STATUS_RESOLVED],
        _ => &[],
    }
}

/// Validate that a status transition from `current` to `next` is allowed.
pub fn validate_transition(current: &str, next: &str) -> Result<(), CoreError> {
    if valid_transitions(current).contains(&next) {
        Ok(())
    } else {
        Err(CoreError::InvalidTransition {
            entity: "alert",
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
            "Invalid alert status '{status}'. Must be one of: {VALID_STATUSES:?}"
        )))
    }
}

/// Validate that an alert type string is one of the known types.
pub fn validate_type(alert_type: &str) -> Result<(), CoreError> {
    if VALID_TYPES.contains(&alert_type) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Invalid alert type '{alert_type}'. Must be one of: {VALID_TYPES:?}"
        )))
    }
}

/// Validate that a severity string is one of the known severities.
pub fn validate_severity(severity: &str) -> Result<(), CoreError> {
    if VALID_SEVERITIES.contains(&severity) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Invalid alert severity '{severity}'. Must be one of: {VALID_SEVERITIES:?}"
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
    fn open_can_only_be_acknowledged() {
        assert!(validate_transition(STATUS_OPEN, STATUS_ACKNOWLEDGED).is_ok());
        assert!(validate_transition(STATUS_OPEN, STATUS_RESOLVED).is_err());
        assert!(validate_transition(STATUS_OPEN, STATUS_OPEN).is_err());
    }

    #[test]
    fn acknowledged_can_only_be_resolved() {
        assert!(validate_transition(STATUS_ACKNOWLEDGED, STATUS_RESOLVED).is_ok());
        assert!(validate_transition(STATUS_ACKNOWLEDGED, STATUS_OPEN).is_err());
    }

    #[test]
    fn resolved_is_terminal() {
        assert!(validate_transition(STATUS_RESOLVED, STATUS_OPEN).is_err());
        assert!(validate_transition(STATUS_RESOLVED, STATUS_ACKNOWLEDGED).is_err());
        assert!(validate_transition(STATUS_RESOLVED, STATUS_RESOLVED).is_err());
    }

    #[test]
    fn transition_error_names_both_states() {
        let err = validate_transition(STATUS_RESOLVED, STATUS_ACKNOWLEDGED).unwrap_err();
        match err {
            CoreError::InvalidTransition { entity, from, to } => {
                assert_eq!(entity, "alert");
                assert_eq!(from, STATUS_RESOLVED);
                assert_eq!(to, STATUS_ACKNOWLEDGED);
            }
            other => panic!("expected InvalidTransition, got {other:?}"),
        }
    }

    #[test]
    fn severity_follows_threshold_type() {
        assert_eq!(
            severity_for_threshold_type(ThresholdType::CriticalHigh),
            SEVERITY_CRITICAL
        );
        assert_eq!(
            severity_for_threshold_type(ThresholdType::CriticalLow),
            SEVERITY_CRITICAL
        );
        assert_eq!(
            severity_for_threshold_type(ThresholdType::WarningHigh),
            SEVERITY_WARNING
        );
        assert_eq!(
            severity_for_threshold_type(ThresholdType::WarningLow),
            SEVERITY_WARNING
        );
    }

    #[test]
    fn unknown_strings_are_rejected() {
        assert!(validate_status("CLOSED").is_err());
        assert!(validate_type("DOOR_OPEN").is_err());
        assert!(validate_severity("FATAL").is_err());
        for s in VALID_STATUSES {
            assert!(validate_status(s).is_ok());
        }
        for t in VALID_TYPES {
            assert!(validate_type(t).is_ok());
        }
    }
}
