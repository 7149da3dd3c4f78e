//! Threshold profile validation helpers.
//!
//! Profiles are validated once, at creation time. The evaluator assumes
//! well-formed bounds and does not re-check them per reading.

use crate::error::CoreError;
use crate::evaluation::ThresholdBounds;

/// Validate the ordering of whichever bounds are present on a profile.
///
/// Required orderings (checked only for pairs that are both set):
/// - `warning_min < warning_max`
/// - `critical_min < critical_max`
/// - `critical_min <= warning_min` and `warning_max <= critical_max`
///   (the warning band nests inside the critical band)
/// - `humidity_warning_min < humidity_warning_max`
pub fn validate_profile_bounds(bounds: &ThresholdBounds) -> Result<(), CoreError> {
    require_less(bounds.warning_min, bounds.warning_max, "warning_min", "warning_max")?;
    require_less(bounds.critical_min, bounds.critical_max, "critical_min", "critical_max")?;
    require_not_greater(bounds.critical_min, bounds.warning_min, "critical_min", "warning_min")?;
    require_not_greater(bounds.warning_max, bounds.critical_max, "warning_max", "critical_max")?;
    require_less(
        bounds.humidity_warning_min,
        bounds.humidity_warning_max,
        "humidity_warning_min",
        "humidity_warning_max",
    )?;
    Ok(())
}

/// Validate the excursion policy fields carried on a profile.
pub fn validate_excursion_minutes(
    min_excursion_minutes: Option<i32>,
    max_duration_minutes: Option<i32>,
) -> Result<(), CoreError> {
    if let Some(minutes) = min_excursion_minutes {
        if minutes < 0 {
            return Err(CoreError::Validation(format!(
                "min_excursion_minutes must not be negative, got {minutes}"
            )));
        }
    }
    if let Some(minutes) = max_duration_minutes {
        if minutes < 0 {
            return Err(CoreError::Validation(format!(
                "max_duration_minutes must not be negative, got {minutes}"
            )));
        }
    }
    Ok(())
}

fn require_less(
    low: Option<f64>,
    high: Option<f64>,
    low_name: &str,
    high_name: &str,
) -> Result<(), CoreError> {
    if let (Some(low), Some(high)) = (low, high) {
        if low >= high {
            return Err(CoreError::Validation(format!(
                "{low_name} ({low}) must be below {high_name} ({high})"
            )));
        }
    }
    Ok(())
}

fn require_not_greater(
    low: Option<f64>,
    high: Option<f64>,
    low_name: &str,
    high_name: &str,
) -> Result<(), CoreError> {
    if let (Some(low), Some(high)) = (low, high) {
        if low > high {
            return Err(CoreError::Validation(format!(
                "{low_name} ({low}) must not exceed {high_name} ({high})"
            )));
        }
    }
    Ok(())
}
