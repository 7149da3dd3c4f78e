//! Threshold evaluation for cold-storage telemetry.
//!
//! Pure logic — no database access. The caller is responsible for fetching
//! the reading and the active threshold profile from the DB and passing
//! them in.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// ReadingStatus
// ---------------------------------------------------------------------------

/// Classification of a single telemetry reading against its profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReadingStatus {
    /// All measured values are inside the normal band.
    Normal,
    /// A value reached the warning band (or a humidity bound was crossed).
    Warning,
    /// The temperature reached the critical band.
    Critical,
}

impl ReadingStatus {
    /// Database/string representation of the status.
    pub fn as_str(self) -> &'static str {
        match self {
            ReadingStatus::Normal => "NORMAL",
            ReadingStatus::Warning => "WARNING",
            ReadingStatus::Critical => "CRITICAL",
        }
    }

    /// Parse the database representation back into the enum.
    pub fn parse(value: &str) -> Result<Self, CoreError> {
        match value {
            "NORMAL" => Ok(ReadingStatus::Normal),
            "WARNING" => Ok(ReadingStatus::Warning),
            "CRITICAL" => Ok(ReadingStatus::Critical),
            other => Err(CoreError::Validation(format!(
                "Unknown reading status '{other}'"
            ))),
        }
    }
}

// ---------------------------------------------------------------------------
// ThresholdType
// ---------------------------------------------------------------------------

/// Which bound of the profile a temperature reading crossed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ThresholdType {
    WarningHigh,
    WarningLow,
    CriticalHigh,
    CriticalLow,
}

impl ThresholdType {
    /// Tag carried on violation notifications and alert context data.
    pub fn as_str(self) -> &'static str {
        match self {
            ThresholdType::WarningHigh => "WARNING_HIGH",
            ThresholdType::WarningLow => "WARNING_LOW",
            ThresholdType::CriticalHigh => "CRITICAL_HIGH",
            ThresholdType::CriticalLow => "CRITICAL_LOW",
        }
    }

    /// Parse a violation tag back into the enum.
    pub fn parse(value: &str) -> Result<Self, CoreError> {
        match value {
            "WARNING_HIGH" => Ok(ThresholdType::WarningHigh),
            "WARNING_LOW" => Ok(ThresholdType::WarningLow),
            "CRITICAL_HIGH" => Ok(ThresholdType::CriticalHigh),
            "CRITICAL_LOW" => Ok(ThresholdType::CriticalLow),
            other => Err(CoreError::Validation(format!(
                "Unknown threshold type '{other}'"
            ))),
        }
    }

    /// Whether the crossed bound belongs to the critical band.
    pub fn is_critical(self) -> bool {
        matches!(self, ThresholdType::CriticalHigh | ThresholdType::CriticalLow)
    }
}

// ---------------------------------------------------------------------------
// ThresholdBounds
// ---------------------------------------------------------------------------

/// The bounds of a threshold profile used by the evaluator.
///
/// Every bound is optional; absent bounds are skipped during evaluation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ThresholdBounds {
    pub warning_min: Option<f64>,
    pub warning_max: Option<f64>,
    pub critical_min: Option<f64>,
    pub critical_max: Option<f64>,
    pub humidity_warning_min: Option<f64>,
    pub humidity_warning_max: Option<f64>,
}

/// A temperature bound crossing, in the form carried on violation
/// notifications.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TemperatureViolation {
    pub threshold_type: ThresholdType,
    pub threshold_value: f64,
}

// ---------------------------------------------------------------------------
// Evaluation
// ---------------------------------------------------------------------------

/// Classify a reading against the active profile bounds.
///
/// No profile means there is nothing to violate; the status is `Normal`.
/// A reading without a temperature cannot violate temperature bounds.
/// Boundary values count as violations on both the warning and the
/// critical edge (inclusive comparison). Humidity bounds can raise the
/// status to `Warning` but never to `Critical`.
pub fn evaluate_status(
    temperature: Option<f64>,
    humidity: Option<f64>,
    bounds: Option<&ThresholdBounds>,
) -> ReadingStatus {
    let Some(bounds) = bounds else {
        return ReadingStatus::Normal;
    };

    if let Some(temp) = temperature {
        if below(temp, bounds.critical_min) || above(temp, bounds.critical_max) {
            return ReadingStatus::Critical;
        }
    }

    let temp_warning = temperature
        .map(|t| below(t, bounds.warning_min) || above(t, bounds.warning_max))
        .unwrap_or(false);
    let humidity_warning = humidity
        .map(|h| below(h, bounds.humidity_warning_min) || above(h, bounds.humidity_warning_max))
        .unwrap_or(false);

    if temp_warning || humidity_warning {
        ReadingStatus::Warning
    } else {
        ReadingStatus::Normal
    }
}

/// Determine which temperature bound a reading crossed, if any.
///
/// Checked in priority order CRITICAL_HIGH, WARNING_HIGH, CRITICAL_LOW,
/// WARNING_LOW, with the same inclusive comparisons as
/// [`evaluate_status`]: any temperature that evaluates to `Warning` or
/// `Critical` yields `Some`.
pub fn temperature_violation(
    temperature: Option<f64>,
    bounds: &ThresholdBounds,
) -> Option<TemperatureViolation> {
    let temp = temperature?;

    if let Some(bound) = bounds.critical_max {
        if temp >= bound {
            return Some(TemperatureViolation {
                threshold_type: ThresholdType::CriticalHigh,
                threshold_value: bound,
            });
        }
    }

    if let Some(bound) = bounds.warning_max {
        if temp >= bound {
            return Some(TemperatureViolation {
                threshold_type: ThresholdType::WarningHigh,
                threshold_value: bound,
            });
        }
    }

    if let Some(bound) = bounds.critical_min {
        if temp <= bound {
            return Some(TemperatureViolation {
                threshold_type: ThresholdType::CriticalLow,
                threshold_value: bound,
            });
        }
    }

    if let Some(bound) = bounds.warning_min {
        if temp <= bound {
            return Some(TemperatureViolation {
                threshold_type: ThresholdType::WarningLow,
                threshold_value: bound,
            });
        }
    }

    None
}

fn below(value: f64, bound: Option<f64>) -> bool {
    bound.is_some_and(|b| value <= b)
}

fn above(value: f64, bound: Option<f64>) -> bool {
    bound.is_some_and(|b| value >= b)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    /// Ultra-low freezer profile: normal band is (-82, -78) exclusive.
    fn ultra_low() -> ThresholdBounds {
        ThresholdBounds {
            warning_min: Some(-82.0),
            warning_max: Some(-78.0),
            critical_min: Some(-85.0),
            critical_max: Some(-75.0),
            humidity_warning_min: None,
            humidity_warning_max: None,
        }
    }

    #[test]
    fn normal_when_inside_band() {
        let status = evaluate_status(Some(-80.0), Some(50.0), Some(&ultra_low()));
        assert_eq!(status, ReadingStatus::Normal);
    }

    #[test]
    fn normal_without_profile() {
        assert_eq!(evaluate_status(Some(-80.0), Some(50.0), None), ReadingStatus::Normal);
        assert_eq!(evaluate_status(Some(999.0), None, None), ReadingStatus::Normal);
    }

    #[test]
    fn normal_without_temperature() {
        let status = evaluate_status(None, None, Some(&ultra_low()));
        assert_eq!(status, ReadingStatus::Normal);
    }

    #[test]
    fn warning_in_high_warning_band() {
        let status = evaluate_status(Some(-77.5), Some(50.0), Some(&ultra_low()));
        assert_eq!(status, ReadingStatus::Warning);
    }

    #[test]
    fn warning_in_low_warning_band() {
        let status = evaluate_status(Some(-82.5), Some(50.0), Some(&ultra_low()));
        assert_eq!(status, ReadingStatus::Warning);
    }

    #[test]
    fn warning_exactly_at_warning_max() {
        let status = evaluate_status(Some(-78.0), Some(50.0), Some(&ultra_low()));
        assert_eq!(status, ReadingStatus::Warning);
    }

    #[test]
    fn warning_exactly_at_warning_min() {
        let status = evaluate_status(Some(-82.0), Some(50.0), Some(&ultra_low()));
        assert_eq!(status, ReadingStatus::Warning);
    }

    #[test]
    fn critical_above_critical_max() {
        let status = evaluate_status(Some(-74.0), Some(50.0), Some(&ultra_low()));
        assert_eq!(status, ReadingStatus::Critical);
    }

    #[test]
    fn critical_below_critical_min() {
        let status = evaluate_status(Some(-86.0), Some(50.0), Some(&ultra_low()));
        assert_eq!(status, ReadingStatus::Critical);
    }

    #[test]
    fn critical_exactly_at_critical_bounds() {
        assert_eq!(
            evaluate_status(Some(-85.0), None, Some(&ultra_low())),
            ReadingStatus::Critical
        );
        assert_eq!(
            evaluate_status(Some(-75.0), None, Some(&ultra_low())),
            ReadingStatus::Critical
        );
    }

    #[test]
    fn humidity_raises_warning_independently() {
        let bounds = ThresholdBounds {
            humidity_warning_min: Some(40.0),
            humidity_warning_max: Some(60.0),
            ..ultra_low()
        };
        // Temperature normal, humidity at the inclusive bound.
        assert_eq!(
            evaluate_status(Some(-80.0), Some(60.0), Some(&bounds)),
            ReadingStatus::Warning
        );
        assert_eq!(
            evaluate_status(Some(-80.0), Some(35.0), Some(&bounds)),
            ReadingStatus::Warning
        );
        // Humidity never produces CRITICAL.
        assert_eq!(
            evaluate_status(Some(-80.0), Some(100.0), Some(&bounds)),
            ReadingStatus::Warning
        );
    }

    #[test]
    fn humidity_ignored_when_absent_from_profile() {
        let status = evaluate_status(Some(-80.0), Some(99.0), Some(&ultra_low()));
        assert_eq!(status, ReadingStatus::Normal);
    }

    #[test]
    fn absent_bounds_are_skipped() {
        let bounds = ThresholdBounds {
            warning_max: Some(-78.0),
            ..Default::default()
        };
        assert_eq!(
            evaluate_status(Some(-100.0), None, Some(&bounds)),
            ReadingStatus::Normal
        );
        assert_eq!(
            evaluate_status(Some(-77.0), None, Some(&bounds)),
            ReadingStatus::Warning
        );
    }

    #[test]
    fn violation_critical_high_takes_priority() {
        let v = temperature_violation(Some(-70.0), &ultra_low()).unwrap();
        assert_eq!(v.threshold_type, ThresholdType::CriticalHigh);
        assert_eq!(v.threshold_value, -75.0);
    }

    #[test]
    fn violation_warning_high_between_bands() {
        let v = temperature_violation(Some(-77.0), &ultra_low()).unwrap();
        assert_eq!(v.threshold_type, ThresholdType::WarningHigh);
        assert_eq!(v.threshold_value, -78.0);
    }

    #[test]
    fn violation_critical_low() {
        let v = temperature_violation(Some(-90.0), &ultra_low()).unwrap();
        assert_eq!(v.threshold_type, ThresholdType::CriticalLow);
        assert_eq!(v.threshold_value, -85.0);
    }

    #[test]
    fn violation_warning_low() {
        let v = temperature_violation(Some(-83.0), &ultra_low()).unwrap();
        assert_eq!(v.threshold_type, ThresholdType::WarningLow);
        assert_eq!(v.threshold_value, -82.0);
    }

    #[test]
    fn no_violation_inside_band_or_without_temperature() {
        assert!(temperature_violation(Some(-80.0), &ultra_low()).is_none());
        assert!(temperature_violation(None, &ultra_low()).is_none());
    }

    #[test]
    fn violation_agrees_with_status() {
        // Any temperature that evaluates WARNING or CRITICAL must name a
        // crossed bound.
        let bounds = ultra_low();
        for t in [-90.0, -85.0, -84.0, -82.0, -80.0, -78.0, -76.0, -75.0, -70.0] {
            let status = evaluate_status(Some(t), None, Some(&bounds));
            let violation = temperature_violation(Some(t), &bounds);
            match status {
                ReadingStatus::Normal => assert!(violation.is_none(), "t={t}"),
                ReadingStatus::Warning => {
                    assert!(!violation.unwrap().threshold_type.is_critical(), "t={t}")
                }
                ReadingStatus::Critical => {
                    assert!(violation.unwrap().threshold_type.is_critical(), "t={t}")
                }
            }
        }
    }

    #[test]
    fn status_round_trips_through_strings() {
        for status in [ReadingStatus::Normal, ReadingStatus::Warning, ReadingStatus::Critical] {
            assert_eq!(ReadingStatus::parse(status.as_str()).unwrap(), status);
        }
        assert!(ReadingStatus::parse("bogus").is_err());
    }
}
