//! Threshold profile models.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use coldwatch_core::evaluation::ThresholdBounds;
use coldwatch_core::types::{DbId, Timestamp};

/// A named threshold policy applied to readings.
///
/// Immutable in practice once referenced by an assignment; policy changes
/// are represented by new profiles and new effective-dated assignments.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ThresholdProfile {
    pub id: DbId,
    pub name: String,
    pub description: Option<String>,
    pub warning_min: Option<f64>,
    pub warning_max: Option<f64>,
    pub critical_min: Option<f64>,
    pub critical_max: Option<f64>,
    pub humidity_warning_min: Option<f64>,
    pub humidity_warning_max: Option<f64>,
    pub min_excursion_minutes: Option<i32>,
    pub max_duration_minutes: Option<i32>,
    pub created_by: Option<String>,
    pub created_at: Timestamp,
}

impl ThresholdProfile {
    /// The evaluator-facing slice of this profile.
    pub fn bounds(&self) -> ThresholdBounds {
        ThresholdBounds {
            warning_min: self.warning_min,
            warning_max: self.warning_max,
            critical_min: self.critical_min,
            critical_max: self.critical_max,
            humidity_warning_min: self.humidity_warning_min,
            humidity_warning_max: self.humidity_warning_max,
        }
    }
}

/// DTO for creating a threshold profile.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateThresholdProfile {
    pub name: String,
    pub description: Option<String>,
    pub warning_min: Option<f64>,
    pub warning_max: Option<f64>,
    pub critical_min: Option<f64>,
    pub critical_max: Option<f64>,
    pub humidity_warning_min: Option<f64>,
    pub humidity_warning_max: Option<f64>,
    pub min_excursion_minutes: Option<i32>,
    pub max_duration_minutes: Option<i32>,
}

impl CreateThresholdProfile {
    /// The evaluator-facing slice of the profile being created, used for
    /// bounds validation before the INSERT.
    pub fn bounds(&self) -> ThresholdBounds {
        ThresholdBounds {
            warning_min: self.warning_min,
            warning_max: self.warning_max,
            critical_min: self.critical_min,
            critical_max: self.critical_max,
            humidity_warning_min: self.humidity_warning_min,
            humidity_warning_max: self.humidity_warning_max,
        }
    }
}
