//! Threshold profile management and point-in-time resolution.

use coldwatch_core::effective::{select_active_assignment, AssignmentWindow};
use coldwatch_core::profile_validation::{validate_excursion_minutes, validate_profile_bounds};
use coldwatch_core::types::{DbId, Timestamp};
use coldwatch_core::CoreError;
use coldwatch_db::models::profile_assignment::{CreateProfileAssignment, ProfileAssignment};
use coldwatch_db::models::threshold_profile::{CreateThresholdProfile, ThresholdProfile};
use coldwatch_db::repositories::{FreezerRepo, ProfileAssignmentRepo, ThresholdProfileRepo};
use coldwatch_db::DbPool;

use crate::error::MonitorError;

/// Profile administration and the resolver deciding which policy is in
/// force for a device at a given instant.
pub struct ThresholdProfileService {
    pool: DbPool,
}

impl ThresholdProfileService {
    /// Create a new service with the given database pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Create a threshold profile.
    ///
    /// Bounds ordering is enforced here, once; the evaluator assumes
    /// well-formed profiles from then on.
    pub async fn create_profile(
        &self,
        dto: &CreateThresholdProfile,
        created_by: &str,
    ) -> Result<ThresholdProfile, MonitorError> {
        if dto.name.trim().is_empty() {
            return Err(CoreError::Validation("Profile name must not be empty".into()).into());
        }
        validate_profile_bounds(&dto.bounds())?;
        validate_excursion_minutes(dto.min_excursion_minutes, dto.max_duration_minutes)?;

        let profile = ThresholdProfileRepo::insert(&self.pool, dto, created_by).await?;
        tracing::info!(profile_id = profile.id, name = %profile.name, "Threshold profile created");
        Ok(profile)
    }

    /// Get a profile by ID.
    pub async fn get_profile(&self, id: DbId) -> Result<ThresholdProfile, MonitorError> {
        ThresholdProfileRepo::get_by_id(&self.pool, id)
            .await?
            .ok_or_else(|| MonitorError::not_found("threshold profile", id))
    }

    /// List all profiles.
    pub async fn list_profiles(&self) -> Result<Vec<ThresholdProfile>, MonitorError> {
        Ok(ThresholdProfileRepo::list_all(&self.pool).await?)
    }

    /// Assign a profile to a freezer over an effective-dated window.
    ///
    /// Historical assignments are never deleted; a temporary override
    /// coexists with the long-running default and wins during its window.
    pub async fn assign_profile(
        &self,
        dto: &CreateProfileAssignment,
    ) -> Result<ProfileAssignment, MonitorError> {
        FreezerRepo::get_by_id(&self.pool, dto.freezer_id)
            .await?
            .ok_or_else(|| MonitorError::not_found("freezer", dto.freezer_id))?;
        ThresholdProfileRepo::get_by_id(&self.pool, dto.profile_id)
            .await?
            .ok_or_else(|| MonitorError::not_found("threshold profile", dto.profile_id))?;

        if let (Some(start), Some(end)) = (dto.effective_start, dto.effective_end) {
            if end <= start {
                return Err(CoreError::Validation(format!(
                    "effective_end ({end}) must be after effective_start ({start})"
                ))
                .into());
            }
        }

        let assignment = ProfileAssignmentRepo::insert(&self.pool, dto).await?;
        tracing::info!(
            freezer_id = assignment.freezer_id,
            profile_id = assignment.profile_id,
            is_default = assignment.is_default,
            "Profile assigned"
        );
        Ok(assignment)
    }

    /// Resolve the profile in force for a freezer at `at`, if any.
    ///
    /// All assignments for the device are read in a single snapshot
    /// query and ranked in memory, so a concurrently superseded
    /// assignment can never be half-observed. `None` means no policy
    /// applies and readings evaluate as NORMAL.
    pub async fn resolve_active_profile(
        &self,
        freezer_id: DbId,
        at: Timestamp,
    ) -> Result<Option<ThresholdProfile>, MonitorError> {
        let assignments = ProfileAssignmentRepo::list_for_freezer(&self.pool, freezer_id).await?;
        let windows: Vec<AssignmentWindow> = assignments.iter().map(|a| a.window()).collect();

        let Some(selected) = select_active_assignment(&windows, at) else {
            return Ok(None);
        };

        Ok(ThresholdProfileRepo::get_by_id(&self.pool, selected.profile_id).await?)
    }
}
