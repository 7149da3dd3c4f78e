//! Corrective action tracker.
//!
//! A remediation work item moves forward-only through PENDING →
//! IN_PROGRESS → COMPLETED. The tracker operates on the same entity
//! identifiers as alerts but is driven by operators, not by ingestion.

use coldwatch_core::corrective_action::{
    validate_action_type, validate_status, validate_transition, STATUS_COMPLETED,
};
use coldwatch_core::types::{DbId, Timestamp};
use coldwatch_core::CoreError;
use coldwatch_db::models::corrective_action::{CorrectiveAction, CreateCorrectiveAction};
use coldwatch_db::repositories::{CorrectiveActionRepo, FreezerRepo};
use coldwatch_db::DbPool;

use crate::error::MonitorError;

/// Owns the corrective action lifecycle.
pub struct CorrectiveActionService {
    pool: DbPool,
}

impl CorrectiveActionService {
    /// Create a new service with the given database pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Create a PENDING corrective action for a freezer.
    pub async fn create_corrective_action(
        &self,
        freezer_id: DbId,
        action_type: &str,
        description: &str,
        user_id: &str,
    ) -> Result<CorrectiveAction, MonitorError> {
        validate_action_type(action_type)?;
        FreezerRepo::get_by_id(&self.pool, freezer_id)
            .await?
            .ok_or_else(|| MonitorError::not_found("freezer", freezer_id))?;

        let action = CorrectiveActionRepo::insert(
            &self.pool,
            &CreateCorrectiveAction {
                freezer_id,
                action_type: action_type.to_string(),
                description: description.to_string(),
                created_by: user_id.to_string(),
            },
        )
        .await?;
        tracing::info!(
            action_id = action.id,
            freezer_id,
            action_type,
            "Corrective action created"
        );
        Ok(action)
    }

    /// Move an action to a new status.
    ///
    /// Only IN_PROGRESS is reachable through this call (`PENDING →
    /// IN_PROGRESS`, or `IN_PROGRESS → IN_PROGRESS` as a no-op refresh).
    /// Completion carries notes and a timestamp and goes through
    /// [`complete_corrective_action`](Self::complete_corrective_action).
    pub async fn update_corrective_action_status(
        &self,
        action_id: DbId,
        new_status: &str,
        user_id: &str,
    ) -> Result<CorrectiveAction, MonitorError> {
        validate_status(new_status)?;
        let current = self.get_action(action_id).await?;
        validate_transition(&current.status, new_status)?;
        if new_status == STATUS_COMPLETED {
            return Err(CoreError::Validation(
                "Completion requires completion notes; use complete_corrective_action".into(),
            )
            .into());
        }

        match CorrectiveActionRepo::set_status(
            &self.pool,
            action_id,
            &current.status,
            new_status,
            user_id,
        )
        .await?
        {
            Some(action) => {
                tracing::info!(action_id, new_status, user_id, "Corrective action updated");
                Ok(action)
            }
            None => Err(self.stale_transition(action_id, new_status).await),
        }
    }

    /// Complete an IN_PROGRESS action, recording the completion notes.
    pub async fn complete_corrective_action(
        &self,
        action_id: DbId,
        user_id: &str,
        completion_notes: &str,
    ) -> Result<CorrectiveAction, MonitorError> {
        let current = self.get_action(action_id).await?;
        validate_transition(&current.status, STATUS_COMPLETED)?;

        match CorrectiveActionRepo::set_completed(&self.pool, action_id, user_id, completion_notes)
            .await?
        {
            Some(action) => {
                tracing::info!(action_id, user_id, "Corrective action completed");
                Ok(action)
            }
            None => Err(self.stale_transition(action_id, STATUS_COMPLETED).await),
        }
    }

    /// Rewrite an action's description, marking it as edited.
    pub async fn update_corrective_action_description(
        &self,
        action_id: DbId,
        description: &str,
        user_id: &str,
    ) -> Result<CorrectiveAction, MonitorError> {
        let current = self.get_action(action_id).await?;
        if current.status == STATUS_COMPLETED {
            return Err(CoreError::Validation(
                "Cannot edit the description of a completed corrective action".into(),
            )
            .into());
        }

        CorrectiveActionRepo::update_description(&self.pool, action_id, description, user_id)
            .await?
            .ok_or_else(|| MonitorError::not_found("corrective action", action_id))
    }

    /// List actions with the given status.
    pub async fn get_corrective_actions_by_status(
        &self,
        status: &str,
    ) -> Result<Vec<CorrectiveAction>, MonitorError> {
        validate_status(status)?;
        Ok(CorrectiveActionRepo::list_by_status(&self.pool, status).await?)
    }

    /// List all actions for a freezer.
    pub async fn get_corrective_actions_for_freezer(
        &self,
        freezer_id: DbId,
    ) -> Result<Vec<CorrectiveAction>, MonitorError> {
        Ok(CorrectiveActionRepo::list_for_freezer(&self.pool, freezer_id).await?)
    }

    /// List actions created inside the given range.
    pub async fn get_corrective_actions_in_range(
        &self,
        start: Timestamp,
        end: Timestamp,
    ) -> Result<Vec<CorrectiveAction>, MonitorError> {
        Ok(CorrectiveActionRepo::list_in_range(&self.pool, start, end).await?)
    }

    /// Get an action by ID.
    pub async fn get_action(&self, action_id: DbId) -> Result<CorrectiveAction, MonitorError> {
        CorrectiveActionRepo::get_by_id(&self.pool, action_id)
            .await?
            .ok_or_else(|| MonitorError::not_found("corrective action", action_id))
    }

    /// Build the error for a guarded update that matched no row.
    async fn stale_transition(&self, action_id: DbId, target: &str) -> MonitorError {
        match CorrectiveActionRepo::get_by_id(&self.pool, action_id).await {
            Ok(Some(action)) => CoreError::InvalidTransition {
                entity: "corrective action",
                from: action.status,
                to: target.to_string(),
            }
            .into(),
            Ok(None) => MonitorError::not_found("corrective action", action_id),
            Err(e) => e.into(),
        }
    }
}
