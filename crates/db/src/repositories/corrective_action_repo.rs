//! Repository for the `corrective_actions` table.

use sqlx::PgPool;

use coldwatch_core::types::{DbId, Timestamp};

use crate::models::corrective_action::{CorrectiveAction, CreateCorrectiveAction};

/// Column list for `corrective_actions` queries.
const COLUMNS: &str = "\
    id, freezer_id, action_type, description, status, is_edited, \
    created_by, created_at, updated_at, updated_by, completed_at, completion_notes";

/// Provides query operations for corrective actions.
pub struct CorrectiveActionRepo;

impl CorrectiveActionRepo {
    /// Create a new PENDING action.
    pub async fn insert(
        pool: &PgPool,
        dto: &CreateCorrectiveAction,
    ) -> Result<CorrectiveAction, sqlx::Error> {
        let query = format!(
            "INSERT INTO corrective_actions \
                (freezer_id, action_type, description, status, created_by) \
             VALUES ($1, $2, $3, 'PENDING', $4) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, CorrectiveAction>(&query)
            .bind(dto.freezer_id)
            .bind(&dto.action_type)
            .bind(&dto.description)
            .bind(&dto.created_by)
            .fetch_one(pool)
            .await
    }

    /// Get a single action by ID.
    pub async fn get_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<CorrectiveAction>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM corrective_actions WHERE id = $1");
        sqlx::query_as::<_, CorrectiveAction>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Set the status of an action, guarded by its expected current
    /// status so concurrent transitions cannot cross.
    pub async fn set_status(
        pool: &PgPool,
        id: DbId,
        expected_current: &str,
        new_status: &str,
        user_id: &str,
    ) -> Result<Option<CorrectiveAction>, sqlx::Error> {
        let query = format!(
            "UPDATE corrective_actions SET \
                status = $3, \
                updated_at = NOW(), \
                updated_by = $4 \
             WHERE id = $1 AND status = $2 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, CorrectiveAction>(&query)
            .bind(id)
            .bind(expected_current)
            .bind(new_status)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// Move an IN_PROGRESS action to COMPLETED with completion notes.
    pub async fn set_completed(
        pool: &PgPool,
        id: DbId,
        user_id: &str,
        completion_notes: &str,
    ) -> Result<Option<CorrectiveAction>, sqlx::Error> {
        let query = format!(
            "UPDATE corrective_actions SET \
                status = 'COMPLETED', \
                completed_at = NOW(), \
                completion_notes = $3, \
                updated_at = NOW(), \
                updated_by = $2 \
             WHERE id = $1 AND status = 'IN_PROGRESS' \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, CorrectiveAction>(&query)
            .bind(id)
            .bind(user_id)
            .bind(completion_notes)
            .fetch_optional(pool)
            .await
    }

    /// Rewrite the description, marking the action as edited.
    pub async fn update_description(
        pool: &PgPool,
        id: DbId,
        description: &str,
        user_id: &str,
    ) -> Result<Option<CorrectiveAction>, sqlx::Error> {
        let query = format!(
            "UPDATE corrective_actions SET \
                description = $2, \
                is_edited = true, \
                updated_at = NOW(), \
                updated_by = $3 \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, CorrectiveAction>(&query)
            .bind(id)
            .bind(description)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// List actions with the given status, oldest first.
    pub async fn list_by_status(
        pool: &PgPool,
        status: &str,
    ) -> Result<Vec<CorrectiveAction>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM corrective_actions \
             WHERE status = $1 \
             ORDER BY created_at, id"
        );
        sqlx::query_as::<_, CorrectiveAction>(&query)
            .bind(status)
            .fetch_all(pool)
            .await
    }

    /// List all actions for a freezer, newest first.
    pub async fn list_for_freezer(
        pool: &PgPool,
        freezer_id: DbId,
    ) -> Result<Vec<CorrectiveAction>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM corrective_actions \
             WHERE freezer_id = $1 \
             ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, CorrectiveAction>(&query)
            .bind(freezer_id)
            .fetch_all(pool)
            .await
    }

    /// List actions created inside `[start, end]`, oldest first.
    pub async fn list_in_range(
        pool: &PgPool,
        start: Timestamp,
        end: Timestamp,
    ) -> Result<Vec<CorrectiveAction>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM corrective_actions \
             WHERE created_at >= $1 AND created_at <= $2 \
             ORDER BY created_at, id"
        );
        sqlx::query_as::<_, CorrectiveAction>(&query)
            .bind(start)
            .bind(end)
            .fetch_all(pool)
            .await
    }
}
