//! Repository for the `freezer_profile_assignments` table.

use sqlx::PgPool;

use coldwatch_core::types::DbId;

use crate::models::profile_assignment::{CreateProfileAssignment, ProfileAssignment};

/// Column list for `freezer_profile_assignments` queries.
const COLUMNS: &str = "\
    id, freezer_id, profile_id, effective_start, effective_end, is_default, created_at";

/// Provides query operations for effective-dated profile assignments.
pub struct ProfileAssignmentRepo;

impl ProfileAssignmentRepo {
    /// Create an assignment.
    pub async fn insert(
        pool: &PgPool,
        dto: &CreateProfileAssignment,
    ) -> Result<ProfileAssignment, sqlx::Error> {
        let query = format!(
            "INSERT INTO freezer_profile_assignments \
                (freezer_id, profile_id, effective_start, effective_end, is_default) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ProfileAssignment>(&query)
            .bind(dto.freezer_id)
            .bind(dto.profile_id)
            .bind(dto.effective_start)
            .bind(dto.effective_end)
            .bind(dto.is_default)
            .fetch_one(pool)
            .await
    }

    /// Snapshot all assignments for a freezer in one query.
    ///
    /// Resolution ranks the snapshot in memory; a single SELECT means the
    /// ranking never observes a half-applied policy change.
    pub async fn list_for_freezer(
        pool: &PgPool,
        freezer_id: DbId,
    ) -> Result<Vec<ProfileAssignment>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM freezer_profile_assignments \
             WHERE freezer_id = $1 \
             ORDER BY id"
        );
        sqlx::query_as::<_, ProfileAssignment>(&query)
            .bind(freezer_id)
            .fetch_all(pool)
            .await
    }
}
