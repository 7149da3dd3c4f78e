//! Repository for the `freezers` table.

use sqlx::PgPool;

use coldwatch_core::types::DbId;

use crate::models::freezer::{CreateFreezer, Freezer};

/// Column list for `freezers` queries.
const COLUMNS: &str = "id, name, target_temperature, is_active, created_at";

/// Provides query operations for the monitored-device registry.
pub struct FreezerRepo;

impl FreezerRepo {
    /// Register a freezer.
    pub async fn insert(pool: &PgPool, dto: &CreateFreezer) -> Result<Freezer, sqlx::Error> {
        let query = format!(
            "INSERT INTO freezers (name, target_temperature, is_active) \
             VALUES ($1, $2, COALESCE($3, true)) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Freezer>(&query)
            .bind(&dto.name)
            .bind(dto.target_temperature)
            .bind(dto.is_active)
            .fetch_one(pool)
            .await
    }

    /// Get a freezer by ID.
    pub async fn get_by_id(pool: &PgPool, id: DbId) -> Result<Option<Freezer>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM freezers WHERE id = $1");
        sqlx::query_as::<_, Freezer>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List freezers currently flagged active.
    pub async fn list_active(pool: &PgPool) -> Result<Vec<Freezer>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM freezers WHERE is_active = true ORDER BY id");
        sqlx::query_as::<_, Freezer>(&query).fetch_all(pool).await
    }
}
