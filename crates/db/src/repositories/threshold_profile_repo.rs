//! Repository for the `threshold_profiles` table.

use sqlx::PgPool;

use coldwatch_core::types::DbId;

use crate::models::threshold_profile::{CreateThresholdProfile, ThresholdProfile};

/// Column list for `threshold_profiles` queries.
const COLUMNS: &str = "\
    id, name, description, warning_min, warning_max, critical_min, critical_max, \
    humidity_warning_min, humidity_warning_max, min_excursion_minutes, \
    max_duration_minutes, created_by, created_at";

/// Column list for INSERT (excludes auto-generated columns).
const INSERT_COLUMNS: &str = "\
    name, description, warning_min, warning_max, critical_min, critical_max, \
    humidity_warning_min, humidity_warning_max, min_excursion_minutes, \
    max_duration_minutes, created_by";

/// Provides query operations for threshold profiles.
pub struct ThresholdProfileRepo;

impl ThresholdProfileRepo {
    /// Create a new profile.
    pub async fn insert(
        pool: &PgPool,
        dto: &CreateThresholdProfile,
        created_by: &str,
    ) -> Result<ThresholdProfile, sqlx::Error> {
        let query = format!(
            "INSERT INTO threshold_profiles ({INSERT_COLUMNS}) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ThresholdProfile>(&query)
            .bind(&dto.name)
            .bind(&dto.description)
            .bind(dto.warning_min)
            .bind(dto.warning_max)
            .bind(dto.critical_min)
            .bind(dto.critical_max)
            .bind(dto.humidity_warning_min)
            .bind(dto.humidity_warning_max)
            .bind(dto.min_excursion_minutes)
            .bind(dto.max_duration_minutes)
            .bind(created_by)
            .fetch_one(pool)
            .await
    }

    /// Get a single profile by ID.
    pub async fn get_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<ThresholdProfile>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM threshold_profiles WHERE id = $1");
        sqlx::query_as::<_, ThresholdProfile>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all profiles, ordered by name.
    pub async fn list_all(pool: &PgPool) -> Result<Vec<ThresholdProfile>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM threshold_profiles ORDER BY name, id");
        sqlx::query_as::<_, ThresholdProfile>(&query)
            .fetch_all(pool)
            .await
    }
}
