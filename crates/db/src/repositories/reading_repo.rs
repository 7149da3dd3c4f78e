//! Repository for the `readings` table (append-only time-series).

use sqlx::PgPool;

use coldwatch_core::types::{DbId, Timestamp};

use crate::models::reading::{CreateReading, Reading};

/// Column list for `readings` SELECT queries.
const COLUMNS: &str = "\
    id, freezer_id, recorded_at, temperature_celsius, humidity_percent, \
    status, transmission_ok, error_message, created_at";

/// Column list for INSERT (excludes auto-generated `id` and `created_at`).
const INSERT_COLUMNS: &str = "\
    freezer_id, recorded_at, temperature_celsius, humidity_percent, \
    status, transmission_ok, error_message";

/// Provides query operations for telemetry readings.
pub struct ReadingRepo;

impl ReadingRepo {
    /// Insert a single reading. Rows are never updated or deleted.
    pub async fn insert(pool: &PgPool, reading: &CreateReading) -> Result<Reading, sqlx::Error> {
        let query = format!(
            "INSERT INTO readings ({INSERT_COLUMNS}) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Reading>(&query)
            .bind(reading.freezer_id)
            .bind(reading.recorded_at)
            .bind(reading.temperature_celsius)
            .bind(reading.humidity_percent)
            .bind(&reading.status)
            .bind(reading.transmission_ok)
            .bind(&reading.error_message)
            .fetch_one(pool)
            .await
    }

    /// Get readings for a freezer recorded at or after `since`, newest
    /// first.
    pub async fn get_for_freezer(
        pool: &PgPool,
        freezer_id: DbId,
        since: Timestamp,
    ) -> Result<Vec<Reading>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM readings \
             WHERE freezer_id = $1 AND recorded_at >= $2 \
             ORDER BY recorded_at DESC, id DESC"
        );
        sqlx::query_as::<_, Reading>(&query)
            .bind(freezer_id)
            .bind(since)
            .fetch_all(pool)
            .await
    }

    /// Get the most recent reading for a freezer, if any.
    pub async fn latest_for_freezer(
        pool: &PgPool,
        freezer_id: DbId,
    ) -> Result<Option<Reading>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM readings \
             WHERE freezer_id = $1 \
             ORDER BY recorded_at DESC, id DESC \
             LIMIT 1"
        );
        sqlx::query_as::<_, Reading>(&query)
            .bind(freezer_id)
            .fetch_optional(pool)
            .await
    }
}
