//! Repository for the `alerts` table.
//!
//! The invariant "at most one non-RESOLVED alert per
//! `(alert_entity_type, alert_entity_id, alert_type)`" is owned by the
//! database: a partial unique index over that key (`WHERE status <>
//! 'RESOLVED'`) plus the single-statement upsert in
//! [`AlertRepo::insert_or_increment`]. Two concurrent violations for the
//! same key cannot both insert; the loser of the race lands on the
//! `DO UPDATE` arm and becomes a duplicate increment. Unrelated keys
//! never contend.

use sqlx::PgPool;

use coldwatch_core::types::DbId;

use crate::models::alert::{Alert, CreateAlert};

/// Column list for `alerts` queries.
const COLUMNS: &str = "\
    id, alert_type, alert_entity_type, alert_entity_id, severity, status, \
    message, context_data, start_time, end_time, duplicate_count, \
    last_duplicate_time, acknowledged_at, acknowledged_by, resolved_at, \
    resolved_by, resolution_notes, created_at";

/// Column list for INSERT (excludes auto-generated and lifecycle columns).
const INSERT_COLUMNS: &str = "\
    alert_type, alert_entity_type, alert_entity_id, severity, status, \
    message, context_data, start_time, duplicate_count";

/// Provides query operations for alerts.
pub struct AlertRepo;

impl AlertRepo {
    /// Insert a new OPEN alert.
    ///
    /// A same-key insert while a non-RESOLVED alert exists violates the
    /// partial unique index and surfaces as a unique-violation database
    /// error; the service layer maps it to a domain conflict.
    pub async fn insert(pool: &PgPool, dto: &CreateAlert) -> Result<Alert, sqlx::Error> {
        let query = format!(
            "INSERT INTO alerts ({INSERT_COLUMNS}) \
             VALUES ($1, $2, $3, $4, 'OPEN', $5, $6, NOW(), 0) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Alert>(&query)
            .bind(&dto.alert_type)
            .bind(&dto.alert_entity_type)
            .bind(dto.alert_entity_id)
            .bind(&dto.severity)
            .bind(&dto.message)
            .bind(&dto.context_data)
            .fetch_one(pool)
            .await
    }

    /// Insert a new OPEN alert, or absorb the violation into the existing
    /// non-RESOLVED alert for the same key.
    ///
    /// On conflict only `duplicate_count` and `last_duplicate_time`
    /// change; identity, `start_time`, severity, message, and status of
    /// the existing alert are untouched. A RESOLVED alert never absorbs —
    /// it is outside the index predicate, so a fresh row is created.
    pub async fn insert_or_increment(
        pool: &PgPool,
        dto: &CreateAlert,
    ) -> Result<Alert, sqlx::Error> {
        let query = format!(
            "INSERT INTO alerts ({INSERT_COLUMNS}) \
             VALUES ($1, $2, $3, $4, 'OPEN', $5, $6, NOW(), 0) \
             ON CONFLICT (alert_entity_type, alert_entity_id, alert_type) \
                WHERE status <> 'RESOLVED' \
             DO UPDATE SET \
                duplicate_count = alerts.duplicate_count + 1, \
                last_duplicate_time = NOW() \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Alert>(&query)
            .bind(&dto.alert_type)
            .bind(&dto.alert_entity_type)
            .bind(dto.alert_entity_id)
            .bind(&dto.severity)
            .bind(&dto.message)
            .bind(&dto.context_data)
            .fetch_one(pool)
            .await
    }

    /// Get a single alert by ID.
    pub async fn get_by_id(pool: &PgPool, id: DbId) -> Result<Option<Alert>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM alerts WHERE id = $1");
        sqlx::query_as::<_, Alert>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// All alerts for an entity, any status, newest first (id as
    /// tiebreak so the order is deterministic).
    pub async fn list_by_entity(
        pool: &PgPool,
        entity_type: &str,
        entity_id: DbId,
    ) -> Result<Vec<Alert>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM alerts \
             WHERE alert_entity_type = $1 AND alert_entity_id = $2 \
             ORDER BY start_time DESC, id DESC"
        );
        sqlx::query_as::<_, Alert>(&query)
            .bind(entity_type)
            .bind(entity_id)
            .fetch_all(pool)
            .await
    }

    /// Count alerts for an entity that are still OPEN.
    ///
    /// Acknowledged alerts are being handled and are excluded, as are
    /// resolved ones.
    pub async fn count_open_for_entity(
        pool: &PgPool,
        entity_type: &str,
        entity_id: DbId,
    ) -> Result<i64, sqlx::Error> {
        let row: (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM alerts \
             WHERE alert_entity_type = $1 AND alert_entity_id = $2 AND status = 'OPEN'",
        )
        .bind(entity_type)
        .bind(entity_id)
        .fetch_one(pool)
        .await?;
        Ok(row.0)
    }

    /// Move an OPEN alert to ACKNOWLEDGED.
    ///
    /// The status guard in the WHERE clause makes the transition atomic:
    /// `None` means the alert is missing or no longer OPEN.
    pub async fn set_acknowledged(
        pool: &PgPool,
        id: DbId,
        user_id: &str,
    ) -> Result<Option<Alert>, sqlx::Error> {
        let query = format!(
            "UPDATE alerts SET \
                status = 'ACKNOWLEDGED', \
                acknowledged_at = NOW(), \
                acknowledged_by = $2 \
             WHERE id = $1 AND status = 'OPEN' \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Alert>(&query)
            .bind(id)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// Move an ACKNOWLEDGED alert to RESOLVED, closing the violation
    /// episode (`end_time`).
    pub async fn set_resolved(
        pool: &PgPool,
        id: DbId,
        user_id: &str,
        resolution_notes: &str,
    ) -> Result<Option<Alert>, sqlx::Error> {
        let query = format!(
            "UPDATE alerts SET \
                status = 'RESOLVED', \
                resolved_at = NOW(), \
                resolved_by = $2, \
                resolution_notes = $3, \
                end_time = NOW() \
             WHERE id = $1 AND status = 'ACKNOWLEDGED' \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Alert>(&query)
            .bind(id)
            .bind(user_id)
            .bind(resolution_notes)
            .fetch_optional(pool)
            .await
    }
}
