//! Service-layer error type.

use coldwatch_core::CoreError;

#[derive(Debug, thiserror::Error)]
pub enum MonitorError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl MonitorError {
    /// Domain not-found error for a missing row.
    pub fn not_found(entity: &'static str, id: coldwatch_core::types::DbId) -> Self {
        MonitorError::Core(CoreError::NotFound { entity, id })
    }
}
