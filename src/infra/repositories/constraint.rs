//! Mapping of storage-engine constraint violations onto domain errors.

use sea_orm::{DbErr, SqlErr};

use crate::errors::AppError;

/// Translate a write failure, turning a unique-constraint violation into
/// `on_conflict` and anything else into `StoreUnavailable`.
///
/// The engine's unique index is the only arbiter between concurrent writers,
/// so this is where duplicate detection actually happens.
pub(crate) fn map_unique_violation(err: DbErr, on_conflict: AppError) -> AppError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(detail)) => {
            tracing::debug!(%detail, "unique constraint rejected write");
            on_conflict
        }
        _ => AppError::from(err),
    }
}
