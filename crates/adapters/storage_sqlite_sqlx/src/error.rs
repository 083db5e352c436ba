//! Storage-specific error type wrapping sqlx errors.

use hivekeep_domain::error::{ConflictError, HiveKeepError};

/// Errors originating from the `SQLite` storage layer.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// A query or connection failed.
    #[error("database error")]
    Database(#[from] sqlx::Error),

    /// Failed to run migrations.
    #[error("migration error")]
    Migration(#[from] sqlx::migrate::MigrateError),
}

impl From<StorageError> for HiveKeepError {
    fn from(err: StorageError) -> Self {
        Self::Storage(Box::new(err))
    }
}

/// Schema constraint that rejected a write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Violation {
    Unique,
    ForeignKey,
}

/// Classify `err` as a constraint violation, if it is one.
pub(crate) fn violation(err: &sqlx::Error) -> Option<Violation> {
    let sqlx::Error::Database(db) = err else {
        return None;
    };
    if db.is_unique_violation() {
        Some(Violation::Unique)
    } else if db.is_foreign_key_violation() {
        Some(Violation::ForeignKey)
    } else {
        None
    }
}

/// Map a failed insert/update: a unique violation means the code is taken.
pub(crate) fn on_write(err: sqlx::Error, entity: &'static str, code: &str) -> HiveKeepError {
    match violation(&err) {
        Some(Violation::Unique) => ConflictError::DuplicateCode {
            entity,
            code: code.to_string(),
        }
        .into(),
        _ => StorageError::from(err).into(),
    }
}

/// Map a failed delete: a foreign-key violation means children still exist.
pub(crate) fn on_remove(err: sqlx::Error, entity: &'static str, id: i64) -> HiveKeepError {
    match violation(&err) {
        Some(Violation::ForeignKey) => ConflictError::InUse {
            entity,
            id: id.to_string(),
        }
        .into(),
        _ => StorageError::from(err).into(),
    }
}
