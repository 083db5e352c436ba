//! Common error types used across the workspace.
//!
//! Each layer defines its own typed errors and converts into
//! [`HiveKeepError`] via `From`, so services can propagate with `?`.

use std::fmt;

/// Top-level error returned by application services and ports.
#[derive(Debug, thiserror::Error)]
pub enum HiveKeepError {
    /// A request failed field validation.
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    /// The requested record (or its parent) does not exist.
    #[error("{0}")]
    NotFound(#[from] NotFoundError),

    /// A uniqueness or lifecycle rule would be violated.
    #[error("{0}")]
    Conflict(#[from] ConflictError),

    /// The storage backend failed.
    #[error("storage error")]
    Storage(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// Field-level validation failures.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// A text field is shorter or longer than allowed.
    #[error("{field} must be between {min} and {max} characters long")]
    Length {
        field: &'static str,
        min: usize,
        max: usize,
    },

    /// A text field must have an exact length.
    #[error("{field} must be exactly {len} characters long")]
    ExactLength { field: &'static str, len: usize },

    /// A price was negative or not a finite number.
    #[error("price must be a non-negative number")]
    InvalidPrice,

    /// An identifier could not be parsed.
    #[error("invalid identifier {0:?}")]
    InvalidId(String),

    /// A deleted-status flag was neither `true` nor `false`.
    #[error("invalid deleted status {0:?}")]
    InvalidStatus(String),

    /// The request body could not be decoded.
    #[error("malformed request body: {0}")]
    MalformedBody(String),
}

/// A record looked up by id does not exist.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{entity} {id} not found")]
pub struct NotFoundError {
    pub entity: &'static str,
    pub id: String,
}

impl NotFoundError {
    /// Build a not-found error for `entity` with the given id.
    #[must_use]
    pub fn new(entity: &'static str, id: impl fmt::Display) -> Self {
        Self {
            entity,
            id: id.to_string(),
        }
    }
}

/// Reasons a write is refused because of the current stored state.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConflictError {
    /// Another record of the same kind already uses this code.
    #[error("{entity} with code {code:?} already exists")]
    DuplicateCode { entity: &'static str, code: String },

    /// Hard delete attempted on a record that is still active.
    #[error("{entity} {id} must be marked as deleted before it can be removed")]
    NotSoftDeleted { entity: &'static str, id: String },

    /// Hard delete attempted on a record that other records still reference.
    #[error("{entity} {id} is still referenced by other records")]
    InUse { entity: &'static str, id: String },
}
