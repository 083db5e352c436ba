//! The shape shared by every stored record kind.
//!
//! Hives, hive sections, product categories, and catalogue products all follow
//! the same rules: a unique `code`, an integer id assigned by storage, an
//! optional parent, and a [`Lifecycle`]. [`Record`] captures that shape so a
//! single application service can manage all four kinds.

use std::fmt;

use serde::Deserialize;

use crate::error::ValidationError;
use crate::lifecycle::Lifecycle;

/// Request payload used both to create and to update a record.
pub trait UpdateRequest: Send + Sync + 'static {
    /// The code the record will carry after the write.
    fn code(&self) -> &str;

    /// Check field-level invariants.
    ///
    /// # Errors
    ///
    /// Returns the first [`ValidationError`] found.
    fn validate(&self) -> Result<(), ValidationError>;
}

/// A stored record kind.
pub trait Record: Clone + Send + Sync + Sized + 'static {
    /// Human-readable kind name used in errors and logs.
    const KIND: &'static str;

    /// Kind name of the owning record, used when the parent is missing.
    const PARENT_KIND: &'static str = "Root";

    type Id: Copy + Eq + fmt::Debug + fmt::Display + Send + Sync + 'static;

    /// Id of the owning record, or [`Root`] for top-level kinds.
    type Parent: Copy + Eq + fmt::Debug + fmt::Display + Send + Sync + 'static;

    type Request: UpdateRequest;

    /// Row shape returned by listings.
    type ListItem: Send + 'static;

    /// Extra data attached to each list item: a child count for top-level
    /// kinds, `()` for kinds without children.
    type ChildCount: Send + 'static;

    fn id(&self) -> Self::Id;

    fn code(&self) -> &str;

    fn parent(&self) -> Self::Parent;

    fn lifecycle(&self) -> &Lifecycle;

    fn lifecycle_mut(&mut self) -> &mut Lifecycle;

    /// Materialise a stored record once storage has assigned `id`.
    fn from_draft(id: Self::Id, draft: Draft<Self>) -> Self;

    /// Overwrite the request-controlled fields in place.
    fn apply(&mut self, request: Self::Request);

    fn into_list_item(self, children: Self::ChildCount) -> Self::ListItem;
}

/// Parent of top-level records. Always exists.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Root;

impl fmt::Display for Root {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("root")
    }
}

/// A record that has not been persisted yet.
pub struct Draft<R: Record> {
    pub parent: R::Parent,
    pub request: R::Request,
    pub lifecycle: Lifecycle,
}

impl<R: Record> Draft<R> {
    #[must_use]
    pub fn code(&self) -> &str {
        self.request.code()
    }
}

/// Offset/limit window over an id-ordered listing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Page {
    /// Number of rows to skip.
    pub start: u32,
    /// Maximum number of rows to return; `None` means no limit.
    pub amount: Option<u32>,
}

impl Page {
    /// Every row.
    #[must_use]
    pub const fn all() -> Self {
        Self {
            start: 0,
            amount: None,
        }
    }

    #[must_use]
    pub const fn new(start: u32, amount: u32) -> Self {
        Self {
            start,
            amount: Some(amount),
        }
    }

    /// Apply the window to an already ordered iterator.
    pub fn slice<T>(self, items: impl IntoIterator<Item = T>) -> Vec<T> {
        let skipped = items.into_iter().skip(self.start as usize);
        match self.amount {
            Some(amount) => skipped.take(amount as usize).collect(),
            None => skipped.collect(),
        }
    }
}

/// Length checks shared by the request types.
pub(crate) mod checks {
    use crate::error::ValidationError;

    pub fn length(
        field: &'static str,
        value: &str,
        min: usize,
        max: usize,
    ) -> Result<(), ValidationError> {
        let len = value.chars().count();
        if len < min || len > max {
            return Err(ValidationError::Length { field, min, max });
        }
        Ok(())
    }

    pub fn exact_length(field: &'static str, value: &str, len: usize) -> Result<(), ValidationError> {
        if value.chars().count() != len {
            return Err(ValidationError::ExactLength { field, len });
        }
        Ok(())
    }

    pub fn optional_length(
        field: &'static str,
        value: Option<&str>,
        max: usize,
    ) -> Result<(), ValidationError> {
        value.map_or(Ok(()), |value| length(field, value, 0, max))
    }
}
