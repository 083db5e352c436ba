//! Storage port: the capability interface every record store provides.
//!
//! One store exists per record kind. Adapters implement [`RecordStore`] for
//! every kind and [`ChildStore`] for kinds that belong to a parent.

use std::future::Future;
use std::sync::Arc;

use hivekeep_domain::error::HiveKeepError;
use hivekeep_domain::record::{Draft, Page, Record};

/// Persistence for one record kind.
pub trait RecordStore<R: Record> {
    /// Look up a record by id.
    fn find_by_id(
        &self,
        id: R::Id,
    ) -> impl Future<Output = Result<Option<R>, HiveKeepError>> + Send;

    /// Look up a record by code, deleted or not, optionally ignoring `except`.
    fn find_by_code(
        &self,
        code: &str,
        except: Option<R::Id>,
    ) -> impl Future<Output = Result<Option<R>, HiveKeepError>> + Send;

    /// Whether the parent a new record would hang under exists.
    fn parent_exists(
        &self,
        parent: R::Parent,
    ) -> impl Future<Output = Result<bool, HiveKeepError>> + Send;

    /// Records ordered by id ascending, windowed by `page`.
    fn list(&self, page: Page) -> impl Future<Output = Result<Vec<R>, HiveKeepError>> + Send;

    /// Child data attached to the list item of record `id`.
    fn count_children(
        &self,
        id: R::Id,
    ) -> impl Future<Output = Result<R::ChildCount, HiveKeepError>> + Send;

    /// Persist a new record and return it with its storage-assigned id.
    fn insert(&self, draft: Draft<R>) -> impl Future<Output = Result<R, HiveKeepError>> + Send;

    /// Overwrite an existing record.
    ///
    /// Fails with [`HiveKeepError::NotFound`] when the record is gone.
    fn save(&self, record: &R) -> impl Future<Output = Result<(), HiveKeepError>> + Send;

    /// Permanently remove a record.
    fn remove(&self, id: R::Id) -> impl Future<Output = Result<(), HiveKeepError>> + Send;
}

/// Persistence for record kinds owned by a parent record.
pub trait ChildStore<R: Record>: RecordStore<R> {
    /// Records under `parent`, ordered by id ascending.
    fn list_by_parent(
        &self,
        parent: R::Parent,
        page: Page,
    ) -> impl Future<Output = Result<Vec<R>, HiveKeepError>> + Send;
}

impl<R: Record, S: RecordStore<R>> RecordStore<R> for Arc<S> {
    fn find_by_id(
        &self,
        id: R::Id,
    ) -> impl Future<Output = Result<Option<R>, HiveKeepError>> + Send {
        (**self).find_by_id(id)
    }

    fn find_by_code(
        &self,
        code: &str,
        except: Option<R::Id>,
    ) -> impl Future<Output = Result<Option<R>, HiveKeepError>> + Send {
        (**self).find_by_code(code, except)
    }

    fn parent_exists(
        &self,
        parent: R::Parent,
    ) -> impl Future<Output = Result<bool, HiveKeepError>> + Send {
        (**self).parent_exists(parent)
    }

    fn list(&self, page: Page) -> impl Future<Output = Result<Vec<R>, HiveKeepError>> + Send {
        (**self).list(page)
    }

    fn count_children(
        &self,
        id: R::Id,
    ) -> impl Future<Output = Result<R::ChildCount, HiveKeepError>> + Send {
        (**self).count_children(id)
    }

    fn insert(&self, draft: Draft<R>) -> impl Future<Output = Result<R, HiveKeepError>> + Send {
        (**self).insert(draft)
    }

    fn save(&self, record: &R) -> impl Future<Output = Result<(), HiveKeepError>> + Send {
        (**self).save(record)
    }

    fn remove(&self, id: R::Id) -> impl Future<Output = Result<(), HiveKeepError>> + Send {
        (**self).remove(id)
    }
}

impl<R: Record, S: ChildStore<R>> ChildStore<R> for Arc<S> {
    fn list_by_parent(
        &self,
        parent: R::Parent,
        page: Page,
    ) -> impl Future<Output = Result<Vec<R>, HiveKeepError>> + Send {
        (**self).list_by_parent(parent, page)
    }
}
