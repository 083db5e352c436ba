//! Record service: use-cases shared by hives, sections, categories, and products.

use std::marker::PhantomData;

use chrono::Utc;

use hivekeep_domain::error::{ConflictError, HiveKeepError, NotFoundError};
use hivekeep_domain::hive::Hive;
use hivekeep_domain::hive_section::HiveSection;
use hivekeep_domain::lifecycle::{Lifecycle, Status};
use hivekeep_domain::product::CatalogueProduct;
use hivekeep_domain::product_category::ProductCategory;
use hivekeep_domain::record::{Draft, Page, Record, UpdateRequest};

use crate::ports::{ChildStore, RecordStore, UserContext};

/// Application service for one record kind.
///
/// Every write runs as a single read-check-write sequence against the store.
/// Code uniqueness is checked up front so callers get a clean
/// [`ConflictError::DuplicateCode`]; the store is expected to enforce the same
/// rule for writes that race past the check.
pub struct RecordService<R, S, U> {
    store: S,
    users: U,
    kind: PhantomData<fn() -> R>,
}

pub type HiveService<S, U> = RecordService<Hive, S, U>;
pub type HiveSectionService<S, U> = RecordService<HiveSection, S, U>;
pub type ProductCategoryService<S, U> = RecordService<ProductCategory, S, U>;
pub type ProductService<S, U> = RecordService<CatalogueProduct, S, U>;

impl<R, S, U> RecordService<R, S, U>
where
    R: Record,
    S: RecordStore<R>,
    U: UserContext,
{
    /// Create a new service backed by the given store and user context.
    pub fn new(store: S, users: U) -> Self {
        Self {
            store,
            users,
            kind: PhantomData,
        }
    }

    /// List records ordered by id, each with its child data.
    ///
    /// Child counts are fetched with one query per record.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the store.
    #[tracing::instrument(skip(self), fields(kind = R::KIND))]
    pub async fn list(&self, page: Page) -> Result<Vec<R::ListItem>, HiveKeepError> {
        let records = self.store.list(page).await?;
        self.list_items(records).await
    }

    /// Look up a record by id.
    ///
    /// # Errors
    ///
    /// Returns [`HiveKeepError::NotFound`] when no record with `id` exists,
    /// or a storage error from the store.
    #[tracing::instrument(skip(self), fields(kind = R::KIND))]
    pub async fn get(&self, id: R::Id) -> Result<R, HiveKeepError> {
        self.store
            .find_by_id(id)
            .await?
            .ok_or_else(|| NotFoundError::new(R::KIND, id).into())
    }

    /// Create a record under `parent`, stamped with the acting user.
    ///
    /// # Errors
    ///
    /// Returns [`HiveKeepError::Validation`] for invalid fields,
    /// [`HiveKeepError::Conflict`] when any record (deleted or not) already
    /// uses the code, [`HiveKeepError::NotFound`] when the parent is missing,
    /// or a storage error from the store.
    #[tracing::instrument(skip(self, request), fields(kind = R::KIND, code = request.code()))]
    pub async fn create(&self, parent: R::Parent, request: R::Request) -> Result<R, HiveKeepError> {
        request.validate()?;
        self.ensure_code_free(request.code(), None).await?;

        if !self.store.parent_exists(parent).await? {
            return Err(NotFoundError::new(R::PARENT_KIND, parent).into());
        }

        let draft = Draft {
            parent,
            request,
            lifecycle: Lifecycle::created(self.users.user_id(), Utc::now()),
        };
        let record = self.store.insert(draft).await?;

        tracing::info!(id = %record.id(), "record created");
        Ok(record)
    }

    /// Overwrite the request fields of record `id`.
    ///
    /// # Errors
    ///
    /// Returns [`HiveKeepError::Validation`] for invalid fields,
    /// [`HiveKeepError::Conflict`] when another record uses the code,
    /// [`HiveKeepError::NotFound`] when `id` is missing, or a storage error.
    #[tracing::instrument(skip(self, request), fields(kind = R::KIND, code = request.code()))]
    pub async fn update(&self, id: R::Id, request: R::Request) -> Result<R, HiveKeepError> {
        request.validate()?;
        self.ensure_code_free(request.code(), Some(id)).await?;

        let mut record = self.get(id).await?;
        record.apply(request);
        record
            .lifecycle_mut()
            .touch(self.users.user_id(), Utc::now());
        self.store.save(&record).await?;

        tracing::debug!("record updated");
        Ok(record)
    }

    /// Permanently remove a soft-deleted record.
    ///
    /// # Errors
    ///
    /// Returns [`HiveKeepError::NotFound`] when `id` is missing,
    /// [`HiveKeepError::Conflict`] when the record is still active, or a
    /// storage error from the store.
    #[tracing::instrument(skip(self), fields(kind = R::KIND))]
    pub async fn delete(&self, id: R::Id) -> Result<(), HiveKeepError> {
        let record = self.get(id).await?;
        if !record.lifecycle().is_removable() {
            return Err(ConflictError::NotSoftDeleted {
                entity: R::KIND,
                id: id.to_string(),
            }
            .into());
        }

        self.store.remove(id).await?;

        tracing::info!("record removed");
        Ok(())
    }

    /// Mark record `id` as deleted or restore it.
    ///
    /// Nothing is written when the record is already in the requested state.
    ///
    /// # Errors
    ///
    /// Returns [`HiveKeepError::NotFound`] when `id` is missing, or a storage
    /// error from the store.
    #[tracing::instrument(skip(self), fields(kind = R::KIND))]
    pub async fn set_status(&self, id: R::Id, deleted: bool) -> Result<(), HiveKeepError> {
        let mut record = self.get(id).await?;

        let changed = record.lifecycle_mut().transition(
            Status::from_deleted(deleted),
            self.users.user_id(),
            Utc::now(),
        );
        if changed {
            self.store.save(&record).await?;
            tracing::debug!(status = ?record.lifecycle().status(), "status changed");
        }

        Ok(())
    }

    async fn ensure_code_free(
        &self,
        code: &str,
        except: Option<R::Id>,
    ) -> Result<(), HiveKeepError> {
        if self.store.find_by_code(code, except).await?.is_some() {
            return Err(ConflictError::DuplicateCode {
                entity: R::KIND,
                code: code.to_string(),
            }
            .into());
        }
        Ok(())
    }

    async fn list_items(&self, records: Vec<R>) -> Result<Vec<R::ListItem>, HiveKeepError> {
        let mut items = Vec::with_capacity(records.len());
        for record in records {
            let children = self.store.count_children(record.id()).await?;
            items.push(record.into_list_item(children));
        }
        Ok(items)
    }
}

impl<R, S, U> RecordService<R, S, U>
where
    R: Record,
    S: ChildStore<R>,
    U: UserContext,
{
    /// List the records owned by `parent`, ordered by id.
    ///
    /// # Errors
    ///
    /// Returns [`HiveKeepError::NotFound`] when the parent is missing, or a
    /// storage error from the store.
    #[tracing::instrument(skip(self), fields(kind = R::KIND))]
    pub async fn list_by_parent(
        &self,
        parent: R::Parent,
        page: Page,
    ) -> Result<Vec<R::ListItem>, HiveKeepError> {
        if !self.store.parent_exists(parent).await? {
            return Err(NotFoundError::new(R::PARENT_KIND, parent).into());
        }
        let records = self.store.list_by_parent(parent, page).await?;
        self.list_items(records).await
    }
}
