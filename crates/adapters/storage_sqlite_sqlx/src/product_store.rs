//! `SQLite` implementation of [`ChildStore`] for [`CatalogueProduct`].

use std::future::Future;

use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row, SqlitePool};

use hivekeep_app::ports::{ChildStore, RecordStore};
use hivekeep_domain::error::{HiveKeepError, NotFoundError};
use hivekeep_domain::id::{ProductCategoryId, ProductId};
use hivekeep_domain::product::CatalogueProduct;
use hivekeep_domain::record::{Draft, Page, Record};

use crate::error::{StorageError, Violation, on_remove, on_write, violation};
use crate::row;

struct Wrapper(CatalogueProduct);

impl Wrapper {
    fn maybe(value: Option<Self>) -> Option<CatalogueProduct> {
        value.map(|w| w.0)
    }
}

impl<'r> FromRow<'r, SqliteRow> for Wrapper {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self(CatalogueProduct {
            id: ProductId::new(row.try_get("id")?),
            name: row.try_get("name")?,
            code: row.try_get("code")?,
            category_id: ProductCategoryId::new(row.try_get("category_id")?),
            description: row.try_get("description")?,
            manufacturer_code: row.try_get("manufacturer_code")?,
            price: row.try_get("price")?,
            lifecycle: row::lifecycle(row)?,
        }))
    }
}

const INSERT: &str = r"
INSERT INTO catalogue_products (
    name, code, category_id, description, manufacturer_code, price,
    is_deleted, created, created_by, last_updated, last_updated_by
)
VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
";
const SELECT_BY_ID: &str = "SELECT * FROM catalogue_products WHERE id = ?";
const SELECT_BY_CODE: &str =
    "SELECT * FROM catalogue_products WHERE code = ? AND id != ? LIMIT 1";
const SELECT_PAGE: &str = "SELECT * FROM catalogue_products ORDER BY id LIMIT ? OFFSET ?";
const SELECT_BY_CATEGORY: &str =
    "SELECT * FROM catalogue_products WHERE category_id = ? ORDER BY id LIMIT ? OFFSET ?";
const CATEGORY_EXISTS: &str = "SELECT EXISTS (SELECT 1 FROM product_categories WHERE id = ?)";
const UPDATE: &str = r"
UPDATE catalogue_products
SET name = ?, code = ?, description = ?, manufacturer_code = ?, price = ?,
    is_deleted = ?, last_updated = ?, last_updated_by = ?
WHERE id = ?
";
const DELETE_BY_ID: &str = "DELETE FROM catalogue_products WHERE id = ?";

/// `SQLite`-backed catalogue product store.
pub struct SqliteProductStore {
    pool: SqlitePool,
}

impl SqliteProductStore {
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

impl RecordStore<CatalogueProduct> for SqliteProductStore {
    fn find_by_id(
        &self,
        id: ProductId,
    ) -> impl Future<Output = Result<Option<CatalogueProduct>, HiveKeepError>> + Send {
        let pool = self.pool.clone();
        async move {
            let row: Option<Wrapper> = sqlx::query_as(SELECT_BY_ID)
                .bind(id.get())
                .fetch_optional(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(Wrapper::maybe(row))
        }
    }

    fn find_by_code(
        &self,
        code: &str,
        except: Option<ProductId>,
    ) -> impl Future<Output = Result<Option<CatalogueProduct>, HiveKeepError>> + Send {
        let pool = self.pool.clone();
        let code = code.to_string();
        async move {
            let row: Option<Wrapper> = sqlx::query_as(SELECT_BY_CODE)
                .bind(code)
                .bind(except.map_or(row::NO_ID, ProductId::get))
                .fetch_optional(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(Wrapper::maybe(row))
        }
    }

    fn parent_exists(
        &self,
        category_id: ProductCategoryId,
    ) -> impl Future<Output = Result<bool, HiveKeepError>> + Send {
        let pool = self.pool.clone();
        async move {
            let exists: bool = sqlx::query_scalar(CATEGORY_EXISTS)
                .bind(category_id.get())
                .fetch_one(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(exists)
        }
    }

    fn list(
        &self,
        page: Page,
    ) -> impl Future<Output = Result<Vec<CatalogueProduct>, HiveKeepError>> + Send {
        let pool = self.pool.clone();
        async move {
            let (limit, offset) = row::window(page);
            let rows: Vec<Wrapper> = sqlx::query_as(SELECT_PAGE)
                .bind(limit)
                .bind(offset)
                .fetch_all(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(rows.into_iter().map(|w| w.0).collect())
        }
    }

    fn count_children(
        &self,
        _: ProductId,
    ) -> impl Future<Output = Result<(), HiveKeepError>> + Send {
        async { Ok(()) }
    }

    fn insert(
        &self,
        draft: Draft<CatalogueProduct>,
    ) -> impl Future<Output = Result<CatalogueProduct, HiveKeepError>> + Send {
        let pool = self.pool.clone();
        async move {
            let request = &draft.request;
            let stamps = &draft.lifecycle;
            let id = sqlx::query(INSERT)
                .bind(&request.name)
                .bind(&request.code)
                .bind(draft.parent.get())
                .bind(request.description.as_deref())
                .bind(request.manufacturer_code.as_deref())
                .bind(request.price)
                .bind(stamps.is_deleted)
                .bind(stamps.created.to_rfc3339())
                .bind(stamps.created_by.get())
                .bind(stamps.last_updated.to_rfc3339())
                .bind(stamps.last_updated_by.get())
                .execute(&pool)
                .await
                .map_err(|err| match violation(&err) {
                    Some(Violation::ForeignKey) => HiveKeepError::from(NotFoundError::new(
                        CatalogueProduct::PARENT_KIND,
                        draft.parent,
                    )),
                    _ => on_write(err, CatalogueProduct::KIND, &request.code),
                })?
                .last_insert_rowid();

            Ok(CatalogueProduct::from_draft(ProductId::new(id), draft))
        }
    }

    fn save(
        &self,
        product: &CatalogueProduct,
    ) -> impl Future<Output = Result<(), HiveKeepError>> + Send {
        let pool = self.pool.clone();
        let product = product.clone();
        async move {
            let updated = sqlx::query(UPDATE)
                .bind(&product.name)
                .bind(&product.code)
                .bind(product.description.as_deref())
                .bind(product.manufacturer_code.as_deref())
                .bind(product.price)
                .bind(product.lifecycle.is_deleted)
                .bind(product.lifecycle.last_updated.to_rfc3339())
                .bind(product.lifecycle.last_updated_by.get())
                .bind(product.id.get())
                .execute(&pool)
                .await
                .map_err(|err| on_write(err, CatalogueProduct::KIND, &product.code))?
                .rows_affected();

            if updated == 0 {
                return Err(NotFoundError::new(CatalogueProduct::KIND, product.id).into());
            }
            Ok(())
        }
    }

    fn remove(&self, id: ProductId) -> impl Future<Output = Result<(), HiveKeepError>> + Send {
        let pool = self.pool.clone();
        async move {
            sqlx::query(DELETE_BY_ID)
                .bind(id.get())
                .execute(&pool)
                .await
                .map_err(|err| on_remove(err, CatalogueProduct::KIND, id.get()))?;

            Ok(())
        }
    }
}

impl ChildStore<CatalogueProduct> for SqliteProductStore {
    fn list_by_parent(
        &self,
        category_id: ProductCategoryId,
        page: Page,
    ) -> impl Future<Output = Result<Vec<CatalogueProduct>, HiveKeepError>> + Send {
        let pool = self.pool.clone();
        async move {
            let (limit, offset) = row::window(page);
            let rows: Vec<Wrapper> = sqlx::query_as(SELECT_BY_CATEGORY)
                .bind(category_id.get())
                .bind(limit)
                .bind(offset)
                .fetch_all(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(rows.into_iter().map(|w| w.0).collect())
        }
    }
}
