//! `SQLite` implementation of [`RecordStore`] for [`ProductCategory`].

use std::future::Future;

use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row, SqlitePool};

use hivekeep_app::ports::RecordStore;
use hivekeep_domain::error::{HiveKeepError, NotFoundError};
use hivekeep_domain::id::ProductCategoryId;
use hivekeep_domain::product_category::ProductCategory;
use hivekeep_domain::record::{Draft, Page, Record, Root};

use crate::error::{StorageError, on_remove, on_write};
use crate::row;

struct Wrapper(ProductCategory);

impl Wrapper {
    fn maybe(value: Option<Self>) -> Option<ProductCategory> {
        value.map(|w| w.0)
    }
}

impl<'r> FromRow<'r, SqliteRow> for Wrapper {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self(ProductCategory {
            id: ProductCategoryId::new(row.try_get("id")?),
            name: row.try_get("name")?,
            code: row.try_get("code")?,
            description: row.try_get("description")?,
            lifecycle: row::lifecycle(row)?,
        }))
    }
}

const INSERT: &str = r"
INSERT INTO product_categories (name, code, description, is_deleted, created, created_by, last_updated, last_updated_by)
VALUES (?, ?, ?, ?, ?, ?, ?, ?)
";
const SELECT_BY_ID: &str = "SELECT * FROM product_categories WHERE id = ?";
const SELECT_BY_CODE: &str =
    "SELECT * FROM product_categories WHERE code = ? AND id != ? LIMIT 1";
const SELECT_PAGE: &str = "SELECT * FROM product_categories ORDER BY id LIMIT ? OFFSET ?";
const COUNT_PRODUCTS: &str = "SELECT COUNT(*) FROM catalogue_products WHERE category_id = ?";
const UPDATE: &str = r"
UPDATE product_categories
SET name = ?, code = ?, description = ?, is_deleted = ?, last_updated = ?, last_updated_by = ?
WHERE id = ?
";
const DELETE_BY_ID: &str = "DELETE FROM product_categories WHERE id = ?";

/// `SQLite`-backed product category store.
pub struct SqliteProductCategoryStore {
    pool: SqlitePool,
}

impl SqliteProductCategoryStore {
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

impl RecordStore<ProductCategory> for SqliteProductCategoryStore {
    fn find_by_id(
        &self,
        id: ProductCategoryId,
    ) -> impl Future<Output = Result<Option<ProductCategory>, HiveKeepError>> + Send {
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
        except: Option<ProductCategoryId>,
    ) -> impl Future<Output = Result<Option<ProductCategory>, HiveKeepError>> + Send {
        let pool = self.pool.clone();
        let code = code.to_string();
        async move {
            let row: Option<Wrapper> = sqlx::query_as(SELECT_BY_CODE)
                .bind(code)
                .bind(except.map_or(row::NO_ID, ProductCategoryId::get))
                .fetch_optional(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(Wrapper::maybe(row))
        }
    }

    fn parent_exists(&self, _: Root) -> impl Future<Output = Result<bool, HiveKeepError>> + Send {
        async { Ok(true) }
    }

    fn list(
        &self,
        page: Page,
    ) -> impl Future<Output = Result<Vec<ProductCategory>, HiveKeepError>> + Send {
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
        id: ProductCategoryId,
    ) -> impl Future<Output = Result<u64, HiveKeepError>> + Send {
        let pool = self.pool.clone();
        async move {
            let count: i64 = sqlx::query_scalar(COUNT_PRODUCTS)
                .bind(id.get())
                .fetch_one(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(count.unsigned_abs())
        }
    }

    fn insert(
        &self,
        draft: Draft<ProductCategory>,
    ) -> impl Future<Output = Result<ProductCategory, HiveKeepError>> + Send {
        let pool = self.pool.clone();
        async move {
            let stamps = &draft.lifecycle;
            let id = sqlx::query(INSERT)
                .bind(&draft.request.name)
                .bind(&draft.request.code)
                .bind(draft.request.description.as_deref())
                .bind(stamps.is_deleted)
                .bind(stamps.created.to_rfc3339())
                .bind(stamps.created_by.get())
                .bind(stamps.last_updated.to_rfc3339())
                .bind(stamps.last_updated_by.get())
                .execute(&pool)
                .await
                .map_err(|err| on_write(err, ProductCategory::KIND, &draft.request.code))?
                .last_insert_rowid();

            Ok(ProductCategory::from_draft(
                ProductCategoryId::new(id),
                draft,
            ))
        }
    }

    fn save(
        &self,
        category: &ProductCategory,
    ) -> impl Future<Output = Result<(), HiveKeepError>> + Send {
        let pool = self.pool.clone();
        let category = category.clone();
        async move {
            let updated = sqlx::query(UPDATE)
                .bind(&category.name)
                .bind(&category.code)
                .bind(category.description.as_deref())
                .bind(category.lifecycle.is_deleted)
                .bind(category.lifecycle.last_updated.to_rfc3339())
                .bind(category.lifecycle.last_updated_by.get())
                .bind(category.id.get())
                .execute(&pool)
                .await
                .map_err(|err| on_write(err, ProductCategory::KIND, &category.code))?
                .rows_affected();

            if updated == 0 {
                return Err(NotFoundError::new(ProductCategory::KIND, category.id).into());
            }
            Ok(())
        }
    }

    fn remove(
        &self,
        id: ProductCategoryId,
    ) -> impl Future<Output = Result<(), HiveKeepError>> + Send {
        let pool = self.pool.clone();
        async move {
            sqlx::query(DELETE_BY_ID)
                .bind(id.get())
                .execute(&pool)
                .await
                .map_err(|err| on_remove(err, ProductCategory::KIND, id.get()))?;

            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use hivekeep_domain::id::UserId;
    use hivekeep_domain::lifecycle::Lifecycle;
    use hivekeep_domain::product_category::UpdateProductCategoryRequest;

    use super::*;
    use crate::Config;

    async fn setup() -> SqliteProductCategoryStore {
        let db = Config {
            database_url: "sqlite::memory:".to_string(),
        }
        .build()
        .await
        .unwrap();
        SqliteProductCategoryStore::new(db.pool().clone())
    }

    fn draft(request: UpdateProductCategoryRequest) -> Draft<ProductCategory> {
        Draft {
            parent: Root,
            request,
            lifecycle: Lifecycle::created(UserId::new(3), Utc::now()),
        }
    }

    #[tokio::test]
    async fn should_round_trip_optional_description() {
        let store = setup().await;

        let with = store
            .insert(draft(
                UpdateProductCategoryRequest::new("Tents", "TENTS").with_description("Shelter"),
            ))
            .await
            .unwrap();
        let without = store
            .insert(draft(UpdateProductCategoryRequest::new("Ropes", "ROPES")))
            .await
            .unwrap();

        let with = store.find_by_id(with.id).await.unwrap().unwrap();
        let without = store.find_by_id(without.id).await.unwrap().unwrap();
        assert_eq!(with.description.as_deref(), Some("Shelter"));
        assert_eq!(without.description, None);
    }

    #[tokio::test]
    async fn should_page_categories_in_id_order() {
        let store = setup().await;
        for code in ["A", "B", "C", "D"] {
            store
                .insert(draft(UpdateProductCategoryRequest::new("Category", code)))
                .await
                .unwrap();
        }

        let page = store.list(Page::new(2, 10)).await.unwrap();

        let codes: Vec<&str> = page.iter().map(|c| c.code.as_str()).collect();
        assert_eq!(codes, vec!["C", "D"]);
    }

    #[tokio::test]
    async fn should_clear_description_when_saved_without_one() {
        let store = setup().await;
        let mut category = store
            .insert(draft(
                UpdateProductCategoryRequest::new("Tents", "TENTS").with_description("Shelter"),
            ))
            .await
            .unwrap();

        category.description = None;
        store.save(&category).await.unwrap();

        let found = store.find_by_id(category.id).await.unwrap().unwrap();
        assert_eq!(found.description, None);
    }
}
