//! `SQLite` implementation of [`RecordStore`] for [`Hive`].

use std::future::Future;

use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row, SqlitePool};

use hivekeep_app::ports::RecordStore;
use hivekeep_domain::error::{HiveKeepError, NotFoundError};
use hivekeep_domain::hive::Hive;
use hivekeep_domain::id::HiveId;
use hivekeep_domain::record::{Draft, Page, Record, Root};

use crate::error::{StorageError, on_remove, on_write};
use crate::row;

/// Wrapper for converting database rows into domain [`Hive`].
struct Wrapper(Hive);

impl Wrapper {
    fn maybe(value: Option<Self>) -> Option<Hive> {
        value.map(|w| w.0)
    }
}

impl<'r> FromRow<'r, SqliteRow> for Wrapper {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self(Hive {
            id: HiveId::new(row.try_get("id")?),
            name: row.try_get("name")?,
            code: row.try_get("code")?,
            address: row.try_get("address")?,
            lifecycle: row::lifecycle(row)?,
        }))
    }
}

const INSERT: &str = r"
INSERT INTO hives (name, code, address, is_deleted, created, created_by, last_updated, last_updated_by)
VALUES (?, ?, ?, ?, ?, ?, ?, ?)
";
const SELECT_BY_ID: &str = "SELECT * FROM hives WHERE id = ?";
const SELECT_BY_CODE: &str = "SELECT * FROM hives WHERE code = ? AND id != ? LIMIT 1";
const SELECT_PAGE: &str = "SELECT * FROM hives ORDER BY id LIMIT ? OFFSET ?";
const COUNT_SECTIONS: &str = "SELECT COUNT(*) FROM hive_sections WHERE hive_id = ?";
const UPDATE: &str = r"
UPDATE hives
SET name = ?, code = ?, address = ?, is_deleted = ?, last_updated = ?, last_updated_by = ?
WHERE id = ?
";
const DELETE_BY_ID: &str = "DELETE FROM hives WHERE id = ?";

/// `SQLite`-backed hive store.
pub struct SqliteHiveStore {
    pool: SqlitePool,
}

impl SqliteHiveStore {
    /// Create a new store using the given connection pool.
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

impl RecordStore<Hive> for SqliteHiveStore {
    fn find_by_id(
        &self,
        id: HiveId,
    ) -> impl Future<Output = Result<Option<Hive>, HiveKeepError>> + Send {
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
        except: Option<HiveId>,
    ) -> impl Future<Output = Result<Option<Hive>, HiveKeepError>> + Send {
        let pool = self.pool.clone();
        let code = code.to_string();
        async move {
            let row: Option<Wrapper> = sqlx::query_as(SELECT_BY_CODE)
                .bind(code)
                .bind(except.map_or(row::NO_ID, HiveId::get))
                .fetch_optional(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(Wrapper::maybe(row))
        }
    }

    fn parent_exists(&self, _: Root) -> impl Future<Output = Result<bool, HiveKeepError>> + Send {
        async { Ok(true) }
    }

    fn list(&self, page: Page) -> impl Future<Output = Result<Vec<Hive>, HiveKeepError>> + Send {
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
        id: HiveId,
    ) -> impl Future<Output = Result<u64, HiveKeepError>> + Send {
        let pool = self.pool.clone();
        async move {
            let count: i64 = sqlx::query_scalar(COUNT_SECTIONS)
                .bind(id.get())
                .fetch_one(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(count.unsigned_abs())
        }
    }

    fn insert(&self, draft: Draft<Hive>) -> impl Future<Output = Result<Hive, HiveKeepError>> + Send {
        let pool = self.pool.clone();
        async move {
            let stamps = &draft.lifecycle;
            let id = sqlx::query(INSERT)
                .bind(&draft.request.name)
                .bind(&draft.request.code)
                .bind(&draft.request.address)
                .bind(stamps.is_deleted)
                .bind(stamps.created.to_rfc3339())
                .bind(stamps.created_by.get())
                .bind(stamps.last_updated.to_rfc3339())
                .bind(stamps.last_updated_by.get())
                .execute(&pool)
                .await
                .map_err(|err| on_write(err, Hive::KIND, &draft.request.code))?
                .last_insert_rowid();

            Ok(Hive::from_draft(HiveId::new(id), draft))
        }
    }

    fn save(&self, hive: &Hive) -> impl Future<Output = Result<(), HiveKeepError>> + Send {
        let pool = self.pool.clone();
        let hive = hive.clone();
        async move {
            let updated = sqlx::query(UPDATE)
                .bind(&hive.name)
                .bind(&hive.code)
                .bind(&hive.address)
                .bind(hive.lifecycle.is_deleted)
                .bind(hive.lifecycle.last_updated.to_rfc3339())
                .bind(hive.lifecycle.last_updated_by.get())
                .bind(hive.id.get())
                .execute(&pool)
                .await
                .map_err(|err| on_write(err, Hive::KIND, &hive.code))?
                .rows_affected();

            if updated == 0 {
                return Err(NotFoundError::new(Hive::KIND, hive.id).into());
            }
            Ok(())
        }
    }

    fn remove(&self, id: HiveId) -> impl Future<Output = Result<(), HiveKeepError>> + Send {
        let pool = self.pool.clone();
        async move {
            sqlx::query(DELETE_BY_ID)
                .bind(id.get())
                .execute(&pool)
                .await
                .map_err(|err| on_remove(err, Hive::KIND, id.get()))?;

            Ok(())
        }
    }
}
