//! `SQLite` implementation of [`ChildStore`] for [`HiveSection`].

use std::future::Future;

use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row, SqlitePool};

use hivekeep_app::ports::{ChildStore, RecordStore};
use hivekeep_domain::error::{HiveKeepError, NotFoundError};
use hivekeep_domain::hive_section::HiveSection;
use hivekeep_domain::id::{HiveId, HiveSectionId};
use hivekeep_domain::record::{Draft, Page, Record};

use crate::error::{StorageError, Violation, on_remove, on_write, violation};
use crate::row;

struct Wrapper(HiveSection);

impl Wrapper {
    fn maybe(value: Option<Self>) -> Option<HiveSection> {
        value.map(|w| w.0)
    }
}

impl<'r> FromRow<'r, SqliteRow> for Wrapper {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self(HiveSection {
            id: HiveSectionId::new(row.try_get("id")?),
            name: row.try_get("name")?,
            code: row.try_get("code")?,
            hive_id: HiveId::new(row.try_get("hive_id")?),
            lifecycle: row::lifecycle(row)?,
        }))
    }
}

const INSERT: &str = r"
INSERT INTO hive_sections (name, code, hive_id, is_deleted, created, created_by, last_updated, last_updated_by)
VALUES (?, ?, ?, ?, ?, ?, ?, ?)
";
const SELECT_BY_ID: &str = "SELECT * FROM hive_sections WHERE id = ?";
const SELECT_BY_CODE: &str = "SELECT * FROM hive_sections WHERE code = ? AND id != ? LIMIT 1";
const SELECT_PAGE: &str = "SELECT * FROM hive_sections ORDER BY id LIMIT ? OFFSET ?";
const SELECT_BY_HIVE: &str =
    "SELECT * FROM hive_sections WHERE hive_id = ? ORDER BY id LIMIT ? OFFSET ?";
const HIVE_EXISTS: &str = "SELECT EXISTS (SELECT 1 FROM hives WHERE id = ?)";
const UPDATE: &str = r"
UPDATE hive_sections
SET name = ?, code = ?, is_deleted = ?, last_updated = ?, last_updated_by = ?
WHERE id = ?
";
const DELETE_BY_ID: &str = "DELETE FROM hive_sections WHERE id = ?";

/// `SQLite`-backed hive section store.
pub struct SqliteHiveSectionStore {
    pool: SqlitePool,
}

impl SqliteHiveSectionStore {
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

impl RecordStore<HiveSection> for SqliteHiveSectionStore {
    fn find_by_id(
        &self,
        id: HiveSectionId,
    ) -> impl Future<Output = Result<Option<HiveSection>, HiveKeepError>> + Send {
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
        except: Option<HiveSectionId>,
    ) -> impl Future<Output = Result<Option<HiveSection>, HiveKeepError>> + Send {
        let pool = self.pool.clone();
        let code = code.to_string();
        async move {
            let row: Option<Wrapper> = sqlx::query_as(SELECT_BY_CODE)
                .bind(code)
                .bind(except.map_or(row::NO_ID, HiveSectionId::get))
                .fetch_optional(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(Wrapper::maybe(row))
        }
    }

    fn parent_exists(
        &self,
        hive_id: HiveId,
    ) -> impl Future<Output = Result<bool, HiveKeepError>> + Send {
        let pool = self.pool.clone();
        async move {
            let exists: bool = sqlx::query_scalar(HIVE_EXISTS)
                .bind(hive_id.get())
                .fetch_one(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(exists)
        }
    }

    fn list(
        &self,
        page: Page,
    ) -> impl Future<Output = Result<Vec<HiveSection>, HiveKeepError>> + Send {
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
        _: HiveSectionId,
    ) -> impl Future<Output = Result<(), HiveKeepError>> + Send {
        async { Ok(()) }
    }

    fn insert(
        &self,
        draft: Draft<HiveSection>,
    ) -> impl Future<Output = Result<HiveSection, HiveKeepError>> + Send {
        let pool = self.pool.clone();
        async move {
            let stamps = &draft.lifecycle;
            let id = sqlx::query(INSERT)
                .bind(&draft.request.name)
                .bind(&draft.request.code)
                .bind(draft.parent.get())
                .bind(stamps.is_deleted)
                .bind(stamps.created.to_rfc3339())
                .bind(stamps.created_by.get())
                .bind(stamps.last_updated.to_rfc3339())
                .bind(stamps.last_updated_by.get())
                .execute(&pool)
                .await
                .map_err(|err| match violation(&err) {
                    // the hive vanished between the parent check and the insert
                    Some(Violation::ForeignKey) => HiveKeepError::from(NotFoundError::new(
                        HiveSection::PARENT_KIND,
                        draft.parent,
                    )),
                    _ => on_write(err, HiveSection::KIND, &draft.request.code),
                })?
                .last_insert_rowid();

            Ok(HiveSection::from_draft(HiveSectionId::new(id), draft))
        }
    }

    fn save(&self, section: &HiveSection) -> impl Future<Output = Result<(), HiveKeepError>> + Send {
        let pool = self.pool.clone();
        let section = section.clone();
        async move {
            let updated = sqlx::query(UPDATE)
                .bind(&section.name)
                .bind(&section.code)
                .bind(section.lifecycle.is_deleted)
                .bind(section.lifecycle.last_updated.to_rfc3339())
                .bind(section.lifecycle.last_updated_by.get())
                .bind(section.id.get())
                .execute(&pool)
                .await
                .map_err(|err| on_write(err, HiveSection::KIND, &section.code))?
                .rows_affected();

            if updated == 0 {
                return Err(NotFoundError::new(HiveSection::KIND, section.id).into());
            }
            Ok(())
        }
    }

    fn remove(&self, id: HiveSectionId) -> impl Future<Output = Result<(), HiveKeepError>> + Send {
        let pool = self.pool.clone();
        async move {
            sqlx::query(DELETE_BY_ID)
                .bind(id.get())
                .execute(&pool)
                .await
                .map_err(|err| on_remove(err, HiveSection::KIND, id.get()))?;

            Ok(())
        }
    }
}

impl ChildStore<HiveSection> for SqliteHiveSectionStore {
    fn list_by_parent(
        &self,
        hive_id: HiveId,
        page: Page,
    ) -> impl Future<Output = Result<Vec<HiveSection>, HiveKeepError>> + Send {
        let pool = self.pool.clone();
        async move {
            let (limit, offset) = row::window(page);
            let rows: Vec<Wrapper> = sqlx::query_as(SELECT_BY_HIVE)
                .bind(hive_id.get())
                .bind(limit)
                .bind(offset)
                .fetch_all(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(rows.into_iter().map(|w| w.0).collect())
        }
    }
}
