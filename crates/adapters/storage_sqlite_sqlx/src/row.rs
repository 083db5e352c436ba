//! Column decoding and binding helpers shared by every store.

use chrono::DateTime;
use sqlx::Row;
use sqlx::sqlite::SqliteRow;

use hivekeep_domain::id::UserId;
use hivekeep_domain::lifecycle::{Lifecycle, Timestamp};
use hivekeep_domain::record::Page;

/// Decode the audit columns every table carries.
pub(crate) fn lifecycle(row: &SqliteRow) -> Result<Lifecycle, sqlx::Error> {
    Ok(Lifecycle {
        is_deleted: row.try_get("is_deleted")?,
        created: timestamp(row, "created")?,
        created_by: UserId::new(row.try_get("created_by")?),
        last_updated: timestamp(row, "last_updated")?,
        last_updated_by: UserId::new(row.try_get("last_updated_by")?),
    })
}

fn timestamp(row: &SqliteRow, column: &str) -> Result<Timestamp, sqlx::Error> {
    let raw: String = row.try_get(column)?;
    DateTime::parse_from_rfc3339(&raw)
        .map(|ts| ts.to_utc())
        .map_err(|err| sqlx::Error::Decode(Box::new(err)))
}

/// `LIMIT` and `OFFSET` values for `page`; `-1` lifts the limit.
pub(crate) fn window(page: Page) -> (i64, i64) {
    let limit = page.amount.map_or(-1, i64::from);
    (limit, i64::from(page.start))
}

/// Bind value for `id != ?` when no record is excluded. Ids start at 1.
pub(crate) const NO_ID: i64 = 0;
