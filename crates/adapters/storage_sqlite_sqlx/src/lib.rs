//! # hivekeep-adapter-storage-sqlite-sqlx
//!
//! `SQLite` persistence adapter using sqlx.
//!
//! ## Responsibilities
//! - Implement the storage port traits from `hivekeep_app::ports`
//! - Manage the connection pool and run migrations
//! - Map between domain records and table rows
//! - Translate unique and foreign-key violations into domain conflicts
//!
//! ## Dependency rule
//! Depends on `hivekeep_domain` (for record types) and `hivekeep_app` (for port traits).
//! The domain and app crates never depend on this crate.

mod error;
mod hive_section_store;
mod hive_store;
mod pool;
mod product_category_store;
mod product_store;
mod row;

pub use error::StorageError;
pub use hive_section_store::SqliteHiveSectionStore;
pub use hive_store::SqliteHiveStore;
pub use pool::{Config, Database};
pub use product_category_store::SqliteProductCategoryStore;
pub use product_store::SqliteProductStore;
