//! # hivekeep-domain
//!
//! Pure domain model for the hivekeep inventory administration system.
//!
//! ## Responsibilities
//! - Foundational types: typed identifiers, error conventions, timestamps
//! - Define **Hives** (storage locations) and their **Sections**
//! - Define **Product categories** and **Catalogue products**
//! - Define the shared **record lifecycle** (active / soft-deleted) and audit stamps
//! - Validate create/update requests before they reach storage
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It must never import anything from `app`, adapters, or external IO crates.
//! All IO boundaries are expressed as traits in the `app` crate (ports).

pub mod error;
pub mod id;
pub mod lifecycle;
pub mod record;

pub mod hive;
pub mod hive_section;
pub mod product;
pub mod product_category;
