//! # hivekeep-app
//!
//! Application layer: use-cases and **port definitions** (traits).
//!
//! ## Responsibilities
//! - Define **port traits** that adapters must implement (driven/outbound ports):
//!   - `RecordStore`: find, list, insert, save, remove for one record kind
//!   - `ChildStore`: listings filtered by parent for owned kinds
//!   - `UserContext`: the acting user recorded in audit stamps
//! - Define the **driving/inbound port** as a generic use-case struct:
//!   - `RecordService`: list, get, create, update, delete, set status
//! - Enforce code uniqueness, parent existence, and the soft-delete-before-remove rule
//!
//! ## Dependency rule
//! Depends on `hivekeep-domain` only.
//! Never imports adapter crates. Adapters depend on *this* crate, not the reverse.

pub mod ports;
pub mod services;
