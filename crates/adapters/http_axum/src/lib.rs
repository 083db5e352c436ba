//! # hivekeep-adapter-http-axum
//!
//! HTTP adapter built on [axum](https://docs.rs/axum).
//!
//! ## Responsibilities
//! - Serve the JSON admin API for hives, hive sections, product categories
//!   and catalogue products, under `/api` and the versioned `/api/v1`
//! - Map HTTP requests into application service calls (driving adapter)
//! - Map [`HiveKeepError`](hivekeep_domain::error::HiveKeepError) variants to
//!   status codes with a `{"error": "..."}` body
//!
//! ## Dependency rule
//! Depends on `hivekeep-app` (for port traits and services) and
//! `hivekeep-domain` (for record types used in request/response mapping).
//! Never leaks axum types into the domain.

pub mod api;
pub mod error;
pub mod router;
pub mod state;
