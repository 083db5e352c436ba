//! Application services: use-case implementations.
//!
//! A single generic [`RecordService`](record_service::RecordService) carries
//! the create/update/delete rules. It accepts port trait implementations via
//! generic parameters (constructor injection), keeping this layer decoupled
//! from concrete adapters.

pub mod record_service;

#[cfg(test)]
pub(crate) mod memory;

pub use record_service::{
    HiveSectionService, HiveService, ProductCategoryService, ProductService, RecordService,
};
