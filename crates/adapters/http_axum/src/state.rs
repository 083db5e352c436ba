//! Shared application state for axum handlers.

use std::sync::Arc;

use hivekeep_app::ports::{ChildStore, RecordStore, UserContext};
use hivekeep_app::services::{
    HiveSectionService, HiveService, ProductCategoryService, ProductService,
};
use hivekeep_domain::hive::Hive;
use hivekeep_domain::hive_section::HiveSection;
use hivekeep_domain::product::CatalogueProduct;
use hivekeep_domain::product_category::ProductCategory;

/// Application state shared across all axum handlers.
///
/// Generic over the four store types and the acting-user source to avoid
/// dynamic dispatch. `Clone` is implemented manually so the underlying types
/// themselves do not need to be `Clone`; only the `Arc` wrappers are cloned.
pub struct AppState<HS, SS, CS, PS, U> {
    pub hive_service: Arc<HiveService<HS, U>>,
    pub section_service: Arc<HiveSectionService<SS, U>>,
    pub category_service: Arc<ProductCategoryService<CS, U>>,
    pub product_service: Arc<ProductService<PS, U>>,
}

impl<HS, SS, CS, PS, U> Clone for AppState<HS, SS, CS, PS, U> {
    fn clone(&self) -> Self {
        Self {
            hive_service: Arc::clone(&self.hive_service),
            section_service: Arc::clone(&self.section_service),
            category_service: Arc::clone(&self.category_service),
            product_service: Arc::clone(&self.product_service),
        }
    }
}

impl<HS, SS, CS, PS, U> AppState<HS, SS, CS, PS, U>
where
    HS: RecordStore<Hive> + Send + Sync + 'static,
    SS: ChildStore<HiveSection> + Send + Sync + 'static,
    CS: RecordStore<ProductCategory> + Send + Sync + 'static,
    PS: ChildStore<CatalogueProduct> + Send + Sync + 'static,
    U: UserContext + Clone + Send + Sync + 'static,
{
    /// Build one service per record kind, all acting as `user`.
    pub fn new(hives: HS, sections: SS, categories: CS, products: PS, user: U) -> Self {
        Self {
            hive_service: Arc::new(HiveService::new(hives, user.clone())),
            section_service: Arc::new(HiveSectionService::new(sections, user.clone())),
            category_service: Arc::new(ProductCategoryService::new(categories, user.clone())),
            product_service: Arc::new(ProductService::new(products, user)),
        }
    }
}
