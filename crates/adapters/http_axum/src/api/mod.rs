//! JSON REST API handler modules.

#[allow(clippy::missing_errors_doc)]
pub mod categories;
#[allow(clippy::missing_errors_doc)]
pub mod hives;
#[allow(clippy::missing_errors_doc)]
pub mod products;
#[allow(clippy::missing_errors_doc)]
pub mod sections;

mod params;
pub mod response;

use axum::Router;
use axum::routing::{get, post, put};

use hivekeep_app::ports::{ChildStore, RecordStore, UserContext};
use hivekeep_domain::hive::Hive;
use hivekeep_domain::hive_section::HiveSection;
use hivekeep_domain::product::CatalogueProduct;
use hivekeep_domain::product_category::ProductCategory;

use crate::state::AppState;

/// Build the API sub-router, mounted under both `/api` and `/api/v1`.
pub fn routes<HS, SS, CS, PS, U>() -> Router<AppState<HS, SS, CS, PS, U>>
where
    HS: RecordStore<Hive> + Send + Sync + 'static,
    SS: ChildStore<HiveSection> + Send + Sync + 'static,
    CS: RecordStore<ProductCategory> + Send + Sync + 'static,
    PS: ChildStore<CatalogueProduct> + Send + Sync + 'static,
    U: UserContext + Send + Sync + 'static,
{
    Router::new()
        // Hives
        .route("/hives", get(hives::list::<HS, SS, CS, PS, U>))
        .route("/hives/add", post(hives::create::<HS, SS, CS, PS, U>))
        .route(
            "/hives/{id}",
            get(hives::get::<HS, SS, CS, PS, U>)
                .put(hives::update::<HS, SS, CS, PS, U>)
                .delete(hives::delete::<HS, SS, CS, PS, U>),
        )
        .route(
            "/hives/{id}/sections",
            get(hives::sections::<HS, SS, CS, PS, U>),
        )
        .route(
            "/hives/{id}/status/{deleted}",
            put(hives::set_status::<HS, SS, CS, PS, U>),
        )
        // Hive sections
        .route("/sections", get(sections::list::<HS, SS, CS, PS, U>))
        .route(
            "/sections/add/{hive_id}",
            post(sections::create::<HS, SS, CS, PS, U>),
        )
        .route(
            "/sections/{id}",
            get(sections::get::<HS, SS, CS, PS, U>)
                .put(sections::update::<HS, SS, CS, PS, U>)
                .delete(sections::delete::<HS, SS, CS, PS, U>),
        )
        .route(
            "/sections/{id}/status/{deleted}",
            put(sections::set_status::<HS, SS, CS, PS, U>),
        )
        // Product categories
        .route("/categories", get(categories::list::<HS, SS, CS, PS, U>))
        .route(
            "/categories/add",
            post(categories::create::<HS, SS, CS, PS, U>),
        )
        .route(
            "/categories/{id}",
            get(categories::get::<HS, SS, CS, PS, U>)
                .put(categories::update::<HS, SS, CS, PS, U>)
                .delete(categories::delete::<HS, SS, CS, PS, U>),
        )
        .route(
            "/categories/{id}/products",
            get(categories::products::<HS, SS, CS, PS, U>),
        )
        .route(
            "/categories/{id}/status/{deleted}",
            put(categories::set_status::<HS, SS, CS, PS, U>),
        )
        // Catalogue products
        .route("/products", get(products::list::<HS, SS, CS, PS, U>))
        .route(
            "/products/add/{category_id}",
            post(products::create::<HS, SS, CS, PS, U>),
        )
        .route(
            "/products/{id}",
            get(products::get::<HS, SS, CS, PS, U>)
                .put(products::update::<HS, SS, CS, PS, U>)
                .delete(products::delete::<HS, SS, CS, PS, U>),
        )
        .route(
            "/products/{id}/status/{deleted}",
            put(products::set_status::<HS, SS, CS, PS, U>),
        )
}
