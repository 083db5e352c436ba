//! JSON REST handlers for catalogue products.

use axum::Json;
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{NestedPath, Path, Query, State};

use hivekeep_app::ports::{ChildStore, RecordStore, UserContext};
use hivekeep_domain::hive::Hive;
use hivekeep_domain::hive_section::HiveSection;
use hivekeep_domain::id::ProductCategoryId;
use hivekeep_domain::product::{CatalogueProduct, ProductListItem, UpdateProductRequest};
use hivekeep_domain::product_category::ProductCategory;
use hivekeep_domain::record::Page;

use super::params::{parse_id, parse_status};
use super::response::{CreateResponse, GetResponse, ListResponse, NoContentResponse};
use crate::error::ApiError;
use crate::state::AppState;

/// `GET /api/products?start&amount`
pub async fn list<HS, SS, CS, PS, U>(
    State(state): State<AppState<HS, SS, CS, PS, U>>,
    query: Result<Query<Page>, QueryRejection>,
) -> Result<ListResponse<ProductListItem>, ApiError>
where
    HS: RecordStore<Hive> + Send + Sync + 'static,
    SS: ChildStore<HiveSection> + Send + Sync + 'static,
    CS: RecordStore<ProductCategory> + Send + Sync + 'static,
    PS: ChildStore<CatalogueProduct> + Send + Sync + 'static,
    U: UserContext + Send + Sync + 'static,
{
    let Query(page) = query?;
    let products = state.product_service.list(page).await?;
    Ok(ListResponse::Ok(Json(products)))
}

/// `GET /api/products/{id}`
pub async fn get<HS, SS, CS, PS, U>(
    State(state): State<AppState<HS, SS, CS, PS, U>>,
    Path(id): Path<String>,
) -> Result<GetResponse<CatalogueProduct>, ApiError>
where
    HS: RecordStore<Hive> + Send + Sync + 'static,
    SS: ChildStore<HiveSection> + Send + Sync + 'static,
    CS: RecordStore<ProductCategory> + Send + Sync + 'static,
    PS: ChildStore<CatalogueProduct> + Send + Sync + 'static,
    U: UserContext + Send + Sync + 'static,
{
    let product = state.product_service.get(parse_id(&id)?).await?;
    Ok(GetResponse::Ok(Json(product)))
}

/// `POST /api/products/add/{categoryId}`
pub async fn create<HS, SS, CS, PS, U>(
    State(state): State<AppState<HS, SS, CS, PS, U>>,
    prefix: NestedPath,
    Path(category_id): Path<String>,
    body: Result<Json<UpdateProductRequest>, JsonRejection>,
) -> Result<CreateResponse<CatalogueProduct>, ApiError>
where
    HS: RecordStore<Hive> + Send + Sync + 'static,
    SS: ChildStore<HiveSection> + Send + Sync + 'static,
    CS: RecordStore<ProductCategory> + Send + Sync + 'static,
    PS: ChildStore<CatalogueProduct> + Send + Sync + 'static,
    U: UserContext + Send + Sync + 'static,
{
    let category_id: ProductCategoryId = parse_id(&category_id)?;
    let Json(request) = body?;
    let created = state.product_service.create(category_id, request).await?;
    Ok(CreateResponse::Created {
        location: format!("{}/products/{}", prefix.as_str(), created.id),
        body: Json(created),
    })
}

/// `PUT /api/products/{id}`
pub async fn update<HS, SS, CS, PS, U>(
    State(state): State<AppState<HS, SS, CS, PS, U>>,
    Path(id): Path<String>,
    body: Result<Json<UpdateProductRequest>, JsonRejection>,
) -> Result<NoContentResponse, ApiError>
where
    HS: RecordStore<Hive> + Send + Sync + 'static,
    SS: ChildStore<HiveSection> + Send + Sync + 'static,
    CS: RecordStore<ProductCategory> + Send + Sync + 'static,
    PS: ChildStore<CatalogueProduct> + Send + Sync + 'static,
    U: UserContext + Send + Sync + 'static,
{
    let product_id = parse_id(&id)?;
    let Json(request) = body?;
    state.product_service.update(product_id, request).await?;
    Ok(NoContentResponse::NoContent)
}

/// `PUT /api/products/{id}/status/{deletedStatus}`
pub async fn set_status<HS, SS, CS, PS, U>(
    State(state): State<AppState<HS, SS, CS, PS, U>>,
    Path((id, deleted)): Path<(String, String)>,
) -> Result<NoContentResponse, ApiError>
where
    HS: RecordStore<Hive> + Send + Sync + 'static,
    SS: ChildStore<HiveSection> + Send + Sync + 'static,
    CS: RecordStore<ProductCategory> + Send + Sync + 'static,
    PS: ChildStore<CatalogueProduct> + Send + Sync + 'static,
    U: UserContext + Send + Sync + 'static,
{
    let product_id = parse_id(&id)?;
    let deleted = parse_status(&deleted)?;
    state.product_service.set_status(product_id, deleted).await?;
    Ok(NoContentResponse::NoContent)
}

/// `DELETE /api/products/{id}`
pub async fn delete<HS, SS, CS, PS, U>(
    State(state): State<AppState<HS, SS, CS, PS, U>>,
    Path(id): Path<String>,
) -> Result<NoContentResponse, ApiError>
where
    HS: RecordStore<Hive> + Send + Sync + 'static,
    SS: ChildStore<HiveSection> + Send + Sync + 'static,
    CS: RecordStore<ProductCategory> + Send + Sync + 'static,
    PS: ChildStore<CatalogueProduct> + Send + Sync + 'static,
    U: UserContext + Send + Sync + 'static,
{
    state.product_service.delete(parse_id(&id)?).await?;
    Ok(NoContentResponse::NoContent)
}
