//! JSON REST handlers for product categories.

use axum::Json;
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{NestedPath, Path, Query, State};

use hivekeep_app::ports::{ChildStore, RecordStore, UserContext};
use hivekeep_domain::hive::Hive;
use hivekeep_domain::hive_section::HiveSection;
use hivekeep_domain::id::ProductCategoryId;
use hivekeep_domain::product::{CatalogueProduct, ProductListItem};
use hivekeep_domain::product_category::{
    ProductCategory, ProductCategoryListItem, UpdateProductCategoryRequest,
};
use hivekeep_domain::record::{Page, Root};

use super::params::{parse_id, parse_status};
use super::response::{CreateResponse, GetResponse, ListResponse, NoContentResponse};
use crate::error::ApiError;
use crate::state::AppState;

/// `GET /api/categories?start&amount`
pub async fn list<HS, SS, CS, PS, U>(
    State(state): State<AppState<HS, SS, CS, PS, U>>,
    query: Result<Query<Page>, QueryRejection>,
) -> Result<ListResponse<ProductCategoryListItem>, ApiError>
where
    HS: RecordStore<Hive> + Send + Sync + 'static,
    SS: ChildStore<HiveSection> + Send + Sync + 'static,
    CS: RecordStore<ProductCategory> + Send + Sync + 'static,
    PS: ChildStore<CatalogueProduct> + Send + Sync + 'static,
    U: UserContext + Send + Sync + 'static,
{
    let Query(page) = query?;
    let categories = state.category_service.list(page).await?;
    Ok(ListResponse::Ok(Json(categories)))
}

/// `GET /api/categories/{id}`
pub async fn get<HS, SS, CS, PS, U>(
    State(state): State<AppState<HS, SS, CS, PS, U>>,
    Path(id): Path<String>,
) -> Result<GetResponse<ProductCategory>, ApiError>
where
    HS: RecordStore<Hive> + Send + Sync + 'static,
    SS: ChildStore<HiveSection> + Send + Sync + 'static,
    CS: RecordStore<ProductCategory> + Send + Sync + 'static,
    PS: ChildStore<CatalogueProduct> + Send + Sync + 'static,
    U: UserContext + Send + Sync + 'static,
{
    let category = state.category_service.get(parse_id(&id)?).await?;
    Ok(GetResponse::Ok(Json(category)))
}

/// `GET /api/categories/{id}/products`
pub async fn products<HS, SS, CS, PS, U>(
    State(state): State<AppState<HS, SS, CS, PS, U>>,
    Path(id): Path<String>,
    query: Result<Query<Page>, QueryRejection>,
) -> Result<ListResponse<ProductListItem>, ApiError>
where
    HS: RecordStore<Hive> + Send + Sync + 'static,
    SS: ChildStore<HiveSection> + Send + Sync + 'static,
    CS: RecordStore<ProductCategory> + Send + Sync + 'static,
    PS: ChildStore<CatalogueProduct> + Send + Sync + 'static,
    U: UserContext + Send + Sync + 'static,
{
    let category_id: ProductCategoryId = parse_id(&id)?;
    let Query(page) = query?;
    let products = state
        .product_service
        .list_by_parent(category_id, page)
        .await?;
    Ok(ListResponse::Ok(Json(products)))
}

/// `POST /api/categories/add`
pub async fn create<HS, SS, CS, PS, U>(
    State(state): State<AppState<HS, SS, CS, PS, U>>,
    prefix: NestedPath,
    body: Result<Json<UpdateProductCategoryRequest>, JsonRejection>,
) -> Result<CreateResponse<ProductCategory>, ApiError>
where
    HS: RecordStore<Hive> + Send + Sync + 'static,
    SS: ChildStore<HiveSection> + Send + Sync + 'static,
    CS: RecordStore<ProductCategory> + Send + Sync + 'static,
    PS: ChildStore<CatalogueProduct> + Send + Sync + 'static,
    U: UserContext + Send + Sync + 'static,
{
    let Json(request) = body?;
    let created = state.category_service.create(Root, request).await?;
    Ok(CreateResponse::Created {
        location: format!("{}/categories/{}", prefix.as_str(), created.id),
        body: Json(created),
    })
}

/// `PUT /api/categories/{id}`
pub async fn update<HS, SS, CS, PS, U>(
    State(state): State<AppState<HS, SS, CS, PS, U>>,
    Path(id): Path<String>,
    body: Result<Json<UpdateProductCategoryRequest>, JsonRejection>,
) -> Result<NoContentResponse, ApiError>
where
    HS: RecordStore<Hive> + Send + Sync + 'static,
    SS: ChildStore<HiveSection> + Send + Sync + 'static,
    CS: RecordStore<ProductCategory> + Send + Sync + 'static,
    PS: ChildStore<CatalogueProduct> + Send + Sync + 'static,
    U: UserContext + Send + Sync + 'static,
{
    let category_id = parse_id(&id)?;
    let Json(request) = body?;
    state.category_service.update(category_id, request).await?;
    Ok(NoContentResponse::NoContent)
}

/// `PUT /api/categories/{id}/status/{deletedStatus}`
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
    let category_id = parse_id(&id)?;
    let deleted = parse_status(&deleted)?;
    state
        .category_service
        .set_status(category_id, deleted)
        .await?;
    Ok(NoContentResponse::NoContent)
}

/// `DELETE /api/categories/{id}`
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
    state.category_service.delete(parse_id(&id)?).await?;
    Ok(NoContentResponse::NoContent)
}
