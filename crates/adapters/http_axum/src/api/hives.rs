//! JSON REST handlers for hives.

use axum::Json;
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{NestedPath, Path, Query, State};

use hivekeep_app::ports::{ChildStore, RecordStore, UserContext};
use hivekeep_domain::hive::{Hive, HiveListItem, UpdateHiveRequest};
use hivekeep_domain::hive_section::{HiveSection, HiveSectionListItem};
use hivekeep_domain::id::HiveId;
use hivekeep_domain::product::CatalogueProduct;
use hivekeep_domain::product_category::ProductCategory;
use hivekeep_domain::record::{Page, Root};

use super::params::{parse_id, parse_status};
use super::response::{CreateResponse, GetResponse, ListResponse, NoContentResponse};
use crate::error::ApiError;
use crate::state::AppState;

/// `GET /api/hives`
pub async fn list<HS, SS, CS, PS, U>(
    State(state): State<AppState<HS, SS, CS, PS, U>>,
    query: Result<Query<Page>, QueryRejection>,
) -> Result<ListResponse<HiveListItem>, ApiError>
where
    HS: RecordStore<Hive> + Send + Sync + 'static,
    SS: ChildStore<HiveSection> + Send + Sync + 'static,
    CS: RecordStore<ProductCategory> + Send + Sync + 'static,
    PS: ChildStore<CatalogueProduct> + Send + Sync + 'static,
    U: UserContext + Send + Sync + 'static,
{
    let Query(page) = query?;
    let hives = state.hive_service.list(page).await?;
    Ok(ListResponse::Ok(Json(hives)))
}

/// `GET /api/hives/{id}`
pub async fn get<HS, SS, CS, PS, U>(
    State(state): State<AppState<HS, SS, CS, PS, U>>,
    Path(id): Path<String>,
) -> Result<GetResponse<Hive>, ApiError>
where
    HS: RecordStore<Hive> + Send + Sync + 'static,
    SS: ChildStore<HiveSection> + Send + Sync + 'static,
    CS: RecordStore<ProductCategory> + Send + Sync + 'static,
    PS: ChildStore<CatalogueProduct> + Send + Sync + 'static,
    U: UserContext + Send + Sync + 'static,
{
    let hive = state.hive_service.get(parse_id(&id)?).await?;
    Ok(GetResponse::Ok(Json(hive)))
}

/// `GET /api/hives/{id}/sections`
pub async fn sections<HS, SS, CS, PS, U>(
    State(state): State<AppState<HS, SS, CS, PS, U>>,
    Path(id): Path<String>,
    query: Result<Query<Page>, QueryRejection>,
) -> Result<ListResponse<HiveSectionListItem>, ApiError>
where
    HS: RecordStore<Hive> + Send + Sync + 'static,
    SS: ChildStore<HiveSection> + Send + Sync + 'static,
    CS: RecordStore<ProductCategory> + Send + Sync + 'static,
    PS: ChildStore<CatalogueProduct> + Send + Sync + 'static,
    U: UserContext + Send + Sync + 'static,
{
    let hive_id: HiveId = parse_id(&id)?;
    let Query(page) = query?;
    let sections = state.section_service.list_by_parent(hive_id, page).await?;
    Ok(ListResponse::Ok(Json(sections)))
}

/// `POST /api/hives/add`
pub async fn create<HS, SS, CS, PS, U>(
    State(state): State<AppState<HS, SS, CS, PS, U>>,
    prefix: NestedPath,
    body: Result<Json<UpdateHiveRequest>, JsonRejection>,
) -> Result<CreateResponse<Hive>, ApiError>
where
    HS: RecordStore<Hive> + Send + Sync + 'static,
    SS: ChildStore<HiveSection> + Send + Sync + 'static,
    CS: RecordStore<ProductCategory> + Send + Sync + 'static,
    PS: ChildStore<CatalogueProduct> + Send + Sync + 'static,
    U: UserContext + Send + Sync + 'static,
{
    let Json(request) = body?;
    let created = state.hive_service.create(Root, request).await?;
    Ok(CreateResponse::Created {
        location: format!("{}/hives/{}", prefix.as_str(), created.id),
        body: Json(created),
    })
}

/// `PUT /api/hives/{id}`
pub async fn update<HS, SS, CS, PS, U>(
    State(state): State<AppState<HS, SS, CS, PS, U>>,
    Path(id): Path<String>,
    body: Result<Json<UpdateHiveRequest>, JsonRejection>,
) -> Result<NoContentResponse, ApiError>
where
    HS: RecordStore<Hive> + Send + Sync + 'static,
    SS: ChildStore<HiveSection> + Send + Sync + 'static,
    CS: RecordStore<ProductCategory> + Send + Sync + 'static,
    PS: ChildStore<CatalogueProduct> + Send + Sync + 'static,
    U: UserContext + Send + Sync + 'static,
{
    let hive_id = parse_id(&id)?;
    let Json(request) = body?;
    state.hive_service.update(hive_id, request).await?;
    Ok(NoContentResponse::NoContent)
}

/// `PUT /api/hives/{id}/status/{deletedStatus}`
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
    let hive_id = parse_id(&id)?;
    let deleted = parse_status(&deleted)?;
    state.hive_service.set_status(hive_id, deleted).await?;
    Ok(NoContentResponse::NoContent)
}

/// `DELETE /api/hives/{id}`
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
    state.hive_service.delete(parse_id(&id)?).await?;
    Ok(NoContentResponse::NoContent)
}
