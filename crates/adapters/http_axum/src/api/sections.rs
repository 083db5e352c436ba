//! JSON REST handlers for hive sections.

use axum::Json;
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{NestedPath, Path, Query, State};

use hivekeep_app::ports::{ChildStore, RecordStore, UserContext};
use hivekeep_domain::hive::Hive;
use hivekeep_domain::hive_section::{HiveSection, HiveSectionListItem, UpdateHiveSectionRequest};
use hivekeep_domain::id::HiveId;
use hivekeep_domain::product::CatalogueProduct;
use hivekeep_domain::product_category::ProductCategory;
use hivekeep_domain::record::Page;

use super::params::{parse_id, parse_status};
use super::response::{CreateResponse, GetResponse, ListResponse, NoContentResponse};
use crate::error::ApiError;
use crate::state::AppState;

/// `GET /api/sections`
pub async fn list<HS, SS, CS, PS, U>(
    State(state): State<AppState<HS, SS, CS, PS, U>>,
    query: Result<Query<Page>, QueryRejection>,
) -> Result<ListResponse<HiveSectionListItem>, ApiError>
where
    HS: RecordStore<Hive> + Send + Sync + 'static,
    SS: ChildStore<HiveSection> + Send + Sync + 'static,
    CS: RecordStore<ProductCategory> + Send + Sync + 'static,
    PS: ChildStore<CatalogueProduct> + Send + Sync + 'static,
    U: UserContext + Send + Sync + 'static,
{
    let Query(page) = query?;
    let sections = state.section_service.list(page).await?;
    Ok(ListResponse::Ok(Json(sections)))
}

/// `GET /api/sections/{id}`
pub async fn get<HS, SS, CS, PS, U>(
    State(state): State<AppState<HS, SS, CS, PS, U>>,
    Path(id): Path<String>,
) -> Result<GetResponse<HiveSection>, ApiError>
where
    HS: RecordStore<Hive> + Send + Sync + 'static,
    SS: ChildStore<HiveSection> + Send + Sync + 'static,
    CS: RecordStore<ProductCategory> + Send + Sync + 'static,
    PS: ChildStore<CatalogueProduct> + Send + Sync + 'static,
    U: UserContext + Send + Sync + 'static,
{
    let section = state.section_service.get(parse_id(&id)?).await?;
    Ok(GetResponse::Ok(Json(section)))
}

/// `POST /api/sections/add/{hiveId}`
pub async fn create<HS, SS, CS, PS, U>(
    State(state): State<AppState<HS, SS, CS, PS, U>>,
    prefix: NestedPath,
    Path(hive_id): Path<String>,
    body: Result<Json<UpdateHiveSectionRequest>, JsonRejection>,
) -> Result<CreateResponse<HiveSection>, ApiError>
where
    HS: RecordStore<Hive> + Send + Sync + 'static,
    SS: ChildStore<HiveSection> + Send + Sync + 'static,
    CS: RecordStore<ProductCategory> + Send + Sync + 'static,
    PS: ChildStore<CatalogueProduct> + Send + Sync + 'static,
    U: UserContext + Send + Sync + 'static,
{
    let hive_id: HiveId = parse_id(&hive_id)?;
    let Json(request) = body?;
    let created = state.section_service.create(hive_id, request).await?;
    Ok(CreateResponse::Created {
        location: format!("{}/sections/{}", prefix.as_str(), created.id),
        body: Json(created),
    })
}

/// `PUT /api/sections/{id}`
pub async fn update<HS, SS, CS, PS, U>(
    State(state): State<AppState<HS, SS, CS, PS, U>>,
    Path(id): Path<String>,
    body: Result<Json<UpdateHiveSectionRequest>, JsonRejection>,
) -> Result<NoContentResponse, ApiError>
where
    HS: RecordStore<Hive> + Send + Sync + 'static,
    SS: ChildStore<HiveSection> + Send + Sync + 'static,
    CS: RecordStore<ProductCategory> + Send + Sync + 'static,
    PS: ChildStore<CatalogueProduct> + Send + Sync + 'static,
    U: UserContext + Send + Sync + 'static,
{
    let section_id = parse_id(&id)?;
    let Json(request) = body?;
    state.section_service.update(section_id, request).await?;
    Ok(NoContentResponse::NoContent)
}

/// `PUT /api/sections/{id}/status/{deletedStatus}`
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
    let section_id = parse_id(&id)?;
    let deleted = parse_status(&deleted)?;
    state.section_service.set_status(section_id, deleted).await?;
    Ok(NoContentResponse::NoContent)
}

/// `DELETE /api/sections/{id}`
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
    state.section_service.delete(parse_id(&id)?).await?;
    Ok(NoContentResponse::NoContent)
}
