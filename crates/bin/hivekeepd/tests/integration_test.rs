//! End-to-end smoke tests for the full hivekeepd stack.
//!
//! Each test spins up the complete application (in-memory `SQLite`, real
//! stores, real services, real axum router) and exercises the HTTP layer via
//! `tower::ServiceExt::oneshot`. No TCP port is bound.

use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use http_body_util::BodyExt;
use hivekeep_adapter_http_axum::router;
use hivekeep_adapter_http_axum::state::AppState;
use hivekeep_adapter_storage_sqlite_sqlx::{
    Config, SqliteHiveSectionStore, SqliteHiveStore, SqliteProductCategoryStore,
    SqliteProductStore,
};
use hivekeep_app::ports::StaticUser;
use hivekeep_domain::id::UserId;
use serde_json::{Value, json};
use tower::ServiceExt;

/// Build a fully-wired router backed by an in-memory `SQLite` database.
async fn app() -> axum::Router {
    let db = Config {
        database_url: "sqlite::memory:".to_string(),
    }
    .build()
    .await
    .expect("in-memory database should initialise");

    let pool = db.pool().clone();

    let state = AppState::new(
        SqliteHiveStore::new(pool.clone()),
        SqliteHiveSectionStore::new(pool.clone()),
        SqliteProductCategoryStore::new(pool.clone()),
        SqliteProductStore::new(pool),
        StaticUser(UserId::new(5)),
    );

    router::build(state)
}

struct Reply {
    status: StatusCode,
    location: Option<String>,
    body: Value,
}

async fn call(app: &axum::Router, method: &str, uri: &str, body: Option<Value>) -> Reply {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let location = response
        .headers()
        .get(header::LOCATION)
        .map(|value| value.to_str().unwrap().to_string());
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or_else(|_| Value::String(
            String::from_utf8_lossy(&bytes).into_owned(),
        ))
    };

    Reply {
        status,
        location,
        body,
    }
}

async fn add_hive(app: &axum::Router, code: &str) -> i64 {
    let reply = call(
        app,
        "POST",
        "/api/hives/add",
        Some(json!({ "name": "Warehouse", "code": code, "address": "1 Dock Road" })),
    )
    .await;
    assert_eq!(reply.status, StatusCode::CREATED);
    reply.body["id"].as_i64().unwrap()
}

async fn add_section(app: &axum::Router, hive_id: i64, code: &str) -> i64 {
    let reply = call(
        app,
        "POST",
        &format!("/api/sections/add/{hive_id}"),
        Some(json!({ "name": "Aisle", "code": code })),
    )
    .await;
    assert_eq!(reply.status, StatusCode::CREATED);
    reply.body["id"].as_i64().unwrap()
}

// ---------------------------------------------------------------------------
// Health check
// ---------------------------------------------------------------------------

#[tokio::test]
async fn should_return_ok_when_health_check_called() {
    let app = app().await;

    let reply = call(&app, "GET", "/health", None).await;

    assert_eq!(reply.status, StatusCode::OK);
    assert_eq!(reply.body, Value::String("OK".to_string()));
}

// ---------------------------------------------------------------------------
// Hives
// ---------------------------------------------------------------------------

#[tokio::test]
async fn should_create_and_fetch_hive() {
    let app = app().await;

    let created = call(
        &app,
        "POST",
        "/api/hives/add",
        Some(json!({ "name": "North yard", "code": "NORTH", "address": "1 Dock Road" })),
    )
    .await;

    assert_eq!(created.status, StatusCode::CREATED);
    assert_eq!(created.location.as_deref(), Some("/api/hives/1"));

    let fetched = call(&app, "GET", "/api/hives/1", None).await;
    assert_eq!(fetched.status, StatusCode::OK);
    assert_eq!(fetched.body["name"], "North yard");
    assert_eq!(fetched.body["address"], "1 Dock Road");
    assert_eq!(fetched.body["isDeleted"], false);
    assert_eq!(fetched.body["createdBy"], 5);
    assert_eq!(fetched.body["lastUpdatedBy"], 5);
}

#[tokio::test]
async fn should_reject_duplicate_hive_code() {
    let app = app().await;
    add_hive(&app, "NORTH").await;

    let reply = call(
        &app,
        "POST",
        "/api/hives/add",
        Some(json!({ "name": "Other yard", "code": "NORTH" })),
    )
    .await;

    assert_eq!(reply.status, StatusCode::CONFLICT);
    assert!(reply.body["error"].as_str().unwrap().contains("NORTH"));
}

#[tokio::test]
async fn should_count_sections_per_hive_and_list_them() {
    let app = app().await;
    let first = add_hive(&app, "HIVE1").await;
    let second = add_hive(&app, "HIVE2").await;
    for code in ["SEC01", "SEC02"] {
        add_section(&app, first, code).await;
    }
    for code in ["SEC03", "SEC04", "SEC05"] {
        add_section(&app, second, code).await;
    }

    let hives = call(&app, "GET", "/api/hives", None).await;
    assert_eq!(hives.status, StatusCode::OK);
    assert_eq!(hives.body[0]["hiveSectionCount"], 2);
    assert_eq!(hives.body[1]["hiveSectionCount"], 3);

    let sections = call(&app, "GET", &format!("/api/hives/{second}/sections"), None).await;
    let ids: Vec<i64> = sections
        .body
        .as_array()
        .unwrap()
        .iter()
        .map(|item| item["id"].as_i64().unwrap())
        .collect();
    assert_eq!(ids, vec![3, 4, 5]);
}

#[tokio::test]
async fn should_return_not_found_for_sections_of_missing_hive() {
    let app = app().await;

    let listed = call(&app, "GET", "/api/hives/9/sections", None).await;
    let added = call(
        &app,
        "POST",
        "/api/sections/add/9",
        Some(json!({ "name": "Aisle", "code": "SEC01" })),
    )
    .await;

    assert_eq!(listed.status, StatusCode::NOT_FOUND);
    assert_eq!(added.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn should_require_soft_delete_before_hard_delete() {
    let app = app().await;
    let id = add_hive(&app, "NORTH").await;

    let refused = call(&app, "DELETE", &format!("/api/hives/{id}"), None).await;
    assert_eq!(refused.status, StatusCode::CONFLICT);

    let marked = call(&app, "PUT", &format!("/api/hives/{id}/status/true"), None).await;
    assert_eq!(marked.status, StatusCode::NO_CONTENT);

    let removed = call(&app, "DELETE", &format!("/api/hives/{id}"), None).await;
    assert_eq!(removed.status, StatusCode::NO_CONTENT);

    let gone = call(&app, "GET", &format!("/api/hives/{id}"), None).await;
    assert_eq!(gone.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn should_report_conflict_when_deleting_hive_that_still_has_sections() {
    let app = app().await;
    let id = add_hive(&app, "NORTH").await;
    add_section(&app, id, "SEC01").await;
    call(&app, "PUT", &format!("/api/hives/{id}/status/true"), None).await;

    let reply = call(&app, "DELETE", &format!("/api/hives/{id}"), None).await;

    assert_eq!(reply.status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn should_restore_soft_deleted_hive() {
    let app = app().await;
    let id = add_hive(&app, "NORTH").await;

    call(&app, "PUT", &format!("/api/hives/{id}/status/true"), None).await;
    let deleted = call(&app, "GET", &format!("/api/hives/{id}"), None).await;
    call(&app, "PUT", &format!("/api/hives/{id}/status/false"), None).await;
    let restored = call(&app, "GET", &format!("/api/hives/{id}"), None).await;

    assert_eq!(deleted.body["isDeleted"], true);
    assert_eq!(restored.body["isDeleted"], false);
}

#[tokio::test]
async fn should_update_hive_and_keep_its_own_code() {
    let app = app().await;
    let id = add_hive(&app, "NORTH").await;

    let reply = call(
        &app,
        "PUT",
        &format!("/api/hives/{id}"),
        Some(json!({ "name": "North yard", "code": "NORTH", "address": "2 Dock Road" })),
    )
    .await;
    assert_eq!(reply.status, StatusCode::NO_CONTENT);

    let fetched = call(&app, "GET", &format!("/api/hives/{id}"), None).await;
    assert_eq!(fetched.body["name"], "North yard");
    assert_eq!(fetched.body["address"], "2 Dock Road");
}

#[tokio::test]
async fn should_return_not_found_when_updating_missing_hive() {
    let app = app().await;

    let reply = call(
        &app,
        "PUT",
        "/api/hives/3",
        Some(json!({ "name": "North yard", "code": "NORTH" })),
    )
    .await;

    assert_eq!(reply.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn should_return_bad_request_for_invalid_input() {
    let app = app().await;

    let short_code = call(
        &app,
        "POST",
        "/api/hives/add",
        Some(json!({ "name": "North yard", "code": "N" })),
    )
    .await;
    let bad_id = call(&app, "GET", "/api/hives/north", None).await;
    let no_body = call(&app, "POST", "/api/hives/add", None).await;

    assert_eq!(short_code.status, StatusCode::BAD_REQUEST);
    assert_eq!(bad_id.status, StatusCode::BAD_REQUEST);
    assert_eq!(no_body.status, StatusCode::BAD_REQUEST);
}

// ---------------------------------------------------------------------------
// Catalogue
// ---------------------------------------------------------------------------

#[tokio::test]
async fn should_manage_catalogue_under_versioned_prefix() {
    let app = app().await;

    let category = call(
        &app,
        "POST",
        "/api/v1/categories/add",
        Some(json!({ "name": "Tents", "code": "TENTS", "description": "Shelter" })),
    )
    .await;
    assert_eq!(category.status, StatusCode::CREATED);
    let category_id = category.body["id"].as_i64().unwrap();

    let product = call(
        &app,
        "POST",
        &format!("/api/v1/products/add/{category_id}"),
        Some(json!({ "name": "Dome tent", "code": "DOME-2", "price": 129.5 })),
    )
    .await;
    assert_eq!(product.status, StatusCode::CREATED);
    assert_eq!(product.body["categoryId"], category_id);

    let categories = call(&app, "GET", "/api/v1/categories", None).await;
    assert_eq!(categories.body[0]["productCount"], 1);

    let products = call(
        &app,
        "GET",
        &format!("/api/categories/{category_id}/products"),
        None,
    )
    .await;
    assert_eq!(products.body[0]["code"], "DOME-2");
    assert_eq!(products.body[0]["price"], 129.5);
}

#[tokio::test]
async fn should_page_categories() {
    let app = app().await;
    for code in ["A", "B", "C", "D", "E"] {
        call(
            &app,
            "POST",
            "/api/categories/add",
            Some(json!({ "name": "Category", "code": code })),
        )
        .await;
    }

    let page = call(&app, "GET", "/api/categories?start=1&amount=2", None).await;

    let codes: Vec<&str> = page
        .body
        .as_array()
        .unwrap()
        .iter()
        .map(|item| item["code"].as_str().unwrap())
        .collect();
    assert_eq!(codes, vec!["B", "C"]);
}

#[tokio::test]
async fn should_reject_negative_product_price() {
    let app = app().await;
    call(
        &app,
        "POST",
        "/api/categories/add",
        Some(json!({ "name": "Tents", "code": "TENTS" })),
    )
    .await;

    let reply = call(
        &app,
        "POST",
        "/api/products/add/1",
        Some(json!({ "name": "Dome tent", "code": "DOME-2", "price": -3.0 })),
    )
    .await;

    assert_eq!(reply.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn should_keep_deleted_product_code_reserved() {
    let app = app().await;
    call(
        &app,
        "POST",
        "/api/categories/add",
        Some(json!({ "name": "Tents", "code": "TENTS" })),
    )
    .await;
    call(
        &app,
        "POST",
        "/api/products/add/1",
        Some(json!({ "name": "Dome tent", "code": "DOME-2" })),
    )
    .await;
    call(&app, "PUT", "/api/products/1/status/true", None).await;

    let reply = call(
        &app,
        "POST",
        "/api/products/add/1",
        Some(json!({ "name": "Dome tent v2", "code": "DOME-2" })),
    )
    .await;

    assert_eq!(reply.status, StatusCode::CONFLICT);
}
