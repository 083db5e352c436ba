//! Axum router assembly.

use axum::Router;
use axum::routing::get;
use tower_http::trace::TraceLayer;

use hivekeep_app::ports::{ChildStore, RecordStore, UserContext};
use hivekeep_domain::hive::Hive;
use hivekeep_domain::hive_section::HiveSection;
use hivekeep_domain::product::CatalogueProduct;
use hivekeep_domain::product_category::ProductCategory;

use crate::state::AppState;

/// Build the top-level axum [`Router`].
///
/// Nests the API routes under `/api` and again under `/api/v1`.
/// Includes a [`TraceLayer`] that logs each HTTP request/response at the
/// `DEBUG` level using the `tracing` ecosystem.
pub fn build<HS, SS, CS, PS, U>(state: AppState<HS, SS, CS, PS, U>) -> Router
where
    HS: RecordStore<Hive> + Send + Sync + 'static,
    SS: ChildStore<HiveSection> + Send + Sync + 'static,
    CS: RecordStore<ProductCategory> + Send + Sync + 'static,
    PS: ChildStore<CatalogueProduct> + Send + Sync + 'static,
    U: UserContext + Send + Sync + 'static,
{
    Router::new()
        .route("/health", get(health_check))
        .nest("/api", crate::api::routes())
        .nest("/api/v1", crate::api::routes())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health_check() -> &'static str {
    "OK"
}

#[cfg(test)]
mod tests {
    use std::future::Future;

    use axum::body::Body;
    use axum::http::{Request, StatusCode, header};
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    use hivekeep_app::ports::StaticUser;
    use hivekeep_domain::error::HiveKeepError;
    use hivekeep_domain::id::UserId;
    use hivekeep_domain::record::{Draft, Page, Record};

    use super::*;

    /// Store that holds nothing, accepts every parent and assigns id 1.
    struct EmptyStore;

    impl<R> RecordStore<R> for EmptyStore
    where
        R: Record,
        R::Id: From<i64>,
        R::ChildCount: Default,
    {
        fn find_by_id(
            &self,
            _id: R::Id,
        ) -> impl Future<Output = Result<Option<R>, HiveKeepError>> + Send {
            async { Ok(None) }
        }

        fn find_by_code(
            &self,
            _code: &str,
            _except: Option<R::Id>,
        ) -> impl Future<Output = Result<Option<R>, HiveKeepError>> + Send {
            async { Ok(None) }
        }

        fn parent_exists(
            &self,
            _parent: R::Parent,
        ) -> impl Future<Output = Result<bool, HiveKeepError>> + Send {
            async { Ok(true) }
        }

        fn list(&self, _page: Page) -> impl Future<Output = Result<Vec<R>, HiveKeepError>> + Send {
            async { Ok(Vec::new()) }
        }

        fn count_children(
            &self,
            _id: R::Id,
        ) -> impl Future<Output = Result<R::ChildCount, HiveKeepError>> + Send {
            async { Ok(R::ChildCount::default()) }
        }

        fn insert(&self, draft: Draft<R>) -> impl Future<Output = Result<R, HiveKeepError>> + Send {
            async move { Ok(R::from_draft(R::Id::from(1), draft)) }
        }

        fn save(&self, _record: &R) -> impl Future<Output = Result<(), HiveKeepError>> + Send {
            async { Ok(()) }
        }

        fn remove(&self, _id: R::Id) -> impl Future<Output = Result<(), HiveKeepError>> + Send {
            async { Ok(()) }
        }
    }

    impl<R> ChildStore<R> for EmptyStore
    where
        R: Record,
        R::Id: From<i64>,
        R::ChildCount: Default,
    {
        fn list_by_parent(
            &self,
            _parent: R::Parent,
            _page: Page,
        ) -> impl Future<Output = Result<Vec<R>, HiveKeepError>> + Send {
            async { Ok(Vec::new()) }
        }
    }

    fn app() -> Router {
        build(AppState::new(
            EmptyStore,
            EmptyStore,
            EmptyStore,
            EmptyStore,
            StaticUser(UserId::new(1)),
        ))
    }

    async fn send(request: Request<Body>) -> (StatusCode, axum::http::HeaderMap, Vec<u8>) {
        let response = app().oneshot(request).await.unwrap();
        let status = response.status();
        let headers = response.headers().clone();
        let body = response.into_body().collect().await.unwrap().to_bytes();
        (status, headers, body.to_vec())
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    fn json(method: &str, uri: &str, body: &str) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn should_return_ok_when_health_check_called() {
        let (status, _, body) = send(get("/health")).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, b"OK");
    }

    #[tokio::test]
    async fn should_return_empty_list_under_both_prefixes() {
        for uri in ["/api/hives", "/api/v1/hives", "/api/categories?start=0&amount=5"] {
            let (status, _, body) = send(get(uri)).await;
            assert_eq!(status, StatusCode::OK, "{uri}");
            assert_eq!(body, b"[]", "{uri}");
        }
    }

    #[tokio::test]
    async fn should_return_not_found_when_hive_is_missing() {
        let (status, _, body) = send(get("/api/hives/7")).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        let body: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(body["error"], "Hive 7 not found");
    }

    #[tokio::test]
    async fn should_return_bad_request_when_id_is_malformed() {
        let (status, _, _) = send(get("/api/products/abc")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn should_return_bad_request_when_status_flag_is_unknown() {
        let request = Request::builder()
            .method("PUT")
            .uri("/api/hives/1/status/maybe")
            .body(Body::empty())
            .unwrap();

        let (status, _, _) = send(request).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn should_return_bad_request_when_body_is_malformed() {
        let (status, _, body) = send(json("POST", "/api/sections/add/1", "{\"name\":")).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        let body: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert!(body["error"].as_str().unwrap().starts_with("malformed request body"));
    }

    #[tokio::test]
    async fn should_return_bad_request_when_paging_is_malformed() {
        let (status, _, _) = send(get("/api/products?start=-4")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn should_return_created_with_location_when_hive_added() {
        let (status, headers, body) = send(json(
            "POST",
            "/api/hives/add",
            r#"{"name":"North","code":"NORTH","address":"1 Dock Road"}"#,
        ))
        .await;

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(headers[header::LOCATION], "/api/hives/1");
        let body: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(body["code"], "NORTH");
        assert_eq!(body["isDeleted"], false);
        assert_eq!(body["createdBy"], 1);
    }

    #[tokio::test]
    async fn should_point_location_at_versioned_prefix_when_created_under_v1() {
        let (status, headers, _) = send(json(
            "POST",
            "/api/v1/categories/add",
            r#"{"name":"Tools","code":"TOOLS"}"#,
        ))
        .await;

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(headers[header::LOCATION], "/api/v1/categories/1");
    }

    #[tokio::test]
    async fn should_return_bad_request_when_hive_code_has_wrong_length() {
        let (status, _, _) = send(json(
            "POST",
            "/api/v1/hives/add",
            r#"{"name":"North","code":"NO"}"#,
        ))
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
    }
}
