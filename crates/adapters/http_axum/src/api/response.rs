//! Response shapes shared by every resource.

use axum::Json;
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use serde::Serialize;

/// Possible responses from a list endpoint.
pub enum ListResponse<T> {
    Ok(Json<Vec<T>>),
}

impl<T: Serialize> IntoResponse for ListResponse<T> {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// Possible responses from a get endpoint.
pub enum GetResponse<T> {
    Ok(Json<T>),
}

impl<T: Serialize> IntoResponse for GetResponse<T> {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// Possible responses from a create endpoint.
pub enum CreateResponse<T> {
    /// `201` with a `Location` header pointing at the new record.
    Created { location: String, body: Json<T> },
}

impl<T: Serialize> IntoResponse for CreateResponse<T> {
    fn into_response(self) -> Response {
        match self {
            Self::Created { location, body } => {
                (StatusCode::CREATED, [(header::LOCATION, location)], body).into_response()
            }
        }
    }
}

/// Possible responses from update, status and delete endpoints.
pub enum NoContentResponse {
    NoContent,
}

impl IntoResponse for NoContentResponse {
    fn into_response(self) -> Response {
        match self {
            Self::NoContent => StatusCode::NO_CONTENT.into_response(),
        }
    }
}
