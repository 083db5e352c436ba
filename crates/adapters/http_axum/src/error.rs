//! HTTP error response mapping.

use axum::Json;
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use hivekeep_domain::error::{HiveKeepError, ValidationError};

/// JSON error body returned by API endpoints.
#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

/// Maps [`HiveKeepError`] to an HTTP response with appropriate status code.
#[derive(Debug)]
pub struct ApiError(HiveKeepError);

impl From<HiveKeepError> for ApiError {
    fn from(err: HiveKeepError) -> Self {
        Self(err)
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        Self(err.into())
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ValidationError::MalformedBody(rejection.body_text()).into()
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ValidationError::MalformedBody(rejection.body_text()).into()
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self.0 {
            HiveKeepError::Validation(err) => (StatusCode::BAD_REQUEST, err.to_string()),
            HiveKeepError::NotFound(err) => (StatusCode::NOT_FOUND, err.to_string()),
            HiveKeepError::Conflict(err) => (StatusCode::CONFLICT, err.to_string()),
            HiveKeepError::Storage(err) => {
                tracing::error!(error = %err, "storage error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal server error".to_string(),
                )
            }
        };

        (status, Json(ErrorBody { error: message })).into_response()
    }
}

#[cfg(test)]
mod tests {
    use hivekeep_domain::error::{ConflictError, NotFoundError};

    use super::*;

    fn status_of(err: HiveKeepError) -> StatusCode {
        ApiError::from(err).into_response().status()
    }

    #[test]
    fn should_map_each_error_kind_to_its_status() {
        assert_eq!(
            status_of(ValidationError::InvalidPrice.into()),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_of(NotFoundError::new("Hive", 4).into()),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            status_of(
                ConflictError::DuplicateCode {
                    entity: "Hive",
                    code: "NORTH".to_string(),
                }
                .into()
            ),
            StatusCode::CONFLICT
        );
        assert_eq!(
            status_of(HiveKeepError::Storage("disk full".into())),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
