use crate::app::error::CatalogError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

pub const NOT_FOUND_MESSAGE: &str = "The house with the given id was not found";
const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";

/// Plain-text error bodies. Server-side failures never echo internal detail.
impl IntoResponse for CatalogError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            CatalogError::Validation(e) => (StatusCode::BAD_REQUEST, e.message.clone()),
            CatalogError::NotFound { .. } => (StatusCode::NOT_FOUND, NOT_FOUND_MESSAGE.to_string()),
            CatalogError::Upload(e) if e.is_client_error() => (StatusCode::BAD_REQUEST, e.to_string()),
            CatalogError::Upload(_) | CatalogError::Backend { .. } | CatalogError::Timeout { .. } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                INTERNAL_ERROR_MESSAGE.to_string(),
            ),
        };
        (status, body).into_response()
    }
}

pub fn bad_request(message: impl Into<String>) -> Response {
    (StatusCode::BAD_REQUEST, message.into()).into_response()
}
