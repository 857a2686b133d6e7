use crate::transport::http::types::{ApiResponse, AppState};
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

fn health_status(status: StatusCode, label: &str, error: Option<String>) -> Response {
    let body = ApiResponse {
        success: status.is_success(),
        data: Some(serde_json::json!({ "status": label })),
        error,
    };
    (status, Json(body)).into_response()
}

/// Reports whether the catalog store answers a ping.
#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Catalog store reachable", body = ApiResponse),
        (status = 503, description = "Catalog store unreachable", body = ApiResponse)
    )
)]
pub async fn healthcheck_handler(State(state): State<AppState>) -> Response {
    match state.catalog.ping().await {
        Ok(()) => health_status(StatusCode::OK, "ok", None),
        Err(e) => health_status(
            StatusCode::SERVICE_UNAVAILABLE,
            "unhealthy",
            Some(format!("catalog store unavailable: {}", e)),
        ),
    }
}
