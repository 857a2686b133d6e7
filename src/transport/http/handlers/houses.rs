use crate::transport::http::form::HouseForm;
use crate::transport::http::types::AppState;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

#[utoipa::path(
    get,
    path = "/api/houses",
    responses(
        (status = 200, description = "All catalog items", body = [crate::domain::model::CatalogItem]),
        (status = 500, description = "Internal server error", body = String)
    )
)]
pub async fn list_houses_handler(State(state): State<AppState>) -> impl IntoResponse {
    match state.catalog.list().await {
        Ok(items) => (StatusCode::OK, Json(items)).into_response(),
        Err(e) => e.into_response(),
    }
}

#[utoipa::path(
    get,
    path = "/api/houses/{id}",
    params(
        ("id" = String, Path, description = "Item identifier")
    ),
    responses(
        (status = 200, description = "The item", body = crate::domain::model::CatalogItem),
        (status = 404, description = "Unknown id", body = String)
    )
)]
pub async fn get_house_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    match state.catalog.get(&id).await {
        Ok(item) => (StatusCode::OK, Json(item)).into_response(),
        Err(e) => e.into_response(),
    }
}

#[utoipa::path(
    post,
    path = "/api/houses",
    request_body(content = crate::transport::http::types::HouseUpload, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Item created", body = crate::domain::model::CatalogItem),
        (status = 400, description = "Validation failed", body = String),
        (status = 500, description = "Internal server error", body = String)
    )
)]
pub async fn create_house_handler(
    State(state): State<AppState>,
    HouseForm(submission): HouseForm,
) -> impl IntoResponse {
    match state.catalog.create(submission).await {
        Ok(item) => {
            tracing::info!(id = %item.id, image = item.main_image.as_deref().unwrap_or("-"), "created house");
            (StatusCode::OK, Json(item)).into_response()
        }
        Err(e) => {
            if e.is_client_error() {
                tracing::debug!(error = %e, "rejected create");
            }
            e.into_response()
        }
    }
}

#[utoipa::path(
    put,
    path = "/api/houses/{id}",
    params(
        ("id" = String, Path, description = "Item identifier")
    ),
    request_body(content = crate::transport::http::types::HouseUpload, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Item updated", body = crate::domain::model::CatalogItem),
        (status = 400, description = "Validation failed", body = String),
        (status = 404, description = "Unknown id", body = String),
        (status = 500, description = "Internal server error", body = String)
    )
)]
pub async fn update_house_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
    HouseForm(submission): HouseForm,
) -> impl IntoResponse {
    match state.catalog.replace(&id, submission).await {
        Ok(item) => {
            tracing::info!(id = %item.id, "updated house");
            (StatusCode::OK, Json(item)).into_response()
        }
        Err(e) => {
            if e.is_client_error() {
                tracing::debug!(id = %id, error = %e, "rejected update");
            }
            e.into_response()
        }
    }
}

#[utoipa::path(
    delete,
    path = "/api/houses/{id}",
    params(
        ("id" = String, Path, description = "Item identifier")
    ),
    responses(
        (status = 200, description = "The deleted item", body = crate::domain::model::CatalogItem),
        (status = 404, description = "Unknown id", body = String),
        (status = 500, description = "Internal server error", body = String)
    )
)]
pub async fn delete_house_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    match state.catalog.delete(&id).await {
        Ok(item) => {
            tracing::info!(id = %item.id, "deleted house");
            (StatusCode::OK, Json(item)).into_response()
        }
        Err(e) => e.into_response(),
    }
}
