use crate::app::catalog_service::CatalogService;
use serde::Serialize;
use serde_json::Value as JsonValue;
use std::path::PathBuf;
use std::sync::Arc;
use utoipa::ToSchema;

#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<CatalogService>,
}

/// Router-level settings that are not part of the shared request state.
#[derive(Debug, Clone)]
pub struct HttpOptions {
    /// Directory served for every path the API does not claim.
    pub static_dir: PathBuf,
    /// Document served at `/`.
    pub index_file: PathBuf,
    /// Upper bound on request bodies, uploads included.
    pub max_body_bytes: usize,
}

impl HttpOptions {
    pub fn from_config(config: &crate::infra::config::AppConfig) -> Self {
        Self {
            static_dir: config.static_dir.clone(),
            index_file: config.index_file.clone(),
            max_body_bytes: config.max_body_bytes,
        }
    }
}

#[derive(Serialize, Debug, ToSchema)]
pub struct ApiResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Object)]
    pub data: Option<JsonValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Body of `POST /api/houses` and `PUT /api/houses/{id}`.
///
/// Sent as `multipart/form-data` (with an optional `image` file part) or as a JSON object with
/// the same text fields.
#[derive(ToSchema)]
#[allow(dead_code)] // documentation only
pub struct HouseUpload {
    /// At least 3 characters.
    name: String,
    /// At least 3 characters.
    description: String,
    /// Non-negative number (text is accepted in forms).
    price: f64,
    /// Non-negative number (text is accepted in forms).
    rating: f64,
    #[schema(value_type = Option<String>, format = Binary)]
    image: Option<Vec<u8>>,
}
