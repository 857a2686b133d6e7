use crate::domain::model::CatalogItem;
use crate::transport::http::handlers::{health, houses, plants};
use crate::transport::http::types::{ApiResponse, AppState, HouseUpload, HttpOptions};
use axum::extract::DefaultBodyLimit;
use axum::routing::get;
use axum::Router;
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(
        health::healthcheck_handler,
        houses::list_houses_handler,
        houses::get_house_handler,
        houses::create_house_handler,
        houses::update_house_handler,
        houses::delete_house_handler,
        plants::list_plants_handler
    ),
    components(schemas(ApiResponse, CatalogItem, HouseUpload))
)]
#[allow(dead_code)]
pub struct ApiDoc;

/// Builds the full application router: catalog API, health, index document and static files.
pub fn create_router(app_state: AppState, options: &HttpOptions) -> Router {
    Router::new()
        .route("/health", get(health::healthcheck_handler))
        .route(
            "/api/houses",
            get(houses::list_houses_handler).post(houses::create_house_handler),
        )
        .route(
            "/api/houses/:id",
            get(houses::get_house_handler)
                .put(houses::update_house_handler)
                .delete(houses::delete_house_handler),
        )
        .route("/api/plants", get(plants::list_plants_handler))
        .route_service("/", ServeFile::new(&options.index_file))
        .fallback_service(ServeDir::new(&options.static_dir))
        .layer(DefaultBodyLimit::max(options.max_body_bytes))
        .layer(TraceLayer::new_for_http())
        .with_state(app_state)
}
