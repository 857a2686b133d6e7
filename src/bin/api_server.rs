// src/bin/api_server.rs

use garden_catalog::infra::logging::{init_logging, LoggingConfig};
use garden_catalog::storage::catalog::open_store;
use garden_catalog::transport;
use garden_catalog::{AppConfig, CatalogService, UploadStore};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::from_env()?;
    init_logging(&LoggingConfig::from_env())?;

    // --- Store Initialization ---
    tracing::info!(backend = ?config.backend, "initializing catalog store");
    let store = open_store(&config).await?;

    // --- Upload directory (must already exist) ---
    let uploads = UploadStore::new(&config.upload_dir, config.upload_timeout)?;
    tracing::info!(dir = %uploads.dir().display(), "upload directory ready");

    let app_state = transport::http::AppState {
        catalog: Arc::new(CatalogService::new(store, uploads, config.backend_timeout)),
    };

    // --- API Server Initialization ---
    let cors = CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any);
    let app = transport::http::create_router(app_state, &transport::http::HttpOptions::from_config(&config))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", transport::http::ApiDoc::openapi()))
        .layer(cors);

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    tracing::info!(addr = %config.bind_addr, "API server listening");
    tracing::info!("Swagger UI available at /swagger-ui");

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!(error = %e, "failed to listen for shutdown signal");
            }
            tracing::info!("shutdown signal received");
        })
        .await?;

    tracing::info!("graceful shutdown complete");
    Ok(())
}
