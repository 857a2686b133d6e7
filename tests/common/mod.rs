//! Shared harness: serves the full router on an ephemeral port backed by the in-memory store.

#![allow(dead_code)]

use garden_catalog::domain::model::seed_houses;
use garden_catalog::transport;
use garden_catalog::{CatalogService, CatalogStore, MemoryCatalogStore, UploadStore};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;
use tokio::task::JoinHandle;

pub const INDEX_HTML: &str = "<!doctype html><title>Garden Supply</title>";

pub struct TestServer {
    pub base_url: String,
    pub client: reqwest::Client,
    pub store: Arc<MemoryCatalogStore>,
    pub site: TempDir,
    handle: JoinHandle<()>,
}

impl TestServer {
    pub fn upload_dir(&self) -> PathBuf {
        self.site.path().join("images")
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

pub async fn spawn_server(seed: bool) -> Result<TestServer, Box<dyn std::error::Error>> {
    let items = if seed { seed_houses() } else { Vec::new() };
    spawn_with_store(Arc::new(MemoryCatalogStore::with_items(items))).await
}

pub async fn spawn_with_store(
    store: Arc<MemoryCatalogStore>,
) -> Result<TestServer, Box<dyn std::error::Error>> {
    let dyn_store: Arc<dyn CatalogStore> = store.clone();
    let (base_url, site, handle) = serve(dyn_store, Duration::from_secs(5)).await?;
    Ok(TestServer {
        base_url,
        client: reqwest::Client::new(),
        store,
        site,
        handle,
    })
}

/// Serves an arbitrary store. Returns the base url, the site directory and the server task.
pub async fn serve(
    store: Arc<dyn CatalogStore>,
    backend_timeout: Duration,
) -> Result<(String, TempDir, JoinHandle<()>), Box<dyn std::error::Error>> {
    let site = tempfile::tempdir()?;
    std::fs::write(site.path().join("index.html"), INDEX_HTML)?;
    let upload_dir = site.path().join("images");
    std::fs::create_dir(&upload_dir)?;

    let uploads = UploadStore::new(&upload_dir, Duration::from_secs(5))?;
    let app_state = transport::http::AppState {
        catalog: Arc::new(CatalogService::new(store, uploads, backend_timeout)),
    };
    let options = transport::http::HttpOptions {
        static_dir: site.path().to_path_buf(),
        index_file: site.path().join("index.html"),
        max_body_bytes: 1024 * 1024,
    };
    let router = transport::http::create_router(app_state, &options);
    let (base_url, handle) = listen(router).await?;
    Ok((base_url, site, handle))
}

/// Binds an ephemeral port so tests can run in parallel.
pub async fn listen(
    router: axum::Router,
) -> Result<(String, JoinHandle<()>), Box<dyn std::error::Error>> {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
    let port = listener.local_addr()?.port();
    let handle = tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    Ok((format!("http://127.0.0.1:{}", port), handle))
}
