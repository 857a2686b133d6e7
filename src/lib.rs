pub mod app;
pub mod domain;
pub mod infra;
pub mod storage;
pub mod transport;

// Convenience re-exports (keeps call-sites clean)
pub use app::catalog_service::{CatalogService, HouseSubmission};
pub use app::error::CatalogError;
pub use domain::model::{CatalogItem, ItemFields, PlantItem};
pub use infra::config::{AppConfig, StoreBackend};
pub use infra::uploads::UploadStore;
pub use storage::catalog::{CatalogStore, MemoryCatalogStore, PostgresCatalogStore, StoreError};
