//! The catalog service.
//!
//! Sits between the HTTP handlers and the store. It owns the ordering of a mutating request:
//! 1.  Store the attached image (if any).
//! 2.  Validate the textual/numeric fields.
//! 3.  Read or write the store, bounded by the backend timeout.
//!
//! Because the image is written first, a request that then fails validation leaves the file
//! behind in the upload directory.

use crate::app::error::CatalogError;
use crate::domain::model::{validate, CandidateFields, CatalogItem};
use crate::infra::uploads::{ImageUpload, UploadStore};
use crate::storage::catalog::{CatalogStore, StoreError};
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

/// A create/update request after the body has been parsed.
#[derive(Debug, Clone, Default)]
pub struct HouseSubmission {
    pub fields: CandidateFields,
    pub image: Option<ImageUpload>,
}

pub struct CatalogService {
    store: Arc<dyn CatalogStore>,
    uploads: UploadStore,
    backend_timeout: Duration,
}

impl CatalogService {
    pub fn new(store: Arc<dyn CatalogStore>, uploads: UploadStore, backend_timeout: Duration) -> Self {
        Self {
            store,
            uploads,
            backend_timeout,
        }
    }

    pub async fn list(&self) -> Result<Vec<CatalogItem>, CatalogError> {
        self.call("list", None, self.store.list()).await
    }

    pub async fn get(&self, id: &str) -> Result<CatalogItem, CatalogError> {
        self.call("get", Some(id), self.store.get(id)).await
    }

    pub async fn create(&self, submission: HouseSubmission) -> Result<CatalogItem, CatalogError> {
        let main_image = self.store_image(submission.image).await?;
        let fields = validate(&submission.fields)?;
        self.call("create", None, self.store.create(fields, main_image))
            .await
    }

    pub async fn replace(
        &self,
        id: &str,
        submission: HouseSubmission,
    ) -> Result<CatalogItem, CatalogError> {
        let main_image = self.store_image(submission.image).await?;
        let fields = validate(&submission.fields)?;
        self.call("replace", Some(id), self.store.replace(id, fields, main_image))
            .await
    }

    pub async fn delete(&self, id: &str) -> Result<CatalogItem, CatalogError> {
        self.call("delete", Some(id), self.store.delete(id)).await
    }

    pub async fn ping(&self) -> Result<(), CatalogError> {
        self.call("ping", None, self.store.ping()).await
    }

    async fn store_image(&self, image: Option<ImageUpload>) -> Result<Option<String>, CatalogError> {
        self.uploads.save(image).await.map_err(|e| {
            if !e.is_client_error() {
                tracing::error!(dir = %self.uploads.dir().display(), error = %e, "storing upload failed");
            }
            CatalogError::from(e)
        })
    }

    /// Runs one store call under the backend timeout and maps its failure modes.
    async fn call<T, F>(&self, operation: &'static str, id: Option<&str>, fut: F) -> Result<T, CatalogError>
    where
        F: Future<Output = Result<T, StoreError>>,
    {
        match tokio::time::timeout(self.backend_timeout, fut).await {
            Ok(Ok(value)) => Ok(value),
            Ok(Err(StoreError::NotFound(id))) => Err(CatalogError::NotFound { id }),
            Ok(Err(source)) => {
                tracing::error!(operation, id = id.unwrap_or("-"), error = %source, "catalog backend call failed");
                Err(CatalogError::Backend { operation, source })
            }
            Err(_) => {
                tracing::error!(
                    operation,
                    id = id.unwrap_or("-"),
                    timeout_ms = self.backend_timeout.as_millis() as u64,
                    "catalog backend call timed out"
                );
                Err(CatalogError::Timeout { operation })
            }
        }
    }
}
