use crate::domain::model::ValidationError;
use crate::infra::uploads::UploadError;
use crate::storage::catalog::StoreError;

/// Everything a catalog operation can fail with, as seen by the HTTP layer.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("item '{id}' not found")]
    NotFound { id: String },
    #[error("{operation} failed")]
    Backend {
        operation: &'static str,
        #[source]
        source: StoreError,
    },
    #[error(transparent)]
    Upload(#[from] UploadError),
    #[error("{operation} timed out")]
    Timeout { operation: &'static str },
}

impl CatalogError {
    /// Validation, not-found and malformed uploads are the client's problem; the rest are ours.
    pub fn is_client_error(&self) -> bool {
        match self {
            CatalogError::Validation(_) | CatalogError::NotFound { .. } => true,
            CatalogError::Upload(e) => e.is_client_error(),
            CatalogError::Backend { .. } | CatalogError::Timeout { .. } => false,
        }
    }
}
