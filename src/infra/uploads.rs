//! Image attachment storage.
//!
//! Files land in one pre-existing directory under the client's filename. A later upload with
//! the same name replaces the earlier file.

use axum::body::Bytes;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Multipart field that carries the image on create/update.
pub const IMAGE_FIELD: &str = "image";

/// A file attached to a create/update request.
#[derive(Debug, Clone)]
pub struct ImageUpload {
    pub file_name: String,
    pub bytes: Bytes,
}

#[derive(Debug, thiserror::Error)]
pub enum UploadError {
    #[error("upload directory {} does not exist or is not a directory", .0.display())]
    MissingDirectory(PathBuf),
    #[error("invalid file name '{0}'")]
    InvalidFileName(String),
    #[error("only one image may be attached")]
    TooManyFiles,
    #[error("unexpected file field '{0}' (expected 'image')")]
    UnexpectedField(String),
    #[error("failed to write {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("writing {} timed out", .0.display())]
    Timeout(PathBuf),
}

impl UploadError {
    /// True for errors caused by the request rather than the server.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            UploadError::InvalidFileName(_) | UploadError::TooManyFiles | UploadError::UnexpectedField(_)
        )
    }
}

#[derive(Debug, Clone)]
pub struct UploadStore {
    dir: PathBuf,
    write_timeout: Duration,
}

impl UploadStore {
    pub fn new(dir: impl Into<PathBuf>, write_timeout: Duration) -> Result<Self, UploadError> {
        let dir = dir.into();
        if !dir.is_dir() {
            return Err(UploadError::MissingDirectory(dir));
        }
        Ok(Self { dir, write_timeout })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Writes the attachment, if any, and returns the stored filename.
    pub async fn save(&self, upload: Option<ImageUpload>) -> Result<Option<String>, UploadError> {
        let Some(upload) = upload else {
            return Ok(None);
        };
        let file_name = stored_file_name(&upload.file_name)?;
        let path = self.dir.join(&file_name);

        match tokio::time::timeout(self.write_timeout, tokio::fs::write(&path, &upload.bytes)).await {
            Ok(Ok(())) => {}
            Ok(Err(source)) => return Err(UploadError::Io { path, source }),
            Err(_) => return Err(UploadError::Timeout(path)),
        }

        tracing::debug!(file = %file_name, bytes = upload.bytes.len(), "stored upload");
        Ok(Some(file_name))
    }
}

/// Reduces a client-supplied filename to its final path component.
///
/// Some browsers send the full client path; anything that would escape the upload directory
/// is rejected.
pub fn stored_file_name(raw: &str) -> Result<String, UploadError> {
    let last = raw
        .rsplit(|c: char| c == '/' || c == '\\')
        .next()
        .unwrap_or_default()
        .trim();
    if last.is_empty() || last == "." || last == ".." || last.contains('\0') {
        return Err(UploadError::InvalidFileName(raw.to_string()));
    }
    Ok(last.to_string())
}
