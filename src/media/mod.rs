//! Media upload handling for avatars and cover images.
//!
//! Registration accepts multipart file fields; the [`MediaUploader`] trait
//! hides where those bytes end up. [`LocalMediaUploader`] writes them under a
//! configurable root directory which the router serves back at `/media/`.

use std::path::PathBuf;

use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

/// One uploaded file pulled out of a multipart request.
#[derive(Debug, Clone)]
pub struct MediaUpload {
    /// Multipart field the file arrived under ("avatar", "coverImage").
    pub field_name: String,
    pub file_name: String,
    pub bytes: Vec<u8>,
}

#[derive(Error, Debug)]
pub enum MediaError {
    #[error("media upload failed: {0}")]
    UploadFailed(String),
}

/// Storage seam for uploaded media.
#[async_trait]
pub trait MediaUploader: Send + Sync {
    /// Persists the upload and returns the public URL path it is served at.
    async fn upload(&self, upload: MediaUpload) -> Result<String, MediaError>;
}

/// Writes uploads to the local filesystem under `root`.
pub struct LocalMediaUploader {
    root: PathBuf,
}

impl LocalMediaUploader {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

#[async_trait]
impl MediaUploader for LocalMediaUploader {
    async fn upload(&self, upload: MediaUpload) -> Result<String, MediaError> {
        tokio::fs::create_dir_all(&self.root)
            .await
            .map_err(|err| MediaError::UploadFailed(err.to_string()))?;

        // Prefixing with a fresh UUID keeps names unique and means the
        // client-supplied name never decides where we write.
        let stored_name = format!("{}-{}", Uuid::new_v4(), sanitize_file_name(&upload.file_name));
        let path = self.root.join(&stored_name);

        tokio::fs::write(&path, &upload.bytes)
            .await
            .map_err(|err| MediaError::UploadFailed(err.to_string()))?;

        tracing::debug!("Stored {} upload at {}", upload.field_name, path.display());
        Ok(format!("/media/{}", stored_name))
    }
}

fn sanitize_file_name(name: &str) -> String {
    let cleaned: String = name
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                c
            } else {
                '_'
            }
        })
        .collect();
    if cleaned.is_empty() {
        "upload".to_string()
    } else {
        cleaned
    }
}
