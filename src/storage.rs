//! Object storage for uploaded images.

use std::fs;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("unsupported content type: {0}")]
    UnsupportedContentType(String),
    #[error("invalid object key: {0}")]
    InvalidKey(String),
    #[error("storage io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Upload-by-key storage with public URLs.
pub trait ObjectStore {
    fn put(&self, key: &str, bytes: &[u8]) -> Result<(), StorageError>;
    fn public_url(&self, key: &str) -> String;
}

/// Rejects anything that is not `image/*`.
pub fn ensure_image(content_type: Option<&str>) -> Result<(), StorageError> {
    match content_type {
        Some(value) if value.trim().to_ascii_lowercase().starts_with("image/") => Ok(()),
        other => Err(StorageError::UnsupportedContentType(
            other.unwrap_or("none").to_string(),
        )),
    }
}

/// Random object key keeping the extension of the uploaded file name.
pub fn object_key(file_name: Option<&str>) -> String {
    let extension = file_name
        .and_then(|name| name.rsplit_once('.'))
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .filter(|ext| !ext.is_empty() && ext.len() <= 8)
        .filter(|ext| ext.chars().all(|c| c.is_ascii_alphanumeric()));

    let id = uuid::Uuid::new_v4();
    match extension {
        Some(ext) => format!("{id}.{ext}"),
        None => id.to_string(),
    }
}

/// Stores objects as flat files under `root`, served from `public_base`.
#[derive(Debug, Clone)]
pub struct LocalObjectStore {
    root: PathBuf,
    public_base: String,
}

impl LocalObjectStore {
    pub fn new(root: impl Into<PathBuf>, public_base: &str) -> Self {
        Self {
            root: root.into(),
            public_base: public_base.trim_end_matches('/').to_string(),
        }
    }
}

impl ObjectStore for LocalObjectStore {
    fn put(&self, key: &str, bytes: &[u8]) -> Result<(), StorageError> {
        if key.is_empty() || key.contains(['/', '\\']) || key.starts_with('.') {
            return Err(StorageError::InvalidKey(key.to_string()));
        }
        fs::create_dir_all(&self.root)?;
        fs::write(self.root.join(key), bytes)?;
        Ok(())
    }

    fn public_url(&self, key: &str) -> String {
        format!("{}/{key}", self.public_base)
    }
}
