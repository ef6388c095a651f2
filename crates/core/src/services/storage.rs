//! Object storage backends for uploaded media.

use async_trait::async_trait;
use std::path::PathBuf;
use tanihub_common::AppResult;

/// Object storage trait.
///
/// Stored objects are addressed by key on write and by public URL on delete:
/// entities only ever hold URLs, so cleanup works from the URL alone.
#[async_trait]
pub trait ObjectStorage: Send + Sync {
    /// Save object data under a key.
    async fn save(&self, key: &str, data: &[u8]) -> AppResult<()>;

    /// Delete an object by its public URL.
    async fn delete_by_url(&self, url: &str) -> AppResult<()>;

    /// Get the public URL for a key.
    fn url_for(&self, key: &str) -> String;
}

/// Local filesystem storage backend.
#[derive(Clone)]
pub struct LocalStorage {
    /// Base directory for storing files.
    base_path: PathBuf,
    /// Base URL under which files are served.
    base_url: String,
}

impl LocalStorage {
    /// Create a new local storage backend.
    #[must_use]
    pub fn new(base_path: PathBuf, base_url: String) -> Self {
        Self {
            base_path,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Recover the storage key from a public URL.
    fn key_from_url(&self, url: &str) -> Option<String> {
        let prefix = format!("{}/media/", self.base_url);
        let key = url.strip_prefix(&prefix)?;
        // Keys are flat file names; reject anything that escapes the directory
        if key.is_empty() || key.contains('/') || key.contains("..") {
            return None;
        }
        Some(key.to_string())
    }
}

#[async_trait]
impl ObjectStorage for LocalStorage {
    async fn save(&self, key: &str, data: &[u8]) -> AppResult<()> {
        let path = self.base_path.join(key);

        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await.map_err(|e| {
                tanihub_common::AppError::Internal(format!("Failed to create directory: {e}"))
            })?;
        }

        tokio::fs::write(&path, data).await.map_err(|e| {
            tanihub_common::AppError::Internal(format!("Failed to write file: {e}"))
        })?;

        Ok(())
    }

    async fn delete_by_url(&self, url: &str) -> AppResult<()> {
        let Some(key) = self.key_from_url(url) else {
            return Err(tanihub_common::AppError::Internal(format!(
                "URL not served by this storage: {url}"
            )));
        };

        let path = self.base_path.join(key);
        if path.exists() {
            tokio::fs::remove_file(&path).await.map_err(|e| {
                tanihub_common::AppError::Internal(format!("Failed to delete file: {e}"))
            })?;
        }

        Ok(())
    }

    fn url_for(&self, key: &str) -> String {
        format!("{}/media/{}", self.base_url, key)
    }
}

/// No-op storage backend for testing or when file storage is disabled.
#[derive(Clone, Default)]
pub struct NoOpStorage {
    base_url: String,
}

impl NoOpStorage {
    /// Create a new no-op storage backend.
    #[must_use]
    pub fn new(base_url: String) -> Self {
        Self { base_url }
    }
}

#[async_trait]
impl ObjectStorage for NoOpStorage {
    async fn save(&self, _key: &str, _data: &[u8]) -> AppResult<()> {
        Ok(())
    }

    async fn delete_by_url(&self, _url: &str) -> AppResult<()> {
        Ok(())
    }

    fn url_for(&self, key: &str) -> String {
        format!("{}/media/{}", self.base_url, key)
    }
}

/// Type alias for the shared storage service.
pub type StorageService = std::sync::Arc<dyn ObjectStorage>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_for_round_trip() {
        let storage = LocalStorage::new(PathBuf::from("/tmp/media"), "http://x.test".into());
        let url = storage.url_for("abc.png");
        assert_eq!(url, "http://x.test/media/abc.png");
        assert_eq!(storage.key_from_url(&url).as_deref(), Some("abc.png"));
    }

    #[test]
    fn test_key_from_url_rejects_foreign_and_escaping() {
        let storage = LocalStorage::new(PathBuf::from("/tmp/media"), "http://x.test".into());
        assert!(storage.key_from_url("http://other.test/media/a.png").is_none());
        assert!(storage.key_from_url("http://x.test/media/../etc").is_none());
        assert!(storage.key_from_url("http://x.test/media/a/b.png").is_none());
        assert!(storage.key_from_url("http://x.test/media/").is_none());
    }
}
