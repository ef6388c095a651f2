//! Best-effort media cleanup.
//!
//! After an entity row is deleted, the images it owned are removed from
//! object storage. The row deletion is authoritative; a stranded object is a
//! lesser fault than refusing the delete, so every failure here is logged
//! and swallowed.

use crate::services::storage::StorageService;
use futures::future::join_all;
use tracing::warn;

/// Coordinates best-effort deletion of media objects.
#[derive(Clone)]
pub struct MediaCleanup {
    storage: StorageService,
}

impl MediaCleanup {
    /// Create a new cleanup coordinator over a storage backend.
    #[must_use]
    pub fn new(storage: StorageService) -> Self {
        Self { storage }
    }

    /// Attempt to delete every URL in the list.
    ///
    /// All deletions are issued concurrently; each is attempted regardless of
    /// the others' outcomes. Duplicated URLs are submitted as often as they
    /// appear. Returns the number of failed deletions, for logging only --
    /// the caller must not fail the surrounding operation on a non-zero
    /// count.
    pub async fn delete_all(&self, urls: &[String]) -> usize {
        if urls.is_empty() {
            return 0;
        }

        let attempts = urls.iter().map(|url| {
            let storage = self.storage.clone();
            async move { (url, storage.delete_by_url(url).await) }
        });

        let mut failed = 0;
        for (url, result) in join_all(attempts).await {
            if let Err(e) = result {
                failed += 1;
                warn!(url = %url, error = %e, "Failed to delete media object");
            }
        }

        if failed > 0 {
            warn!(failed, total = urls.len(), "Media cleanup finished with failures");
        }

        failed
    }
}


#[cfg(test)]
mod tests {
    use super::testing::{recording, recording_with_failures};

    #[tokio::test]
    async fn test_deletes_every_url_in_order() {
        let (storage, cleanup) = recording();
        let urls = vec![
            "http://test/media/a.png".to_string(),
            "http://test/media/b.png".to_string(),
            "http://test/media/a.png".to_string(), // duplicates are kept
        ];

        let failed = cleanup.delete_all(&urls).await;

        assert_eq!(failed, 0);
        assert_eq!(storage.deletions(), urls);
    }

    #[tokio::test]
    async fn test_failure_does_not_short_circuit() {
        let (storage, cleanup) =
            recording_with_failures(vec!["http://test/media/b.png".to_string()]);
        let urls = vec![
            "http://test/media/a.png".to_string(),
            "http://test/media/b.png".to_string(),
            "http://test/media/c.png".to_string(),
        ];

        let failed = cleanup.delete_all(&urls).await;

        assert_eq!(failed, 1);
        // Every URL was still attempted
        assert_eq!(storage.deletions(), urls);
    }

    #[tokio::test]
    async fn test_empty_list_is_a_no_op() {
        let (storage, cleanup) = recording();
        assert_eq!(cleanup.delete_all(&[]).await, 0);
        assert!(storage.deletions().is_empty());
    }
}
