//! Image upload service.

use crate::services::storage::StorageService;
use tanihub_common::{AppError, AppResult, IdGenerator};

/// Upload service for storing user-submitted images.
#[derive(Clone)]
pub struct UploadService {
    storage: StorageService,
    max_bytes: usize,
    id_gen: IdGenerator,
}

/// An image to be stored.
#[derive(Debug)]
pub struct UploadImageInput {
    pub file_name: String,
    pub content_type: String,
    pub data: Vec<u8>,
}

/// A stored image.
#[derive(Debug, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadedImage {
    pub url: String,
    pub size: usize,
}

impl UploadService {
    /// Create a new upload service.
    #[must_use]
    pub fn new(storage: StorageService, max_bytes: usize) -> Self {
        Self {
            storage,
            max_bytes,
            id_gen: IdGenerator::new(),
        }
    }

    /// Validate and store an image, returning its public URL.
    pub async fn upload(&self, input: UploadImageInput) -> AppResult<UploadedImage> {
        if !input.content_type.starts_with("image/") {
            return Err(AppError::BadRequest(format!(
                "Unsupported content type: {}",
                input.content_type
            )));
        }
        if input.data.is_empty() {
            return Err(AppError::BadRequest("Empty file".to_string()));
        }
        if input.data.len() > self.max_bytes {
            return Err(AppError::BadRequest(format!(
                "File too large: {} bytes (max {})",
                input.data.len(),
                self.max_bytes
            )));
        }

        let key = format!(
            "{}.{}",
            self.id_gen.generate(),
            extension_for(&input.content_type, &input.file_name)
        );
        self.storage.save(&key, &input.data).await?;

        Ok(UploadedImage {
            url: self.storage.url_for(&key),
            size: input.data.len(),
        })
    }
}

/// Pick a file extension from the content type, falling back to the
/// original file name.
fn extension_for(content_type: &str, file_name: &str) -> String {
    match content_type {
        "image/png" => "png".to_string(),
        "image/jpeg" => "jpg".to_string(),
        "image/gif" => "gif".to_string(),
        "image/webp" => "webp".to_string(),
        _ => file_name
            .rsplit_once('.')
            .map_or_else(|| "bin".to_string(), |(_, ext)| ext.to_ascii_lowercase()),
    }
}
