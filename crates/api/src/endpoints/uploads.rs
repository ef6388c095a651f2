//! Image upload endpoints.

use axum::{
    Router,
    extract::{Multipart, State},
    routing::post,
};
use serde::Serialize;
use tanihub_common::AppResult;
use tanihub_core::services::upload::{UploadImageInput, UploadedImage};

use crate::{extractors::AuthAccount, middleware::AppState, response::ApiResponse};

/// Uploaded image response.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadResponse {
    pub url: String,
    pub size: usize,
}

impl From<UploadedImage> for UploadResponse {
    fn from(i: UploadedImage) -> Self {
        Self {
            url: i.url,
            size: i.size,
        }
    }
}

/// Upload an image via multipart form.
async fn upload(
    AuthAccount(_account): AuthAccount,
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> AppResult<ApiResponse<UploadResponse>> {
    let mut file_data: Option<Vec<u8>> = None;
    let mut file_name: Option<String> = None;
    let mut content_type: Option<String> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| tanihub_common::AppError::BadRequest(e.to_string()))?
    {
        let name = field.name().unwrap_or("").to_string();

        match name.as_str() {
            "file" => {
                file_name = field.file_name().map(std::string::ToString::to_string);
                content_type = field.content_type().map(std::string::ToString::to_string);
                file_data = Some(
                    field
                        .bytes()
                        .await
                        .map_err(|e| tanihub_common::AppError::BadRequest(e.to_string()))?
                        .to_vec(),
                );
            }
            "name" => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| tanihub_common::AppError::BadRequest(e.to_string()))?;
                if !text.is_empty() {
                    file_name = Some(text);
                }
            }
            _ => {}
        }
    }

    let data = file_data
        .ok_or_else(|| tanihub_common::AppError::BadRequest("No file provided".to_string()))?;

    let input = UploadImageInput {
        file_name: file_name.unwrap_or_else(|| "unnamed".to_string()),
        content_type: content_type
            .unwrap_or_else(|| "application/octet-stream".to_string()),
        data,
    };

    let image = state.upload_service.upload(input).await?;

    Ok(ApiResponse::ok(image.into()))
}

pub fn router() -> Router<AppState> {
    Router::new().route("/create", post(upload))
}
