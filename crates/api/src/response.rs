//! API response types.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;

/// Standard success envelope.
///
/// Error responses are produced by `AppError`'s `IntoResponse` impl and carry
/// an `error` object instead of `data`.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub data: T,
}

impl<T: Serialize> ApiResponse<T> {
    /// Create a success response.
    pub const fn ok(data: T) -> Self {
        Self { data }
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        (StatusCode::OK, Json(self)).into_response()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_success_envelope_wraps_data() {
        let response = ApiResponse::ok(vec!["a", "b"]);
        let body = serde_json::to_value(&response).unwrap();
        assert_eq!(body, serde_json::json!({ "data": ["a", "b"] }));
    }
}
