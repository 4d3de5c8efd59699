//! HTTP error mapping

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use shelf_core::ShelfError;

/// Error returned by handlers, rendered as `{"detail": .., "code": ..}`
#[derive(Debug)]
pub struct ApiError(pub ShelfError);

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match &self.0 {
            ShelfError::NotFound { .. } => StatusCode::NOT_FOUND,
            ShelfError::EmailTaken(_) | ShelfError::Validation(_) => StatusCode::BAD_REQUEST,
            ShelfError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<ShelfError> for ApiError {
    fn from(e: ShelfError) -> Self {
        ApiError(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!("Request failed: {}", self.0);
        }
        let body = Json(json!({
            "detail": self.0.to_string(),
            "code": self.0.code(),
        }));
        (status, body).into_response()
    }
}

pub type ApiResult<T> = std::result::Result<T, ApiError>;
