use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;

use crate::product_actor::ProductError;

/// Every failure a handler can answer with. Nothing escapes the handler
/// boundary; each variant becomes a status and a JSON error body.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The detail is logged, the client only sees the generic message.
    #[error("Error decoding JSON")]
    MalformedBody(String),
    #[error("{0}")]
    Validation(String),
    #[error("Invalid product ID: {0}")]
    InvalidIdentifier(String),
    #[error("Product not found: {0}")]
    NotFound(u64),
    #[error("Error encoding JSON")]
    Encoding(String),
    #[error("Product store unavailable")]
    Unavailable(String),
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::MalformedBody(_)
            | ApiError::Validation(_)
            | ApiError::InvalidIdentifier(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Encoding(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Unavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        match &self {
            ApiError::MalformedBody(detail) => {
                tracing::warn!(detail = %detail, "Rejected request body")
            }
            ApiError::Encoding(detail) | ApiError::Unavailable(detail) => {
                tracing::error!(status = status.as_u16(), detail = %detail, "Request failed")
            }
            other => tracing::warn!(status = status.as_u16(), error = %other, "Request rejected"),
        }

        let body = Json(ErrorBody {
            error: self.to_string(),
        });
        (status, body).into_response()
    }
}

impl From<ProductError> for ApiError {
    fn from(err: ProductError) -> Self {
        match err {
            ProductError::NotFound(id) => ApiError::NotFound(id),
            ProductError::ValidationError(msg) => ApiError::Validation(msg),
            ProductError::ActorCommunicationError(msg) => ApiError::Unavailable(msg),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::MalformedBody(rejection.body_text())
    }
}
