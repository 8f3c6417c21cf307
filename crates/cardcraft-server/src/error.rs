//! API error type and its JSON response mapping.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use cardcraft_core::StorageError;
use cardcraft_render::RenderError;
use serde::Serialize;
use thiserror::Error;

use crate::validation::ValidationError;

#[derive(Debug, Error)]
pub enum ApiError {
    /// Request body failed to parse or validate.
    #[error("{message}")]
    Invalid {
        message: &'static str,
        errors: Vec<String>,
    },
    #[error("{0}")]
    BadRequest(String),
    #[error("{0}")]
    NotFound(&'static str),
    #[error("{0}")]
    PayloadTooLarge(String),
    #[error(transparent)]
    Storage(StorageError),
    #[error(transparent)]
    Render(#[from] RenderError),
}

impl ApiError {
    pub fn invalid(message: &'static str, errors: Vec<ValidationError>) -> Self {
        ApiError::Invalid {
            message,
            errors: errors.iter().map(ToString::to_string).collect(),
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Invalid { .. } | ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            ApiError::Storage(_) | ApiError::Render(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<StorageError> for ApiError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::CardNotFound(_) => ApiError::NotFound("Card not found"),
            StorageError::FeedbackNotFound(_) => ApiError::NotFound("Feedback not found"),
            other => ApiError::Storage(other),
        }
    }
}

#[derive(Serialize)]
struct ErrorBody {
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    errors: Option<Vec<String>>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match self {
            ApiError::Invalid { message, errors } => ErrorBody {
                message: message.to_string(),
                errors: Some(errors),
            },
            ApiError::Storage(_) | ApiError::Render(_) => {
                tracing::error!("request failed: {self}");
                ErrorBody {
                    message: "Internal server error".to_string(),
                    errors: None,
                }
            }
            other => ErrorBody {
                message: other.to_string(),
                errors: None,
            },
        };
        (status, Json(body)).into_response()
    }
}
