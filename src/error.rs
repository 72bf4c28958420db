use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::Serialize;

use crate::completion::CompletionError;
use crate::prompt::UnsupportedLanguage;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("No issue type found")]
    MissingIssueType,
    #[error("Invalid request payload: {0}")]
    InvalidPayload(String),
    #[error(transparent)]
    UnsupportedLanguage(#[from] UnsupportedLanguage),
    #[error("Diagnosis service unavailable")]
    Upstream(#[from] CompletionError),
}

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::MissingIssueType
            | ApiError::InvalidPayload(_)
            | ApiError::UnsupportedLanguage(_) => StatusCode::BAD_REQUEST,
            ApiError::Upstream(_) => StatusCode::BAD_GATEWAY,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        // Upstream detail stays in the logs.
        if let ApiError::Upstream(ref e) = self {
            tracing::error!(error = %e, "completion service call failed");
        }

        let body = ErrorResponse {
            error: self.to_string(),
        };
        (self.status(), Json(body)).into_response()
    }
}
