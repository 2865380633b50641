//! Chat Error Types

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use platform::webhook::WebhookError;
use thiserror::Error;

/// Chat-specific result type alias
pub type ChatResult<T> = Result<T, ChatError>;

/// Chat-specific error variants
///
/// Client errors map to plain-text responses; webhook failures are only
/// ever logged by the caller.
#[derive(Debug, Error)]
pub enum ChatError {
    /// Request body is not a usable JSON object
    #[error("Invalid JSON")]
    InvalidJson(#[source] serde_json::Error),

    /// Unknown route
    #[error("Not Found")]
    NotFound,

    /// Webhook delivery failed
    #[error("Webhook delivery failed: {0}")]
    Webhook(#[from] WebhookError),
}

impl ChatError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            ChatError::InvalidJson(_) => StatusCode::BAD_REQUEST,
            ChatError::NotFound => StatusCode::NOT_FOUND,
            // Never reaches a client: mirror failures stop at `mirror()`
            ChatError::Webhook(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Log the error with appropriate level
    pub fn log(&self) {
        match self {
            ChatError::InvalidJson(e) => {
                tracing::debug!(error = %e, "Rejected malformed post body");
            }
            ChatError::NotFound => {
                tracing::debug!("Unknown route");
            }
            ChatError::Webhook(e) => {
                tracing::warn!(error = %e, "Webhook delivery failed");
            }
        }
    }
}

impl IntoResponse for ChatError {
    fn into_response(self) -> Response {
        self.log();
        (self.status_code(), self.to_string()).into_response()
    }
}
