use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;
use tracing::error;

/// Longest `detail` / `raw` excerpt echoed back to the caller, in characters
pub const EXCERPT_LIMIT: usize = 500;

/// Custom error type for the application
#[derive(Debug)]
pub enum AppError {
    /// `destination` or `nights` absent or falsy
    MissingTripFields,
    /// Body present but not a JSON trip object
    InvalidBody(String),
    /// Outbound credential not configured; carries the variable name
    MissingCredential(&'static str),
    /// External service answered with a non-success status
    Upstream { detail: String },
    /// External service answered, but its text was not JSON
    InvalidModelJson { raw: String },
    InternalServerError(String),
}

/// Errors from the outbound text-generation call
#[derive(Debug, Error)]
pub enum UpstreamError {
    #[error("upstream returned {status}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("request to upstream failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("could not decode upstream response: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Error response structure
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub raw: Option<String>,
}

impl ErrorResponse {
    fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            detail: None,
            raw: None,
        }
    }
}

/// First [`EXCERPT_LIMIT`] characters of `text`
pub fn excerpt(text: &str) -> String {
    text.chars().take(EXCERPT_LIMIT).collect()
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            AppError::MissingTripFields => (
                StatusCode::BAD_REQUEST,
                ErrorResponse::new("Missing destination or nights"),
            ),
            AppError::InvalidBody(reason) => {
                tracing::debug!("Rejected request body: {}", reason);
                (
                    StatusCode::BAD_REQUEST,
                    ErrorResponse::new("Invalid JSON body"),
                )
            }
            AppError::MissingCredential(name) => {
                error!("{} is not configured", name);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse::new(format!("Server missing {}", name)),
                )
            }
            AppError::Upstream { detail } => {
                error!("Upstream returned an error: {}", excerpt(&detail));
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse {
                        detail: Some(excerpt(&detail)),
                        ..ErrorResponse::new("OpenAI error")
                    },
                )
            }
            AppError::InvalidModelJson { raw } => {
                error!("Model reply was not valid JSON");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse {
                        raw: Some(excerpt(&raw)),
                        ..ErrorResponse::new("AI did not return valid JSON")
                    },
                )
            }
            AppError::InternalServerError(msg) => {
                error!("Internal server error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse {
                        detail: Some(msg),
                        ..ErrorResponse::new("Server error")
                    },
                )
            }
        };

        (status, Json(body)).into_response()
    }
}

impl From<UpstreamError> for AppError {
    fn from(err: UpstreamError) -> Self {
        match err {
            UpstreamError::Status { body, .. } => AppError::Upstream { detail: body },
            other => AppError::InternalServerError(other.to_string()),
        }
    }
}

/// Result type for application handlers
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_excerpt_counts_characters() {
        let long = "é".repeat(600);
        let cut = excerpt(&long);
        assert_eq!(cut.chars().count(), 500);

        assert_eq!(excerpt("short"), "short");
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(
            AppError::MissingTripFields.into_response().status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::MissingCredential("OPENAI_API_KEY")
                .into_response()
                .status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            AppError::InvalidModelJson { raw: "nope".into() }
                .into_response()
                .status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_upstream_status_maps_to_openai_error() {
        let err: AppError = UpstreamError::Status {
            status: reqwest::StatusCode::TOO_MANY_REQUESTS,
            body: "rate limited".into(),
        }
        .into();
        assert!(matches!(err, AppError::Upstream { ref detail } if detail == "rate limited"));
    }

    #[test]
    fn test_error_body_omits_empty_fields() {
        let body = serde_json::to_value(ErrorResponse::new("Missing destination or nights"))
            .unwrap();
        assert_eq!(
            body,
            serde_json::json!({ "error": "Missing destination or nights" })
        );
    }
}
