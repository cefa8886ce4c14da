//! Error types for the HTTP adapters

use nutrichat_application::GatewayError;
use thiserror::Error;

/// Result type alias for API operations
pub type Result<T> = std::result::Result<T, ApiError>;

/// Errors that can occur when talking to the nutrition service
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("Unexpected status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Failed to parse response: {error}\nRaw response: {raw}")]
    ParseError { error: String, raw: String },

    #[error("Missing field in response: {0}")]
    MissingField(&'static str),

    #[error("Service reported failure: {0}")]
    Service(String),

    #[error("No async runtime available to drive the stream")]
    NoRuntime,
}

impl From<ApiError> for GatewayError {
    fn from(e: ApiError) -> Self {
        match e {
            ApiError::Http(ref err) if err.is_timeout() => GatewayError::Timeout,
            ApiError::Http(ref err) if err.is_connect() => {
                GatewayError::ConnectionError(e.to_string())
            }
            ApiError::Http(_) | ApiError::Status { .. } => {
                GatewayError::RequestFailed(e.to_string())
            }
            ApiError::InvalidUrl { .. } | ApiError::NoRuntime => {
                GatewayError::ConnectionError(e.to_string())
            }
            ApiError::Serialization(_) | ApiError::ParseError { .. } | ApiError::MissingField(_) => {
                GatewayError::InvalidResponse(e.to_string())
            }
            ApiError::Service(message) => GatewayError::ServiceError(message),
        }
    }
}
