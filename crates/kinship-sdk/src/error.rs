//! Error types for the Kinship SDK.

use thiserror::Error;

/// SDK operation errors
#[derive(Debug, Error)]
pub enum SdkError {
    /// Gateway unreachable or timed out
    #[error("Connection error: {0}")]
    Connection(String),

    /// Non-success HTTP response; `message` is what the gateway said
    #[error("{message}")]
    Api {
        /// HTTP status code
        status: u16,
        /// Error message from the response payload
        message: String,
    },

    /// Requested person does not exist
    #[error("Person not found: {0}")]
    NotFound(String),

    /// Success response whose body could not be parsed
    #[error("Invalid response: {0}")]
    Decode(String),

    /// Base URL that cannot be used
    #[error("Invalid endpoint: {0}")]
    InvalidEndpoint(String),

    /// Static data document could not be loaded
    #[error("Asset error: {0}")]
    Asset(String),

    /// Local file error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl SdkError {
    /// True for the "unavailable" class of failures
    pub fn is_connection(&self) -> bool {
        matches!(self, SdkError::Connection(_))
    }

    /// HTTP status behind the error, if any
    pub fn status(&self) -> Option<u16> {
        match self {
            SdkError::Api { status, .. } => Some(*status),
            SdkError::NotFound(_) => Some(404),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for SdkError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_connect() || e.is_timeout() || e.is_request() {
            SdkError::Connection(e.to_string())
        } else if e.is_decode() || e.is_body() {
            SdkError::Decode(e.to_string())
        } else if let Some(status) = e.status() {
            SdkError::Api {
                status: status.as_u16(),
                message: format!("HTTP {}", status.as_u16()),
            }
        } else if e.is_builder() {
            SdkError::InvalidEndpoint(e.to_string())
        } else {
            SdkError::Connection(e.to_string())
        }
    }
}

impl From<serde_json::Error> for SdkError {
    fn from(e: serde_json::Error) -> Self {
        SdkError::Decode(format!("JSON parsing error: {}", e))
    }
}
