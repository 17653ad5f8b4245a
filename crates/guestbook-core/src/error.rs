//! Error types.

use crate::models::Schema;
use thiserror::Error;

/// Failure of a backend request.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("invalid backend URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    /// No HTTP response was received.
    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("HTTP error! status: {status}")]
    Status { url: String, status: u16 },

    #[error("failed to decode response from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{operation} is not available with the {schema} schema")]
    Unsupported {
        operation: &'static str,
        schema: Schema,
    },
}

impl ApiError {
    /// True when the backend answered, whatever the status.
    pub fn got_response(&self) -> bool {
        matches!(self, ApiError::Status { .. } | ApiError::Decode { .. })
    }
}

/// Rejected form input. Reported to the user before any request is made.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please enter some content.")]
    MissingContent,
    #[error("Please enter both a name and a message.")]
    MissingAuthorOrContent,
}
