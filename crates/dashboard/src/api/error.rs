//! Error types for the user API client.

use thiserror::Error;

use domain::DomainError;

/// Errors that can occur when talking to the user store.
#[derive(Error, Debug)]
pub enum ClientError {
    /// The request did not complete
    #[error("Request failed: {0}")]
    Network(#[source] reqwest::Error),

    /// Server answered with a non-2xx status; the body may not be JSON
    #[error("Server error ({status}): {body}")]
    Http { status: u16, body: String },

    /// Server answered 404
    #[error("Not found: {body}")]
    NotFound { body: String },

    /// A required field is missing, caught before any request is sent
    #[error("Validation failed: {0}")]
    Validation(String),

    /// Response body is not the expected JSON
    #[error("Failed to parse response: {0}")]
    Decode(String),

    /// Base URL is unusable
    #[error("Invalid API URL: {0}")]
    InvalidUrl(String),
}

impl ClientError {
    /// Check if the server reported the record as missing
    pub fn is_not_found(&self) -> bool {
        matches!(self, ClientError::NotFound { .. })
    }

    /// HTTP status if the server answered
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Http { status, .. } => Some(*status),
            ClientError::NotFound { .. } => Some(404),
            _ => None,
        }
    }
}

impl From<DomainError> for ClientError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::Validation(msg) => ClientError::Validation(msg),
            DomainError::NotFound(entity) => ClientError::NotFound {
                body: format!("{} not found", entity),
            },
            DomainError::Internal(msg) => ClientError::Decode(msg),
        }
    }
}

/// Result type for client operations.
pub type ClientResult<T> = Result<T, ClientError>;
