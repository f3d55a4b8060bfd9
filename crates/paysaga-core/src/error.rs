use thiserror::Error;

/// Configuration validation failure.
#[derive(Debug, Error, PartialEq, Eq)]
#[non_exhaustive]
pub enum ConfigError {
    #[error("API key is not set")]
    MissingApiKey,

    #[error("API base URL is not a valid HTTP(S) URL: {0}")]
    InvalidApiBase(String),
}

/// Failure of a remote call against the payments API.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ApiError {
    /// The request reached the API but was rejected, or transport failed.
    #[error("request to '{endpoint}' failed: {message}")]
    Request { endpoint: String, message: String },

    /// The referenced resource does not exist.
    #[error("no such {resource}: {id}")]
    NotFound { resource: &'static str, id: String },

    /// The request was malformed before it was sent.
    #[error("invalid request: {0}")]
    InvalidRequest(String),
}

impl ApiError {
    /// Shorthand for a rejected or failed request to a named endpoint.
    #[must_use]
    pub fn request(endpoint: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Request {
            endpoint: endpoint.into(),
            message: message.into(),
        }
    }
}
