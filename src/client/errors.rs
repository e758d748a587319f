// 3rd party crates
use reqwest::header::{InvalidHeaderName, InvalidHeaderValue};
use thiserror::Error;

// Project imports
use crate::documents::DocumentError;
use crate::utility::rate_limiter::RateLimiterError;

/// Custom error type for document submissions.
#[derive(Debug, Error)]
pub enum DocumentClientError {
    #[error("Gave up waiting for a rate limit permit: {0}")]
    Cancelled(#[source] RateLimiterError),

    #[error("Request to '{url}' failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error(transparent)]
    Encode(#[from] DocumentError),

    #[error("HTTP client error: {0}")]
    HttpClientBuild(#[source] reqwest::Error),

    #[error("Invalid header value: {0}")]
    InvalidHeaderValue(#[from] InvalidHeaderValue),

    #[error("Invalid header name: {0}")]
    InvalidHeaderName(#[from] InvalidHeaderName),

    #[error("API configuration error: {0}")]
    Validation(#[from] ApiValidationError),
}

impl DocumentClientError {
    /// Whether a permit was consumed before the failure happened.
    pub fn consumed_permit(&self) -> bool {
        matches!(self, Self::Transport { .. } | Self::Encode(_))
    }
}

#[derive(Debug, Error)]
pub enum ApiValidationError {
    #[error("API url is empty")]
    MissingUrl,
    #[error("Invalid API url '{url}': {message}")]
    InvalidUrl { url: String, message: String },
    #[error("Request timeout must be greater than 0")]
    InvalidTimeout,
    #[error("Permit wait timeout must be greater than 0")]
    InvalidAcquireTimeout,
    #[error("Invalid signature header name '{0}'")]
    InvalidSignatureHeader(String),
}
