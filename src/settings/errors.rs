// 3rd party crates
use thiserror::Error;

// Project imports
use crate::client::ApiValidationError;
use crate::utility::rate_limiter::RateLimiterError;

#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Invalid log level: {0}. Must be one of: error, warn, info, debug, trace")]
    InvalidLogLevel(String),
    #[error("Rate limit configuration error: {0}")]
    RateLimit(#[from] RateLimiterError),
    #[error("API configuration error: {0}")]
    Api(#[from] ApiValidationError),
    #[error("Document path must not be empty")]
    MissingDocumentPath,
    #[error("Number of requests must be greater than 0")]
    InvalidRequestCount,
    #[error("Concurrency must be greater than 0")]
    InvalidConcurrency,
}
