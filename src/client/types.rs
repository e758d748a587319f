// Standard library
use std::fmt;
use std::sync::Arc;

// 3rd party crates
use reqwest::header::HeaderName;
use reqwest::{Client, StatusCode, Url};
use serde::Deserialize;
use tokio::time::Duration;

// Project imports
use crate::utility::rate_limiter::RateLimiter;

// Current module imports
use super::constants::{default_api_url, default_request_timeout_secs};

/// Configuration for the registration API.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_api_url")]
    pub url: String,
    /// Whole-request timeout in seconds
    #[serde(default = "default_request_timeout_secs")]
    pub timeout_secs: u64,
    /// Header carrying the document signature. The signature is not sent when unset.
    #[serde(default)]
    pub signature_header: Option<String>,
    /// Upper bound on the wait for a rate limit permit, in milliseconds
    #[serde(default)]
    pub acquire_timeout_ms: Option<u64>,
}

/// Client submitting documents through a shared rate limiter.
pub struct DocumentClient {
    pub config: ApiConfig,
    pub client: Client,
    pub(super) url: Url,
    pub(super) signature_header: Option<HeaderName>,
    pub(super) acquire_timeout: Option<Duration>,
    pub(super) rate_limiter: Arc<dyn RateLimiter>,
}

/// Status and body returned by the API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitResponse {
    pub status: StatusCode,
    pub body: String,
}

/// Progress of a single submission
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionState {
    PendingPermit,
    PermitGranted,
    Sending,
    Completed,
    Failed,
    Cancelled,
}

impl fmt::Display for SubmissionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::PendingPermit => "pending_permit",
            Self::PermitGranted => "permit_granted",
            Self::Sending => "sending",
            Self::Completed => "completed",
            Self::Failed => "failed",
            Self::Cancelled => "cancelled",
        };
        f.write_str(name)
    }
}
