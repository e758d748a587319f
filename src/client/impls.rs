// Standard library
use std::sync::Arc;

// 3rd party crates
use async_trait::async_trait;
use reqwest::header::{HeaderName, HeaderValue};
use reqwest::Url;
use tokio::time::Duration;
use tracing::{debug, error, info, warn};

// Project imports
use crate::documents::Document;
use crate::utility::rate_limiter::{RateLimiter, RateLimiterError};

// Current module imports
use super::errors::{ApiValidationError, DocumentClientError};
use super::functions::create_reqwest_client;
use super::traits::DocumentSubmitter;
use super::types::{ApiConfig, DocumentClient, SubmissionState, SubmitResponse};

impl ApiConfig {
    pub fn validate(&self) -> Result<(), ApiValidationError> {
        if self.url.trim().is_empty() {
            return Err(ApiValidationError::MissingUrl);
        }

        self.parse_url()?;

        if self.timeout_secs == 0 {
            return Err(ApiValidationError::InvalidTimeout);
        }

        if self.acquire_timeout_ms == Some(0) {
            return Err(ApiValidationError::InvalidAcquireTimeout);
        }

        if let Some(name) = &self.signature_header {
            HeaderName::from_bytes(name.as_bytes())
                .map_err(|_| ApiValidationError::InvalidSignatureHeader(name.clone()))?;
        }

        Ok(())
    }

    fn parse_url(&self) -> Result<Url, ApiValidationError> {
        let url = Url::parse(self.url.trim()).map_err(|e| ApiValidationError::InvalidUrl {
            url: self.url.clone(),
            message: e.to_string(),
        })?;

        match url.scheme() {
            "http" | "https" => Ok(url),
            scheme => Err(ApiValidationError::InvalidUrl {
                url: self.url.clone(),
                message: format!("unsupported scheme '{}'", scheme),
            }),
        }
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            url: super::constants::default_api_url(),
            timeout_secs: super::constants::default_request_timeout_secs(),
            signature_header: None,
            acquire_timeout_ms: None,
        }
    }
}

impl DocumentClient {
    pub fn new(
        config: ApiConfig,
        rate_limiter: Arc<dyn RateLimiter>,
    ) -> Result<Self, DocumentClientError> {
        config.validate()?;

        let url = config.parse_url()?;
        let signature_header = config
            .signature_header
            .as_deref()
            .map(|name| HeaderName::from_bytes(name.as_bytes()))
            .transpose()?;
        let acquire_timeout = config.acquire_timeout_ms.map(Duration::from_millis);
        let client = create_reqwest_client(&config)?;

        if signature_header.is_none() {
            debug!("No signature header configured, signatures will not be transmitted");
        }

        Ok(Self {
            config,
            client,
            url,
            signature_header,
            acquire_timeout,
            rate_limiter,
        })
    }

    async fn acquire_permit(&self) -> Result<(), RateLimiterError> {
        match self.acquire_timeout {
            Some(timeout) => tokio::time::timeout(timeout, self.rate_limiter.acquire())
                .await
                .unwrap_or(Err(RateLimiterError::Cancelled { waited: timeout })),
            None => self.rate_limiter.acquire().await,
        }
    }

    fn signature_value(&self, signature: &str) -> Result<Option<HeaderValue>, DocumentClientError> {
        if self.signature_header.is_none() {
            return Ok(None);
        }

        let mut value = HeaderValue::from_str(signature)?;
        value.set_sensitive(true);
        Ok(Some(value))
    }
}

#[async_trait]
impl DocumentSubmitter for DocumentClient {
    async fn submit(
        &self,
        document: &Document,
        signature: &str,
    ) -> Result<SubmitResponse, DocumentClientError> {
        let doc_id = document.doc_id.as_deref().unwrap_or("<none>");

        // Checked up front so a bad signature never costs a permit.
        let signature = self.signature_value(signature)?;

        debug!(
            doc_id,
            state = %SubmissionState::PendingPermit,
            available = self.rate_limiter.available_permits(),
            "Waiting for rate limit permit"
        );
        if let Err(e) = self.acquire_permit().await {
            warn!(doc_id, state = %SubmissionState::Cancelled, "No permit granted: {}", e);
            return Err(DocumentClientError::Cancelled(e));
        }
        debug!(doc_id, state = %SubmissionState::PermitGranted, "Permit granted");

        let body = document.to_json().map_err(|e| {
            error!(doc_id, state = %SubmissionState::Failed, "Failed to encode document: {}", e);
            e
        })?;

        let mut request = self.client.post(self.url.clone()).body(body);
        if let (Some(name), Some(value)) = (&self.signature_header, signature) {
            request = request.header(name.clone(), value);
        }

        debug!(doc_id, state = %SubmissionState::Sending, url = %self.url, "Sending document");
        let response = request.send().await.map_err(|source| {
            error!(
                doc_id,
                state = %SubmissionState::Failed,
                "Failed to send document: {}",
                source
            );
            DocumentClientError::Transport {
                url: self.url.to_string(),
                source,
            }
        })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|source| DocumentClientError::Transport {
                url: self.url.to_string(),
                source,
            })?;

        info!(
            doc_id,
            state = %SubmissionState::Completed,
            status = %status,
            "Document submitted"
        );
        Ok(SubmitResponse { status, body })
    }

    fn endpoint(&self) -> &str {
        self.url.as_str()
    }
}

impl SubmitResponse {
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utility::rate_limiter::FixedWindowRateLimiter;

    fn limiter() -> Arc<dyn RateLimiter> {
        Arc::new(FixedWindowRateLimiter::with_window(Duration::from_secs(1), 1).unwrap())
    }

    #[test]
    fn default_config_targets_registration_api() {
        let config = ApiConfig::default();
        assert!(config.validate().is_ok());
        assert!(config.url.ends_with("/api/v3/lk/documents/create"));
        assert!(config.signature_header.is_none());
    }

    #[test]
    fn rejects_bad_configuration() {
        let config = ApiConfig {
            url: "   ".into(),
            ..ApiConfig::default()
        };
        assert!(matches!(config.validate(), Err(ApiValidationError::MissingUrl)));

        let config = ApiConfig {
            url: "ftp://example.com/upload".into(),
            ..ApiConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ApiValidationError::InvalidUrl { .. })
        ));

        let config = ApiConfig {
            timeout_secs: 0,
            ..ApiConfig::default()
        };
        assert!(matches!(config.validate(), Err(ApiValidationError::InvalidTimeout)));

        let config = ApiConfig {
            signature_header: Some("bad header".into()),
            ..ApiConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ApiValidationError::InvalidSignatureHeader(_))
        ));
    }

    #[tokio::test]
    async fn invalid_signature_costs_no_permit() {
        let limiter = limiter();
        let client = DocumentClient::new(
            ApiConfig {
                url: "http://127.0.0.1:9/create".into(),
                signature_header: Some("X-Signature".into()),
                ..ApiConfig::default()
            },
            Arc::clone(&limiter),
        )
        .unwrap();

        let err = client
            .submit(&Document::default(), "line\nbreak")
            .await
            .unwrap_err();
        assert!(matches!(err, DocumentClientError::InvalidHeaderValue(_)));
        assert!(!err.consumed_permit());
        assert_eq!(limiter.available_permits(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn permit_wait_times_out() {
        let limiter = limiter();
        limiter.acquire().await.unwrap();

        let client = DocumentClient::new(
            ApiConfig {
                url: "http://127.0.0.1:9/create".into(),
                acquire_timeout_ms: Some(20),
                ..ApiConfig::default()
            },
            limiter,
        )
        .unwrap();

        let err = client.submit(&Document::default(), "sig").await.unwrap_err();
        assert!(matches!(
            err,
            DocumentClientError::Cancelled(RateLimiterError::Cancelled { .. })
        ));
        assert!(!err.consumed_permit());

        let source = std::error::Error::source(&err)
            .and_then(|e| e.downcast_ref::<RateLimiterError>())
            .cloned();
        assert_eq!(
            source,
            Some(RateLimiterError::Cancelled {
                waited: Duration::from_millis(20)
            })
        );
    }

    #[test]
    fn submission_states_render_as_snake_case() {
        assert_eq!(SubmissionState::PendingPermit.to_string(), "pending_permit");
        assert_eq!(SubmissionState::Completed.to_string(), "completed");
    }
}
