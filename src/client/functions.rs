// 3rd party crates
use reqwest::header::{self, HeaderMap, HeaderValue};
use reqwest::Client;
use tokio::time::Duration;
use tracing::error;

// Current module imports
use super::errors::DocumentClientError;
use super::types::ApiConfig;

/// Creates a reqwest client with the headers the registration API expects.
pub(super) fn create_reqwest_client(config: &ApiConfig) -> Result<Client, DocumentClientError> {
    let mut headers: HeaderMap = HeaderMap::new();
    headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("application/json"),
    );

    let client: Client = Client::builder()
        .default_headers(headers)
        .timeout(Duration::from_secs(config.timeout_secs))
        .build()
        .map_err(|e| {
            error!(url = %config.url, "Failed to build HTTP client: {}", e);
            DocumentClientError::HttpClientBuild(e)
        })?;

    Ok(client)
}
