// 3rd party crates
use async_trait::async_trait;

// Project imports
use crate::documents::Document;

// Current module imports
use super::errors::DocumentClientError;
use super::types::SubmitResponse;

/// Anything able to deliver a document to the registration API.
#[async_trait]
pub trait DocumentSubmitter: Send + Sync {
    /// Submit one document, waiting for rate limit capacity first.
    ///
    /// # Errors
    ///
    /// * [`DocumentClientError::Cancelled`] - no permit was granted, none consumed
    /// * [`DocumentClientError::Transport`] - the request failed after the permit was spent
    async fn submit(
        &self,
        document: &Document,
        signature: &str,
    ) -> Result<SubmitResponse, DocumentClientError>;

    /// The URL documents are posted to
    fn endpoint(&self) -> &str;
}
