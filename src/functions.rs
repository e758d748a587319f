// Standard library
use std::error::Error;
use std::sync::Arc;

// 3rd party crates
use futures::{stream::FuturesUnordered, StreamExt};
use tokio::sync::broadcast;
use tokio::time::Instant;
use tracing::{debug, error, info, warn};

// Project imports
use crate::client::{DocumentClient, DocumentClientError, DocumentSubmitter};
use crate::documents::Document;
use crate::settings::ConfigManager;
use crate::utility::rate_limiter::{FixedWindowRateLimiter, RateLimiter, RateLimiterError};

/// Outcome counts of a batch submission
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchReport {
    /// 2xx responses
    pub succeeded: usize,
    /// Responses with any other status
    pub rejected: usize,
    /// Requests that failed after a permit was spent
    pub failed: usize,
    /// Submissions that never got a permit
    pub cancelled: usize,
    /// Submissions never started because the batch was halted
    pub skipped: usize,
}

impl BatchReport {
    pub fn total(&self) -> usize {
        self.succeeded + self.rejected + self.failed + self.cancelled + self.skipped
    }
}

/// Submits the configured document `driver.requests` times through a shared limiter.
///
/// This function:
/// - Loads and decodes the document from `driver.document_path`
/// - Builds the rate limiter and the client from the settings
/// - Keeps at most `driver.concurrency` submissions in flight
/// - Logs every outcome and carries on with the rest of the batch
/// - Stops the limiter on shutdown so waiting submissions give up promptly
pub async fn run(
    config: Arc<ConfigManager>,
    mut shutdown_rx: broadcast::Receiver<()>,
) -> Result<BatchReport, Box<dyn Error>> {
    let settings = config.get_settings().await;

    let document = Document::from_file(&settings.driver.document_path)?;
    let rate_limiter = Arc::new(FixedWindowRateLimiter::new(settings.rate_limit.clone())?);
    let client = DocumentClient::new(
        settings.api.clone(),
        Arc::clone(&rate_limiter) as Arc<dyn RateLimiter>,
    )?;

    let signature = settings.driver.signature.clone();
    let requests = settings.driver.requests;
    let concurrency = settings.driver.concurrency;

    // Drop the settings lock
    drop(settings);

    info!(
        requests,
        concurrency,
        url = client.endpoint(),
        "Submitting documents"
    );

    rate_limiter.start()?;
    let started = Instant::now();

    let batch = submit_batch(&client, &document, &signature, requests, concurrency);
    tokio::pin!(batch);

    let report = tokio::select! {
        report = &mut batch => report,

        Ok(_) = shutdown_rx.recv() => {
            info!("Received shutdown signal, cancelling pending submissions...");
            rate_limiter.stop().await;
            batch.await
        }
    };

    rate_limiter.stop().await;

    info!(
        succeeded = report.succeeded,
        rejected = report.rejected,
        failed = report.failed,
        cancelled = report.cancelled,
        skipped = report.skipped,
        "Submitting {} documents took {} ms",
        requests,
        started.elapsed().as_millis()
    );

    Ok(report)
}

/// Submits `document` `requests` times with up to `concurrency` submissions in flight.
///
/// Failures are reported and the batch continues. Once the limiter is closed no
/// further submissions are started.
pub async fn submit_batch<S>(
    submitter: &S,
    document: &Document,
    signature: &str,
    requests: u32,
    concurrency: usize,
) -> BatchReport
where
    S: DocumentSubmitter + ?Sized,
{
    let mut report = BatchReport::default();
    let mut in_flight = FuturesUnordered::new();
    let mut issued: u32 = 0;
    let mut halted = false;

    loop {
        while !halted && issued < requests && in_flight.len() < concurrency.max(1) {
            let index = issued;
            issued += 1;
            in_flight.push(async move { (index, submitter.submit(document, signature).await) });
        }

        let Some((index, result)) = in_flight.next().await else {
            break;
        };

        match result {
            Ok(response) if response.is_success() => {
                report.succeeded += 1;
                info!(
                    request = index,
                    status = %response.status,
                    "Response body: {}",
                    response.body
                );
            }
            Ok(response) => {
                report.rejected += 1;
                warn!(
                    request = index,
                    status = %response.status,
                    "Document rejected: {}",
                    response.body
                );
            }
            Err(DocumentClientError::Cancelled(e)) => {
                report.cancelled += 1;
                warn!(request = index, "Submission cancelled: {}", e);
                if e == RateLimiterError::Closed && !halted {
                    debug!("Rate limiter closed, not starting further submissions");
                    halted = true;
                }
            }
            Err(e) => {
                report.failed += 1;
                error!(request = index, "Submission failed: {}", e);
            }
        }
    }

    report.skipped = (requests - issued) as usize;
    report
}
