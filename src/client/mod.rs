//! Rate-limited submission of documents to the registration API.
//!
//! Every submission waits for a permit from the shared [`RateLimiter`], encodes
//! the document as JSON and sends a single `POST`. The permit is spent as soon as
//! it is granted, whether or not the request then succeeds. Nothing is retried.
//!
//! A non-2xx reply is not an error: it comes back as a [`SubmitResponse`] for the
//! caller to inspect.
//!
//! [`RateLimiter`]: crate::utility::rate_limiter::RateLimiter

pub mod constants;
pub mod errors;
pub mod functions;
pub mod impls;
pub mod traits;
pub mod types;

pub use errors::{ApiValidationError, DocumentClientError};
pub use traits::DocumentSubmitter;
pub use types::{ApiConfig, DocumentClient, SubmissionState, SubmitResponse};
