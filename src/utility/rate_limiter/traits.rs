// 3rd party crates
use async_trait::async_trait;

// Current module imports
use super::errors::RateLimiterError;

/// Rate limiter trait for implementing different rate limiting strategies
#[async_trait]
pub trait RateLimiter: Send + Sync {
    /// Wait until a permit is available and consume it.
    ///
    /// Dropping the returned future before it resolves never consumes a permit.
    async fn acquire(&self) -> Result<(), RateLimiterError>;

    /// Restore the pool to full capacity, returning how many permits were added.
    async fn replenish(&self) -> usize;

    /// Permits that can be granted right now without waiting
    fn available_permits(&self) -> usize;

    /// Maximum permits per window
    fn capacity(&self) -> usize;
}
