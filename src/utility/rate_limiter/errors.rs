// Standard library
use std::time::Duration;

// 3rd party crates
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RateLimiterError {
    #[error("Capacity must be greater than 0, got {0}")]
    InvalidCapacity(usize),

    #[error("Capacity {capacity} exceeds the maximum of {max} permits")]
    CapacityTooLarge { capacity: usize, max: usize },

    #[error("Window must be greater than 0")]
    InvalidWindow,

    #[error("Rate limiter requires a running tokio runtime")]
    NoRuntime,

    #[error("Gave up waiting for a permit after {waited:?}")]
    Cancelled { waited: Duration },

    #[error("Rate limiter has been stopped")]
    Closed,
}

impl RateLimiterError {
    /// Returns `true` for errors raised while building a limiter.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            Self::InvalidCapacity(_) | Self::CapacityTooLarge { .. } | Self::InvalidWindow
        )
    }
}
