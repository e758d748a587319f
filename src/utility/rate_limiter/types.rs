// Standard library
use std::sync::atomic::AtomicUsize;
use std::sync::{Arc, Mutex};

// 3rd party crates
use serde::Deserialize;
use tokio::sync::{broadcast, Semaphore};
use tokio::task::JoinHandle;
use tokio::time::{Duration, Instant};

// Current module imports
use super::constants::{default_max_requests, default_window_millis};

/// Rate limiting configuration for outbound requests
#[derive(Debug, Clone, Deserialize)]
pub struct RateLimitConfig {
    /// Maximum number of requests per time window
    #[serde(default = "default_max_requests")]
    pub max_requests: u32,
    /// Time window in milliseconds
    #[serde(default = "default_window_millis")]
    pub window_millis: u64,
}

/// A rate limiter that restores its full capacity once per window.
#[derive(Debug)]
pub struct FixedWindowRateLimiter {
    pub(super) semaphore: Arc<Semaphore>,
    pub(super) capacity: usize,
    pub(super) window: Duration,
    /// Permits granted and forgotten since the last refill.
    pub(super) spent: Arc<AtomicUsize>,
    /// Serializes replenishment and records when it last happened.
    pub(super) last_refill: Arc<tokio::sync::Mutex<Instant>>,
    pub(super) shutdown_tx: broadcast::Sender<()>,
    pub(super) replenisher: Mutex<Replenisher>,
}

/// Lifecycle of the background replenishment task
#[derive(Debug)]
pub(super) enum Replenisher {
    Idle,
    Running(JoinHandle<()>),
    Stopped,
}
