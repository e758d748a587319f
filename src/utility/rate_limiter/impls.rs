// Standard library
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

// 3rd party crates
use async_trait::async_trait;
use tokio::sync::{broadcast, Semaphore};
use tokio::time::{interval_at, Duration, Instant, MissedTickBehavior};
use tracing::{debug, info, trace, warn};

// Current module imports
use super::errors::RateLimiterError;
use super::traits::RateLimiter;
use super::types::{FixedWindowRateLimiter, RateLimitConfig, Replenisher};

impl RateLimitConfig {
    pub fn window(&self) -> Duration {
        Duration::from_millis(self.window_millis)
    }

    pub fn validate(&self) -> Result<(), RateLimiterError> {
        validate_limits(self.max_requests as usize, self.window())
    }
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            max_requests: super::constants::DEFAULT_MAX_REQUESTS,
            window_millis: super::constants::DEFAULT_WINDOW_MILLIS,
        }
    }
}

fn validate_limits(capacity: usize, window: Duration) -> Result<(), RateLimiterError> {
    if capacity == 0 {
        return Err(RateLimiterError::InvalidCapacity(capacity));
    }

    if capacity > Semaphore::MAX_PERMITS {
        return Err(RateLimiterError::CapacityTooLarge {
            capacity,
            max: Semaphore::MAX_PERMITS,
        });
    }

    if window.is_zero() {
        return Err(RateLimiterError::InvalidWindow);
    }

    Ok(())
}

impl FixedWindowRateLimiter {
    /// Create a new fixed-window rate limiter from configuration.
    ///
    /// No background work is scheduled until [`start`](Self::start) is called.
    pub fn new(config: RateLimitConfig) -> Result<Self, RateLimiterError> {
        Self::with_window(config.window(), config.max_requests as usize)
    }

    /// Create a limiter issuing at most `capacity` permits per `window`.
    pub fn with_window(window: Duration, capacity: usize) -> Result<Self, RateLimiterError> {
        validate_limits(capacity, window)?;

        let (shutdown_tx, _) = broadcast::channel(1);

        debug!(
            capacity,
            window_ms = window.as_millis() as u64,
            "Created fixed-window rate limiter"
        );

        Ok(Self {
            semaphore: Arc::new(Semaphore::new(capacity)),
            capacity,
            window,
            spent: Arc::new(AtomicUsize::new(0)),
            last_refill: Arc::new(tokio::sync::Mutex::new(Instant::now())),
            shutdown_tx,
            replenisher: Mutex::new(Replenisher::Idle),
        })
    }

    pub fn window(&self) -> Duration {
        self.window
    }

    /// Start the replenishment task on the current tokio runtime.
    ///
    /// The first tick fires one window after this call, then every window after
    /// that. Starting twice, or after [`stop`](Self::stop), does nothing.
    pub fn start(&self) -> Result<(), RateLimiterError> {
        let runtime =
            tokio::runtime::Handle::try_current().map_err(|_| RateLimiterError::NoRuntime)?;

        let mut replenisher = self.lock_replenisher();
        match *replenisher {
            Replenisher::Idle => {}
            Replenisher::Running(_) => {
                debug!("Rate limiter already running");
                return Ok(());
            }
            Replenisher::Stopped => {
                warn!("Ignoring start request for a stopped rate limiter");
                return Ok(());
            }
        }

        let handle = runtime.spawn(replenish_at_fixed_rate(
            Arc::clone(&self.semaphore),
            Arc::clone(&self.spent),
            Arc::clone(&self.last_refill),
            Instant::now() + self.window,
            self.window,
            self.shutdown_tx.subscribe(),
        ));
        *replenisher = Replenisher::Running(handle);

        info!(
            capacity = self.capacity,
            window_ms = self.window.as_millis() as u64,
            "Rate limiter started"
        );
        Ok(())
    }

    /// Stop replenishing and release every caller blocked in `acquire`.
    ///
    /// Blocked and future acquisitions fail with [`RateLimiterError::Closed`].
    /// Safe to call more than once.
    pub async fn stop(&self) {
        let previous = std::mem::replace(&mut *self.lock_replenisher(), Replenisher::Stopped);

        self.semaphore.close();

        match previous {
            Replenisher::Running(handle) => {
                // Send fails only when the task already exited.
                let _ = self.shutdown_tx.send(());
                if let Err(e) = handle.await {
                    warn!("Replenishment task ended abnormally: {}", e);
                }
                info!("Rate limiter stopped");
            }
            Replenisher::Idle => info!("Rate limiter stopped before it was started"),
            Replenisher::Stopped => debug!("Rate limiter already stopped"),
        }
    }

    /// Whether the replenishment task is currently scheduled.
    pub fn is_running(&self) -> bool {
        match &*self.lock_replenisher() {
            Replenisher::Running(handle) => !handle.is_finished(),
            _ => false,
        }
    }

    /// Like [`acquire`](RateLimiter::acquire), giving up after `timeout`.
    ///
    /// A caller that gives up leaves the pool untouched.
    pub async fn acquire_timeout(&self, timeout: Duration) -> Result<(), RateLimiterError> {
        match tokio::time::timeout(timeout, self.acquire()).await {
            Ok(result) => result,
            Err(_) => {
                debug!(waited_ms = timeout.as_millis() as u64, "Permit wait timed out");
                Err(RateLimiterError::Cancelled { waited: timeout })
            }
        }
    }

    /// When the pool was last topped up
    pub async fn last_refill(&self) -> Instant {
        *self.last_refill.lock().await
    }

    fn lock_replenisher(&self) -> MutexGuard<'_, Replenisher> {
        self.replenisher.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Drop for FixedWindowRateLimiter {
    fn drop(&mut self) {
        // The replenisher sees the sender go away and exits on its own.
        self.semaphore.close();
    }
}

#[async_trait]
impl RateLimiter for FixedWindowRateLimiter {
    async fn acquire(&self) -> Result<(), RateLimiterError> {
        trace!(
            available = self.semaphore.available_permits(),
            "Requesting permit"
        );

        let permit = self
            .semaphore
            .acquire()
            .await
            .map_err(|_| RateLimiterError::Closed)?;

        // Spent permits only come back through replenishment.
        permit.forget();
        self.spent.fetch_add(1, Ordering::AcqRel);
        Ok(())
    }

    async fn replenish(&self) -> usize {
        refill(&self.semaphore, &self.spent, &self.last_refill).await
    }

    fn available_permits(&self) -> usize {
        self.semaphore.available_permits()
    }

    fn capacity(&self) -> usize {
        self.capacity
    }
}

/// Return every permit spent since the previous refill.
///
/// Only granted permits are counted. A permit handed to a waiter that is dropped
/// before it runs returns to the pool on its own and must not be restored twice.
async fn refill(
    semaphore: &Semaphore,
    spent: &AtomicUsize,
    last_refill: &tokio::sync::Mutex<Instant>,
) -> usize {
    let mut last_refill = last_refill.lock().await;

    if semaphore.is_closed() {
        return 0;
    }

    let restored = spent.swap(0, Ordering::AcqRel);
    if restored > 0 {
        semaphore.add_permits(restored);
    }
    *last_refill = Instant::now();

    debug!(
        restored,
        available = semaphore.available_permits(),
        "Replenished rate limiter"
    );
    restored
}

async fn replenish_at_fixed_rate(
    semaphore: Arc<Semaphore>,
    spent: Arc<AtomicUsize>,
    last_refill: Arc<tokio::sync::Mutex<Instant>>,
    first_tick: Instant,
    window: Duration,
    mut shutdown_rx: broadcast::Receiver<()>,
) {
    let mut ticker = interval_at(first_tick, window);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        tokio::select! {
            // Also fires when the limiter is dropped and the sender goes away.
            _ = shutdown_rx.recv() => {
                debug!("Replenishment task shutting down");
                break;
            }

            _ = ticker.tick() => {
                refill(&semaphore, &spent, &last_refill).await;
            }
        }
    }
}
