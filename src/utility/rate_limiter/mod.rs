//! Fixed-window rate limiting.
//!
//! A [`FixedWindowRateLimiter`](types::FixedWindowRateLimiter) hands out at most
//! `capacity` permits per window. A background task started with `start()` tops
//! the pool back up to `capacity` at a fixed rate (every `window` measured from
//! the moment the task was started). Callers wait in FIFO order.
//!
//! Because the whole pool is restored on each tick, a caller can observe up to
//! `2 * capacity` grants around a window boundary. This is the usual fixed-window
//! trade-off and is kept as is.

pub mod constants;
pub mod errors;
pub mod impls;
pub mod traits;
pub mod types;

pub use errors::RateLimiterError;
pub use traits::RateLimiter;
pub use types::{FixedWindowRateLimiter, RateLimitConfig};
