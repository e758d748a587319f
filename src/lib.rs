//! Rate-limited client for the product registration API.
//!
//! Documents are submitted through a [`DocumentClient`](client::DocumentClient)
//! sharing a [`FixedWindowRateLimiter`](utility::rate_limiter::FixedWindowRateLimiter)
//! that caps how many requests start per time window.

pub mod client;
pub mod documents;
pub mod functions;
pub mod settings;
pub mod utility;
