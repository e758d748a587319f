// Standard library
use std::path::PathBuf;
use std::sync::Arc;

// 3rd party crates
use serde::Deserialize;
use tokio::sync::RwLock;

// Project imports
use crate::client::ApiConfig;
use crate::utility::rate_limiter::RateLimitConfig;

#[derive(Debug, Deserialize, Clone)]
pub struct Log {
    #[serde(default = "default_log_level")]
    pub level: String,
}

/// Batch submission run by the binary
#[derive(Debug, Deserialize, Clone)]
pub struct Driver {
    #[serde(default = "default_document_path")]
    pub document_path: PathBuf,
    #[serde(default = "default_signature")]
    pub signature: String,
    #[serde(default = "default_requests")]
    pub requests: u32,
    /// Submissions allowed in flight at once
    #[serde(default = "default_concurrency")]
    pub concurrency: usize,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Settings {
    #[serde(default)]
    pub log: Log,
    #[serde(default)]
    pub rate_limit: RateLimitConfig,
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub driver: Driver,
}

pub(super) fn default_log_level() -> String {
    "info".to_string()
}

pub(super) fn default_document_path() -> PathBuf {
    PathBuf::from("document.json")
}

pub(super) fn default_signature() -> String {
    "SIGNATURE".to_string()
}

pub(super) fn default_requests() -> u32 {
    100
}

pub(super) fn default_concurrency() -> usize {
    10
}

/// Holds the validated settings shared by the driver and the entry point.
#[derive(Debug)]
pub struct ConfigManager {
    pub settings: Arc<RwLock<Settings>>,
}

/// Settings that passed validation
pub struct ValidatedSettings(pub(super) Settings);
