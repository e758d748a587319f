/// Environment variable overriding the configuration file location
pub const CONFIG_PATH_ENV: &str = "CRPT_CONFIG_PATH";

/// Prefix for environment overrides, e.g. `CRPT__RATE_LIMIT__MAX_REQUESTS=5`
pub const ENV_PREFIX: &str = "CRPT";
pub const ENV_SEPARATOR: &str = "__";

/// Example configuration
pub const DEFAULT_CONFIG: &str = r#"
# Logging configuration
[log]
# Level can be "error", "warn", "info", "debug", or "trace"
level = "info"

# At most `max_requests` submissions are started per window
[rate_limit]
max_requests = 10
window_millis = 1000

# Registration API
[api]
url = "https://ismp.crpt.ru/api/v3/lk/documents/create"
timeout_secs = 30
# Optional: send the signature in this header. Left out of requests when unset.
# signature_header = "X-Signature"
# Optional: give up waiting for a permit after this many milliseconds
# acquire_timeout_ms = 5000

# Batch submission settings
[driver]
document_path = "document.json"
signature = "SIGNATURE"
requests = 100
concurrency = 10
"#;
