/// Document creation endpoint of the registration API
pub const DEFAULT_API_URL: &str = "https://ismp.crpt.ru/api/v3/lk/documents/create";

/// HTTP client settings
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

pub fn default_api_url() -> String {
    DEFAULT_API_URL.to_string()
}

pub fn default_request_timeout_secs() -> u64 {
    DEFAULT_REQUEST_TIMEOUT_SECS
}
