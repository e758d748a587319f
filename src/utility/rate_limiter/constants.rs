/// Default number of permits per window
pub const DEFAULT_MAX_REQUESTS: u32 = 10;

/// Default window length in milliseconds
pub const DEFAULT_WINDOW_MILLIS: u64 = 1_000;

pub fn default_max_requests() -> u32 {
    DEFAULT_MAX_REQUESTS
}

pub fn default_window_millis() -> u64 {
    DEFAULT_WINDOW_MILLIS
}
