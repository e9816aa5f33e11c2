use crate::logging::LogFormat;

/// Default log filter expression used by the binaries.
pub const DEFAULT_LOG_FILTER: &str = "info";

/// Text returned by the `about` command unless overridden.
pub const DEFAULT_ABOUT_TEXT: &str = "recast source transformation engine";

/// Largest request line accepted by the serve loop, in bytes.
pub const DEFAULT_MAX_REQUEST_BYTES: usize = 1024 * 1024;

/// Default log filter expression used by the binaries.
pub fn default_log_filter() -> &'static str {
    DEFAULT_LOG_FILTER
}

/// Owned log filter value used where allocation is required (e.g. serde).
pub fn default_log_filter_string() -> String {
    DEFAULT_LOG_FILTER.to_string()
}

/// Default logging format for the binaries.
pub fn default_log_format() -> LogFormat {
    LogFormat::Json
}

/// Owned about text used where allocation is required (e.g. serde).
pub fn default_about_text() -> String {
    DEFAULT_ABOUT_TEXT.to_string()
}

/// Default request size limit for the serve loop.
pub fn default_max_request_bytes() -> usize {
    DEFAULT_MAX_REQUEST_BYTES
}
