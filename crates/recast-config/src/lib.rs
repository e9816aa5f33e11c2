//! Shared configuration for the recast protocol engine.
//!
//! Configuration is layered by [`ortho_config`]: compiled defaults first, then
//! a configuration file (selected with `--config-path`), then `RECAST_*`
//! environment variables, and finally command-line flags. The resolved
//! [`Config`] controls telemetry, the text returned by the `about` command and
//! the request size limit enforced by the serve loop.

mod defaults;
mod logging;

use std::ffi::OsString;
use std::sync::Arc;

use ortho_config::{OrthoConfig, OrthoError};
use serde::{Deserialize, Serialize};

pub use defaults::{
    DEFAULT_ABOUT_TEXT, DEFAULT_LOG_FILTER, DEFAULT_MAX_REQUEST_BYTES, default_about_text,
    default_log_filter, default_log_filter_string, default_log_format, default_max_request_bytes,
};
pub use logging::{LogFormat, LogFormatParseError};

/// Resolved runtime configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, OrthoConfig)]
#[ortho_config(prefix = "RECAST")]
pub struct Config {
    /// Tracing filter expression, for example `info` or `recastd=debug`.
    #[serde(default = "default_log_filter_string")]
    #[ortho_config(default = default_log_filter_string())]
    pub log_filter: String,
    /// Output format for log records written to stderr.
    #[serde(default = "default_log_format")]
    #[ortho_config(default = default_log_format())]
    pub log_format: LogFormat,
    /// Text returned by the `about` command.
    #[serde(default = "default_about_text")]
    #[ortho_config(default = default_about_text())]
    pub about_text: String,
    /// Largest request line accepted by the serve loop, in bytes.
    #[serde(default = "default_max_request_bytes")]
    #[ortho_config(default = default_max_request_bytes())]
    pub max_request_bytes: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_filter: default_log_filter_string(),
            log_format: default_log_format(),
            about_text: default_about_text(),
            max_request_bytes: default_max_request_bytes(),
        }
    }
}

impl Config {
    /// Loads configuration from an explicit argument list.
    ///
    /// The first element is treated as the binary name, matching
    /// [`std::env::args_os`].
    ///
    /// # Errors
    ///
    /// Returns the aggregated loader error when any source fails to parse.
    pub fn load_from_args<I>(args: I) -> Result<Self, Arc<OrthoError>>
    where
        I: IntoIterator<Item = OsString>,
    {
        Self::load_from_iter(args)
    }

    /// Tracing filter expression.
    #[must_use]
    pub fn log_filter(&self) -> &str {
        &self.log_filter
    }

    /// Log output format.
    #[must_use]
    pub const fn log_format(&self) -> LogFormat {
        self.log_format
    }

    /// Text returned by the `about` command.
    #[must_use]
    pub fn about_text(&self) -> &str {
        &self.about_text
    }

    /// Request size limit for the serve loop.
    #[must_use]
    pub const fn max_request_bytes(&self) -> usize {
        self.max_request_bytes
    }
}
