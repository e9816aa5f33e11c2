//! Daemon bootstrap orchestration.

use std::ffi::OsString;
use std::io::{self, BufRead, Write};
use std::sync::Arc;

use ortho_config::OrthoError;
use thiserror::Error;
use tracing::info;

use recast_config::Config;
use recast_transform::TransformationRegistry;

use crate::dispatch::Session;
use crate::serve::{ServeError, ServeSummary, serve};
use crate::telemetry::{self, TelemetryError, TelemetryHandle};

/// Trait abstracting configuration loading for testability.
pub trait ConfigLoader: Send + Sync {
    /// Loads the daemon configuration.
    ///
    /// # Errors
    ///
    /// Returns the loader error when any configuration source is invalid.
    fn load(&self) -> Result<Config, Arc<OrthoError>>;
}

/// Loader that layers defaults, file, environment and the given arguments.
#[derive(Debug, Clone, Default)]
pub struct SystemConfigLoader {
    args: Vec<OsString>,
}

impl SystemConfigLoader {
    /// Creates a loader for `args`; the first element is the binary name.
    pub fn new<I>(args: I) -> Self
    where
        I: IntoIterator<Item = OsString>,
    {
        Self {
            args: args.into_iter().collect(),
        }
    }
}

impl ConfigLoader for SystemConfigLoader {
    fn load(&self) -> Result<Config, Arc<OrthoError>> {
        Config::load_from_args(self.args.iter().cloned())
    }
}

/// Loader that returns a fixed configuration.
#[derive(Debug, Clone)]
pub struct StaticConfigLoader {
    config: Config,
}

impl StaticConfigLoader {
    /// Wraps an already resolved configuration.
    pub fn new(config: Config) -> Self {
        Self { config }
    }
}

impl ConfigLoader for StaticConfigLoader {
    fn load(&self) -> Result<Config, Arc<OrthoError>> {
        Ok(self.config.clone())
    }
}

/// Errors surfaced during bootstrap.
#[derive(Debug, Error)]
pub enum BootstrapError {
    /// Configuration failed to load.
    #[error("failed to load configuration: {source}")]
    Configuration {
        /// Underlying loader error.
        #[source]
        source: Arc<OrthoError>,
    },
    /// Telemetry initialisation failed.
    #[error("failed to initialise telemetry: {source}")]
    Telemetry {
        /// Underlying telemetry error.
        #[source]
        source: TelemetryError,
    },
}

/// Result of a successful bootstrap invocation.
#[derive(Debug)]
pub struct Daemon {
    config: Config,
    registry: Arc<TransformationRegistry>,
    telemetry: TelemetryHandle,
}

impl Daemon {
    /// Accessor for the resolved configuration.
    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Transformations offered to clients.
    #[must_use]
    pub fn registry(&self) -> &TransformationRegistry {
        &self.registry
    }

    /// Accessor for the telemetry handle, primarily useful for testing.
    #[must_use]
    pub fn telemetry(&self) -> TelemetryHandle {
        self.telemetry
    }

    /// Creates a fresh session sharing this daemon's registry.
    #[must_use]
    pub fn session(&self) -> Session {
        Session::new(Arc::clone(&self.registry), self.config.about_text())
    }

    /// Serves one session over the given streams until end of input.
    ///
    /// # Errors
    ///
    /// Returns [`ServeError`] when either stream fails.
    pub fn serve<R: BufRead, W: Write>(
        &self,
        reader: R,
        writer: W,
    ) -> Result<ServeSummary, ServeError> {
        let mut session = self.session();
        serve(
            &mut session,
            reader,
            writer,
            self.config.max_request_bytes(),
        )
    }

    /// Serves one session over stdin and stdout.
    ///
    /// # Errors
    ///
    /// Returns [`ServeError`] when either stream fails.
    pub fn serve_stdio(&self) -> Result<ServeSummary, ServeError> {
        self.serve(io::stdin().lock(), io::stdout().lock())
    }
}

/// Bootstraps the daemon using the supplied configuration loader.
///
/// # Errors
///
/// Returns [`BootstrapError`] when configuration cannot be loaded or
/// telemetry cannot be installed.
pub fn bootstrap_with(loader: &dyn ConfigLoader) -> Result<Daemon, BootstrapError> {
    let config = loader
        .load()
        .map_err(|source| BootstrapError::Configuration { source })?;
    let telemetry =
        telemetry::initialise(&config).map_err(|source| BootstrapError::Telemetry { source })?;

    let registry = Arc::new(TransformationRegistry::with_builtins());
    info!(
        target: concat!(env!("CARGO_PKG_NAME"), "::bootstrap"),
        transformations = registry.len(),
        log_format = %config.log_format(),
        "daemon ready"
    );

    Ok(Daemon {
        config,
        registry,
        telemetry,
    })
}
