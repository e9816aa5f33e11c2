//! Protocol engine for the recast transformation tool.
//!
//! An editor integration drives recast through a sequence of discrete
//! commands (`open`, `setdir`, `list`, `params`, `xrun` and `about`), each
//! carrying a JSON object as input and answered by a JSON [`Reply`]. The
//! [`Session`] owns the per-client [`SessionState`] and enforces two rules:
//!
//! 1. **Stage gating**: every command declares the minimum [`Stage`] it needs.
//!    The stage only ever moves forward, from `fresh` through `opened` to
//!    `configured`.
//!
//! 2. **Validate-then-run**: a command's input is parsed into a typed envelope
//!    before anything executes. A rejected command produces an Error reply and
//!    leaves the session exactly as it was.
//!
//! The `xrun` command hands the selection to a
//! [`recast_transform::Transformation`] and translates its result into
//! unified-diff patch files or materialised file content, together with the
//! file-system change records the client should apply.
//!
//! The [`serve`] loop exposes a session over a pair of byte streams, one JSON
//! request per line, and the `recastd` binary wires it to stdio after
//! [`bootstrap_with`] has loaded configuration and installed telemetry.

mod bootstrap;
mod dispatch;
mod serve;
mod session;
pub mod telemetry;

use std::ffi::OsString;
use std::io;
use std::process::ExitCode;

pub use bootstrap::{
    BootstrapError, ConfigLoader, Daemon, StaticConfigLoader, SystemConfigLoader, bootstrap_with,
};
pub use dispatch::{
    CommandError, CommandKind, CommandRequest, FileRecord, FsChangeRecord, LogRecord,
    ParamDescriptor, Reply, ReplyStatus, ReplyWriter, Session, TransformationSummary,
};
pub use serve::{ServeError, ServeSummary, serve};
pub use session::{Mode, SessionState, Stage};
pub use telemetry::{TelemetryError, TelemetryHandle};

/// Runs the daemon against the process's standard streams.
///
/// Configuration is read from `args` (the first element is the binary name),
/// the environment and any configuration file. Returns success when the
/// client closes the input stream.
pub fn run<I>(args: I) -> ExitCode
where
    I: IntoIterator<Item = OsString>,
{
    let loader = SystemConfigLoader::new(args);
    let daemon = match bootstrap_with(&loader) {
        Ok(daemon) => daemon,
        Err(error) => {
            report_fatal(&error);
            return ExitCode::FAILURE;
        }
    };

    match daemon.serve_stdio() {
        Ok(_) => ExitCode::SUCCESS,
        Err(error) => {
            tracing::error!(target: dispatch::DISPATCH_TARGET, %error, "serve loop failed");
            ExitCode::FAILURE
        }
    }
}

/// Writes a bootstrap failure to stderr.
///
/// Telemetry may not be installed yet, so the message bypasses `tracing`.
fn report_fatal(error: &BootstrapError) {
    use std::io::Write;

    let _ = writeln!(io::stderr().lock(), "recastd: {error}");
}

#[cfg(test)]
mod tests;
