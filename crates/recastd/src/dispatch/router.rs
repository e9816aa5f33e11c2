//! Command name resolution.
//!
//! The protocol has a closed set of commands. A request's name is resolved to
//! a [`CommandKind`] once, and [`execute`] threads the session through the
//! matching handler's validate-then-run contract.

use std::fmt;

use tracing::debug;

use super::commands::{CommandContext, CommandHandler};
use super::errors::CommandError;
use super::input::Input;
use super::reply::Reply;
use crate::session::SessionState;

/// Tracing target for dispatch operations.
pub(crate) const DISPATCH_TARGET: &str = concat!(env!("CARGO_PKG_NAME"), "::dispatch");

/// Commands understood by the protocol engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommandKind {
    /// Describe the engine.
    About,
    /// List registered transformations.
    List,
    /// Open the session.
    Open,
    /// Describe a transformation's parameters.
    Params,
    /// Bind the working directory.
    SetDir,
    /// Run a transformation.
    XRun,
}

impl CommandKind {
    /// Every command, in wire-name order.
    pub const ALL: [Self; 6] = [
        Self::About,
        Self::List,
        Self::Open,
        Self::Params,
        Self::SetDir,
        Self::XRun,
    ];

    /// Parses a command name (case-insensitive, surrounding whitespace
    /// ignored).
    ///
    /// # Errors
    ///
    /// Returns [`CommandError::UnknownCommand`] if the name does not match any
    /// command.
    pub fn parse(value: &str) -> Result<Self, CommandError> {
        let normalised = value.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == normalised)
            .ok_or_else(|| CommandError::unknown_command(value.trim()))
    }

    /// Returns the canonical wire name.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::About => "about",
            Self::List => "list",
            Self::Open => "open",
            Self::Params => "params",
            Self::SetDir => "setdir",
            Self::XRun => "xrun",
        }
    }
}

impl fmt::Display for CommandKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Validates `input` with `handler` and, only on success, runs it.
pub(crate) fn execute<C: CommandHandler>(
    handler: &C,
    ctx: &CommandContext,
    state: &mut SessionState,
    input: &Input,
) -> Result<Reply, CommandError> {
    let envelope = handler.validate(ctx, state, input)?;
    debug!(target: DISPATCH_TARGET, command = C::NAME, "command validated");
    handler.run(ctx, state, envelope)
}
