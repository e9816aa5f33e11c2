//! Command implementations.
//!
//! Each command parses its input into a typed envelope in
//! [`CommandHandler::validate`] and acts on that envelope in
//! [`CommandHandler::run`]. Because `run` only accepts the envelope `validate`
//! produced, a command cannot execute against input that was never checked.

mod about;
mod list;
mod open;
mod params;
mod setdir;
mod xrun;

use std::sync::Arc;

use recast_transform::TransformationRegistry;

pub(crate) use about::About;
pub(crate) use list::List;
pub(crate) use open::Open;
pub(crate) use params::Params;
pub(crate) use setdir::SetDir;
pub(crate) use xrun::XRun;

use super::errors::CommandError;
use super::input::Input;
use super::reply::Reply;
use crate::session::{SessionState, Stage};

/// Read-only collaborators shared by every command of a session.
#[derive(Debug, Clone)]
pub(crate) struct CommandContext {
    pub(crate) registry: Arc<TransformationRegistry>,
    pub(crate) about_text: String,
}

/// Two-phase contract implemented by every command.
pub(crate) trait CommandHandler {
    /// Typed request envelope produced by validation.
    type Envelope;

    /// Wire name, used in error messages and logs.
    const NAME: &'static str;

    /// Checks the stage precondition, then parses `input`.
    fn validate(
        &self,
        ctx: &CommandContext,
        state: &SessionState,
        input: &Input,
    ) -> Result<Self::Envelope, CommandError>;

    /// Executes the command with validated input.
    ///
    /// Implementations must not touch `state` before every fallible step has
    /// succeeded.
    fn run(
        &self,
        ctx: &CommandContext,
        state: &mut SessionState,
        envelope: Self::Envelope,
    ) -> Result<Reply, CommandError>;
}

/// Rejects the command unless the session has reached `required`.
pub(crate) fn require_stage(
    command: &'static str,
    state: &SessionState,
    required: Stage,
) -> Result<(), CommandError> {
    if state.stage() < required {
        return Err(CommandError::state_precondition(
            command,
            required,
            state.stage(),
        ));
    }
    Ok(())
}
