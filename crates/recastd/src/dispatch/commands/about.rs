//! The `about` command.

use super::{CommandContext, CommandHandler, require_stage};
use crate::dispatch::errors::CommandError;
use crate::dispatch::input::Input;
use crate::dispatch::reply::Reply;
use crate::session::{SessionState, Stage};

/// Returns the configured about text.
#[derive(Debug, Default, Clone, Copy)]
pub(crate) struct About;

impl CommandHandler for About {
    type Envelope = ();

    const NAME: &'static str = "about";

    fn validate(
        &self,
        _ctx: &CommandContext,
        state: &SessionState,
        _input: &Input,
    ) -> Result<(), CommandError> {
        require_stage(Self::NAME, state, Stage::Opened)
    }

    fn run(
        &self,
        ctx: &CommandContext,
        _state: &mut SessionState,
        (): (),
    ) -> Result<Reply, CommandError> {
        Ok(Reply::ok().with_text(ctx.about_text.clone()))
    }
}
