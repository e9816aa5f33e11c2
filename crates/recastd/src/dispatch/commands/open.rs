//! The `open` command.

use serde_json::Value;
use tracing::debug;

use super::{CommandContext, CommandHandler};
use crate::dispatch::errors::CommandError;
use crate::dispatch::input::Input;
use crate::dispatch::reply::Reply;
use crate::dispatch::router::DISPATCH_TARGET;
use crate::session::SessionState;

const VERSION_KEY: &str = "version";

/// Opens the session. Legal in every stage.
#[derive(Debug, Default, Clone, Copy)]
pub(crate) struct Open;

/// Validated `open` input.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct OpenRequest {
    version: Option<f64>,
}

impl CommandHandler for Open {
    type Envelope = OpenRequest;

    const NAME: &'static str = "open";

    fn validate(
        &self,
        _ctx: &CommandContext,
        _state: &SessionState,
        input: &Input,
    ) -> Result<OpenRequest, CommandError> {
        // Non-numeric versions are ignored.
        let version = input.get(VERSION_KEY).and_then(Value::as_f64);
        Ok(OpenRequest { version })
    }

    fn run(
        &self,
        _ctx: &CommandContext,
        state: &mut SessionState,
        request: OpenRequest,
    ) -> Result<Reply, CommandError> {
        if let Some(version) = request.version {
            debug!(target: DISPATCH_TARGET, version, "client protocol version");
        }
        state.open();
        Ok(Reply::ok())
    }
}
