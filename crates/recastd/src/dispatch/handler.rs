//! The per-client session that dispatches commands.

use std::sync::Arc;

use recast_transform::TransformationRegistry;
use serde_json::{Map, Value};
use tracing::{debug, warn};

use super::commands::{About, CommandContext, List, Open, Params, SetDir, XRun};
use super::errors::CommandError;
use super::reply::Reply;
use super::request::CommandRequest;
use super::router::{CommandKind, DISPATCH_TARGET, execute};
use crate::session::SessionState;

/// One client's interaction with the engine.
///
/// Commands are processed one at a time; `&mut self` on [`Session::dispatch`]
/// enforces it. Independent sessions may share a registry.
#[derive(Debug)]
pub struct Session {
    state: SessionState,
    context: CommandContext,
}

impl Session {
    /// Creates a fresh session.
    pub fn new(registry: Arc<TransformationRegistry>, about_text: impl Into<String>) -> Self {
        Self {
            state: SessionState::new(),
            context: CommandContext {
                registry,
                about_text: about_text.into(),
            },
        }
    }

    /// Current session state.
    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// Dispatches the command called `name`.
    ///
    /// # Errors
    ///
    /// Returns the validation or execution error. The session state is left
    /// unchanged when an error is returned.
    pub fn dispatch(
        &mut self,
        name: &str,
        input: &Map<String, Value>,
    ) -> Result<Reply, CommandError> {
        let kind = CommandKind::parse(name)?;
        debug!(target: DISPATCH_TARGET, command = %kind, "dispatching command");

        let ctx = &self.context;
        let state = &mut self.state;
        match kind {
            CommandKind::About => execute(&About, ctx, state, input),
            CommandKind::List => execute(&List, ctx, state, input),
            CommandKind::Open => execute(&Open, ctx, state, input),
            CommandKind::Params => execute(&Params, ctx, state, input),
            CommandKind::SetDir => execute(&SetDir, ctx, state, input),
            CommandKind::XRun => execute(&XRun, ctx, state, input),
        }
    }

    /// Handles a parsed request, converting any error into an Error reply.
    pub fn execute(&mut self, request: &CommandRequest) -> Reply {
        match self.dispatch(request.command(), request.input()) {
            Ok(reply) => reply,
            Err(error) => {
                warn!(
                    target: DISPATCH_TARGET,
                    command = request.command(),
                    %error,
                    "command rejected"
                );
                Reply::error(error.to_string())
            }
        }
    }
}
