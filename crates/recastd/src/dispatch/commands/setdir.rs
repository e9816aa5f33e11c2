//! The `setdir` command.

use std::path::PathBuf;
use std::sync::Arc;

use recast_transform::{FileSystem, LocalFileSystem};

use super::{CommandContext, CommandHandler, require_stage};
use crate::dispatch::errors::CommandError;
use crate::dispatch::input::{Input, require_str};
use crate::dispatch::reply::Reply;
use crate::session::{Mode, SessionState, Stage, Workspace};

const MODE_KEY: &str = "mode";
const DIRECTORY_KEY: &str = "directory";

/// Binds the session's working directory and file system.
#[derive(Debug, Default, Clone, Copy)]
pub(crate) struct SetDir;

/// Validated `setdir` input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum SetDirRequest {
    /// A readable local directory.
    Local { directory: PathBuf },
    /// The unsupported web mode.
    Web,
}

impl CommandHandler for SetDir {
    type Envelope = SetDirRequest;

    const NAME: &'static str = "setdir";

    fn validate(
        &self,
        _ctx: &CommandContext,
        state: &SessionState,
        input: &Input,
    ) -> Result<SetDirRequest, CommandError> {
        require_stage(Self::NAME, state, Stage::Opened)?;
        let mode = Mode::parse(require_str(input, MODE_KEY)?)
            .ok_or_else(|| CommandError::invalid_enum(MODE_KEY, Mode::ALLOWED))?;

        match mode {
            Mode::Web => Ok(SetDirRequest::Web),
            Mode::Local => {
                let directory = PathBuf::from(require_str(input, DIRECTORY_KEY)?);
                LocalFileSystem::new()
                    .read_dir(&directory)
                    .map_err(|error| {
                        CommandError::io(
                            format!("cannot read directory {}: {error}", directory.display()),
                            error,
                        )
                    })?;
                Ok(SetDirRequest::Local { directory })
            }
        }
    }

    fn run(
        &self,
        _ctx: &CommandContext,
        state: &mut SessionState,
        request: SetDirRequest,
    ) -> Result<Reply, CommandError> {
        match request {
            SetDirRequest::Web => Err(CommandError::unsupported_mode(Mode::Web.as_str())),
            SetDirRequest::Local { directory } => {
                state.configure(Workspace::new(
                    Mode::Local,
                    directory,
                    Arc::new(LocalFileSystem::new()),
                ));
                Ok(Reply::ok())
            }
        }
    }
}
