//! The `list` command.

use recast_transform::Quality;
use tracing::debug;

use super::{CommandContext, CommandHandler, require_stage};
use crate::dispatch::errors::CommandError;
use crate::dispatch::input::{Input, require_str};
use crate::dispatch::reply::{Reply, TransformationSummary};
use crate::dispatch::router::DISPATCH_TARGET;
use crate::session::{SessionState, Stage};

const QUALITY_KEY: &str = "quality";
const ALLOWED_QUALITIES: &str = "in_testing|in_development|production";

/// Lists every registered transformation.
///
/// The requested quality is validated but does not filter the listing.
#[derive(Debug, Default, Clone, Copy)]
pub(crate) struct List;

impl CommandHandler for List {
    type Envelope = Quality;

    const NAME: &'static str = "list";

    fn validate(
        &self,
        _ctx: &CommandContext,
        state: &SessionState,
        input: &Input,
    ) -> Result<Quality, CommandError> {
        require_stage(Self::NAME, state, Stage::Opened)?;
        let quality = require_str(input, QUALITY_KEY)?;
        Quality::parse(quality)
            .ok_or_else(|| CommandError::invalid_enum(QUALITY_KEY, ALLOWED_QUALITIES))
    }

    fn run(
        &self,
        ctx: &CommandContext,
        _state: &mut SessionState,
        quality: Quality,
    ) -> Result<Reply, CommandError> {
        debug!(target: DISPATCH_TARGET, %quality, "listing transformations");
        let transformations = ctx
            .registry
            .iter()
            .map(|(short_name, transformation)| TransformationSummary {
                short_name: short_name.to_owned(),
                name: transformation.description().name().to_owned(),
            })
            .collect();
        Ok(Reply::ok().with_transformations(transformations))
    }
}
