//! The `params` command.

use std::sync::Arc;

use recast_transform::Transformation;

use super::{CommandContext, CommandHandler, require_stage};
use crate::dispatch::errors::CommandError;
use crate::dispatch::input::{Input, require_str};
use crate::dispatch::reply::{ParamDescriptor, Reply};
use crate::session::{SessionState, Stage};

const TRANSFORMATION_KEY: &str = "transformation";

/// Describes the parameters of one transformation.
#[derive(Debug, Default, Clone, Copy)]
pub(crate) struct Params;

impl CommandHandler for Params {
    type Envelope = Arc<dyn Transformation>;

    const NAME: &'static str = "params";

    fn validate(
        &self,
        ctx: &CommandContext,
        state: &SessionState,
        input: &Input,
    ) -> Result<Arc<dyn Transformation>, CommandError> {
        require_stage(Self::NAME, state, Stage::Configured)?;
        let name = require_str(input, TRANSFORMATION_KEY)?;
        ctx.registry
            .get(name)
            .ok_or_else(|| CommandError::unknown_transformation(name))
    }

    fn run(
        &self,
        _ctx: &CommandContext,
        _state: &mut SessionState,
        transformation: Arc<dyn Transformation>,
    ) -> Result<Reply, CommandError> {
        let params = transformation
            .description()
            .params()
            .iter()
            .map(|param| ParamDescriptor {
                label: param.label().to_owned(),
                prompt: param.prompt().to_owned(),
                kind: param.default_value().type_name(),
                default: param.default_value().clone(),
            })
            .collect();
        Ok(Reply::ok().with_params(params))
    }
}
