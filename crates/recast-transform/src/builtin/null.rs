//! The no-op transformation used to exercise the protocol.

use serde_json::Value;

use crate::log::Log;
use crate::transformation::{
    Description, ParamValue, Parameter, Quality, Transformation, TransformationConfig,
    TransformationResult,
};

/// Reads the selected file and changes nothing.
///
/// Passing `true` as the first argument adds a warning to the log, which lets
/// clients exercise their log rendering.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullTransformation;

impl Transformation for NullTransformation {
    fn description(&self) -> Description {
        Description::new("Null Transformation", Quality::InTesting).with_param(Parameter::new(
            "Log a warning?",
            "Add a warning entry to the transformation log.",
            ParamValue::Bool(false),
        ))
    }

    fn run(&self, config: &TransformationConfig) -> TransformationResult {
        let mut log = Log::new();
        let filename = config.selection.filename();
        match config.file_system.read_to_string(filename) {
            Ok(_) => log.info(format!(
                "null transformation made no changes to {}",
                filename.display()
            )),
            Err(error) => log.error(format!("cannot read {}: {error}", filename.display())),
        }
        if matches!(config.args.first(), Some(Value::Bool(true))) {
            log.warning("warning requested by the caller");
        }
        TransformationResult {
            log,
            ..TransformationResult::new()
        }
    }
}
