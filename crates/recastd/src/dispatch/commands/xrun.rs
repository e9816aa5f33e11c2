//! The `xrun` command: runs a transformation and reports its result.

use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use recast_transform::{FileSystem, Selection, Transformation, TransformationConfig};
use serde_json::Value;
use tracing::debug;

use super::{CommandContext, CommandHandler, require_stage};
use crate::dispatch::errors::CommandError;
use crate::dispatch::input::{
    Input, optional_array, optional_integer, optional_str, require_coordinate, require_object,
    require_str,
};
use crate::dispatch::reply::Reply;
use crate::dispatch::router::DISPATCH_TARGET;
use crate::dispatch::translate;
use crate::session::{SessionState, Stage};

const TRANSFORMATION_KEY: &str = "transformation";
const SELECTION_KEY: &str = "textselection";
const ARGUMENTS_KEY: &str = "arguments";
const LIMIT_KEY: &str = "limit";
const MODE_KEY: &str = "mode";

/// How edited files are returned to the client.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) enum XRunMode {
    /// Full edited content inline.
    Text,
    /// Unified diffs written beside each file.
    #[default]
    Patch,
}

impl XRunMode {
    const ALLOWED: &'static str = "text|patch";

    fn parse(value: &str) -> Option<Self> {
        match value {
            "text" => Some(Self::Text),
            "patch" => Some(Self::Patch),
            _ => None,
        }
    }
}

/// Runs a transformation against the client's selection.
#[derive(Debug, Default, Clone, Copy)]
pub(crate) struct XRun;

/// Validated `xrun` input together with the session's workspace.
pub(crate) struct XRunRequest {
    transformation: Arc<dyn Transformation>,
    mode: XRunMode,
    limit: Option<u64>,
    selection: Selection,
    arguments: Vec<Value>,
    working_dir: PathBuf,
    file_system: Arc<dyn FileSystem>,
}

impl fmt::Debug for XRunRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("XRunRequest")
            .field("mode", &self.mode)
            .field("limit", &self.limit)
            .field("selection", &self.selection)
            .field("arguments", &self.arguments)
            .field("working_dir", &self.working_dir)
            .finish_non_exhaustive()
    }
}

impl CommandHandler for XRun {
    type Envelope = XRunRequest;

    const NAME: &'static str = "xrun";

    fn validate(
        &self,
        ctx: &CommandContext,
        state: &SessionState,
        input: &Input,
    ) -> Result<XRunRequest, CommandError> {
        require_stage(Self::NAME, state, Stage::Configured)?;
        let (Some(working_dir), Some(file_system)) = (state.working_dir(), state.file_system())
        else {
            return Err(CommandError::state_precondition(
                Self::NAME,
                Stage::Configured,
                state.stage(),
            ));
        };

        let limit = parse_limit(input)?;
        let mode = match optional_str(input, MODE_KEY)? {
            None => XRunMode::default(),
            Some(value) => XRunMode::parse(value)
                .ok_or_else(|| CommandError::invalid_enum(MODE_KEY, XRunMode::ALLOWED))?,
        };

        let name = require_str(input, TRANSFORMATION_KEY)?;
        let transformation = ctx
            .registry
            .get(name)
            .ok_or_else(|| CommandError::unknown_transformation(name))?;
        let arguments = optional_array(input, ARGUMENTS_KEY)?
            .map(<[Value]>::to_vec)
            .unwrap_or_default();

        let raw_selection = require_object(input, SELECTION_KEY)?;
        let filename = optional_str(raw_selection, "filename")
            .map_err(|_| CommandError::invalid_type(format!("{SELECTION_KEY}.filename"), "a string"))?
            .ok_or_else(|| CommandError::missing_key(format!("{SELECTION_KEY}.filename")))?;
        let coordinate = |key: &str| require_coordinate(raw_selection, SELECTION_KEY, key);
        let selection = Selection::new(
            working_dir.join(filename),
            coordinate("startline")?,
            coordinate("startcol")?,
            coordinate("endline")?,
            coordinate("endcol")?,
        );

        Ok(XRunRequest {
            transformation,
            mode,
            limit,
            selection,
            arguments,
            working_dir: working_dir.to_path_buf(),
            file_system,
        })
    }

    fn run(
        &self,
        _ctx: &CommandContext,
        _state: &mut SessionState,
        request: XRunRequest,
    ) -> Result<Reply, CommandError> {
        let XRunRequest {
            transformation,
            mode,
            limit,
            selection,
            arguments,
            working_dir,
            file_system,
        } = request;

        let description = transformation.description();
        debug!(
            target: DISPATCH_TARGET,
            transformation = description.name(),
            file = %selection.filename().display(),
            ?mode,
            ?limit,
            "running transformation"
        );

        let config = TransformationConfig {
            file_system: Arc::clone(&file_system),
            scope: None,
            selection,
            args: arguments,
        };
        let result = transformation.run(&config);

        let files = match mode {
            XRunMode::Patch => {
                translate::write_patches(file_system.as_ref(), &working_dir, &result.edits)?
            }
            XRunMode::Text => {
                translate::content_records(file_system.as_ref(), &working_dir, &result.edits)?
            }
        };

        Ok(Reply::ok()
            .with_description(description.name())
            .with_log(translate::log_records(&result.log))
            .with_files(files)
            .with_fs_changes(translate::fs_change_records(
                &working_dir,
                &result.fs_changes,
            )))
    }
}

fn parse_limit(input: &Input) -> Result<Option<u64>, CommandError> {
    optional_integer(input, LIMIT_KEY)?
        .map(|limit| {
            u64::try_from(limit).map_err(|_| {
                CommandError::invalid_argument(format!(
                    "\"{LIMIT_KEY}\" key must be a non-negative integer"
                ))
            })
        })
        .transpose()
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::Path;

    use rstest::{fixture, rstest};
    use serde_json::json;
    use tempfile::TempDir;

    use super::*;
    use crate::dispatch::commands::test_support::{configured, context, input, opened};
    use crate::dispatch::reply::FileRecord;

    const SOURCE: &str = "count := 1\nprint(count)\n";

    #[fixture]
    fn workspace() -> TempDir {
        let dir = TempDir::new().expect("temp dir");
        fs::write(dir.path().join("a.go"), SOURCE).expect("write source");
        dir
    }

    fn rename_input(extra: Value) -> Input {
        let mut map = input(json!({
            "transformation": "rename",
            "textselection": {
                "filename": "a.go",
                "startline": 1,
                "startcol": 1,
                "endline": 1,
                "endcol": 5
            },
            "arguments": ["total"]
        }));
        map.extend(input(extra));
        map
    }

    fn execute(dir: &Path, raw: Input) -> Result<Reply, CommandError> {
        let ctx = context();
        let mut state = configured(dir);
        let request = XRun.validate(&ctx, &state, &raw)?;
        XRun.run(&ctx, &mut state, request)
    }

    #[test]
    fn stage_is_checked_before_anything_else() {
        let error = XRun
            .validate(&context(), &opened(), &input(json!({"limit": -1})))
            .expect_err("opened is not enough");
        assert!(matches!(error, CommandError::StatePrecondition { .. }));
    }

    #[rstest]
    fn negative_limit_is_rejected_regardless_of_other_fields(workspace: TempDir) {
        let error = XRun
            .validate(
                &context(),
                &configured(workspace.path()),
                &input(json!({"limit": -1})),
            )
            .expect_err("negative limit");
        assert_eq!(
            error.to_string(),
            "\"limit\" key must be a non-negative integer"
        );
    }

    #[rstest]
    #[case(json!({"mode": "html"}), "\"mode\" key must be \"text|patch\"")]
    #[case(json!({"transformation": "extract"}), "\"extract\" is not a registered transformation")]
    #[case(json!({"arguments": "total"}), "\"arguments\" key must be a list")]
    #[case(json!({"textselection": {"filename": "a.go"}}), "\"textselection.startline\" key is required")]
    #[case(
        json!({"textselection": {"filename": "a.go", "startline": 1, "startcol": -3, "endline": 1, "endcol": 5}}),
        "\"textselection.startcol\" key must be a non-negative integer"
    )]
    #[case(
        json!({"textselection": {"startline": 1, "startcol": 1, "endline": 1, "endcol": 5}}),
        "\"textselection.filename\" key is required"
    )]
    fn rejects_invalid_fields(workspace: TempDir, #[case] extra: Value, #[case] message: &str) {
        let error = execute(workspace.path(), rename_input(extra)).expect_err("invalid input");
        assert_eq!(error.to_string(), message);
        assert!(!workspace.path().join("a.go.diff").exists());
    }

    #[test]
    fn missing_transformation_is_reported() {
        let error = XRun
            .validate(&context(), &configured(Path::new("/tmp")), &input(json!({})))
            .expect_err("missing transformation");
        assert_eq!(error.to_string(), "\"transformation\" key is required");
    }

    #[rstest]
    #[case(json!({}))]
    #[case(json!({"mode": "patch"}))]
    fn patch_mode_is_the_default(workspace: TempDir, #[case] extra: Value) {
        let reply = execute(workspace.path(), rename_input(extra)).expect("run");

        assert_eq!(reply.description.as_deref(), Some("Rename"));
        assert_eq!(
            reply.files,
            Some(vec![FileRecord::Patch {
                filename: "a.go".to_owned(),
                patch_file: "a.go.diff".to_owned(),
            }])
        );
        let diff = fs::read_to_string(workspace.path().join("a.go.diff")).expect("diff written");
        assert!(diff.contains("+total := 1"));
        assert!(reply.fs_changes.is_none());
    }

    #[rstest]
    fn text_mode_returns_content(workspace: TempDir) {
        let reply =
            execute(workspace.path(), rename_input(json!({"mode": "text"}))).expect("run");

        assert_eq!(
            reply.files,
            Some(vec![FileRecord::Content {
                filename: "a.go".to_owned(),
                content: "total := 1\nprint(total)\n".to_owned(),
            }])
        );
        assert!(!workspace.path().join("a.go.diff").exists());
        assert_eq!(
            fs::read_to_string(workspace.path().join("a.go")).expect("source"),
            SOURCE
        );
    }

    #[rstest]
    fn engine_problems_are_logged_not_raised(workspace: TempDir) {
        let reply = execute(
            workspace.path(),
            rename_input(json!({"arguments": [], "mode": "text"})),
        )
        .expect("run");

        let log = reply.log.expect("log");
        assert!(log.iter().any(|record| record.severity == "error"));
        assert_eq!(reply.files, Some(Vec::new()));
    }

    #[rstest]
    #[case(json!(3), Some(3))]
    #[case(json!(0), Some(0))]
    #[case(json!(2.5), Some(2))]
    fn accepts_non_negative_limits(#[case] limit: Value, #[case] expected: Option<u64>) {
        let raw = input(json!({ "limit": limit }));
        assert_eq!(parse_limit(&raw).expect("valid limit"), expected);
    }
}
