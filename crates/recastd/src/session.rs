//! Per-session lifecycle state.
//!
//! A session starts [`Stage::Fresh`], becomes [`Stage::Opened`] after `open`
//! and [`Stage::Configured`] once `setdir` has bound a working directory and a
//! file system. The stage never moves backwards.

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use recast_transform::FileSystem;
use tracing::info;

/// Tracing target for session transitions.
pub(crate) const SESSION_TARGET: &str = concat!(env!("CARGO_PKG_NAME"), "::session");

/// Lifecycle stage of a session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Stage {
    /// No command has been accepted yet.
    #[default]
    Fresh = 0,
    /// The client has opened the session.
    Opened = 1,
    /// A working directory and file system are bound.
    Configured = 2,
}

impl Stage {
    /// Returns the canonical lowercase name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Fresh => "fresh",
            Self::Opened => "opened",
            Self::Configured => "configured",
        }
    }

    /// Numeric stage as reported on the wire.
    #[must_use]
    pub const fn number(self) -> u8 {
        self as u8
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.as_str(), self.number())
    }
}

/// How the client exposes its files to the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mode {
    /// Files live on the local disk.
    Local,
    /// Files are held by a remote editor. Not supported.
    Web,
}

impl Mode {
    /// Allowed spellings, as shown in validation errors.
    pub const ALLOWED: &'static str = "local|web";

    /// Parses the wire spelling. Matching is exact.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "local" => Some(Self::Local),
            "web" => Some(Self::Web),
            _ => None,
        }
    }

    /// Returns the wire spelling.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Local => "local",
            Self::Web => "web",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Directory and file system bound by `setdir`.
#[derive(Clone)]
pub(crate) struct Workspace {
    mode: Mode,
    working_dir: PathBuf,
    file_system: Arc<dyn FileSystem>,
}

impl Workspace {
    pub(crate) fn new(mode: Mode, working_dir: PathBuf, file_system: Arc<dyn FileSystem>) -> Self {
        Self {
            mode,
            working_dir,
            file_system,
        }
    }
}

impl fmt::Debug for Workspace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Workspace")
            .field("mode", &self.mode)
            .field("working_dir", &self.working_dir)
            .finish_non_exhaustive()
    }
}

impl PartialEq for Workspace {
    fn eq(&self, other: &Self) -> bool {
        self.mode == other.mode
            && self.working_dir == other.working_dir
            && Arc::ptr_eq(&self.file_system, &other.file_system)
    }
}

impl Eq for Workspace {}

/// Mutable record owned by one session.
///
/// Only the `open` and `setdir` commands change it, and only after their
/// input has been validated.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionState {
    stage: Stage,
    workspace: Option<Workspace>,
}

impl SessionState {
    /// Creates a fresh session state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current lifecycle stage.
    #[must_use]
    pub const fn stage(&self) -> Stage {
        self.stage
    }

    /// Mode bound by `setdir`, if any.
    #[must_use]
    pub fn mode(&self) -> Option<Mode> {
        self.workspace.as_ref().map(|workspace| workspace.mode)
    }

    /// Working directory bound by `setdir`, if any.
    #[must_use]
    pub fn working_dir(&self) -> Option<&Path> {
        self.workspace
            .as_ref()
            .map(|workspace| workspace.working_dir.as_path())
    }

    /// File system bound by `setdir`, if any.
    #[must_use]
    pub fn file_system(&self) -> Option<Arc<dyn FileSystem>> {
        self.workspace
            .as_ref()
            .map(|workspace| Arc::clone(&workspace.file_system))
    }

    /// Advances to at least [`Stage::Opened`].
    pub(crate) fn open(&mut self) {
        if self.stage < Stage::Opened {
            self.advance(Stage::Opened);
        }
    }

    /// Binds the workspace and advances to [`Stage::Configured`].
    pub(crate) fn configure(&mut self, workspace: Workspace) {
        info!(
            target: SESSION_TARGET,
            mode = %workspace.mode,
            working_dir = %workspace.working_dir.display(),
            "workspace bound"
        );
        self.workspace = Some(workspace);
        if self.stage < Stage::Configured {
            self.advance(Stage::Configured);
        }
    }

    fn advance(&mut self, to: Stage) {
        info!(target: SESSION_TARGET, from = %self.stage, to = %to, "session stage advanced");
        self.stage = to;
    }
}

#[cfg(test)]
mod tests {
    use recast_transform::LocalFileSystem;
    use rstest::rstest;

    use super::*;

    fn workspace(dir: &str) -> Workspace {
        Workspace::new(
            Mode::Local,
            PathBuf::from(dir),
            Arc::new(LocalFileSystem::new()),
        )
    }

    #[test]
    fn fresh_state_has_no_workspace() {
        let state = SessionState::new();
        assert_eq!(state.stage(), Stage::Fresh);
        assert!(state.mode().is_none());
        assert!(state.working_dir().is_none());
        assert!(state.file_system().is_none());
    }

    #[test]
    fn open_is_idempotent_once_configured() {
        let mut state = SessionState::new();
        state.open();
        state.configure(workspace("/tmp/project"));
        state.open();
        assert_eq!(state.stage(), Stage::Configured);
    }

    #[test]
    fn configure_binds_workspace() {
        let mut state = SessionState::new();
        state.open();
        state.configure(workspace("/tmp/project"));
        assert_eq!(state.mode(), Some(Mode::Local));
        assert_eq!(state.working_dir(), Some(Path::new("/tmp/project")));
    }

    #[test]
    fn clones_compare_equal() {
        let mut state = SessionState::new();
        state.open();
        state.configure(workspace("/tmp/project"));
        assert_eq!(state.clone(), state);
    }

    #[test]
    fn distinct_file_systems_compare_unequal() {
        let mut left = SessionState::new();
        left.configure(workspace("/tmp/project"));
        let mut right = SessionState::new();
        right.configure(workspace("/tmp/project"));
        assert_ne!(left, right);
    }

    #[rstest]
    #[case("local", Some(Mode::Local))]
    #[case("web", Some(Mode::Web))]
    #[case("LOCAL", None)]
    #[case("", None)]
    fn parses_modes(#[case] input: &str, #[case] expected: Option<Mode>) {
        assert_eq!(Mode::parse(input), expected);
    }

    #[rstest]
    #[case(Stage::Fresh, "fresh (0)")]
    #[case(Stage::Opened, "opened (1)")]
    #[case(Stage::Configured, "configured (2)")]
    fn displays_stage_with_number(#[case] stage: Stage, #[case] expected: &str) {
        assert_eq!(stage.to_string(), expected);
    }
}
