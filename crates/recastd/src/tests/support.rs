//! Shared test doubles and the protocol scenario world.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use mockall::mock;
use recast_config::Config;
use recast_transform::{FileSystem, TransformationRegistry};
use serde_json::{Map, Value, json};
use tempfile::TempDir;

use crate::dispatch::{CommandRequest, Reply, Session};
use crate::session::SessionState;

mock! {
    pub Fs {}

    impl FileSystem for Fs {
        fn read_dir(&self, path: &Path) -> io::Result<Vec<PathBuf>>;
        fn read_to_string(&self, path: &Path) -> io::Result<String>;
    }
}

/// Go source whose first identifier is `count`.
pub const SAMPLE_SOURCE: &str = "count := 1\nprint(count)\n";

/// State shared across protocol scenario steps.
pub struct ProtocolWorld {
    session: Session,
    project: TempDir,
    before: Option<SessionState>,
    reply: Option<Reply>,
}

impl ProtocolWorld {
    /// Builds a world with a fresh session and an empty project directory.
    pub fn new() -> Self {
        let config = Config::default();
        Self {
            session: Session::new(
                Arc::new(TransformationRegistry::with_builtins()),
                config.about_text(),
            ),
            project: TempDir::new().expect("create project directory"),
            before: None,
            reply: None,
        }
    }

    /// Root of the scenario's project directory.
    pub fn project(&self) -> &Path {
        self.project.path()
    }

    /// Writes [`SAMPLE_SOURCE`] to `name` inside the project.
    pub fn add_source(&self, name: &str) {
        fs::write(self.project().join(name), SAMPLE_SOURCE).expect("write source file");
    }

    /// Sends a command, remembering the state it was sent in.
    pub fn send(&mut self, command: &str, input: Map<String, Value>) {
        self.before = Some(self.session.state().clone());
        let request = CommandRequest::new(command, input);
        self.reply = Some(self.session.execute(&request));
    }

    /// Sends `setdir` for a local directory.
    pub fn bind_directory(&mut self, directory: &Path) {
        let input = json!({"mode": "local", "directory": directory});
        let Value::Object(map) = input else {
            panic!("setdir input is an object");
        };
        self.send("setdir", map);
    }

    /// Reply to the most recent command.
    pub fn reply(&self) -> &Reply {
        self.reply.as_ref().expect("a command has been sent")
    }

    /// Session state before the most recent command.
    pub fn state_before(&self) -> &SessionState {
        self.before.as_ref().expect("a command has been sent")
    }

    /// Current session state.
    pub fn state(&self) -> &SessionState {
        self.session.state()
    }
}
