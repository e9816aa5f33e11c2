//! Request envelope parsing.
//!
//! Each request line is a JSON object `{"command": "...", "input": {...}}`.
//! The `input` object is optional and defaults to an empty map.

use serde::Deserialize;
use serde_json::{Map, Value};

use super::errors::CommandError;

/// Parsed request from a client.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CommandRequest {
    command: String,
    #[serde(default)]
    input: Map<String, Value>,
}

impl CommandRequest {
    /// Creates a request programmatically.
    pub fn new(command: impl Into<String>, input: Map<String, Value>) -> Self {
        Self {
            command: command.into(),
            input,
        }
    }

    /// Parses one request line.
    ///
    /// Trailing whitespace, including the newline delimiter, is ignored.
    ///
    /// # Errors
    ///
    /// Returns [`CommandError::MalformedRequest`] when the line is empty, is
    /// not valid JSON, or does not match the envelope schema.
    pub fn parse(line: &[u8]) -> Result<Self, CommandError> {
        let trimmed = line.trim_ascii_end();
        if trimmed.is_empty() {
            return Err(CommandError::malformed("empty request line"));
        }
        serde_json::from_slice(trimmed).map_err(|error| CommandError::malformed(error.to_string()))
    }

    /// Command name with surrounding whitespace removed.
    pub fn command(&self) -> &str {
        self.command.trim()
    }

    /// Command input.
    pub fn input(&self) -> &Map<String, Value> {
        &self.input
    }
}
