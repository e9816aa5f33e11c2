//! Error types for command validation and execution.
//!
//! Every variant is recovered at the command boundary: the dispatcher turns
//! it into an Error reply whose `message` is the variant's display string.

use std::io;
use std::sync::Arc;

use thiserror::Error;

use crate::session::Stage;

/// Errors surfaced while validating or running a command.
#[derive(Debug, Clone, Error)]
pub enum CommandError {
    /// The session has not reached the stage the command needs.
    #[error("the \"{command}\" command requires session stage {required} or later, current stage is {actual}")]
    StatePrecondition {
        /// Command that was rejected.
        command: &'static str,
        /// Minimum stage for the command.
        required: Stage,
        /// Stage at the time of the request.
        actual: Stage,
    },

    /// A required input key is absent.
    #[error("\"{key}\" key is required")]
    MissingKey {
        /// Missing key, dotted for nested objects.
        key: String,
    },

    /// A key's value is not one of the allowed spellings.
    #[error("\"{key}\" key must be \"{allowed}\"")]
    InvalidEnum {
        /// Offending key.
        key: String,
        /// Allowed values, separated by `|`.
        allowed: &'static str,
    },

    /// A key holds a JSON value of the wrong type.
    #[error("\"{key}\" key must be {expected}")]
    InvalidType {
        /// Offending key.
        key: String,
        /// Human readable description of the expected type.
        expected: &'static str,
    },

    /// The named transformation is not registered.
    #[error("\"{name}\" is not a registered transformation")]
    UnknownTransformation {
        /// Name supplied by the client.
        name: String,
    },

    /// A value has the right type but is out of range.
    #[error("{message}")]
    InvalidArgument {
        /// Description of the problem.
        message: String,
    },

    /// Reading a directory or file, or writing a patch, failed.
    #[error("{message}")]
    Io {
        /// Description including the path involved.
        message: String,
        /// Underlying I/O error, when one exists.
        #[source]
        source: Option<Arc<io::Error>>,
    },

    /// The requested file-system mode has no backend.
    #[error("{mode} mode not supported")]
    UnsupportedMode {
        /// Rejected mode.
        mode: &'static str,
    },

    /// The command name is not part of the protocol.
    #[error("unknown command: {command}")]
    UnknownCommand {
        /// Name supplied by the client.
        command: String,
    },

    /// The request line is not a valid request envelope.
    #[error("malformed request: {message}")]
    MalformedRequest {
        /// Parser diagnostic.
        message: String,
    },

    /// The request line exceeds the configured size limit.
    #[error("request too large: {size} bytes exceeds {max_size} byte limit")]
    RequestTooLarge {
        /// Bytes read before giving up.
        size: usize,
        /// Configured limit.
        max_size: usize,
    },
}

impl CommandError {
    /// Creates a stage precondition error.
    pub fn state_precondition(command: &'static str, required: Stage, actual: Stage) -> Self {
        Self::StatePrecondition {
            command,
            required,
            actual,
        }
    }

    /// Creates a missing key error.
    pub fn missing_key(key: impl Into<String>) -> Self {
        Self::MissingKey { key: key.into() }
    }

    /// Creates an invalid enumeration error.
    pub fn invalid_enum(key: impl Into<String>, allowed: &'static str) -> Self {
        Self::InvalidEnum {
            key: key.into(),
            allowed,
        }
    }

    /// Creates an invalid type error.
    pub fn invalid_type(key: impl Into<String>, expected: &'static str) -> Self {
        Self::InvalidType {
            key: key.into(),
            expected,
        }
    }

    /// Creates an unknown transformation error.
    pub fn unknown_transformation(name: impl Into<String>) -> Self {
        Self::UnknownTransformation { name: name.into() }
    }

    /// Creates an invalid argument error.
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    /// Creates an I/O error carrying its source.
    pub fn io(message: impl Into<String>, source: io::Error) -> Self {
        Self::Io {
            message: message.into(),
            source: Some(Arc::new(source)),
        }
    }

    /// Creates an I/O error without an underlying source.
    pub fn io_message(message: impl Into<String>) -> Self {
        Self::Io {
            message: message.into(),
            source: None,
        }
    }

    /// Creates an unsupported mode error.
    pub fn unsupported_mode(mode: &'static str) -> Self {
        Self::UnsupportedMode { mode }
    }

    /// Creates an unknown command error.
    pub fn unknown_command(command: impl Into<String>) -> Self {
        Self::UnknownCommand {
            command: command.into(),
        }
    }

    /// Creates a malformed request error.
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::MalformedRequest {
            message: message.into(),
        }
    }

    /// Creates a request too large error.
    pub fn request_too_large(size: usize, max_size: usize) -> Self {
        Self::RequestTooLarge { size, max_size }
    }
}
