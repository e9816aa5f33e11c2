//! Domain errors raised by the transformation contract helpers.
//!
//! I/O errors are wrapped in `Arc` so the enums stay cheap to clone into
//! replies and logs.

use std::path::PathBuf;
use std::sync::Arc;

use thiserror::Error;

/// Errors raised while applying an edit set to file content.
#[derive(Debug, Clone, Error)]
pub enum EditError {
    /// An edit refers to a line or column outside the original text.
    #[error("invalid position: line {line}, column {column}")]
    InvalidPosition {
        /// Zero-based line of the offending position.
        line: u32,
        /// Zero-based byte column of the offending position.
        column: u32,
    },

    /// An edit position splits a multi-byte character.
    #[error("position line {line}, column {column} is not on a character boundary")]
    NotCharBoundary {
        /// Zero-based line of the offending position.
        line: u32,
        /// Zero-based byte column of the offending position.
        column: u32,
    },

    /// An edit ends before it starts.
    #[error("edit range ends before it starts at line {line}, column {column}")]
    InvertedRange {
        /// Zero-based start line of the edit.
        line: u32,
        /// Zero-based start column of the edit.
        column: u32,
    },

    /// Two edits in the same set cover overlapping text.
    #[error("overlapping edits at line {line}, column {column}")]
    Overlapping {
        /// Zero-based start line of the later edit.
        line: u32,
        /// Zero-based start column of the later edit.
        column: u32,
    },

    /// The original file content could not be read.
    #[error("cannot read '{}': {source}", path.display())]
    Read {
        /// File that was read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: Arc<std::io::Error>,
    },
}

impl EditError {
    /// Wraps an I/O failure reading `path`.
    #[must_use]
    pub fn read(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Read {
            path: path.into(),
            source: Arc::new(source),
        }
    }
}

/// Errors raised when registering a transformation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// The short name was empty or whitespace.
    #[error("transformation short name must not be empty")]
    EmptyName,

    /// A transformation with the same short name already exists.
    #[error("transformation '{name}' is already registered")]
    Duplicate {
        /// Short name that was registered twice.
        name: String,
    },
}
