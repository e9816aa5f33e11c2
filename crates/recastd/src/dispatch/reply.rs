//! Reply model and JSONL serialisation.
//!
//! A reply is always an object with `reply` set to `"OK"` or `"Error"`.
//! Command-specific keys are omitted when the command does not produce them,
//! and `message` appears only on Error replies.

use std::io::{self, Write};

use serde::{Deserialize, Serialize};

use recast_transform::ParamValue;

/// Outcome marker carried by every reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReplyStatus {
    /// The command succeeded.
    #[serde(rename = "OK")]
    Ok,
    /// The command was rejected or failed.
    #[serde(rename = "Error")]
    Error,
}

/// One registered transformation, as listed by `list`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransformationSummary {
    /// Registry key used by `params` and `xrun`.
    #[serde(rename = "shortName")]
    pub short_name: String,
    /// Display name.
    pub name: String,
}

/// One transformation parameter, as described by `params`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParamDescriptor {
    /// Short label.
    pub label: String,
    /// Question shown to the user.
    pub prompt: String,
    /// Type of the default value: `string`, `bool` or `int`.
    #[serde(rename = "type")]
    pub kind: &'static str,
    /// Default value.
    pub default: ParamValue,
}

/// A transformation log entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogRecord {
    /// Empty for informational entries, otherwise `warning` or `error`.
    pub severity: String,
    /// Entry text.
    pub message: String,
}

/// Per-file output of `xrun`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FileRecord {
    /// A diff was written beside the file.
    Patch {
        /// Edited file.
        filename: String,
        /// Path of the written diff.
        #[serde(rename = "patchFile")]
        patch_file: String,
    },
    /// The edited content is returned inline.
    Content {
        /// Edited file.
        filename: String,
        /// Full content after applying the edits.
        content: String,
    },
}

/// A file-system change the client should apply.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "change", rename_all = "snake_case")]
pub enum FsChangeRecord {
    /// Create a file.
    Create {
        /// File to create.
        file: String,
        /// Initial content.
        content: String,
    },
    /// Delete a file or directory.
    Delete {
        /// Path to delete.
        path: String,
    },
    /// Rename a file or directory.
    Rename {
        /// Existing path.
        from: String,
        /// New name.
        to: String,
    },
}

/// Reply to one command.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Reply {
    /// Success marker.
    pub reply: ReplyStatus,
    /// Text returned by `about`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    /// Transformations returned by `list`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transformations: Option<Vec<TransformationSummary>>,
    /// Parameters returned by `params`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub params: Option<Vec<ParamDescriptor>>,
    /// Transformation display name returned by `xrun`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Transformation log returned by `xrun`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log: Option<Vec<LogRecord>>,
    /// Patched or materialised files returned by `xrun`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub files: Option<Vec<FileRecord>>,
    /// File-system changes returned by `xrun`. Never an empty list.
    #[serde(rename = "fsChanges", skip_serializing_if = "Option::is_none")]
    pub fs_changes: Option<Vec<FsChangeRecord>>,
    /// Error description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl Reply {
    fn with_status(reply: ReplyStatus) -> Self {
        Self {
            reply,
            text: None,
            transformations: None,
            params: None,
            description: None,
            log: None,
            files: None,
            fs_changes: None,
            message: None,
        }
    }

    /// A bare success reply.
    pub fn ok() -> Self {
        Self::with_status(ReplyStatus::Ok)
    }

    /// An error reply carrying `message`.
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            message: Some(message.into()),
            ..Self::with_status(ReplyStatus::Error)
        }
    }

    /// Returns `true` for success replies.
    pub fn is_ok(&self) -> bool {
        self.reply == ReplyStatus::Ok
    }

    /// Sets the `about` text.
    #[must_use]
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Sets the transformation list.
    #[must_use]
    pub fn with_transformations(mut self, transformations: Vec<TransformationSummary>) -> Self {
        self.transformations = Some(transformations);
        self
    }

    /// Sets the parameter list.
    #[must_use]
    pub fn with_params(mut self, params: Vec<ParamDescriptor>) -> Self {
        self.params = Some(params);
        self
    }

    /// Sets the transformation display name.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the transformation log.
    #[must_use]
    pub fn with_log(mut self, log: Vec<LogRecord>) -> Self {
        self.log = Some(log);
        self
    }

    /// Sets the file records.
    #[must_use]
    pub fn with_files(mut self, files: Vec<FileRecord>) -> Self {
        self.files = Some(files);
        self
    }

    /// Sets the file-system changes; an empty list leaves the key absent.
    #[must_use]
    pub fn with_fs_changes(mut self, changes: Vec<FsChangeRecord>) -> Self {
        self.fs_changes = (!changes.is_empty()).then_some(changes);
        self
    }
}

/// Writes replies to a stream, one JSON object per line.
pub struct ReplyWriter<W> {
    writer: W,
}

impl<W: Write> ReplyWriter<W> {
    /// Wraps an output stream.
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Writes `reply` followed by a newline and flushes the stream.
    ///
    /// # Errors
    ///
    /// Returns an error if serialisation, writing or flushing fails.
    pub fn write_reply(&mut self, reply: &Reply) -> io::Result<()> {
        serde_json::to_writer(&mut self.writer, reply)?;
        self.writer.write_all(b"\n")?;
        self.writer.flush()
    }
}
