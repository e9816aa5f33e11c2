//! Text selection passed to transformations.

use std::path::{Path, PathBuf};

/// A region of one source file, expressed in one-based coordinates.
///
/// Columns count UTF-8 bytes. The end position is inclusive of the character
/// it names, matching the way editors report a highlighted range.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    filename: PathBuf,
    start_line: u32,
    start_col: u32,
    end_line: u32,
    end_col: u32,
}

impl Selection {
    /// Creates a selection covering `start_line:start_col` to
    /// `end_line:end_col` in `filename`.
    #[must_use]
    pub fn new(
        filename: impl Into<PathBuf>,
        start_line: u32,
        start_col: u32,
        end_line: u32,
        end_col: u32,
    ) -> Self {
        Self {
            filename: filename.into(),
            start_line,
            start_col,
            end_line,
            end_col,
        }
    }

    /// File the selection refers to.
    #[must_use]
    pub fn filename(&self) -> &Path {
        &self.filename
    }

    /// First selected line (one-based).
    #[must_use]
    pub const fn start_line(&self) -> u32 {
        self.start_line
    }

    /// First selected column (one-based).
    #[must_use]
    pub const fn start_col(&self) -> u32 {
        self.start_col
    }

    /// Last selected line (one-based).
    #[must_use]
    pub const fn end_line(&self) -> u32 {
        self.end_line
    }

    /// Last selected column (one-based).
    #[must_use]
    pub const fn end_col(&self) -> u32 {
        self.end_col
    }
}
