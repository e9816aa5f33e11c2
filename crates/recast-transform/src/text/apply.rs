//! Text edit application utilities.
//!
//! Edits are resolved to byte offsets against the original content, checked
//! for overlap and then spliced from the end of the file towards the start so
//! earlier offsets stay valid. Both LF and CRLF line endings are handled.

use std::path::Path;

use crate::error::EditError;
use crate::fs::FileSystem;
use crate::text::edit::{EditSet, Position, TextEdit};

/// Applies an edit set to the original content and returns the edited text.
///
/// Insertions at the same position keep the order in which they appear in the
/// edit set.
///
/// # Errors
///
/// Returns [`EditError`] when an edit lies outside the text, splits a
/// character, ends before it starts or overlaps another edit.
pub fn apply_edits(original: &str, edits: &EditSet) -> Result<String, EditError> {
    let line_starts = compute_line_start_offsets(original);
    let mut resolved = edits
        .edits()
        .iter()
        .enumerate()
        .map(|(index, edit)| ResolvedEdit::resolve(&line_starts, original, index, edit))
        .collect::<Result<Vec<_>, _>>()?;

    resolved.sort_by(|a, b| {
        b.start
            .cmp(&a.start)
            .then_with(|| b.end.cmp(&a.end))
            .then_with(|| b.index.cmp(&a.index))
    });

    let mut result = original.to_owned();
    let mut limit = original.len();
    for item in resolved {
        if item.end > limit {
            let start = item.edit.start();
            return Err(EditError::Overlapping {
                line: start.line,
                column: start.column,
            });
        }
        result.replace_range(item.start..item.end, item.edit.new_text());
        limit = item.start;
    }

    Ok(result)
}

/// Reads `path` through `fs` and applies the edit set to its content.
///
/// The file itself is left untouched.
///
/// # Errors
///
/// Returns [`EditError::Read`] when the file cannot be read, or any error
/// produced by [`apply_edits`].
pub fn apply_to_file(
    fs: &dyn FileSystem,
    path: &Path,
    edits: &EditSet,
) -> Result<String, EditError> {
    let original = fs
        .read_to_string(path)
        .map_err(|source| EditError::read(path, source))?;
    apply_edits(&original, edits)
}

struct ResolvedEdit<'a> {
    start: usize,
    end: usize,
    index: usize,
    edit: &'a TextEdit,
}

impl<'a> ResolvedEdit<'a> {
    fn resolve(
        line_starts: &[usize],
        content: &str,
        index: usize,
        edit: &'a TextEdit,
    ) -> Result<Self, EditError> {
        if edit.end() < edit.start() {
            return Err(EditError::InvertedRange {
                line: edit.start().line,
                column: edit.start().column,
            });
        }
        let start = position_to_offset(line_starts, content, edit.start())?;
        let end = position_to_offset(line_starts, content, edit.end())?;
        Ok(Self {
            start,
            end,
            index,
            edit,
        })
    }
}

/// Computes the byte offset of each line start in the original content.
fn compute_line_start_offsets(content: &str) -> Vec<usize> {
    let mut offsets = vec![0];
    for (idx, byte) in content.bytes().enumerate() {
        if byte == b'\n' {
            offsets.push(idx + 1);
        }
    }
    offsets
}

/// Converts a position to a byte offset in the original text.
///
/// A column may point one past the last character of a line (end-of-line
/// positions) but never into the line terminator.
fn position_to_offset(
    line_starts: &[usize],
    content: &str,
    position: Position,
) -> Result<usize, EditError> {
    let invalid = || EditError::InvalidPosition {
        line: position.line,
        column: position.column,
    };
    let line_idx = usize::try_from(position.line).map_err(|_| invalid())?;
    let column = usize::try_from(position.column).map_err(|_| invalid())?;

    let line_start = *line_starts.get(line_idx).ok_or_else(invalid)?;
    let line_end = line_starts
        .get(line_idx + 1)
        .copied()
        .unwrap_or(content.len());

    let bytes = content.as_bytes();
    let mut content_end = line_end;
    if content_end > line_start && bytes.get(content_end - 1) == Some(&b'\n') {
        content_end -= 1;
        if content_end > line_start && bytes.get(content_end - 1) == Some(&b'\r') {
            content_end -= 1;
        }
    }

    if column > content_end - line_start {
        return Err(invalid());
    }
    let offset = line_start + column;
    if !content.is_char_boundary(offset) {
        return Err(EditError::NotCharBoundary {
            line: position.line,
            column: position.column,
        });
    }
    Ok(offset)
}
