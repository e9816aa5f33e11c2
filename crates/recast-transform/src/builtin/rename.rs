//! Whole-word rename of the identifier under the selection.
//!
//! The identifier is located at the selection's start position and every
//! whole-word occurrence in the same file is replaced by the first argument.
//! Occurrences inside strings and comments are renamed too; the transformation
//! is lexical, not semantic.

use std::ops::Range;

use crate::log::Log;
use crate::text::{EditSet, Position, TextEdit};
use crate::transformation::{
    Description, ParamValue, Parameter, Quality, Transformation, TransformationConfig,
    TransformationResult,
};

/// Renames an identifier throughout the selected file.
#[derive(Debug, Default, Clone, Copy)]
pub struct Rename;

impl Transformation for Rename {
    fn description(&self) -> Description {
        Description::new("Rename", Quality::Production).with_param(Parameter::new(
            "New Name:",
            "What to rename this identifier to.",
            ParamValue::Text(String::new()),
        ))
    }

    fn run(&self, config: &TransformationConfig) -> TransformationResult {
        let mut log = Log::new();
        let mut result = TransformationResult::new();
        if let Some(edits) = plan(config, &mut log) {
            result
                .edits
                .insert(config.selection.filename().to_path_buf(), edits);
        }
        result.log = log;
        result
    }
}

/// Computes the rename edits, recording any problem in `log`.
fn plan(config: &TransformationConfig, log: &mut Log) -> Option<EditSet> {
    let Some(new_name) = config.args.first().and_then(serde_json::Value::as_str) else {
        log.error("rename requires the new name as its first argument");
        return None;
    };
    if !is_identifier(new_name) {
        log.error(format!("'{new_name}' is not a valid identifier"));
        return None;
    }

    let selection = &config.selection;
    let content = match config.file_system.read_to_string(selection.filename()) {
        Ok(content) => content,
        Err(error) => {
            log.error(format!(
                "cannot read {}: {error}",
                selection.filename().display()
            ));
            return None;
        }
    };

    let Some(old_name) = identifier_at(&content, selection.start_line(), selection.start_col())
    else {
        log.error(format!(
            "no identifier at line {}, column {}",
            selection.start_line(),
            selection.start_col()
        ));
        return None;
    };
    if old_name == new_name {
        log.info(format!("'{old_name}' already has that name"));
        return None;
    }

    let Some(edits) = occurrences(&content, old_name)
        .map(|(line, columns)| {
            let start = position(line, columns.start)?;
            let end = position(line, columns.end)?;
            Some(TextEdit::replace(start, end, new_name))
        })
        .collect::<Option<EditSet>>()
    else {
        log.error("file is too large to rename in");
        return None;
    };

    log.info(format!(
        "renamed {} occurrence(s) of '{old_name}' to '{new_name}'",
        edits.len()
    ));
    Some(edits)
}

fn is_identifier_char(c: char) -> bool {
    c == '_' || c.is_alphanumeric()
}

fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    chars
        .next()
        .is_some_and(|first| first == '_' || first.is_alphabetic())
        && chars.all(is_identifier_char)
}

/// Finds the identifier touching the one-based `line`/`col` position.
fn identifier_at(content: &str, line: u32, col: u32) -> Option<&str> {
    let line_idx = usize::try_from(line.checked_sub(1)?).ok()?;
    let col_idx = usize::try_from(col.checked_sub(1)?).ok()?;
    let text = content.split('\n').nth(line_idx)?;
    if col_idx > text.len() || !text.is_char_boundary(col_idx) {
        return None;
    }

    let (before, after) = text.split_at(col_idx);
    let start = col_idx
        - before
            .chars()
            .rev()
            .take_while(|c| is_identifier_char(*c))
            .map(char::len_utf8)
            .sum::<usize>();
    let end = col_idx
        + after
            .chars()
            .take_while(|c| is_identifier_char(*c))
            .map(char::len_utf8)
            .sum::<usize>();

    let word = text.get(start..end)?;
    is_identifier(word).then_some(word)
}

/// Yields `(zero-based line, byte columns)` for each whole-word occurrence.
fn occurrences<'a>(
    content: &'a str,
    word: &'a str,
) -> impl Iterator<Item = (usize, Range<usize>)> + 'a {
    content.split('\n').enumerate().flat_map(move |(line, text)| {
        text.match_indices(word)
            .filter(move |(start, _)| {
                let preceded = text
                    .get(..*start)
                    .and_then(|head| head.chars().next_back())
                    .is_some_and(is_identifier_char);
                let followed = text
                    .get(start + word.len()..)
                    .and_then(|tail| tail.chars().next())
                    .is_some_and(is_identifier_char);
                !preceded && !followed
            })
            .map(move |(start, _)| (line, start..start + word.len()))
    })
}

fn position(line: usize, column: usize) -> Option<Position> {
    Some(Position::new(
        u32::try_from(line).ok()?,
        u32::try_from(column).ok()?,
    ))
}
