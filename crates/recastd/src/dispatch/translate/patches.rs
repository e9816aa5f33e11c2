//! Patch-mode output: unified diffs written beside the edited files.
//!
//! Writing is two-phase. Every diff is rendered and staged in a temporary
//! file in its target's directory first; only when all of them are staged are
//! they persisted to `<file>.diff`. A failure while persisting restores the
//! diff files already written to their previous state.

use std::collections::BTreeMap;
use std::ffi::OsString;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use recast_transform::{EditSet, FileSystem, Patch};
use tempfile::NamedTempFile;
use tracing::{debug, warn};

use super::display_path;
use crate::dispatch::errors::CommandError;
use crate::dispatch::reply::FileRecord;
use crate::dispatch::router::DISPATCH_TARGET;

const DIFF_EXTENSION: &str = ".diff";

/// A rendered diff waiting to be persisted.
#[derive(Debug)]
struct StagedPatch {
    filename: String,
    target: PathBuf,
    temp_file: NamedTempFile,
}

/// A persisted diff and what it replaced.
#[derive(Debug)]
struct WrittenPatch {
    target: PathBuf,
    previous: Option<Vec<u8>>,
}

/// Renders and persists a diff for every edited file.
///
/// Files are processed in path order. The returned records name each file
/// and its diff, relative to `working_dir` where possible.
///
/// # Errors
///
/// Returns [`CommandError::Io`] when a file cannot be read or edited, or when
/// a diff cannot be staged or persisted. No diff files are left behind by a
/// failed call.
pub(crate) fn write_patches(
    file_system: &dyn FileSystem,
    working_dir: &Path,
    edits: &BTreeMap<PathBuf, EditSet>,
) -> Result<Vec<FileRecord>, CommandError> {
    let staged = edits
        .iter()
        .map(|(path, edit_set)| stage_patch(file_system, working_dir, path, edit_set))
        .collect::<Result<Vec<_>, _>>()?;

    let records = staged
        .iter()
        .map(|patch| FileRecord::Patch {
            filename: patch.filename.clone(),
            patch_file: display_path(working_dir, &patch.target),
        })
        .collect();

    persist_all(staged)?;
    Ok(records)
}

fn diff_path(path: &Path) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(DIFF_EXTENSION);
    PathBuf::from(name)
}

fn stage_patch(
    file_system: &dyn FileSystem,
    working_dir: &Path,
    path: &Path,
    edit_set: &EditSet,
) -> Result<StagedPatch, CommandError> {
    let patch = Patch::for_file(file_system, path, edit_set)
        .map_err(|error| CommandError::io_message(error.to_string()))?;
    let filename = display_path(working_dir, path);
    let target = diff_path(path);

    let parent = target.parent().unwrap_or_else(|| Path::new("."));
    let mut temp_file = NamedTempFile::new_in(parent)
        .map_err(|error| stage_error(&target, error))?;
    patch
        .write(&filename, &filename, &mut temp_file)
        .and_then(|()| temp_file.flush())
        .map_err(|error| stage_error(&target, error))?;

    debug!(
        target: DISPATCH_TARGET,
        file = %path.display(),
        edits = edit_set.len(),
        "patch staged"
    );
    Ok(StagedPatch {
        filename,
        target,
        temp_file,
    })
}

fn stage_error(target: &Path, error: io::Error) -> CommandError {
    CommandError::io(
        format!("cannot stage patch {}: {error}", target.display()),
        error,
    )
}

/// Persists staged diffs, undoing earlier writes if one fails.
fn persist_all(staged: Vec<StagedPatch>) -> Result<(), CommandError> {
    let mut written: Vec<WrittenPatch> = Vec::with_capacity(staged.len());

    for patch in staged {
        let previous = match fs::read(&patch.target) {
            Ok(bytes) => Some(bytes),
            Err(error) if error.kind() == io::ErrorKind::NotFound => None,
            Err(error) => {
                rollback(&written);
                return Err(persist_error(&patch.target, error));
            }
        };
        if let Err(error) = patch.temp_file.persist(&patch.target) {
            rollback(&written);
            return Err(persist_error(&patch.target, error.error));
        }
        written.push(WrittenPatch {
            target: patch.target,
            previous,
        });
    }

    Ok(())
}

fn persist_error(target: &Path, error: io::Error) -> CommandError {
    CommandError::io(
        format!("cannot write patch {}: {error}", target.display()),
        error,
    )
}

/// Best effort: keeps going when an individual restore fails.
fn rollback(written: &[WrittenPatch]) {
    for patch in written.iter().rev() {
        let outcome = match &patch.previous {
            Some(bytes) => fs::write(&patch.target, bytes),
            None => fs::remove_file(&patch.target),
        };
        if let Err(error) = outcome {
            warn!(
                target: DISPATCH_TARGET,
                file = %patch.target.display(),
                %error,
                "failed to roll back patch"
            );
        }
    }
}
