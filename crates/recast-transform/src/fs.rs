//! File-system abstraction seen by transformations.
//!
//! The session binds one [`FileSystem`] handle when its working directory is
//! configured. Only the local backend exists; transformations read through the
//! handle so tests can substitute a double.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Read access to the files a transformation operates on.
pub trait FileSystem: Send + Sync {
    /// Lists the entries of a directory.
    ///
    /// # Errors
    ///
    /// Returns the underlying I/O error when the directory does not exist or
    /// cannot be read.
    fn read_dir(&self, path: &Path) -> io::Result<Vec<PathBuf>>;

    /// Reads a file as UTF-8 text.
    ///
    /// # Errors
    ///
    /// Returns the underlying I/O error when the file cannot be read or is not
    /// valid UTF-8.
    fn read_to_string(&self, path: &Path) -> io::Result<String>;
}

/// [`FileSystem`] backed by the host's disk.
#[derive(Debug, Default, Clone, Copy)]
pub struct LocalFileSystem;

impl LocalFileSystem {
    /// Creates a local file-system handle.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl FileSystem for LocalFileSystem {
    fn read_dir(&self, path: &Path) -> io::Result<Vec<PathBuf>> {
        let mut entries = fs::read_dir(path)?
            .map(|entry| entry.map(|item| item.path()))
            .collect::<io::Result<Vec<_>>>()?;
        entries.sort();
        Ok(entries)
    }

    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        fs::read_to_string(path)
    }
}

/// A non-textual change requested by a transformation.
///
/// The protocol engine reports these to the client rather than performing
/// them; the client decides how to apply them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FsChange {
    /// Create a new file with the given contents.
    CreateFile {
        /// Path of the file to create.
        path: PathBuf,
        /// Initial contents.
        contents: String,
    },
    /// Delete a file or directory.
    Remove {
        /// Path to delete.
        path: PathBuf,
    },
    /// Rename a file or directory in place.
    Rename {
        /// Path being renamed.
        path: PathBuf,
        /// New final path component.
        new_name: String,
    },
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    #[test]
    fn read_dir_lists_entries_sorted() {
        let dir = TempDir::new().expect("temp dir");
        fs::write(dir.path().join("b.txt"), "b").expect("write b");
        fs::write(dir.path().join("a.txt"), "a").expect("write a");

        let entries = LocalFileSystem::new()
            .read_dir(dir.path())
            .expect("read dir");
        assert_eq!(
            entries,
            vec![dir.path().join("a.txt"), dir.path().join("b.txt")]
        );
    }

    #[test]
    fn read_dir_fails_for_missing_directory() {
        let dir = TempDir::new().expect("temp dir");
        let missing = dir.path().join("absent");
        assert!(LocalFileSystem::new().read_dir(&missing).is_err());
    }

    #[test]
    fn read_to_string_returns_content() {
        let dir = TempDir::new().expect("temp dir");
        let path = dir.path().join("main.go");
        fs::write(&path, "package main\n").expect("write");

        let content = LocalFileSystem::new()
            .read_to_string(&path)
            .expect("read file");
        assert_eq!(content, "package main\n");
    }
}
