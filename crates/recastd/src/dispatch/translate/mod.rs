//! Translation of transformation results into reply records.
//!
//! Paths are reported relative to the session's working directory when the
//! file lives beneath it and as given otherwise.

mod patches;

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use recast_transform::{EditSet, FileSystem, FsChange, Log, Severity, apply_to_file};

pub(crate) use patches::write_patches;

use super::errors::CommandError;
use super::reply::{FileRecord, FsChangeRecord, LogRecord};

/// Renders `path` for the client.
pub(crate) fn display_path(working_dir: &Path, path: &Path) -> String {
    path.strip_prefix(working_dir)
        .unwrap_or(path)
        .display()
        .to_string()
}

/// Converts log entries, preserving their order.
pub(crate) fn log_records(log: &Log) -> Vec<LogRecord> {
    log.entries()
        .iter()
        .map(|entry| LogRecord {
            severity: severity_label(entry.severity()).to_owned(),
            message: entry.message().to_owned(),
        })
        .collect()
}

const fn severity_label(severity: Severity) -> &'static str {
    match severity {
        Severity::Info => "",
        Severity::Warning => "warning",
        Severity::Error => "error",
    }
}

/// Converts file-system directives, preserving their order.
pub(crate) fn fs_change_records(working_dir: &Path, changes: &[FsChange]) -> Vec<FsChangeRecord> {
    changes
        .iter()
        .map(|change| match change {
            FsChange::CreateFile { path, contents } => FsChangeRecord::Create {
                file: display_path(working_dir, path),
                content: contents.clone(),
            },
            FsChange::Remove { path } => FsChangeRecord::Delete {
                path: display_path(working_dir, path),
            },
            FsChange::Rename { path, new_name } => FsChangeRecord::Rename {
                from: display_path(working_dir, path),
                to: new_name.clone(),
            },
        })
        .collect()
}

/// Applies each edit set to its file's content without touching the file.
///
/// # Errors
///
/// Returns [`CommandError::Io`] for the first file that cannot be read or
/// edited.
pub(crate) fn content_records(
    file_system: &dyn FileSystem,
    working_dir: &Path,
    edits: &BTreeMap<PathBuf, EditSet>,
) -> Result<Vec<FileRecord>, CommandError> {
    edits
        .iter()
        .map(|(path, edit_set)| {
            let content = apply_to_file(file_system, path, edit_set)
                .map_err(|error| CommandError::io_message(error.to_string()))?;
            Ok(FileRecord::Content {
                filename: display_path(working_dir, path),
                content,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use std::io;

    use recast_transform::{Position, TextEdit, apply_edits};
    use rstest::rstest;

    use super::*;
    use crate::tests::support::MockFs;

    const SOURCE: &str = "package a\r\n\r\nfunc old() {}\r\n";

    fn rename_old() -> EditSet {
        EditSet::with_edits(vec![TextEdit::replace(
            Position::new(2, 5),
            Position::new(2, 8),
            "new",
        )])
    }

    #[rstest]
    #[case("/work", "/work/a.go", "a.go")]
    #[case("/work", "/work/pkg/b.go", "pkg/b.go")]
    #[case("/work", "/elsewhere/c.go", "/elsewhere/c.go")]
    fn reports_paths_relative_to_working_dir(
        #[case] working_dir: &str,
        #[case] path: &str,
        #[case] expected: &str,
    ) {
        assert_eq!(display_path(Path::new(working_dir), Path::new(path)), expected);
    }

    #[test]
    fn maps_severities_in_order() {
        let mut log = Log::new();
        log.error("bad");
        log.info("fine");
        log.warning("hmm");

        let severities: Vec<_> = log_records(&log)
            .into_iter()
            .map(|record| (record.severity, record.message))
            .collect();
        assert_eq!(
            severities,
            vec![
                ("error".to_owned(), "bad".to_owned()),
                (String::new(), "fine".to_owned()),
                ("warning".to_owned(), "hmm".to_owned()),
            ]
        );
    }

    #[test]
    fn converts_fs_changes() {
        let records = fs_change_records(
            Path::new("/work"),
            &[
                FsChange::CreateFile {
                    path: PathBuf::from("/work/new.go"),
                    contents: "package a\n".to_owned(),
                },
                FsChange::Remove {
                    path: PathBuf::from("/work/old.go"),
                },
                FsChange::Rename {
                    path: PathBuf::from("/work/x.go"),
                    new_name: "y.go".to_owned(),
                },
            ],
        );
        assert_eq!(
            records,
            vec![
                FsChangeRecord::Create {
                    file: "new.go".to_owned(),
                    content: "package a\n".to_owned(),
                },
                FsChangeRecord::Delete {
                    path: "old.go".to_owned(),
                },
                FsChangeRecord::Rename {
                    from: "x.go".to_owned(),
                    to: "y.go".to_owned(),
                },
            ]
        );
    }

    #[test]
    fn content_matches_direct_application() {
        let mut fs = MockFs::new();
        fs.expect_read_to_string()
            .withf(|path| path == Path::new("/work/a.go"))
            .returning(|_| Ok(SOURCE.to_owned()));
        let edits = BTreeMap::from([(PathBuf::from("/work/a.go"), rename_old())]);

        let records = content_records(&fs, Path::new("/work"), &edits).expect("apply edits");
        let expected = apply_edits(SOURCE, &rename_old()).expect("direct application");
        assert_eq!(
            records,
            vec![FileRecord::Content {
                filename: "a.go".to_owned(),
                content: expected,
            }]
        );
    }

    #[test]
    fn unreadable_file_is_an_io_error() {
        let mut fs = MockFs::new();
        fs.expect_read_to_string()
            .returning(|_| Err(io::Error::new(io::ErrorKind::NotFound, "gone")));
        let edits = BTreeMap::from([(PathBuf::from("/work/a.go"), rename_old())]);

        let error = content_records(&fs, Path::new("/work"), &edits).expect_err("unreadable");
        assert!(matches!(error, CommandError::Io { .. }));
    }
}
