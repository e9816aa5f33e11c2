//! Unified diff rendering for edit sets.

use std::io::{self, Write};
use std::path::Path;

use similar::TextDiff;

use crate::error::EditError;
use crate::fs::FileSystem;
use crate::text::apply::apply_edits;
use crate::text::edit::EditSet;

/// Lines of unchanged context around each hunk.
const CONTEXT_LINES: usize = 3;

/// The difference between a file's original and edited content.
///
/// The patch keeps both versions and renders the unified diff on demand, so
/// the header names can be chosen at write time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Patch {
    original: String,
    edited: String,
}

impl Patch {
    /// Creates a patch between two versions of a text.
    #[must_use]
    pub fn new(original: impl Into<String>, edited: impl Into<String>) -> Self {
        Self {
            original: original.into(),
            edited: edited.into(),
        }
    }

    /// Builds the patch that applying `edits` to `original` would produce.
    ///
    /// # Errors
    ///
    /// Returns [`EditError`] when the edits cannot be applied.
    pub fn from_edits(original: &str, edits: &EditSet) -> Result<Self, EditError> {
        let edited = apply_edits(original, edits)?;
        Ok(Self::new(original, edited))
    }

    /// Reads `path` through `fs` and builds the patch for `edits`.
    ///
    /// # Errors
    ///
    /// Returns [`EditError::Read`] when the file cannot be read, or the error
    /// raised while applying the edits.
    pub fn for_file(fs: &dyn FileSystem, path: &Path, edits: &EditSet) -> Result<Self, EditError> {
        let original = fs
            .read_to_string(path)
            .map_err(|source| EditError::read(path, source))?;
        Self::from_edits(&original, edits)
    }

    /// Returns `true` when both versions are identical.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.original == self.edited
    }

    /// Edited content.
    #[must_use]
    pub fn edited(&self) -> &str {
        &self.edited
    }

    /// Renders the unified diff with the given header names.
    ///
    /// An empty patch renders as an empty string.
    #[must_use]
    pub fn render(&self, old_name: &str, new_name: &str) -> String {
        TextDiff::from_lines(self.original.as_str(), self.edited.as_str())
            .unified_diff()
            .context_radius(CONTEXT_LINES)
            .header(old_name, new_name)
            .to_string()
    }

    /// Writes the unified diff to `writer`.
    ///
    /// # Errors
    ///
    /// Returns the writer's I/O error.
    pub fn write<W: Write>(&self, old_name: &str, new_name: &str, mut writer: W) -> io::Result<()> {
        writer.write_all(self.render(old_name, new_name).as_bytes())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::text::edit::{Position, TextEdit};

    fn rename_edits() -> EditSet {
        EditSet::with_edits(vec![TextEdit::replace(
            Position::new(2, 5),
            Position::new(2, 8),
            "bar",
        )])
    }

    #[test]
    fn renders_unified_diff_with_headers() {
        let patch = Patch::from_edits("package a\n\nfunc foo() {}\n", &rename_edits())
            .expect("build patch");
        let rendered = patch.render("a.go", "a.go");

        assert!(rendered.starts_with("--- a.go\n+++ a.go\n"));
        assert!(rendered.contains("@@ -1,3 +1,3 @@"));
        assert!(rendered.contains("-func foo() {}\n"));
        assert!(rendered.contains("+func bar() {}\n"));
    }

    #[test]
    fn empty_patch_renders_nothing() {
        let patch = Patch::new("same\n", "same\n");
        assert!(patch.is_empty());
        assert_eq!(patch.render("x", "x"), "");
    }

    #[test]
    fn write_matches_render() {
        let patch = Patch::new("one\n", "two\n");
        let mut output = Vec::new();
        patch.write("f.txt", "f.txt", &mut output).expect("write patch");
        assert_eq!(
            String::from_utf8(output).expect("utf8"),
            patch.render("f.txt", "f.txt")
        );
    }

    #[test]
    fn invalid_edits_are_reported() {
        let edits = EditSet::with_edits(vec![TextEdit::insert_at(Position::new(9, 0), "x")]);
        assert!(Patch::from_edits("short\n", &edits).is_err());
    }
}
