//! Types describing the text changes a transformation proposes.

/// A position within a text file.
///
/// Uses zero-based line and column offsets. Column offsets count UTF-8 bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Position {
    /// Line number (zero-based).
    pub line: u32,
    /// Column offset (zero-based, UTF-8 bytes).
    pub column: u32,
}

impl Position {
    /// Creates a new position.
    #[must_use]
    pub const fn new(line: u32, column: u32) -> Self {
        Self { line, column }
    }
}

/// A range within a text file, defined by start and end positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextRange {
    /// Start of the range (inclusive).
    pub start: Position,
    /// End of the range (exclusive).
    pub end: Position,
}

impl TextRange {
    /// Creates a new range from start to end.
    #[must_use]
    pub const fn new(start: Position, end: Position) -> Self {
        Self { start, end }
    }

    /// Creates a zero-length range at the given position.
    #[must_use]
    pub const fn point(position: Position) -> Self {
        Self {
            start: position,
            end: position,
        }
    }
}

/// A single text replacement within a file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextEdit {
    range: TextRange,
    new_text: String,
}

impl TextEdit {
    /// Builds a text edit from a range and replacement text.
    #[must_use]
    pub fn new(range: TextRange, new_text: impl Into<String>) -> Self {
        Self {
            range,
            new_text: new_text.into(),
        }
    }

    /// Builds a replacement between two positions.
    #[must_use]
    pub fn replace(start: Position, end: Position, new_text: impl Into<String>) -> Self {
        Self::new(TextRange::new(start, end), new_text)
    }

    /// Creates an insertion at the specified position.
    #[must_use]
    pub fn insert_at(position: Position, new_text: impl Into<String>) -> Self {
        Self::new(TextRange::point(position), new_text)
    }

    /// Creates a deletion spanning the given range.
    #[must_use]
    pub fn delete_range(start: Position, end: Position) -> Self {
        Self::new(TextRange::new(start, end), String::new())
    }

    /// Range being replaced.
    #[must_use]
    pub const fn range(&self) -> TextRange {
        self.range
    }

    /// Start of the replaced range.
    #[must_use]
    pub const fn start(&self) -> Position {
        self.range.start
    }

    /// End of the replaced range.
    #[must_use]
    pub const fn end(&self) -> Position {
        self.range.end
    }

    /// Replacement text.
    #[must_use]
    pub fn new_text(&self) -> &str {
        &self.new_text
    }
}

/// The edits a transformation computed for one file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditSet {
    edits: Vec<TextEdit>,
}

impl EditSet {
    /// Creates an empty edit set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an edit set from existing edits.
    #[must_use]
    pub fn with_edits(edits: Vec<TextEdit>) -> Self {
        Self { edits }
    }

    /// Adds an edit.
    pub fn add(&mut self, edit: TextEdit) {
        self.edits.push(edit);
    }

    /// Edits in insertion order.
    #[must_use]
    pub fn edits(&self) -> &[TextEdit] {
        &self.edits
    }

    /// Number of edits.
    #[must_use]
    pub fn len(&self) -> usize {
        self.edits.len()
    }

    /// Returns `true` when the set holds no edits.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.edits.is_empty()
    }
}

impl FromIterator<TextEdit> for EditSet {
    fn from_iter<I: IntoIterator<Item = TextEdit>>(iter: I) -> Self {
        Self::with_edits(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_is_zero_length() {
        let edit = TextEdit::insert_at(Position::new(5, 10), "hello");
        assert_eq!(edit.start(), edit.end());
        assert_eq!(edit.new_text(), "hello");
    }

    #[test]
    fn delete_has_empty_replacement() {
        let edit = TextEdit::delete_range(Position::new(1, 0), Position::new(3, 5));
        assert_eq!(edit.start(), Position::new(1, 0));
        assert_eq!(edit.end(), Position::new(3, 5));
        assert!(edit.new_text().is_empty());
    }

    #[test]
    fn positions_order_by_line_then_column() {
        assert!(Position::new(0, 9) < Position::new(1, 0));
        assert!(Position::new(2, 1) < Position::new(2, 4));
    }

    #[test]
    fn edit_set_collects_edits() {
        let set: EditSet = [
            TextEdit::insert_at(Position::new(0, 0), "a"),
            TextEdit::insert_at(Position::new(1, 0), "b"),
        ]
        .into_iter()
        .collect();
        assert_eq!(set.len(), 2);
        assert!(!set.is_empty());
    }
}
