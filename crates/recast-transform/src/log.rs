//! Ordered log produced by a transformation run.
//!
//! Transformations never return errors directly; failures are recorded here
//! with [`Severity::Error`] and surfaced to the client in the reply.

/// Importance of a log entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Informational message.
    Info,
    /// Something the user should review.
    Warning,
    /// The transformation could not (fully) complete.
    Error,
}

/// A single message in a transformation log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    severity: Severity,
    message: String,
}

impl LogEntry {
    /// Creates an entry.
    #[must_use]
    pub fn new(severity: Severity, message: impl Into<String>) -> Self {
        Self {
            severity,
            message: message.into(),
        }
    }

    /// Severity of the entry.
    #[must_use]
    pub const fn severity(&self) -> Severity {
        self.severity
    }

    /// Message text.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Entries in the order they were recorded.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Log {
    entries: Vec<LogEntry>,
}

impl Log {
    /// Creates an empty log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an entry.
    pub fn push(&mut self, entry: LogEntry) {
        self.entries.push(entry);
    }

    /// Appends an informational entry.
    pub fn info(&mut self, message: impl Into<String>) {
        self.push(LogEntry::new(Severity::Info, message));
    }

    /// Appends a warning.
    pub fn warning(&mut self, message: impl Into<String>) {
        self.push(LogEntry::new(Severity::Warning, message));
    }

    /// Appends an error.
    pub fn error(&mut self, message: impl Into<String>) {
        self.push(LogEntry::new(Severity::Error, message));
    }

    /// Entries in recording order.
    #[must_use]
    pub fn entries(&self) -> &[LogEntry] {
        &self.entries
    }

    /// Returns `true` when any entry has [`Severity::Error`].
    #[must_use]
    pub fn contains_errors(&self) -> bool {
        self.entries
            .iter()
            .any(|entry| entry.severity() == Severity::Error)
    }

    /// Returns `true` when nothing was recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preserves_recording_order() {
        let mut log = Log::new();
        log.warning("first");
        log.info("second");
        log.error("third");

        let messages: Vec<_> = log.entries().iter().map(LogEntry::message).collect();
        assert_eq!(messages, ["first", "second", "third"]);
        assert!(log.contains_errors());
    }

    #[test]
    fn empty_log_has_no_errors() {
        let log = Log::new();
        assert!(log.is_empty());
        assert!(!log.contains_errors());
    }
}
