//! Per-transaction change log.

/// Append-only record of the changes made inside one transaction frame.
///
/// Scoped to exactly one frame: created at BEGIN, handed back to the caller
/// when the frame is popped by COMMIT or ROLLBACK. Entries are never removed
/// individually; the whole log goes away with its frame.
#[derive(Debug, Clone, Default)]
pub struct TransactionLog {
    changes: Vec<String>,
}

impl TransactionLog {
    /// Create an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one change entry.
    pub fn record(&mut self, entry: impl Into<String>) {
        self.changes.push(entry.into());
    }

    /// Copy of the entries in insertion order.
    ///
    /// Copy-on-read lets a caller keep the history after the owning frame
    /// has been destroyed.
    pub fn changes(&self) -> Vec<String> {
        self.changes.clone()
    }

    /// Consume the log, yielding the entries in insertion order.
    pub fn into_changes(self) -> Vec<String> {
        self.changes
    }

    /// Number of recorded entries.
    pub fn len(&self) -> usize {
        self.changes.len()
    }

    /// True when nothing has been recorded yet.
    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }
}
