//! Primary map, reverse index, and the transaction stack.
//!
//! # Design
//!
//! - Primary map: `FxHashMap<String, String>`, O(1) lookups.
//! - Reverse index: `FxHashMap<String, BTreeSet<String>>`. The BTreeSet keeps
//!   each value's key set in lexicographic order, so `find` is a plain
//!   in-order copy. Sets that become empty are removed eagerly; the index
//!   never holds an empty set.
//! - Transaction stack: `Vec<Frame>`, pushed by `begin`, popped by `commit`
//!   and `rollback`. Each frame owns a deep snapshot of both maps and the
//!   change log for its scope. Mutations log to the top frame's log only.

use std::collections::BTreeSet;

use mirror_core::{MirrorError, MirrorResult};
use rustc_hash::FxHashMap;
use tracing::debug;

use crate::log::TransactionLog;

type Primary = FxHashMap<String, String>;
type Reverse = FxHashMap<String, BTreeSet<String>>;

/// Deep copy of both maps, taken at BEGIN.
///
/// Later mutations to the live maps never touch a stored snapshot, which is
/// what makes ROLLBACK exact regardless of what ran in between.
#[derive(Debug, Clone)]
struct Snapshot {
    primary: Primary,
    reverse: Reverse,
}

/// One open transaction: the state to restore on rollback plus the changes
/// recorded while this frame is innermost.
#[derive(Debug)]
struct Frame {
    snapshot: Snapshot,
    log: TransactionLog,
}

/// In-memory key-value store with reverse lookup and nested transactions.
///
/// # Invariants
///
/// - For every key `k` with `primary[k] = v`, `k` is in `reverse[v]`, and
///   every member of `reverse[v]` maps to `v` in the primary map.
/// - The reverse index holds no empty sets.
///
/// # Thread Safety
///
/// None by design. `Store` is `Send` but has no interior locking; exactly
/// one logical caller must drive it, with each command fully applied before
/// the next begins.
#[derive(Debug, Default)]
pub struct Store {
    primary: Primary,
    reverse: Reverse,
    frames: Vec<Frame>,
}

impl Store {
    /// Create an empty store with no open transactions.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite a key.
    ///
    /// Maintains the reverse index on both sides of the write: the key is
    /// detached from its old value's set first (dropping the set if emptied),
    /// then attached to the new value's set. Logs `SET key value` to the
    /// current transaction, if any. Total; cannot fail.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();

        if let Some(old) = self.primary.get(&key) {
            let old = old.clone();
            Self::unlink(&mut self.reverse, &old, &key);
        }
        self.primary.insert(key.clone(), value.clone());
        self.reverse
            .entry(value.clone())
            .or_default()
            .insert(key.clone());

        if let Some(log) = self.current_log_mut() {
            log.record(format!("SET {key} {value}"));
        }
    }

    /// Remove a key.
    ///
    /// No-op when the key is absent — no state change and no log entry.
    /// Otherwise removes the key from both maps and logs `UNSET key` to the
    /// current transaction, if any. Total; cannot fail.
    pub fn unset(&mut self, key: &str) {
        if let Some(old) = self.primary.remove(key) {
            Self::unlink(&mut self.reverse, &old, key);

            if let Some(log) = self.current_log_mut() {
                log.record(format!("UNSET {key}"));
            }
        }
    }

    /// Look up a key's value, `None` when absent.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.primary.get(key).map(String::as_str)
    }

    /// Number of keys currently holding `value`; 0 when none.
    pub fn counts(&self, value: &str) -> usize {
        self.reverse.get(value).map_or(0, BTreeSet::len)
    }

    /// Keys currently holding `value`, ascending lexicographic order.
    ///
    /// Empty when no key holds the value; the formatting boundary decides
    /// how absence is rendered.
    pub fn find(&self, value: &str) -> Vec<String> {
        self.reverse
            .get(value)
            .map(|keys| keys.iter().cloned().collect())
            .unwrap_or_default()
    }

    /// Open a nested transaction.
    ///
    /// Pushes a frame holding a deep snapshot of both maps and a fresh log,
    /// then records `BEGIN` into that log. The new frame's log receives all
    /// subsequent change entries until the frame is popped or an inner BEGIN
    /// supersedes it.
    pub fn begin(&mut self) {
        let snapshot = Snapshot {
            primary: self.primary.clone(),
            reverse: self.reverse.clone(),
        };
        let mut log = TransactionLog::new();
        log.record("BEGIN");
        self.frames.push(Frame { snapshot, log });

        debug!(depth = self.frames.len(), "transaction started");
    }

    /// Close the innermost transaction, keeping its effects.
    ///
    /// The popped frame's snapshot is discarded — every mutation made while
    /// the frame was open stays live. Returns the frame's own change log:
    /// entries from inner transactions that already committed or rolled back
    /// are not merged in.
    ///
    /// # Errors
    ///
    /// [`MirrorError::NoActiveTransaction`] when no transaction is open;
    /// state is left untouched.
    pub fn commit(&mut self) -> MirrorResult<Vec<String>> {
        let frame = self.frames.pop().ok_or(MirrorError::NoActiveTransaction)?;

        debug!(
            depth = self.frames.len(),
            entries = frame.log.len(),
            "transaction committed"
        );
        Ok(frame.log.into_changes())
    }

    /// Close the innermost transaction, undoing its effects.
    ///
    /// Restores both maps from the popped frame's snapshot. That undoes
    /// everything since the matching BEGIN, including work done by inner
    /// transactions that committed in the meantime — committed inner frames
    /// only ever touched live state, never this frame's snapshot. Returns
    /// the frame's change log.
    ///
    /// # Errors
    ///
    /// [`MirrorError::NoActiveTransaction`] when no transaction is open;
    /// state is left untouched.
    pub fn rollback(&mut self) -> MirrorResult<Vec<String>> {
        let frame = self.frames.pop().ok_or(MirrorError::NoActiveTransaction)?;
        self.primary = frame.snapshot.primary;
        self.reverse = frame.snapshot.reverse;

        debug!(depth = self.frames.len(), "transaction rolled back");
        Ok(frame.log.into_changes())
    }

    /// Number of currently open transactions.
    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    /// Number of keys in the primary map.
    pub fn len(&self) -> usize {
        self.primary.len()
    }

    /// True when the primary map holds no keys.
    pub fn is_empty(&self) -> bool {
        self.primary.is_empty()
    }

    /// Detach `key` from `value`'s reverse-index set, dropping the set if it
    /// becomes empty.
    fn unlink(reverse: &mut Reverse, value: &str, key: &str) {
        if let Some(keys) = reverse.get_mut(value) {
            keys.remove(key);
            if keys.is_empty() {
                reverse.remove(value);
            }
        }
    }

    /// Log of the innermost open transaction, if any.
    fn current_log_mut(&mut self) -> Option<&mut TransactionLog> {
        self.frames.last_mut().map(|frame| &mut frame.log)
    }
}
