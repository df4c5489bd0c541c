//! In-memory key-value engine with a reverse index and nested transactions.
//!
//! The engine is two structures kept incrementally consistent — a primary
//! `key -> value` map and a reverse `value -> keys` index — plus a LIFO stack
//! of transaction frames. Each BEGIN pushes a frame holding a deep snapshot
//! of both structures and a fresh change log; ROLLBACK restores the snapshot,
//! COMMIT discards it. Either way the popped frame's log is handed back to
//! the caller.
//!
//! # Design
//!
//! - Single-threaded by construction: `Store` is a plain owned value with no
//!   interior locking. A transport that shares one instance across callers
//!   must serialize full command cycles itself.
//! - Snapshots are full copies. BEGIN and ROLLBACK are O(size); everything
//!   else is O(1) amortized, except `find` which is O(k) over matching keys.

pub mod log;
pub mod store;

pub use log::TransactionLog;
pub use store::Store;
