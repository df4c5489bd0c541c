//! Typed command results and their wire renderings.
//!
//! The engine knows nothing about sentinels or protocol strings; this is
//! where `None` becomes `NULL`, an empty FIND becomes `NONE`, and errors
//! become the exact strings the command protocol promises. Two renderings
//! exist: `Display` for plain text, and JSON payloads of the shape
//! `{result}` / `{result, changes}` / `{error}`.

use std::fmt;

use mirror_core::MirrorError;
use serde_json::{json, Value as Json};

/// Value absence sentinel for GET.
pub const NULL: &str = "NULL";
/// Empty-match sentinel for FIND.
pub const NONE: &str = "NONE";

/// Successful result of one command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Output {
    /// SET acknowledged.
    Set { key: String, value: String },
    /// GET result; `None` renders as the `NULL` sentinel.
    Value(Option<String>),
    /// UNSET acknowledged.
    Unset { key: String },
    /// COUNTS result.
    Count(usize),
    /// FIND result, ascending; empty renders as the `NONE` sentinel.
    Keys(Vec<String>),
    /// BEGIN acknowledged.
    Begun,
    /// COMMIT acknowledged, with the committed frame's change log.
    Committed(Vec<String>),
    /// ROLLBACK acknowledged, with the rolled-back frame's change log.
    RolledBack(Vec<String>),
}

impl Output {
    /// Change log attached to this result, if the command produced one.
    pub fn changes(&self) -> Option<&[String]> {
        match self {
            Output::Committed(changes) | Output::RolledBack(changes) => Some(changes),
            _ => None,
        }
    }

    /// JSON payload: `{"result": ...}` plus `"changes"` for COMMIT/ROLLBACK.
    pub fn to_json(&self) -> Json {
        match self {
            Output::Count(n) => json!({ "result": n }),
            Output::Keys(keys) if keys.is_empty() => json!({ "result": NONE }),
            Output::Keys(keys) => json!({ "result": keys }),
            Output::Committed(changes) | Output::RolledBack(changes) => {
                json!({ "result": self.to_string(), "changes": changes })
            }
            _ => json!({ "result": self.to_string() }),
        }
    }
}

impl fmt::Display for Output {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Output::Set { key, value } => write!(f, "Set {key} = {value}"),
            Output::Value(Some(value)) => f.write_str(value),
            Output::Value(None) => f.write_str(NULL),
            Output::Unset { key } => write!(f, "Unset {key}"),
            Output::Count(n) => write!(f, "{n}"),
            Output::Keys(keys) if keys.is_empty() => f.write_str(NONE),
            Output::Keys(keys) => f.write_str(&keys.join(" ")),
            Output::Begun => f.write_str("Transaction started"),
            Output::Committed(_) => f.write_str("Commit successful"),
            Output::RolledBack(_) => f.write_str("Rollback successful"),
        }
    }
}

/// Protocol string for an error.
///
/// Unknown keywords and arity mismatches collapse to the same
/// `Invalid command` rendering; the distinction survives in the error value
/// itself for callers that want it.
pub fn wire_error(err: &MirrorError) -> String {
    match err {
        MirrorError::EmptyCommand => "Empty command".to_string(),
        MirrorError::UnknownCommand { token } => format!("Invalid command: {token}"),
        MirrorError::ArityMismatch { command, .. } => format!("Invalid command: {command}"),
        MirrorError::NoActiveTransaction => "NO TRANSACTION".to_string(),
        MirrorError::Internal { message } => message.clone(),
    }
}

/// JSON payload for an error: `{"error": ...}`.
pub fn error_to_json(err: &MirrorError) -> Json {
    json!({ "error": wire_error(err) })
}
