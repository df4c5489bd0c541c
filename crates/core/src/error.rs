//! Error taxonomy shared across the workspace.
//!
//! All failures are values. A command that cannot be parsed, or a COMMIT with
//! no open transaction, produces an error the caller renders and moves past;
//! nothing here ever unwinds through the dispatch loop.

use serde::Serialize;
use thiserror::Error;

/// Result alias used throughout the workspace.
pub type MirrorResult<T> = Result<T, MirrorError>;

/// Every failure the command surface can produce.
///
/// `UnknownCommand` and `ArityMismatch` are distinct variants (tests and
/// tracing care about the difference) even though both render identically
/// on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
pub enum MirrorError {
    /// No tokens were supplied at all.
    #[error("empty command")]
    EmptyCommand,

    /// First token is not a recognized command keyword.
    #[error("unrecognized command keyword: {token}")]
    UnknownCommand {
        /// The offending keyword, upper-cased.
        token: String,
    },

    /// Recognized keyword, wrong number of tokens.
    #[error("{command} takes {expected} token(s), got {got}")]
    ArityMismatch {
        /// The recognized keyword, upper-cased.
        command: String,
        /// Tokens the command requires, keyword included.
        expected: usize,
        /// Tokens actually supplied.
        got: usize,
    },

    /// COMMIT or ROLLBACK with no open transaction frame.
    ///
    /// A usage signal, not a data-integrity fault; state is untouched.
    #[error("no active transaction")]
    NoActiveTransaction,

    /// Unexpected runtime fault surfaced as a value.
    ///
    /// Safety net only: engine operations are total and no current code
    /// path constructs this.
    #[error("internal fault: {message}")]
    Internal { message: String },
}

impl MirrorError {
    /// Unrecognized keyword error.
    pub fn unknown_command(token: impl Into<String>) -> Self {
        MirrorError::UnknownCommand {
            token: token.into(),
        }
    }

    /// Wrong token count for a recognized keyword.
    pub fn arity(command: impl Into<String>, expected: usize, got: usize) -> Self {
        MirrorError::ArityMismatch {
            command: command.into(),
            expected,
            got,
        }
    }

    /// Internal fault carrying a message.
    pub fn internal(message: impl Into<String>) -> Self {
        MirrorError::Internal {
            message: message.into(),
        }
    }
}
