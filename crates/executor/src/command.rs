//! Command parsing.
//!
//! A command is a whitespace-tokenized line: an upper-cased keyword plus a
//! fixed number of argument tokens. Keyword matching is case-insensitive;
//! arity is exact, with no optional arguments anywhere in the protocol.

use mirror_core::{MirrorError, MirrorResult};

/// One parsed command, ready to dispatch against the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Set { key: String, value: String },
    Get { key: String },
    Unset { key: String },
    Counts { value: String },
    Find { value: String },
    Begin,
    Commit,
    Rollback,
}

/// Required token count (keyword included) for a recognized keyword.
fn arity_of(keyword: &str) -> Option<usize> {
    match keyword {
        "SET" => Some(3),
        "GET" | "UNSET" | "COUNTS" | "FIND" => Some(2),
        "BEGIN" | "COMMIT" | "ROLLBACK" => Some(1),
        _ => None,
    }
}

impl Command {
    /// Parse a tokenized command line.
    ///
    /// # Errors
    ///
    /// - [`MirrorError::EmptyCommand`] when no tokens are supplied.
    /// - [`MirrorError::UnknownCommand`] for an unrecognized keyword.
    /// - [`MirrorError::ArityMismatch`] for a recognized keyword with the
    ///   wrong token count.
    pub fn parse<S: AsRef<str>>(tokens: &[S]) -> MirrorResult<Self> {
        let first = tokens.first().ok_or(MirrorError::EmptyCommand)?;
        let keyword = first.as_ref().to_ascii_uppercase();

        let expected = arity_of(&keyword).ok_or_else(|| {
            MirrorError::unknown_command(keyword.clone())
        })?;
        if tokens.len() != expected {
            return Err(MirrorError::arity(keyword, expected, tokens.len()));
        }

        let arg = |i: usize| tokens[i].as_ref().to_string();
        Ok(match keyword.as_str() {
            "SET" => Command::Set {
                key: arg(1),
                value: arg(2),
            },
            "GET" => Command::Get { key: arg(1) },
            "UNSET" => Command::Unset { key: arg(1) },
            "COUNTS" => Command::Counts { value: arg(1) },
            "FIND" => Command::Find { value: arg(1) },
            "BEGIN" => Command::Begin,
            "COMMIT" => Command::Commit,
            "ROLLBACK" => Command::Rollback,
            _ => unreachable!("arity_of admitted the keyword"),
        })
    }

    /// Protocol keyword for this command.
    pub fn keyword(&self) -> &'static str {
        match self {
            Command::Set { .. } => "SET",
            Command::Get { .. } => "GET",
            Command::Unset { .. } => "UNSET",
            Command::Counts { .. } => "COUNTS",
            Command::Find { .. } => "FIND",
            Command::Begin => "BEGIN",
            Command::Commit => "COMMIT",
            Command::Rollback => "ROLLBACK",
        }
    }
}
