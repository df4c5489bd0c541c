//! Command execution layer for the mirrordb store.
//!
//! One synchronous entry point: a tokenized (or raw) command line goes in,
//! a typed result comes out. Parsing, arity checking, dispatch to the one
//! matching [`Store`] operation, and result shaping all live here; transports
//! (REPL, scripts, anything else) stay thin.
//!
//! Every failure is a returned value. A bad command never terminates the
//! dispatch loop driving this executor.

pub mod command;
pub mod output;

pub use command::Command;
pub use output::{error_to_json, wire_error, Output, NONE, NULL};

use mirror_core::MirrorResult;
use mirror_engine::Store;
use tracing::debug;

/// Executes commands against one owned [`Store`].
///
/// The store is an explicit, injected instance — whoever constructs the
/// executor decides its lifetime. Processing one command spans several field
/// mutations in the engine, so a transport sharing one executor across
/// concurrent callers must hold it exclusively for each full
/// command-to-response cycle.
#[derive(Debug, Default)]
pub struct Executor {
    store: Store,
}

impl Executor {
    /// Executor over a fresh, empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Executor over an existing store.
    pub fn with_store(store: Store) -> Self {
        Self { store }
    }

    /// Read access to the underlying store.
    pub fn store(&self) -> &Store {
        &self.store
    }

    /// Parse and execute one tokenized command.
    pub fn execute<S: AsRef<str>>(&mut self, tokens: &[S]) -> MirrorResult<Output> {
        let command = Command::parse(tokens)?;
        debug!(keyword = command.keyword(), "dispatching command");
        self.apply(command)
    }

    /// Tokenize a raw line on whitespace, then execute it.
    pub fn execute_line(&mut self, line: &str) -> MirrorResult<Output> {
        let tokens: Vec<&str> = line.split_whitespace().collect();
        self.execute(&tokens)
    }

    fn apply(&mut self, command: Command) -> MirrorResult<Output> {
        Ok(match command {
            Command::Set { key, value } => {
                self.store.set(key.clone(), value.clone());
                Output::Set { key, value }
            }
            Command::Get { key } => Output::Value(self.store.get(&key).map(str::to_owned)),
            Command::Unset { key } => {
                self.store.unset(&key);
                Output::Unset { key }
            }
            Command::Counts { value } => Output::Count(self.store.counts(&value)),
            Command::Find { value } => Output::Keys(self.store.find(&value)),
            Command::Begin => {
                self.store.begin();
                Output::Begun
            }
            Command::Commit => Output::Committed(self.store.commit()?),
            Command::Rollback => Output::RolledBack(self.store.rollback()?),
        })
    }
}
