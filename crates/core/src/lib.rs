//! Shared types for the mirrordb workspace.
//!
//! Every layer speaks the same error taxonomy: engine operations return
//! [`MirrorResult`], and the executor converts [`MirrorError`] values into
//! protocol strings at the wire boundary. Nothing in this crate allocates
//! beyond the error payloads themselves.

pub mod error;

pub use error::{MirrorError, MirrorResult};
