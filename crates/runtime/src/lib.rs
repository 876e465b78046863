//! Async runtime for a memory-match session.
//!
//! One tokio task owns the [`Session`](memory_match_core::Session) and is the
//! only place where player actions and timer callbacks touch game state.
//!
//! - [`actor`]: the session task, its command handle and error type
//! - [`bridge`]: [`SessionRuntime`], for callers with a synchronous frame loop
//! - [`journal`]: JSON-lines event log

pub mod actor;
pub mod bridge;
pub mod journal;

pub use memory_match_core as core;
pub use memory_match_types as types;

pub use actor::{run_session, spawn_session, RuntimeConfig, RuntimeError, SessionCommand, SessionHandle};
pub use bridge::SessionRuntime;
pub use journal::{EventRecord, Journal};
