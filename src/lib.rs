//! Memory Match (workspace facade crate).
//!
//! Re-exports the workspace crates under one roof, plus the application
//! configuration and logging setup used by the binary.

pub use memory_match_core as core;
pub use memory_match_input as input;
pub use memory_match_runtime as runtime;
pub use memory_match_term as term;
pub use memory_match_types as types;

pub mod config;
pub mod logging;

pub use config::AppConfig;
