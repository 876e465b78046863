//! Terminal input module.
//!
//! Maps `crossterm` key events onto [`UiAction`]s and keeps the board
//! cursor, which turns them into [`crate::types::GameAction`]s.

pub mod cursor;
pub mod map;

pub use memory_match_types as types;

pub use cursor::BoardCursor;
pub use map::{handle_key_event, should_quit, Direction, UiAction};
