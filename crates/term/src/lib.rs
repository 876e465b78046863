//! Terminal presentation for the memory game.
//!
//! Game events flow into a [`BoardModel`] (a [`PresentationSink`]), the
//! [`BoardView`] paints that model into a [`FrameBuffer`], and the
//! [`TerminalRenderer`] flushes frame diffs and rings the bell for cues.
//!
//! [`PresentationSink`]: memory_match_core::PresentationSink

pub mod board_model;
pub mod board_view;
pub mod fb;
pub mod renderer;

pub use memory_match_core as core;
pub use memory_match_types as types;

pub use board_model::{BoardModel, TileFace};
pub use board_view::{BoardView, Viewport};
pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use renderer::{bell_count, encode_cue_into, encode_diff_into, encode_full_into, TerminalRenderer};
