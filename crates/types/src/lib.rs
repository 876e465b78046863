//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the workspace.
//! All types are plain data with no behavior beyond conversions, which keeps
//! them usable from the state machine, the async runtime and the terminal
//! presentation layer alike.
//!
//! # Board
//!
//! The default board holds 12 distinct symbols, each placed twice:
//!
//! - **Pairs**: 12
//! - **Tiles**: 24 (indexed 0-23)
//! - **Columns**: 6 (four rows in the terminal view)
//!
//! # Round Timing Constants
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `ROUND_SECONDS` | 120 | Countdown length of one round |
//! | `TICK_MS` | 1000 | Countdown tick interval |
//! | `WARNING_THRESHOLD_SECS` | 10 | Timer enters the warning phase |
//! | `CRITICAL_THRESHOLD_SECS` | 5 | Timer enters the critical phase |
//! | `MISMATCH_REVEAL_MS` | 1000 | Both tiles of a mismatch stay visible |
//! | `CELEBRATION_MESSAGE_DELAY_MS` | 1000 | Win -> congratulation message |
//! | `CELEBRATION_ACTIONS_DELAY_MS` | 2000 | Message -> action buttons |
//!
//! # Examples
//!
//! ```
//! use memory_match_types::{GameAction, RoundStatus, Symbol, TimerPhase, DEFAULT_PAIR_COUNT};
//!
//! let bolt = Symbol::new(0);
//! assert_eq!(bolt.name(), "bolt");
//!
//! assert_eq!(GameAction::from_str("select:7"), Some(GameAction::SelectTile(7)));
//! assert!(RoundStatus::Won.is_terminal());
//! assert_eq!(TimerPhase::from_remaining(4), TimerPhase::Critical);
//! assert_eq!(DEFAULT_PAIR_COUNT, 12);
//! ```

use serde::{Deserialize, Serialize};

/// Number of distinct symbols on the default board
pub const DEFAULT_PAIR_COUNT: usize = 12;

/// Number of tiles on the default board (every symbol twice)
pub const DEFAULT_TILE_COUNT: usize = DEFAULT_PAIR_COUNT * 2;

/// Tiles per board row in grid views
pub const BOARD_COLUMNS: usize = 6;

/// Countdown length of one round in seconds
pub const ROUND_SECONDS: u32 = 120;

/// Countdown tick interval (1 second)
pub const TICK_MS: u32 = 1000;

/// Remaining seconds at or below which the timer is in the warning phase
pub const WARNING_THRESHOLD_SECS: u32 = 10;

/// Remaining seconds at or below which the timer is in the critical phase
pub const CRITICAL_THRESHOLD_SECS: u32 = 5;

/// How long both tiles of a mismatch stay revealed before being concealed
pub const MISMATCH_REVEAL_MS: u32 = 1000;

/// Delay between the win and the congratulation message
pub const CELEBRATION_MESSAGE_DELAY_MS: u32 = 1000;

/// Delay between the congratulation message and the action buttons
pub const CELEBRATION_ACTIONS_DELAY_MS: u32 = 2000;

/// Display data for one of the default symbols
///
/// `emoji` is the full-color symbol; `glyph` is a single narrow character that
/// fits one terminal cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SymbolInfo {
    pub emoji: &'static str,
    pub glyph: char,
    pub name: &'static str,
}

/// The default space-themed symbol set
pub const SPACE_SYMBOLS: [SymbolInfo; DEFAULT_PAIR_COUNT] = [
    SymbolInfo { emoji: "⚡", glyph: 'Z', name: "bolt" },
    SymbolInfo { emoji: "👩‍🎤", glyph: 'S', name: "singer" },
    SymbolInfo { emoji: "🎸", glyph: 'G', name: "guitar" },
    SymbolInfo { emoji: "꩜", glyph: '@', name: "spiral" },
    SymbolInfo { emoji: "🚀", glyph: 'R', name: "rocket" },
    SymbolInfo { emoji: "🛸", glyph: 'U', name: "saucer" },
    SymbolInfo { emoji: "💽", glyph: 'D', name: "disc" },
    SymbolInfo { emoji: "👨‍🚀", glyph: 'A', name: "astronaut" },
    SymbolInfo { emoji: "🎵", glyph: '#', name: "note" },
    SymbolInfo { emoji: "🌈", glyph: '~', name: "rainbow" },
    SymbolInfo { emoji: "🔮", glyph: 'O', name: "crystal" },
    SymbolInfo { emoji: "👽", glyph: 'X', name: "alien" },
];

/// Opaque symbol token
///
/// Only equality matters to the game rules. Ids below `DEFAULT_PAIR_COUNT`
/// resolve to [`SPACE_SYMBOLS`] for display; any other id is still a valid
/// symbol, it just renders as `?`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Symbol(u8);

impl Symbol {
    pub const fn new(id: u8) -> Self {
        Self(id)
    }

    pub fn id(&self) -> u8 {
        self.0
    }

    pub fn info(&self) -> Option<&'static SymbolInfo> {
        SPACE_SYMBOLS.get(self.0 as usize)
    }

    pub fn glyph(&self) -> char {
        self.info().map(|i| i.glyph).unwrap_or('?')
    }

    pub fn emoji(&self) -> &'static str {
        self.info().map(|i| i.emoji).unwrap_or("?")
    }

    pub fn name(&self) -> &'static str {
        self.info().map(|i| i.name).unwrap_or("unknown")
    }
}

/// The twelve default symbols, in table order
pub fn standard_symbols() -> [Symbol; DEFAULT_PAIR_COUNT] {
    let mut out = [Symbol::new(0); DEFAULT_PAIR_COUNT];
    for (i, s) in out.iter_mut().enumerate() {
        *s = Symbol::new(i as u8);
    }
    out
}

/// Lifecycle status of a round
///
/// The cycle goes: Idle → Playing → Won | Lost → Idle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoundStatus {
    /// Start prompt is showing; no board
    Idle,
    /// Board active, countdown running
    Playing,
    /// Every pair matched before the countdown ran out
    Won,
    /// Countdown reached zero first
    Lost,
}

impl RoundStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(self, RoundStatus::Won | RoundStatus::Lost)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RoundStatus::Idle => "idle",
            RoundStatus::Playing => "playing",
            RoundStatus::Won => "won",
            RoundStatus::Lost => "lost",
        }
    }
}

/// Result of a finished round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    Won,
    Lost,
}

impl From<Outcome> for RoundStatus {
    fn from(value: Outcome) -> Self {
        match value {
            Outcome::Won => RoundStatus::Won,
            Outcome::Lost => RoundStatus::Lost,
        }
    }
}

/// Player-facing commands
///
/// These are produced by keyboard input and consumed by the state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameAction {
    /// Start a round (from Idle), or try again (from Won/Lost)
    Start,
    /// Abandon the current round and go back to the start prompt
    Restart,
    /// Flip the tile at the given board position
    SelectTile(usize),
}

impl GameAction {
    /// Parse action from its textual form
    ///
    /// # Examples
    ///
    /// ```
    /// use memory_match_types::GameAction;
    ///
    /// assert_eq!(GameAction::from_str("start"), Some(GameAction::Start));
    /// assert_eq!(GameAction::from_str("Restart"), Some(GameAction::Restart));
    /// assert_eq!(GameAction::from_str("select:3"), Some(GameAction::SelectTile(3)));
    /// assert_eq!(GameAction::from_str("unknown"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        let lower = s.trim().to_lowercase();
        match lower.as_str() {
            "start" => Some(GameAction::Start),
            "restart" => Some(GameAction::Restart),
            other => other
                .strip_prefix("select:")
                .and_then(|n| n.parse::<usize>().ok())
                .map(GameAction::SelectTile),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            GameAction::Start => "start",
            GameAction::Restart => "restart",
            GameAction::SelectTile(_) => "select_tile",
        }
    }
}

impl std::fmt::Display for GameAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GameAction::SelectTile(position) => write!(f, "select:{}", position),
            other => f.write_str(other.name()),
        }
    }
}

/// Countdown phase derived from the remaining seconds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimerPhase {
    Normal,
    Warning,
    Critical,
}

impl TimerPhase {
    pub fn from_remaining(remaining: u32) -> Self {
        if remaining <= CRITICAL_THRESHOLD_SECS {
            TimerPhase::Critical
        } else if remaining <= WARNING_THRESHOLD_SECS {
            TimerPhase::Warning
        } else {
            TimerPhase::Normal
        }
    }

    /// True in both the warning and the critical phase
    pub fn is_warning(&self) -> bool {
        !matches!(self, TimerPhase::Normal)
    }

    pub fn is_critical(&self) -> bool {
        matches!(self, TimerPhase::Critical)
    }
}

/// Sound cues requested by the game; playback belongs to the presentation layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Cue {
    /// A tile was flipped
    Click,
    /// Two tiles matched
    Match,
    /// One of the final seconds ticked away
    CriticalTick,
    /// The countdown ran out
    Timeout,
    /// The last pair was matched
    Win,
}

/// Steps of the post-win celebration, in order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CelebrationStep {
    /// Confetti burst, right at the win
    Confetti,
    /// Congratulation message (recorded audio)
    Message,
    /// Play-again / menu buttons become available
    Actions,
}

/// Notifications emitted by the state machine for the presentation layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GameEvent {
    /// A fresh board was dealt
    RoundStarted {
        round: u32,
        tiles: usize,
        seconds: u32,
    },
    /// Back at the start prompt
    RoundReset,
    /// One countdown second elapsed
    Tick {
        remaining: u32,
        warning: bool,
        critical: bool,
    },
    /// Countdown crossed into the warning phase (once per round)
    Warning { remaining: u32 },
    TileChanged {
        position: usize,
        symbol: Symbol,
        revealed: bool,
        matched: bool,
    },
    Progress { matched: usize, total: usize },
    RoundEnded { outcome: Outcome },
    Cue { cue: Cue },
    Celebration { step: CelebrationStep },
}
