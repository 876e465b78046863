//! Core game logic module - pure, deterministic, and testable
//!
//! This crate contains the rules of the memory game, the round state machine
//! and its timing model. It has **zero dependencies** on UI, audio, terminals
//! or async runtimes, making it:
//!
//! - **Deterministic**: Same seed deals the same board
//! - **Testable**: Virtual time, so a two-minute round runs in microseconds
//! - **Portable**: Drive it from a terminal loop, a tokio task or a test
//!
//! # Module Structure
//!
//! - [`rng`]: seeded Fisher-Yates shuffler
//! - [`deck`]: tiles, reveal and pair evaluation
//! - [`countdown`]: the round clock with warning/critical phases
//! - [`timers`]: virtual-time queue for ticks and deferred callbacks
//! - [`game_state`]: the Idle → Playing → Won/Lost state machine
//! - [`session`]: state machine + timer queue as one serialized driver
//! - [`sink`]: presentation callbacks
//!
//! # Game Rules
//!
//! - Twelve symbols, each on two tiles, dealt face down
//! - Flip two tiles: equal symbols stay up, otherwise both turn back after 1 s
//! - No flipping while a mismatch is on display
//! - Match every pair within 120 seconds to win
//!
//! # Example
//!
//! ```
//! use memory_match_core::Session;
//! use memory_match_types::{GameAction, GameEvent, RoundStatus};
//!
//! let mut session = Session::new(12345);
//! session.dispatch(GameAction::Start).unwrap();
//! session.dispatch(GameAction::SelectTile(0)).unwrap();
//!
//! // Two minutes later
//! let events = session.advance(120_000);
//! assert!(events.contains(&GameEvent::RoundEnded {
//!     outcome: memory_match_types::Outcome::Lost
//! }));
//! assert_eq!(session.game().status(), RoundStatus::Lost);
//! ```

pub mod countdown;
pub mod deck;
pub mod error;
pub mod game_state;
pub mod rng;
pub mod session;
pub mod sink;
pub mod snapshot;
pub mod timers;

pub use memory_match_types as types;

// Re-export commonly used types for convenience
pub use countdown::{Countdown, TimerSignal};
pub use deck::{Deck, PairOutcome, Tile};
pub use error::GameError;
pub use game_state::{GameState, RoundSettings, RoundState, Transition};
pub use rng::{IdentityShuffler, SeededShuffler, Shuffler, SimpleRng};
pub use session::Session;
pub use sink::{deliver, PresentationSink, RecordingSink};
pub use snapshot::RoundSnapshot;
pub use timers::{Deferred, Fired, RoundToken, Scheduled, TimerQueue, TimerRequest};
