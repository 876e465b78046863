//! Session - a game state machine bound to its timer queue
//!
//! This is the single serialized execution queue for a game: player actions
//! go through [`Session::dispatch`], elapsed time through
//! [`Session::advance`]. Timer requests produced by a transition are applied
//! before the next callback is popped, so a win cancels a tick that was due in
//! the same millisecond, and a restart cancels a pending conceal.

use crate::error::GameError;
use crate::game_state::{GameState, Transition};
use crate::rng::{SeededShuffler, Shuffler};
use crate::snapshot::RoundSnapshot;
use crate::timers::{Fired, TimerQueue};
use crate::types::{GameAction, GameEvent};

#[derive(Debug, Clone)]
pub struct Session<S = SeededShuffler> {
    game: GameState<S>,
    timers: TimerQueue,
}

impl Session<SeededShuffler> {
    pub fn new(seed: u32) -> Self {
        Self::from_game(GameState::new(seed))
    }
}

impl<S: Shuffler> Session<S> {
    pub fn from_game(game: GameState<S>) -> Self {
        Self {
            game,
            timers: TimerQueue::new(),
        }
    }

    pub fn game(&self) -> &GameState<S> {
        &self.game
    }

    pub fn timers(&self) -> &TimerQueue {
        &self.timers
    }

    pub fn now_ms(&self) -> u64 {
        self.timers.now_ms()
    }

    pub fn snapshot(&self) -> RoundSnapshot {
        self.game.snapshot()
    }

    /// Absolute virtual time of the next scheduled callback
    pub fn next_due_ms(&self) -> Option<u64> {
        self.timers.next_due_ms()
    }

    /// Apply a player action at the current virtual time
    pub fn dispatch(&mut self, action: GameAction) -> Result<Vec<GameEvent>, GameError> {
        let result = match action {
            GameAction::Start => self.game.start(),
            GameAction::Restart => Ok(self.game.restart()),
            GameAction::SelectTile(position) => self.game.select_tile(position),
        };

        match result {
            Ok(t) => Ok(self.absorb(t)),
            Err(e) => {
                log::warn!("rejected {}: {}", action, e);
                Err(e)
            }
        }
    }

    /// Let `elapsed_ms` of virtual time pass, running every callback that
    /// comes due on the way
    pub fn advance(&mut self, elapsed_ms: u64) -> Vec<GameEvent> {
        let until = self.timers.now_ms().saturating_add(elapsed_ms);
        self.advance_to(until)
    }

    /// Like [`Session::advance`], with an absolute target time
    pub fn advance_to(&mut self, until_ms: u64) -> Vec<GameEvent> {
        let mut events = Vec::new();
        while let Some(fired) = self.timers.pop_due(until_ms) {
            let t = match fired {
                Fired::Tick(token) => self.game.tick(token),
                Fired::Deferred(scheduled) => self.game.fire(scheduled),
            };
            events.extend(self.absorb(t));
        }
        self.timers.settle(until_ms);
        events
    }

    fn absorb(&mut self, t: Transition) -> Vec<GameEvent> {
        for request in t.timers {
            self.timers.apply(request);
        }
        t.events
    }
}
