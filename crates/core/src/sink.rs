//! Presentation sink - the consumer side of [`GameEvent`]s
//!
//! Renderers, sound players and test recorders implement
//! [`PresentationSink`]; [`deliver`] fans a batch of events out to the
//! matching callbacks. Only the four core callbacks are required.

use crate::types::{CelebrationStep, Cue, GameEvent, Outcome, Symbol};

pub trait PresentationSink {
    fn on_tick(&mut self, seconds_remaining: u32, is_warning: bool, is_critical: bool);

    fn on_tile_changed(&mut self, position: usize, symbol: Symbol, revealed: bool, matched: bool);

    fn on_round_ended(&mut self, outcome: Outcome);

    fn on_progress(&mut self, matched: usize, total: usize);

    fn on_round_started(&mut self, _round: u32, _tiles: usize, _seconds: u32) {}

    fn on_round_reset(&mut self) {}

    fn on_warning(&mut self, _seconds_remaining: u32) {}

    fn on_cue(&mut self, _cue: Cue) {}

    fn on_celebration(&mut self, _step: CelebrationStep) {}
}

pub fn deliver<P: PresentationSink + ?Sized>(sink: &mut P, events: &[GameEvent]) {
    for event in events {
        match *event {
            GameEvent::RoundStarted {
                round,
                tiles,
                seconds,
            } => sink.on_round_started(round, tiles, seconds),
            GameEvent::RoundReset => sink.on_round_reset(),
            GameEvent::Tick {
                remaining,
                warning,
                critical,
            } => sink.on_tick(remaining, warning, critical),
            GameEvent::Warning { remaining } => sink.on_warning(remaining),
            GameEvent::TileChanged {
                position,
                symbol,
                revealed,
                matched,
            } => sink.on_tile_changed(position, symbol, revealed, matched),
            GameEvent::Progress { matched, total } => sink.on_progress(matched, total),
            GameEvent::RoundEnded { outcome } => sink.on_round_ended(outcome),
            GameEvent::Cue { cue } => sink.on_cue(cue),
            GameEvent::Celebration { step } => sink.on_celebration(step),
        }
    }
}

/// Sink that keeps every event it receives, rebuilt from the callbacks
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordingSink {
    pub events: Vec<GameEvent>,
}

impl RecordingSink {
    pub fn outcomes(&self) -> Vec<Outcome> {
        self.events
            .iter()
            .filter_map(|e| match e {
                GameEvent::RoundEnded { outcome } => Some(*outcome),
                _ => None,
            })
            .collect()
    }
}

impl PresentationSink for RecordingSink {
    fn on_tick(&mut self, remaining: u32, warning: bool, critical: bool) {
        self.events.push(GameEvent::Tick {
            remaining,
            warning,
            critical,
        });
    }

    fn on_tile_changed(&mut self, position: usize, symbol: Symbol, revealed: bool, matched: bool) {
        self.events.push(GameEvent::TileChanged {
            position,
            symbol,
            revealed,
            matched,
        });
    }

    fn on_round_ended(&mut self, outcome: Outcome) {
        self.events.push(GameEvent::RoundEnded { outcome });
    }

    fn on_progress(&mut self, matched: usize, total: usize) {
        self.events.push(GameEvent::Progress { matched, total });
    }

    fn on_round_started(&mut self, round: u32, tiles: usize, seconds: u32) {
        self.events.push(GameEvent::RoundStarted {
            round,
            tiles,
            seconds,
        });
    }

    fn on_round_reset(&mut self) {
        self.events.push(GameEvent::RoundReset);
    }

    fn on_warning(&mut self, remaining: u32) {
        self.events.push(GameEvent::Warning { remaining });
    }

    fn on_cue(&mut self, cue: Cue) {
        self.events.push(GameEvent::Cue { cue });
    }

    fn on_celebration(&mut self, step: CelebrationStep) {
        self.events.push(GameEvent::Celebration { step });
    }
}
