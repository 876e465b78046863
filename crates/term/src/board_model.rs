//! BoardModel: the terminal's picture of a round, fed by game events.

use crate::core::{PresentationSink, RoundSnapshot};
use crate::types::{CelebrationStep, Cue, Outcome, RoundStatus, Symbol, TimerPhase};

/// What the player can see of one tile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TileFace {
    pub symbol: Option<Symbol>,
    pub revealed: bool,
    pub matched: bool,
}

impl TileFace {
    /// Symbol to draw, if the tile is face up
    pub fn visible_symbol(&self) -> Option<Symbol> {
        if self.revealed || self.matched {
            self.symbol
        } else {
            None
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardModel {
    pub status: RoundStatus,
    pub round: u32,
    pub tiles: Vec<TileFace>,
    pub seconds_remaining: u32,
    pub phase: TimerPhase,
    /// Set once the low-time warning has been announced this round
    pub warned: bool,
    pub matched: usize,
    pub total: usize,
    pub outcome: Option<Outcome>,
    pub celebration: Option<CelebrationStep>,
    pub sound: bool,
    cues: Vec<Cue>,
}

impl Default for BoardModel {
    fn default() -> Self {
        Self::new(true)
    }
}

impl BoardModel {
    pub fn new(sound: bool) -> Self {
        Self {
            status: RoundStatus::Idle,
            round: 0,
            tiles: Vec::new(),
            seconds_remaining: 0,
            phase: TimerPhase::Normal,
            warned: false,
            matched: 0,
            total: 0,
            outcome: None,
            celebration: None,
            sound,
            cues: Vec::new(),
        }
    }

    /// Rebuild the model from a full snapshot
    pub fn sync(&mut self, snap: &RoundSnapshot) {
        self.status = snap.status;
        self.round = snap.round;
        self.tiles = snap
            .tiles
            .iter()
            .map(|t| TileFace {
                symbol: Some(t.symbol),
                revealed: t.revealed,
                matched: t.matched,
            })
            .collect();
        self.seconds_remaining = snap.seconds_remaining;
        self.phase = snap.phase;
        self.warned = snap.phase.is_warning();
        self.matched = snap.matched_pairs;
        self.total = snap.total_pairs;
        self.outcome = match snap.status {
            RoundStatus::Won => Some(Outcome::Won),
            RoundStatus::Lost => Some(Outcome::Lost),
            _ => None,
        };
        self.celebration = snap.celebration;
    }

    pub fn toggle_sound(&mut self) -> bool {
        self.sound = !self.sound;
        if !self.sound {
            self.cues.clear();
        }
        self.sound
    }

    /// Cues waiting to be played; empty while muted
    pub fn take_cues(&mut self) -> Vec<Cue> {
        std::mem::take(&mut self.cues)
    }

    /// True once the win sequence offers its buttons
    pub fn shows_actions(&self) -> bool {
        match self.status {
            RoundStatus::Won => self.celebration == Some(CelebrationStep::Actions),
            RoundStatus::Lost => true,
            _ => false,
        }
    }
}

impl PresentationSink for BoardModel {
    fn on_tick(&mut self, seconds_remaining: u32, is_warning: bool, is_critical: bool) {
        self.seconds_remaining = seconds_remaining;
        self.phase = if is_critical {
            TimerPhase::Critical
        } else if is_warning {
            TimerPhase::Warning
        } else {
            TimerPhase::Normal
        };
    }

    fn on_tile_changed(&mut self, position: usize, symbol: Symbol, revealed: bool, matched: bool) {
        if position >= self.tiles.len() {
            self.tiles.resize(position + 1, TileFace::default());
        }
        self.tiles[position] = TileFace {
            symbol: Some(symbol),
            revealed,
            matched,
        };
    }

    fn on_round_ended(&mut self, outcome: Outcome) {
        self.status = outcome.into();
        self.outcome = Some(outcome);
    }

    fn on_progress(&mut self, matched: usize, total: usize) {
        self.matched = matched;
        self.total = total;
    }

    fn on_round_started(&mut self, round: u32, tiles: usize, seconds: u32) {
        self.status = RoundStatus::Playing;
        self.round = round;
        self.tiles = vec![TileFace::default(); tiles];
        self.seconds_remaining = seconds;
        self.phase = TimerPhase::from_remaining(seconds);
        self.warned = false;
        self.outcome = None;
        self.celebration = None;
    }

    fn on_round_reset(&mut self) {
        let sound = self.sound;
        *self = Self::new(sound);
    }

    fn on_warning(&mut self, _seconds_remaining: u32) {
        self.warned = true;
    }

    fn on_cue(&mut self, cue: Cue) {
        if self.sound {
            self.cues.push(cue);
        }
    }

    fn on_celebration(&mut self, step: CelebrationStep) {
        self.celebration = Some(step);
    }
}
