//! Game state module - the round state machine
//!
//! Ties the deck, the countdown and the shuffler together and owns every
//! piece of mutable round state. Each entry point is a synchronous transition
//! that returns a [`Transition`]: the notifications for the presentation
//! layer plus the timer requests for whoever drives the clock. Nothing here
//! sleeps or performs I/O.
//!
//! Lifecycle: Idle → Playing → Won | Lost → Idle

use crate::countdown::{Countdown, TimerSignal};
use crate::deck::{Deck, PairOutcome, Tile};
use crate::error::GameError;
use crate::rng::{SeededShuffler, Shuffler};
use crate::snapshot::RoundSnapshot;
use crate::timers::{Deferred, RoundToken, Scheduled, TimerRequest};
use crate::types::*;

/// Timing knobs for a round
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoundSettings {
    pub round_seconds: u32,
    pub tick_ms: u32,
    pub mismatch_reveal_ms: u32,
    pub celebration_message_delay_ms: u32,
    pub celebration_actions_delay_ms: u32,
}

impl Default for RoundSettings {
    fn default() -> Self {
        Self {
            round_seconds: ROUND_SECONDS,
            tick_ms: TICK_MS,
            mismatch_reveal_ms: MISMATCH_REVEAL_MS,
            celebration_message_delay_ms: CELEBRATION_MESSAGE_DELAY_MS,
            celebration_actions_delay_ms: CELEBRATION_ACTIONS_DELAY_MS,
        }
    }
}

impl RoundSettings {
    pub fn with_round_seconds(mut self, round_seconds: u32) -> Self {
        self.round_seconds = round_seconds;
        self
    }
}

/// Mutable state of the current round
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoundState {
    pub status: RoundStatus,
    /// First tile of the current pair attempt, while it is the only one up
    pub first_selected: Option<usize>,
    /// Set while a pair is being evaluated or a mismatch is on display
    pub input_locked: bool,
    pub matched_pairs: usize,
    pub seconds_remaining: u32,
    /// Mismatched pair waiting to be concealed
    pub mismatch_pending: Option<(usize, usize)>,
    /// Last celebration step shown after a win
    pub celebration: Option<CelebrationStep>,
}

impl RoundState {
    fn idle(seconds: u32) -> Self {
        Self {
            status: RoundStatus::Idle,
            first_selected: None,
            input_locked: false,
            matched_pairs: 0,
            seconds_remaining: seconds,
            mismatch_pending: None,
            celebration: None,
        }
    }

    fn playing(seconds: u32) -> Self {
        Self {
            status: RoundStatus::Playing,
            ..Self::idle(seconds)
        }
    }
}

/// Output of one state machine step
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Transition {
    pub events: Vec<GameEvent>,
    pub timers: Vec<TimerRequest>,
}

impl Transition {
    pub fn is_empty(&self) -> bool {
        self.events.is_empty() && self.timers.is_empty()
    }

    fn emit(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    fn schedule(&mut self, request: TimerRequest) {
        self.timers.push(request);
    }
}

fn tile_changed(tile: &Tile) -> GameEvent {
    GameEvent::TileChanged {
        position: tile.position,
        symbol: tile.symbol,
        revealed: tile.revealed,
        matched: tile.matched,
    }
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState<S = SeededShuffler> {
    symbols: Vec<Symbol>,
    shuffler: S,
    settings: RoundSettings,
    deck: Deck,
    round: RoundState,
    countdown: Countdown,
    token: RoundToken,
    rounds_started: u32,
}

impl GameState<SeededShuffler> {
    /// Standard 12-pair game with the given shuffle seed
    pub fn new(seed: u32) -> Self {
        Self::with_shuffler(
            &standard_symbols(),
            SeededShuffler::new(seed),
            RoundSettings::default(),
        )
    }
}

impl Default for GameState<SeededShuffler> {
    fn default() -> Self {
        Self::new(1)
    }
}

impl<S: Shuffler> GameState<S> {
    /// Game over an arbitrary symbol set. Duplicate symbols are dropped.
    pub fn with_shuffler(symbols: &[Symbol], shuffler: S, settings: RoundSettings) -> Self {
        let mut distinct: Vec<Symbol> = Vec::with_capacity(symbols.len());
        for s in symbols {
            if !distinct.contains(s) {
                distinct.push(*s);
            }
        }

        Self {
            symbols: distinct,
            shuffler,
            settings,
            deck: Deck::empty(),
            round: RoundState::idle(settings.round_seconds),
            countdown: Countdown::new(),
            token: RoundToken::default(),
            rounds_started: 0,
        }
    }

    pub fn status(&self) -> RoundStatus {
        self.round.status
    }

    pub fn round(&self) -> &RoundState {
        &self.round
    }

    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    pub fn settings(&self) -> &RoundSettings {
        &self.settings
    }

    pub fn token(&self) -> RoundToken {
        self.token
    }

    pub fn total_pairs(&self) -> usize {
        self.symbols.len()
    }

    pub fn rounds_started(&self) -> u32 {
        self.rounds_started
    }

    pub fn countdown(&self) -> &Countdown {
        &self.countdown
    }

    pub fn shuffler(&self) -> &S {
        &self.shuffler
    }

    pub fn snapshot(&self) -> RoundSnapshot {
        RoundSnapshot {
            status: self.round.status,
            round: self.rounds_started,
            tiles: self.deck.tiles().to_vec(),
            first_selected: self.round.first_selected,
            input_locked: self.round.input_locked,
            matched_pairs: self.round.matched_pairs,
            total_pairs: self.total_pairs(),
            seconds_remaining: self.round.seconds_remaining,
            phase: TimerPhase::from_remaining(self.round.seconds_remaining),
            celebration: self.round.celebration,
        }
    }

    /// Deal a new board and start the countdown.
    ///
    /// From Won/Lost this goes through Idle first ("try again"), so nothing
    /// from the finished round carries over.
    pub fn start(&mut self) -> Result<Transition, GameError> {
        let mut t = Transition::default();
        match self.round.status {
            RoundStatus::Playing => return Err(GameError::RedundantStart),
            RoundStatus::Won | RoundStatus::Lost => self.reset_into(&mut t),
            RoundStatus::Idle => {}
        }

        self.token = self.token.next();
        self.rounds_started = self.rounds_started.wrapping_add(1);
        self.deck = Deck::deal(&self.symbols, &mut self.shuffler);
        self.round = RoundState::playing(self.settings.round_seconds);
        self.countdown.start(self.settings.round_seconds);

        log::info!(
            "round {} started: {} tiles, {}s",
            self.rounds_started,
            self.deck.len(),
            self.settings.round_seconds
        );

        t.schedule(TimerRequest::CancelAll);
        t.schedule(TimerRequest::StartTicking {
            token: self.token,
            interval_ms: self.settings.tick_ms,
        });
        t.emit(GameEvent::RoundStarted {
            round: self.rounds_started,
            tiles: self.deck.len(),
            seconds: self.settings.round_seconds,
        });
        t.emit(GameEvent::Progress {
            matched: 0,
            total: self.total_pairs(),
        });

        if self.total_pairs() == 0 {
            self.win_into(&mut t);
        }
        Ok(t)
    }

    /// Abandon whatever is going on and return to the start prompt
    pub fn restart(&mut self) -> Transition {
        let mut t = Transition::default();
        if self.round.status != RoundStatus::Idle {
            self.reset_into(&mut t);
        }
        t
    }

    /// Flip the tile at `position`.
    ///
    /// Clicks while input is locked, on a face-up or matched tile, or after the
    /// round has ended are silently ignored.
    pub fn select_tile(&mut self, position: usize) -> Result<Transition, GameError> {
        let mut t = Transition::default();
        match self.round.status {
            RoundStatus::Idle => {
                return Err(GameError::IllegalTransition {
                    action: "select_tile",
                    status: RoundStatus::Idle,
                })
            }
            RoundStatus::Won | RoundStatus::Lost => return Ok(t),
            RoundStatus::Playing => {}
        }

        let Some(tile) = self.deck.reveal(position, self.round.input_locked)? else {
            return Ok(t);
        };
        t.emit(GameEvent::Cue { cue: Cue::Click });
        t.emit(tile_changed(&tile));

        let Some(first) = self.round.first_selected else {
            self.round.first_selected = Some(position);
            return Ok(t);
        };

        self.round.input_locked = true;
        match self.deck.evaluate_pair(first, position)? {
            PairOutcome::Match => {
                self.round.matched_pairs += 1;
                self.round.first_selected = None;
                self.round.input_locked = false;

                t.emit(GameEvent::Cue { cue: Cue::Match });
                for p in [first, position] {
                    let tile = self.deck.tile(p)?;
                    t.emit(tile_changed(tile));
                }
                t.emit(GameEvent::Progress {
                    matched: self.round.matched_pairs,
                    total: self.total_pairs(),
                });
                log::debug!(
                    "pair matched at {} and {} ({}/{})",
                    first,
                    position,
                    self.round.matched_pairs,
                    self.total_pairs()
                );

                if self.round.matched_pairs == self.total_pairs() {
                    self.win_into(&mut t);
                }
            }
            PairOutcome::Mismatch => {
                self.round.mismatch_pending = Some((first, position));
                t.schedule(TimerRequest::After {
                    delay_ms: self.settings.mismatch_reveal_ms,
                    scheduled: Scheduled {
                        token: self.token,
                        deferred: Deferred::ConcealPair {
                            first,
                            second: position,
                        },
                    },
                });
                log::debug!("mismatch at {} and {}, input locked", first, position);
            }
        }
        Ok(t)
    }

    /// One countdown second elapsed for the round identified by `token`
    pub fn tick(&mut self, token: RoundToken) -> Transition {
        let mut t = Transition::default();
        if token != self.token || self.round.status != RoundStatus::Playing {
            log::debug!("discarding stale tick for round token {}", token.value());
            return t;
        }

        for signal in self.countdown.tick() {
            match signal {
                TimerSignal::Tick { remaining } => {
                    self.round.seconds_remaining = remaining;
                    let phase = TimerPhase::from_remaining(remaining);
                    t.emit(GameEvent::Tick {
                        remaining,
                        warning: phase.is_warning(),
                        critical: phase.is_critical(),
                    });
                }
                TimerSignal::Warning { remaining } => {
                    t.emit(GameEvent::Warning { remaining });
                }
                TimerSignal::Critical { .. } => {
                    t.emit(GameEvent::Cue {
                        cue: Cue::CriticalTick,
                    });
                }
                TimerSignal::Expired => self.expire_into(&mut t),
            }
        }
        t
    }

    /// The countdown ran out. Ignored unless a round is being played.
    pub fn timer_expired(&mut self) -> Transition {
        let mut t = Transition::default();
        if self.round.status == RoundStatus::Playing {
            self.expire_into(&mut t);
        }
        t
    }

    /// Deliver a deferred callback. Callbacks from an earlier round are dropped.
    pub fn fire(&mut self, scheduled: Scheduled) -> Transition {
        let mut t = Transition::default();
        if scheduled.token != self.token {
            log::debug!(
                "discarding stale {:?} for round token {}",
                scheduled.deferred,
                scheduled.token.value()
            );
            return t;
        }

        match scheduled.deferred {
            Deferred::ConcealPair { first, second } => {
                if self.round.status != RoundStatus::Playing
                    || self.round.mismatch_pending != Some((first, second))
                {
                    return t;
                }
                for p in [first, second] {
                    if let Ok(true) = self.deck.conceal(p) {
                        if let Ok(tile) = self.deck.tile(p) {
                            t.emit(tile_changed(tile));
                        }
                    }
                }
                self.round.mismatch_pending = None;
                self.round.first_selected = None;
                self.round.input_locked = false;
            }
            Deferred::CelebrationMessage => {
                if self.round.status != RoundStatus::Won {
                    return t;
                }
                self.round.celebration = Some(CelebrationStep::Message);
                t.emit(GameEvent::Celebration {
                    step: CelebrationStep::Message,
                });
                t.schedule(TimerRequest::After {
                    delay_ms: self.settings.celebration_actions_delay_ms,
                    scheduled: Scheduled {
                        token: self.token,
                        deferred: Deferred::ShowActions,
                    },
                });
            }
            Deferred::ShowActions => {
                if self.round.status != RoundStatus::Won {
                    return t;
                }
                self.round.celebration = Some(CelebrationStep::Actions);
                t.emit(GameEvent::Celebration {
                    step: CelebrationStep::Actions,
                });
            }
        }
        t
    }

    fn reset_into(&mut self, t: &mut Transition) {
        self.token = self.token.next();
        self.countdown.stop();
        self.deck = Deck::empty();
        self.round = RoundState::idle(self.settings.round_seconds);

        log::debug!("round reset to idle");
        t.schedule(TimerRequest::CancelAll);
        t.emit(GameEvent::RoundReset);
    }

    fn win_into(&mut self, t: &mut Transition) {
        self.round.status = RoundStatus::Won;
        self.round.celebration = Some(CelebrationStep::Confetti);
        self.countdown.stop();

        log::info!(
            "round {} won with {}s left",
            self.rounds_started,
            self.round.seconds_remaining
        );

        t.schedule(TimerRequest::CancelAll);
        t.schedule(TimerRequest::After {
            delay_ms: self.settings.celebration_message_delay_ms,
            scheduled: Scheduled {
                token: self.token,
                deferred: Deferred::CelebrationMessage,
            },
        });
        t.emit(GameEvent::RoundEnded {
            outcome: Outcome::Won,
        });
        t.emit(GameEvent::Cue { cue: Cue::Win });
        t.emit(GameEvent::Celebration {
            step: CelebrationStep::Confetti,
        });
    }

    // A mismatch still on display when time runs out is concealed right away.
    fn expire_into(&mut self, t: &mut Transition) {
        self.round.status = RoundStatus::Lost;
        self.round.seconds_remaining = 0;
        self.countdown.stop();

        let pending: Vec<usize> = self.deck.pending_positions().collect();
        for p in pending {
            if let Ok(true) = self.deck.conceal(p) {
                if let Ok(tile) = self.deck.tile(p) {
                    t.emit(tile_changed(tile));
                }
            }
        }
        self.round.first_selected = None;
        self.round.mismatch_pending = None;
        self.round.input_locked = false;

        log::info!(
            "round {} lost with {}/{} pairs",
            self.rounds_started,
            self.round.matched_pairs,
            self.total_pairs()
        );

        t.schedule(TimerRequest::CancelAll);
        t.emit(GameEvent::RoundEnded {
            outcome: Outcome::Lost,
        });
        t.emit(GameEvent::Cue { cue: Cue::Timeout });
    }
}
