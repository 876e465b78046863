//! Timer queue - a virtual-time scheduler for round callbacks
//!
//! The state machine never sleeps. Instead it hands out [`TimerRequest`]s
//! (start the 1 s tick, run this callback in 1000 ms, cancel everything) and
//! the queue turns elapsed milliseconds back into [`Fired`] callbacks, in due
//! order. The same queue backs both the synchronous session driver and the
//! async runtime, so both observe identical ordering.
//!
//! Every callback carries the [`RoundToken`] of the round that scheduled it.
//! The queue cancels eagerly and the state machine re-checks the token on
//! delivery.

/// Generation of a round. Bumped on every start and restart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct RoundToken(u32);

impl RoundToken {
    pub fn value(&self) -> u32 {
        self.0
    }

    pub(crate) fn next(self) -> Self {
        Self(self.0.wrapping_add(1))
    }
}

/// Deferred work the state machine can ask for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Deferred {
    /// Turn both tiles of a mismatch face down again
    ConcealPair { first: usize, second: usize },
    /// Second celebration step after a win
    CelebrationMessage,
    /// Third celebration step after a win
    ShowActions,
}

/// A deferred callback bound to the round that scheduled it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Scheduled {
    pub token: RoundToken,
    pub deferred: Deferred,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerRequest {
    /// Periodic countdown tick; replaces any running tick
    StartTicking { token: RoundToken, interval_ms: u32 },
    StopTicking,
    /// One-shot callback
    After { delay_ms: u32, scheduled: Scheduled },
    /// Drop the periodic tick and every pending one-shot
    CancelAll,
}

/// A callback that came due
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fired {
    Tick(RoundToken),
    Deferred(Scheduled),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Entry {
    due_ms: u64,
    seq: u64,
    fired: Fired,
}

#[derive(Debug, Clone, Default)]
pub struct TimerQueue {
    now_ms: u64,
    seq: u64,
    ticking: Option<(RoundToken, u32)>,
    entries: Vec<Entry>,
}

impl TimerQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current virtual time in milliseconds
    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    pub fn is_idle(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn is_ticking(&self) -> bool {
        self.ticking.is_some()
    }

    pub fn pending(&self) -> usize {
        self.entries.len()
    }

    pub fn apply(&mut self, request: TimerRequest) {
        match request {
            TimerRequest::StartTicking { token, interval_ms } => {
                self.remove_ticks();
                let interval_ms = interval_ms.max(1);
                self.ticking = Some((token, interval_ms));
                self.push(self.now_ms + interval_ms as u64, Fired::Tick(token));
            }
            TimerRequest::StopTicking => {
                self.remove_ticks();
            }
            TimerRequest::After {
                delay_ms,
                scheduled,
            } => {
                self.push(self.now_ms + delay_ms as u64, Fired::Deferred(scheduled));
            }
            TimerRequest::CancelAll => {
                self.ticking = None;
                self.entries.clear();
            }
        }
    }

    /// Absolute time of the earliest pending callback
    pub fn next_due_ms(&self) -> Option<u64> {
        self.entries.iter().map(|e| e.due_ms).min()
    }

    /// Pop the earliest callback due at or before `until_ms`.
    ///
    /// Virtual time jumps to the callback's due time, so requests applied
    /// while handling it are scheduled relative to that instant. Periodic
    /// ticks re-arm themselves here.
    pub fn pop_due(&mut self, until_ms: u64) -> Option<Fired> {
        let idx = self
            .entries
            .iter()
            .enumerate()
            .filter(|(_, e)| e.due_ms <= until_ms)
            .min_by_key(|(_, e)| (e.due_ms, e.seq))
            .map(|(i, _)| i)?;

        let entry = self.entries.swap_remove(idx);
        self.now_ms = self.now_ms.max(entry.due_ms);

        if let Fired::Tick(token) = entry.fired {
            if let Some((ticking, interval_ms)) = self.ticking {
                if ticking == token {
                    self.push(entry.due_ms + interval_ms as u64, entry.fired);
                }
            }
        }

        Some(entry.fired)
    }

    /// Move virtual time forward once every due callback has been popped
    pub fn settle(&mut self, until_ms: u64) {
        self.now_ms = self.now_ms.max(until_ms);
    }

    fn push(&mut self, due_ms: u64, fired: Fired) {
        self.seq += 1;
        self.entries.push(Entry {
            due_ms,
            seq: self.seq,
            fired,
        });
    }

    fn remove_ticks(&mut self) {
        self.ticking = None;
        self.entries.retain(|e| !matches!(e.fired, Fired::Tick(_)));
    }
}
