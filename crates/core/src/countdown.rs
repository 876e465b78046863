//! Countdown module - the round clock
//!
//! A countdown is advanced one second per [`Countdown::tick`]. It does not
//! own any real timer; the caller (a [`crate::timers::TimerQueue`] or an
//! async runtime) decides when a second has passed.

use arrayvec::ArrayVec;

use crate::types::{TimerPhase, WARNING_THRESHOLD_SECS};

/// What a single tick produced, in emission order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerSignal {
    Tick { remaining: u32 },
    /// First tick at or below the warning threshold
    Warning { remaining: u32 },
    /// Every tick at or below the critical threshold
    Critical { remaining: u32 },
    /// Remaining reached zero; the countdown has stopped itself
    Expired,
}

/// Signals from one tick. At most one of each kind.
pub type TickSignals = ArrayVec<TimerSignal, 4>;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Countdown {
    remaining: u32,
    running: bool,
    warned: bool,
}

impl Countdown {
    pub fn new() -> Self {
        Self::default()
    }

    /// Arm the countdown, replacing any run in progress
    pub fn start(&mut self, duration_secs: u32) {
        self.remaining = duration_secs;
        self.running = true;
        self.warned = false;
    }

    /// Cancel; safe to call when not running
    pub fn stop(&mut self) {
        self.running = false;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    pub fn phase(&self) -> TimerPhase {
        TimerPhase::from_remaining(self.remaining)
    }

    /// Advance by one second.
    ///
    /// A stopped countdown produces nothing. A countdown armed with zero
    /// seconds expires on its first tick without a `Tick` signal.
    pub fn tick(&mut self) -> TickSignals {
        let mut out = TickSignals::new();
        if !self.running {
            return out;
        }

        if self.remaining == 0 {
            self.running = false;
            out.push(TimerSignal::Expired);
            return out;
        }

        self.remaining -= 1;
        let remaining = self.remaining;
        out.push(TimerSignal::Tick { remaining });

        let phase = self.phase();
        if phase.is_warning() && !self.warned {
            self.warned = true;
            out.push(TimerSignal::Warning { remaining });
        }
        if phase.is_critical() {
            out.push(TimerSignal::Critical { remaining });
        }
        if remaining == 0 {
            self.running = false;
            out.push(TimerSignal::Expired);
        }

        debug_assert!(!self.warned || remaining <= WARNING_THRESHOLD_SECS);
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run_to_end(c: &mut Countdown) -> Vec<TimerSignal> {
        let mut all = Vec::new();
        while c.is_running() {
            all.extend(c.tick());
        }
        all
    }

    #[test]
    fn test_full_run_tick_count() {
        let mut c = Countdown::new();
        c.start(120);
        let signals = run_to_end(&mut c);

        let ticks: Vec<u32> = signals
            .iter()
            .filter_map(|s| match s {
                TimerSignal::Tick { remaining } => Some(*remaining),
                _ => None,
            })
            .collect();
        assert_eq!(ticks.len(), 120);
        assert_eq!(ticks.first(), Some(&119));
        assert_eq!(ticks.last(), Some(&0));
        assert!(ticks.windows(2).all(|w| w[0] > w[1]));

        let expired = signals.iter().filter(|s| **s == TimerSignal::Expired).count();
        assert_eq!(expired, 1);
        assert_eq!(signals.last(), Some(&TimerSignal::Expired));
    }

    #[test]
    fn test_no_ticks_after_expiry() {
        let mut c = Countdown::new();
        c.start(2);
        run_to_end(&mut c);
        assert!(c.tick().is_empty());
        assert_eq!(c.remaining(), 0);
    }

    #[test]
    fn test_warning_fires_once() {
        let mut c = Countdown::new();
        c.start(12);
        let signals = run_to_end(&mut c);
        let warnings: Vec<_> = signals
            .iter()
            .filter(|s| matches!(s, TimerSignal::Warning { .. }))
            .collect();
        assert_eq!(warnings, vec![&TimerSignal::Warning { remaining: 10 }]);
    }

    #[test]
    fn test_critical_fires_every_final_second() {
        let mut c = Countdown::new();
        c.start(8);
        let criticals: Vec<u32> = run_to_end(&mut c)
            .into_iter()
            .filter_map(|s| match s {
                TimerSignal::Critical { remaining } => Some(remaining),
                _ => None,
            })
            .collect();
        assert_eq!(criticals, vec![5, 4, 3, 2, 1, 0]);
    }

    #[test]
    fn test_stop_is_idempotent() {
        let mut c = Countdown::new();
        c.stop();
        c.start(30);
        c.tick();
        c.stop();
        c.stop();
        assert!(!c.is_running());
        assert!(c.tick().is_empty());
        assert_eq!(c.remaining(), 29);
    }

    #[test]
    fn test_start_replaces_running_countdown() {
        let mut c = Countdown::new();
        c.start(12);
        c.tick();
        assert_eq!(c.tick().as_slice()[1], TimerSignal::Warning { remaining: 10 });

        c.start(12);
        assert_eq!(c.remaining(), 12);
        c.tick();
        // Warning is re-armed for the new run
        assert!(c.tick().contains(&TimerSignal::Warning { remaining: 10 }));
    }

    #[test]
    fn test_zero_duration_expires_immediately() {
        let mut c = Countdown::new();
        c.start(0);
        assert_eq!(c.tick().as_slice(), &[TimerSignal::Expired]);
        assert!(!c.is_running());
    }
}
