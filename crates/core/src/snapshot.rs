use crate::deck::Tile;
use crate::types::{CelebrationStep, RoundStatus, TimerPhase, BOARD_COLUMNS};

/// Read-only copy of a round, for rendering and async callers
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoundSnapshot {
    pub status: RoundStatus,
    pub round: u32,
    pub tiles: Vec<Tile>,
    pub first_selected: Option<usize>,
    pub input_locked: bool,
    pub matched_pairs: usize,
    pub total_pairs: usize,
    pub seconds_remaining: u32,
    pub phase: TimerPhase,
    pub celebration: Option<CelebrationStep>,
}

impl RoundSnapshot {
    pub fn playable(&self) -> bool {
        self.status == RoundStatus::Playing && !self.input_locked
    }

    /// Tiles grouped into board rows
    pub fn rows(&self) -> impl Iterator<Item = &[Tile]> {
        self.tiles.chunks(BOARD_COLUMNS)
    }
}

impl Default for RoundSnapshot {
    fn default() -> Self {
        Self {
            status: RoundStatus::Idle,
            round: 0,
            tiles: Vec::new(),
            first_selected: None,
            input_locked: false,
            matched_pairs: 0,
            total_pairs: 0,
            seconds_remaining: 0,
            phase: TimerPhase::Normal,
            celebration: None,
        }
    }
}
