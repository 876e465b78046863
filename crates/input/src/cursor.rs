//! Board cursor and the translation of key presses into game actions.

use crate::map::{Direction, UiAction};
use crate::types::{GameAction, RoundStatus, BOARD_COLUMNS, DEFAULT_TILE_COUNT};

/// Highlighted tile on a grid laid out row by row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoardCursor {
    index: usize,
    columns: usize,
    tiles: usize,
}

impl Default for BoardCursor {
    fn default() -> Self {
        Self::new(DEFAULT_TILE_COUNT, BOARD_COLUMNS)
    }
}

impl BoardCursor {
    pub fn new(tiles: usize, columns: usize) -> Self {
        Self {
            index: 0,
            columns: columns.max(1),
            tiles,
        }
    }

    pub fn position(&self) -> usize {
        self.index
    }

    pub fn row(&self) -> usize {
        self.index / self.columns
    }

    pub fn column(&self) -> usize {
        self.index % self.columns
    }

    /// Follow a board that changed size, keeping the cursor on it
    pub fn resize(&mut self, tiles: usize) {
        self.tiles = tiles;
        if self.index >= tiles {
            self.index = tiles.saturating_sub(1);
        }
    }

    pub fn reset(&mut self) {
        self.index = 0;
    }

    /// Move one step, wrapping within the row or column
    pub fn step(&mut self, dir: Direction) {
        if self.tiles == 0 {
            return;
        }
        let rows = self.tiles.div_ceil(self.columns);
        let (row, col) = (self.row(), self.column());
        let last_row = rows - 1;
        let row_len = |r: usize| {
            if r == last_row {
                self.tiles - last_row * self.columns
            } else {
                self.columns
            }
        };

        let (row, col) = match dir {
            Direction::Left => (row, (col + row_len(row) - 1) % row_len(row)),
            Direction::Right => (row, (col + 1) % row_len(row)),
            Direction::Up => {
                let mut r = (row + rows - 1) % rows;
                while col >= row_len(r) {
                    r = (r + rows - 1) % rows;
                }
                (r, col)
            }
            Direction::Down => {
                let mut r = (row + 1) % rows;
                while col >= row_len(r) {
                    r = (r + 1) % rows;
                }
                (r, col)
            }
        };
        self.index = row * self.columns + col;
    }

    /// Apply a key press. Returns the game action it stands for, if any.
    ///
    /// `actions_shown` tells whether the end-of-round actions are on screen;
    /// a won round only accepts a new start once they are.
    pub fn apply(&mut self, action: UiAction, status: RoundStatus, actions_shown: bool) -> Option<GameAction> {
        match (action, status) {
            (UiAction::Move(dir), _) => {
                self.step(dir);
                None
            }
            (UiAction::Select, RoundStatus::Playing) => Some(GameAction::SelectTile(self.index)),
            (UiAction::Start, RoundStatus::Playing) => None,
            (UiAction::Select | UiAction::Start, RoundStatus::Won) if !actions_shown => None,
            (UiAction::Select | UiAction::Start, _) => Some(GameAction::Start),
            (UiAction::Restart, _) => Some(GameAction::Restart),
            (UiAction::ToggleSound, _) => None,
        }
    }
}
