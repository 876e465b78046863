use crate::types::RoundStatus;

/// Recoverable rejections reported by the state machine.
///
/// None of these change the round; callers log them and carry on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameError {
    /// Tile position outside the board
    InvalidTileReference { position: usize, tiles: usize },
    /// Action not allowed in the current status (e.g. selecting while Idle)
    IllegalTransition {
        action: &'static str,
        status: RoundStatus,
    },
    /// `start` while a round is already being played
    RedundantStart,
}

impl GameError {
    pub fn code(self) -> &'static str {
        match self {
            GameError::InvalidTileReference { .. } => "invalid_tile_reference",
            GameError::IllegalTransition { .. } => "illegal_transition",
            GameError::RedundantStart => "redundant_start",
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            GameError::InvalidTileReference { .. } => "tile position is not on the board",
            GameError::IllegalTransition { .. } => "action is not allowed in the current round status",
            GameError::RedundantStart => "a round is already in progress",
        }
    }
}

impl std::fmt::Display for GameError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match *self {
            GameError::InvalidTileReference { position, tiles } => {
                write!(f, "{}: {} (board has {})", self.message(), position, tiles)
            }
            GameError::IllegalTransition { action, status } => {
                write!(f, "{}: {} while {}", self.message(), action, status.as_str())
            }
            GameError::RedundantStart => f.write_str(self.message()),
        }
    }
}

impl std::error::Error for GameError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_details() {
        let e = GameError::InvalidTileReference {
            position: 30,
            tiles: 24,
        };
        assert_eq!(e.code(), "invalid_tile_reference");
        assert!(e.to_string().contains("30"));
        assert!(e.to_string().contains("24"));

        let e = GameError::IllegalTransition {
            action: "select_tile",
            status: RoundStatus::Idle,
        };
        assert_eq!(e.to_string(), "action is not allowed in the current round status: select_tile while idle");
    }
}
