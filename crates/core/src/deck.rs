//! Deck module - the board of tiles for one round
//!
//! A deck holds every symbol exactly twice, in the order produced by a
//! [`Shuffler`] at round start. The order never changes during a round; only
//! the per-tile `revealed` / `matched` flags do.

use crate::error::GameError;
use crate::rng::Shuffler;
use crate::types::Symbol;

/// One cell of the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Tile {
    pub position: usize,
    pub symbol: Symbol,
    pub revealed: bool,
    pub matched: bool,
}

impl Tile {
    fn new(position: usize, symbol: Symbol) -> Self {
        Self {
            position,
            symbol,
            revealed: false,
            matched: false,
        }
    }

    /// Face down and still in play
    pub fn is_concealed(&self) -> bool {
        !self.revealed && !self.matched
    }

    /// Face up but not yet part of a found pair
    pub fn is_pending(&self) -> bool {
        self.revealed && !self.matched
    }
}

/// Result of comparing two revealed tiles
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PairOutcome {
    Match,
    Mismatch,
}

/// Ordered board of tiles
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Deck {
    tiles: Vec<Tile>,
}

impl Deck {
    /// Every symbol twice, in input order: `[A, B]` -> `[A, B, A, B]`
    pub fn pair_symbols(symbols: &[Symbol]) -> Vec<Symbol> {
        symbols.iter().chain(symbols.iter()).copied().collect()
    }

    /// Deal a new board from the distinct `symbols`
    pub fn deal<S: Shuffler + ?Sized>(symbols: &[Symbol], shuffler: &mut S) -> Self {
        let order = shuffler.shuffle(&Self::pair_symbols(symbols));
        debug_assert_eq!(order.len(), symbols.len() * 2);
        Self {
            tiles: order
                .into_iter()
                .enumerate()
                .map(|(position, symbol)| Tile::new(position, symbol))
                .collect(),
        }
    }

    /// An empty board (shown while Idle)
    pub fn empty() -> Self {
        Self { tiles: Vec::new() }
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    pub fn pair_count(&self) -> usize {
        self.tiles.len() / 2
    }

    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    pub fn tile(&self, position: usize) -> Result<&Tile, GameError> {
        self.tiles
            .get(position)
            .ok_or(GameError::InvalidTileReference {
                position,
                tiles: self.tiles.len(),
            })
    }

    fn tile_mut(&mut self, position: usize) -> Result<&mut Tile, GameError> {
        let tiles = self.tiles.len();
        self.tiles
            .get_mut(position)
            .ok_or(GameError::InvalidTileReference { position, tiles })
    }

    /// Turn a tile face up.
    ///
    /// Returns `Ok(None)` without touching anything when input is locked or
    /// the tile is already revealed or matched.
    pub fn reveal(&mut self, position: usize, input_locked: bool) -> Result<Option<Tile>, GameError> {
        let tile = self.tile_mut(position)?;
        if input_locked || tile.revealed || tile.matched {
            return Ok(None);
        }
        tile.revealed = true;
        Ok(Some(*tile))
    }

    /// Compare two revealed tiles.
    ///
    /// A match needs equal symbols at distinct positions; matched tiles stay
    /// face up for the rest of the round. A mismatch leaves both revealed so
    /// they can be shown until [`Deck::conceal`] turns them back.
    pub fn evaluate_pair(&mut self, a: usize, b: usize) -> Result<PairOutcome, GameError> {
        let first = *self.tile(a)?;
        let second = *self.tile(b)?;

        if a == b || first.symbol != second.symbol || !first.is_pending() || !second.is_pending() {
            return Ok(PairOutcome::Mismatch);
        }

        for position in [a, b] {
            let tile = self.tile_mut(position)?;
            tile.matched = true;
            tile.revealed = true;
        }
        Ok(PairOutcome::Match)
    }

    /// Turn a revealed, unmatched tile face down. Returns whether it changed.
    pub fn conceal(&mut self, position: usize) -> Result<bool, GameError> {
        let tile = self.tile_mut(position)?;
        if !tile.is_pending() {
            return Ok(false);
        }
        tile.revealed = false;
        Ok(true)
    }

    /// Positions of tiles that are face up but unmatched
    pub fn pending_positions(&self) -> impl Iterator<Item = usize> + '_ {
        self.tiles.iter().filter(|t| t.is_pending()).map(|t| t.position)
    }

    pub fn matched_tiles(&self) -> usize {
        self.tiles.iter().filter(|t| t.matched).count()
    }

    pub fn is_cleared(&self) -> bool {
        !self.tiles.is_empty() && self.tiles.iter().all(|t| t.matched)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::{IdentityShuffler, SeededShuffler};
    use crate::types::standard_symbols;

    const A: Symbol = Symbol::new(0);
    const B: Symbol = Symbol::new(1);

    fn abab() -> Deck {
        Deck::deal(&[A, B], &mut IdentityShuffler)
    }

    #[test]
    fn test_pair_symbols() {
        assert_eq!(Deck::pair_symbols(&[A, B]), vec![A, B, A, B]);
    }

    #[test]
    fn test_deal_standard_board() {
        let deck = Deck::deal(&standard_symbols(), &mut SeededShuffler::new(5));
        assert_eq!(deck.len(), 24);
        assert_eq!(deck.pair_count(), 12);

        for s in standard_symbols() {
            assert_eq!(deck.tiles().iter().filter(|t| t.symbol == s).count(), 2);
        }
        for (i, t) in deck.tiles().iter().enumerate() {
            assert_eq!(t.position, i);
            assert!(t.is_concealed());
        }
    }

    #[test]
    fn test_reveal() {
        let mut deck = abab();
        let tile = deck.reveal(0, false).unwrap().unwrap();
        assert_eq!(tile.symbol, A);
        assert!(tile.revealed);

        // Already revealed: no-op
        assert_eq!(deck.reveal(0, false).unwrap(), None);
    }

    #[test]
    fn test_reveal_when_locked_is_noop() {
        let mut deck = abab();
        assert_eq!(deck.reveal(1, true).unwrap(), None);
        assert!(deck.tile(1).unwrap().is_concealed());
    }

    #[test]
    fn test_reveal_out_of_range() {
        let mut deck = abab();
        assert_eq!(
            deck.reveal(4, false),
            Err(GameError::InvalidTileReference {
                position: 4,
                tiles: 4
            })
        );
        assert_eq!(deck, abab());
    }

    #[test]
    fn test_evaluate_match() {
        let mut deck = abab();
        deck.reveal(0, false).unwrap();
        deck.reveal(2, false).unwrap();
        assert_eq!(deck.evaluate_pair(0, 2).unwrap(), PairOutcome::Match);
        assert!(deck.tile(0).unwrap().matched);
        assert!(deck.tile(2).unwrap().matched);
        assert_eq!(deck.matched_tiles(), 2);

        // Matched tiles can no longer be revealed or concealed
        assert_eq!(deck.reveal(0, false).unwrap(), None);
        assert!(!deck.conceal(0).unwrap());
    }

    #[test]
    fn test_evaluate_mismatch() {
        let mut deck = abab();
        deck.reveal(0, false).unwrap();
        deck.reveal(1, false).unwrap();
        assert_eq!(deck.evaluate_pair(0, 1).unwrap(), PairOutcome::Mismatch);
        assert!(deck.tile(0).unwrap().is_pending());
        assert!(deck.tile(1).unwrap().is_pending());

        assert!(deck.conceal(0).unwrap());
        assert!(deck.conceal(1).unwrap());
        assert!(deck.tile(0).unwrap().is_concealed());
        assert_eq!(deck.matched_tiles(), 0);
    }

    #[test]
    fn test_tile_never_matches_itself() {
        let mut deck = abab();
        deck.reveal(0, false).unwrap();
        assert_eq!(deck.evaluate_pair(0, 0).unwrap(), PairOutcome::Mismatch);
        assert!(!deck.tile(0).unwrap().matched);
    }

    #[test]
    fn test_pending_positions_and_cleared() {
        let mut deck = abab();
        deck.reveal(1, false).unwrap();
        deck.reveal(3, false).unwrap();
        assert_eq!(deck.pending_positions().collect::<Vec<_>>(), vec![1, 3]);
        deck.evaluate_pair(1, 3).unwrap();
        assert!(!deck.is_cleared());

        deck.reveal(0, false).unwrap();
        deck.reveal(2, false).unwrap();
        deck.evaluate_pair(0, 2).unwrap();
        assert!(deck.is_cleared());
        assert!(!Deck::empty().is_cleared());
    }
}
