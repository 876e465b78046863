//! RNG module - deck shuffling
//!
//! Implements the unbiased Fisher-Yates shuffle on top of a small seeded LCG,
//! so that a given seed always deals the same board (useful for replays and
//! tests) while every permutation stays equally likely.
//!
//! Also provides an identity shuffler for fixed test layouts.

use crate::types::Symbol;

/// Simple LCG (Linear Congruential Generator) RNG
/// Uses constants from Numerical Recipes
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u32) -> Self {
        // Avoid 0 seed which would produce all zeros
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    /// Generate next random u32
    pub fn next_u32(&mut self) -> u32 {
        // LCG formula: (a * state + c) mod m
        // Using Numerical Recipes constants: a=1664525, c=1013904223, m=2^32
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Generate an unbiased value in range [0, max)
    ///
    /// Multiply-shift with rejection (Lemire). Taking the high half of the
    /// product also avoids the weak low bits of the LCG.
    pub fn next_range(&mut self, max: u32) -> u32 {
        debug_assert!(max > 0, "next_range needs a non-empty range");
        let threshold = max.wrapping_neg() % max;
        loop {
            let m = (self.next_u32() as u64) * (max as u64);
            if (m as u32) >= threshold {
                return (m >> 32) as u32;
            }
        }
    }

    /// Shuffle a slice in place using Fisher-Yates
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        for i in (1..slice.len()).rev() {
            let j = self.next_range((i + 1) as u32) as usize;
            slice.swap(i, j);
        }
    }

    pub fn state(&self) -> u32 {
        self.state
    }
}

/// Produces the tile order for a new round.
///
/// Implementations return a permutation of `symbols` and leave the input
/// untouched.
pub trait Shuffler {
    fn shuffle(&mut self, symbols: &[Symbol]) -> Vec<Symbol>;
}

/// Seeded Fisher-Yates shuffler
#[derive(Debug, Clone)]
pub struct SeededShuffler {
    seed: u32,
    rng: SimpleRng,
}

impl SeededShuffler {
    pub fn new(seed: u32) -> Self {
        Self {
            seed,
            rng: SimpleRng::new(seed),
        }
    }

    /// Seed this shuffler was created with
    pub fn seed(&self) -> u32 {
        self.seed
    }
}

impl Default for SeededShuffler {
    fn default() -> Self {
        Self::new(1)
    }
}

impl Shuffler for SeededShuffler {
    fn shuffle(&mut self, symbols: &[Symbol]) -> Vec<Symbol> {
        let mut out = symbols.to_vec();
        self.rng.shuffle(&mut out);
        out
    }
}

/// Keeps the input order. Deals `[A, B, A, B]` style boards for tests.
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentityShuffler;

impl Shuffler for IdentityShuffler {
    fn shuffle(&mut self, symbols: &[Symbol]) -> Vec<Symbol> {
        symbols.to_vec()
    }
}

impl<S: Shuffler + ?Sized> Shuffler for Box<S> {
    fn shuffle(&mut self, symbols: &[Symbol]) -> Vec<Symbol> {
        (**self).shuffle(symbols)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::standard_symbols;

    fn sorted(mut v: Vec<Symbol>) -> Vec<Symbol> {
        v.sort();
        v
    }

    #[test]
    fn test_rng_deterministic() {
        let mut rng1 = SimpleRng::new(12345);
        let mut rng2 = SimpleRng::new(12345);

        // Same seed should produce same sequence
        for _ in 0..100 {
            assert_eq!(rng1.next_u32(), rng2.next_u32());
        }
    }

    #[test]
    fn test_rng_different_seeds() {
        let mut rng1 = SimpleRng::new(12345);
        let mut rng2 = SimpleRng::new(54321);

        let v1 = rng1.next_u32();
        let v2 = rng2.next_u32();
        assert_ne!(v1, v2);
    }

    #[test]
    fn test_zero_seed_is_usable() {
        let mut rng = SimpleRng::new(0);
        assert_ne!(rng.next_u32(), 0);
    }

    #[test]
    fn test_next_range_stays_in_bounds() {
        let mut rng = SimpleRng::new(7);
        for max in [1u32, 2, 3, 7, 24, 1000] {
            for _ in 0..200 {
                assert!(rng.next_range(max) < max);
            }
        }
    }

    #[test]
    fn test_shuffle_is_permutation() {
        let mut deck: Vec<Symbol> = standard_symbols().into_iter().collect();
        deck.extend(standard_symbols());

        for seed in 1..50 {
            let mut shuffler = SeededShuffler::new(seed);
            let out = shuffler.shuffle(&deck);
            assert_eq!(out.len(), deck.len());
            assert_eq!(sorted(out), sorted(deck.clone()));
        }
    }

    #[test]
    fn test_shuffle_leaves_input_untouched() {
        let input = vec![Symbol::new(0), Symbol::new(1), Symbol::new(0), Symbol::new(1)];
        let before = input.clone();
        let mut shuffler = SeededShuffler::new(99);
        let _ = shuffler.shuffle(&input);
        assert_eq!(input, before);
    }

    #[test]
    fn test_same_seed_same_deal() {
        let deck: Vec<Symbol> = standard_symbols().into_iter().collect();
        let a = SeededShuffler::new(42).shuffle(&deck);
        let b = SeededShuffler::new(42).shuffle(&deck);
        assert_eq!(a, b);
    }

    #[test]
    fn test_shuffle_distribution_is_roughly_uniform() {
        // All 6 orders of three distinct symbols should show up about equally.
        let input = [Symbol::new(0), Symbol::new(1), Symbol::new(2)];
        let mut shuffler = SeededShuffler::new(2024);
        let mut counts = std::collections::HashMap::new();
        let trials = 6000;
        for _ in 0..trials {
            *counts.entry(shuffler.shuffle(&input)).or_insert(0u32) += 1;
        }
        assert_eq!(counts.len(), 6);
        for (_, n) in counts {
            assert!((800..1200).contains(&n), "skewed count {}", n);
        }
    }

    #[test]
    fn test_identity_shuffler_keeps_order() {
        let input = [Symbol::new(3), Symbol::new(1), Symbol::new(3), Symbol::new(1)];
        assert_eq!(IdentityShuffler.shuffle(&input), input.to_vec());
    }
}
