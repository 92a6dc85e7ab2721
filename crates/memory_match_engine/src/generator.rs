//! Shuffled board generation.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use tracing::{debug, instrument};

use crate::{Board, BoardError, BoardSize, Symbol, SymbolPool};

/// Generates a board from the default symbol pool using the thread-local RNG.
///
/// # Errors
///
/// Returns [`BoardError::InsufficientSymbolPool`] if the pool cannot cover the board.
#[instrument]
pub fn generate(size: BoardSize) -> Result<Board, BoardError> {
    generate_with(&SymbolPool::default(), size, &mut rand::thread_rng())
}

/// Generates a board for a raw card count.
///
/// # Errors
///
/// Returns [`BoardError::InvalidSize`] unless `card_count` is 16 or 36.
#[instrument]
pub fn generate_for_count(card_count: usize) -> Result<Board, BoardError> {
    generate(BoardSize::try_from(card_count)?)
}

/// Generates a board from `pool`, drawing randomness from `rng`.
///
/// The first `size / 2` symbols of the pool are duplicated and the full
/// sequence is shuffled with Fisher-Yates before ids are assigned.
///
/// # Errors
///
/// Returns [`BoardError::InsufficientSymbolPool`] if the pool cannot cover the board.
#[instrument(skip(pool, rng), fields(pool_len = pool.len()))]
pub fn generate_with<R>(pool: &SymbolPool, size: BoardSize, rng: &mut R) -> Result<Board, BoardError>
where
    R: Rng + ?Sized,
{
    let selected = pool.take(size.pair_count())?;
    let mut symbols: Vec<Symbol> = selected.iter().chain(selected.iter()).cloned().collect();
    symbols.shuffle(rng);
    debug!(cards = symbols.len(), "Board shuffled");
    Board::from_symbols(size, symbols)
}

/// Board source owned by a session.
///
/// Unseeded generators draw from the process RNG; seeded ones replay the
/// same sequence of boards for the same seed.
#[derive(Debug, Clone, Default)]
pub struct BoardGenerator {
    pool: SymbolPool,
    rng: Option<StdRng>,
}

impl BoardGenerator {
    /// Creates a generator over `pool` using the process RNG.
    pub fn new(pool: SymbolPool) -> Self {
        Self { pool, rng: None }
    }

    /// Creates a generator over `pool` with a deterministic RNG.
    pub fn seeded(pool: SymbolPool, seed: u64) -> Self {
        Self {
            pool,
            rng: Some(StdRng::seed_from_u64(seed)),
        }
    }

    /// The pool boards are drawn from.
    pub fn pool(&self) -> &SymbolPool {
        &self.pool
    }

    /// Generates the next board.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::InsufficientSymbolPool`] if the pool cannot cover the board.
    pub fn generate(&mut self, size: BoardSize) -> Result<Board, BoardError> {
        match self.rng.as_mut() {
            Some(rng) => generate_with(&self.pool, size, rng),
            None => generate_with(&self.pool, size, &mut rand::thread_rng()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::invariants::{BoardPairingInvariant, Invariant};
    use std::collections::HashMap;
    use strum::IntoEnumIterator;

    #[test]
    fn test_generated_boards_hold_pairing_invariant() {
        for size in BoardSize::iter() {
            for _ in 0..200 {
                let board = generate(size).expect("Default pool covers all sizes");
                assert_eq!(board.len(), size.card_count());
                assert!(<BoardPairingInvariant as Invariant<Board>>::holds(&board));
            }
        }
    }

    #[test]
    fn test_every_symbol_appears_twice() {
        let board = generate(BoardSize::SixBySix).expect("Valid board");
        let mut counts: HashMap<&Symbol, usize> = HashMap::new();
        for card in board.cards() {
            *counts.entry(card.symbol()).or_default() += 1;
        }
        assert_eq!(counts.len(), 18);
        assert!(counts.values().all(|&n| n == 2));
    }

    #[test]
    fn test_small_pool_fails_for_large_board() {
        let pool = SymbolPool::new(["A", "B", "C", "D", "E", "F", "G", "H"]).expect("Valid pool");
        let mut generator = BoardGenerator::new(pool);
        assert!(generator.generate(BoardSize::FourByFour).is_ok());
        assert_eq!(
            generator.generate(BoardSize::SixBySix),
            Err(BoardError::InsufficientSymbolPool {
                required: 18,
                available: 8
            })
        );
    }

    #[test]
    fn test_invalid_card_count_rejected() {
        assert!(matches!(
            generate_for_count(25),
            Err(BoardError::InvalidSize(_))
        ));
        assert_eq!(generate_for_count(16).map(|b| b.len()), Ok(16));
    }

    #[test]
    fn test_seeded_generators_repeat() {
        let mut a = BoardGenerator::seeded(SymbolPool::default(), 7);
        let mut b = BoardGenerator::seeded(SymbolPool::default(), 7);
        for _ in 0..5 {
            assert_eq!(
                a.generate(BoardSize::FourByFour),
                b.generate(BoardSize::FourByFour)
            );
        }
    }

    #[test]
    fn test_shuffle_moves_symbols_around() {
        // With 200 boards, some position must hold different symbols.
        let first = generate(BoardSize::FourByFour).expect("Valid board");
        let varied = (0..200).any(|_| {
            let other = generate(BoardSize::FourByFour).expect("Valid board");
            other.cards()[0].symbol() != first.cards()[0].symbol()
        });
        assert!(varied);
    }
}
