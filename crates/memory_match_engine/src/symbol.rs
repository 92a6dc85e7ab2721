//! Card symbols and the ordered pool they are drawn from.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::BoardError;

/// Glyphs used when no custom pool is configured.
///
/// Eighteen entries: exactly enough for the largest (6x6) board.
pub const DEFAULT_SYMBOLS: [&str; 18] = [
    "🍎", "🍌", "🍒", "🍊", "🍇", "🍓", "🍉", "🍕", "🍔", "🍟", "🍩", "🍦", "🍭", "🍪", "🥝",
    "🥥", "🥑", "🥕",
];

/// The face value printed on a card.
///
/// Symbols are opaque: the engine only ever compares them for equality.
#[derive(
    Debug,
    Clone,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    derive_more::Display,
    derive_more::From,
)]
#[serde(transparent)]
pub struct Symbol(String);

impl Symbol {
    /// Returns the symbol as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Symbol {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// Ordered pool of distinct symbols.
///
/// Boards draw from the front of the pool, so the pool length bounds the
/// largest board that can be generated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SymbolPool {
    symbols: Vec<Symbol>,
}

impl SymbolPool {
    /// Builds a pool from an ordered list of symbols.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::DuplicateSymbol`] if a symbol is listed twice.
    #[instrument(skip(symbols))]
    pub fn new<I, S>(symbols: I) -> Result<Self, BoardError>
    where
        I: IntoIterator<Item = S>,
        S: Into<Symbol>,
    {
        let symbols: Vec<Symbol> = symbols.into_iter().map(Into::into).collect();
        let mut seen = HashSet::with_capacity(symbols.len());
        for symbol in &symbols {
            if !seen.insert(symbol) {
                return Err(BoardError::DuplicateSymbol(symbol.clone()));
            }
        }
        debug!(count = symbols.len(), "Symbol pool built");
        Ok(Self { symbols })
    }

    /// Number of symbols in the pool.
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    /// Returns true if the pool has no symbols.
    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// All symbols, in pool order.
    pub fn symbols(&self) -> &[Symbol] {
        &self.symbols
    }

    /// Returns the first `count` symbols.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::InsufficientSymbolPool`] if the pool is shorter than `count`.
    pub fn take(&self, count: usize) -> Result<&[Symbol], BoardError> {
        self.symbols
            .get(..count)
            .ok_or(BoardError::InsufficientSymbolPool {
                required: count,
                available: self.symbols.len(),
            })
    }
}

impl Default for SymbolPool {
    fn default() -> Self {
        Self {
            symbols: DEFAULT_SYMBOLS.iter().copied().map(Symbol::from).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_pool_covers_largest_board() {
        let pool = SymbolPool::default();
        assert_eq!(pool.len(), 18);
        assert!(pool.take(18).is_ok());
    }

    #[test]
    fn test_duplicate_symbol_rejected() {
        let result = SymbolPool::new(["A", "B", "A"]);
        assert_eq!(result, Err(BoardError::DuplicateSymbol(Symbol::from("A"))));
    }

    #[test]
    fn test_take_beyond_pool_fails() {
        let pool = SymbolPool::new(["A", "B", "C"]).expect("Valid pool");
        assert_eq!(
            pool.take(8),
            Err(BoardError::InsufficientSymbolPool {
                required: 8,
                available: 3
            })
        );
    }

    #[test]
    fn test_take_preserves_pool_order() {
        let pool = SymbolPool::new(["X", "Y", "Z"]).expect("Valid pool");
        let taken = pool.take(2).expect("Enough symbols");
        assert_eq!(taken, &[Symbol::from("X"), Symbol::from("Y")]);
    }
}
