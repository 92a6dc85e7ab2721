//! Errors raised while building a board.

use crate::Symbol;

/// Error that can occur when generating a board or starting a session.
///
/// Selections never produce errors: out-of-order clicks are absorbed by the
/// session and reported as [`crate::IgnoredSelection`] instead.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum BoardError {
    /// The requested board size is not one of the supported layouts.
    #[display("Unsupported board size '{}' (expected 4x4 or 6x6)", _0)]
    InvalidSize(String),

    /// The symbol pool is too small for the requested board.
    #[display(
        "Symbol pool has {} symbols but the board needs {}",
        available,
        required
    )]
    InsufficientSymbolPool {
        /// Distinct symbols the board needs.
        required: usize,
        /// Distinct symbols the pool provides.
        available: usize,
    },

    /// The symbol pool lists the same symbol twice.
    #[display("Symbol '{}' appears more than once in the pool", _0)]
    DuplicateSymbol(Symbol),
}

impl std::error::Error for BoardError {}
