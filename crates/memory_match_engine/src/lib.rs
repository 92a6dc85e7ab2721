//! Memory match engine - pure game logic for a pair-matching card game.
//!
//! # Architecture
//!
//! - **Board generation**: shuffled layouts where every symbol appears twice
//! - **Session**: the `NotStarted -> InProgress -> Completed` state machine
//!   that resolves turns and emits a [`CompletedGame`]
//! - **Ranking**: ordering and aggregate statistics over completed results,
//!   independent of how the games were played
//!
//! # Example
//!
//! ```
//! use memory_match_engine::{BoardSize, SelectOutcome, Session};
//!
//! let mut session = Session::new();
//! session.start(BoardSize::FourByFour)?;
//!
//! let outcome = session.select(0);
//! assert!(matches!(outcome, SelectOutcome::Revealed { card_id: 0, .. }));
//! assert_eq!(session.moves_made(), 0);
//! # Ok::<(), memory_match_engine::BoardError>(())
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod action;
mod board;
mod error;
mod generator;
pub mod invariants;
mod ranking;
mod result;
mod session;
mod symbol;

pub use action::{Action, IgnoredSelection, SelectOutcome, SessionEvent};
pub use board::{Board, BoardSize, Card, CardFace, CardId};
pub use error::BoardError;
pub use generator::{BoardGenerator, generate, generate_for_count, generate_with};
pub use ranking::{
    Leaderboard, LeaderboardEntry, ResultSummary, Scored, compare, rank, summarize,
};
pub use result::{CompletedGame, CompletedResult, OwnerRef, ResultId};
pub use session::{Session, SessionStatus};
pub use symbol::{DEFAULT_SYMBOLS, Symbol, SymbolPool};
