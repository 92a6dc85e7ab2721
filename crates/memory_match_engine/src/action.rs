//! Inbound actions and the events a session reports back.
//!
//! Actions are plain data so the surrounding application can queue, log or
//! deserialize them before handing them to [`crate::Session::apply`].

use serde::{Deserialize, Serialize};

use crate::{BoardSize, CardId, CompletedGame, Symbol};

/// A request from the surrounding application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Action {
    /// Discard the current session and deal a new board.
    StartGame {
        /// Layout to deal.
        size: BoardSize,
    },
    /// Turn a card face up.
    SelectCard {
        /// Card to reveal.
        card_id: CardId,
    },
    /// One second of play time has passed.
    Tick,
}

/// Why a selection was absorbed without changing the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display)]
pub enum IgnoredSelection {
    /// No game is running.
    #[display("no game in progress")]
    NotInProgress,
    /// Two cards are already face up.
    #[display("turn already has two cards")]
    SelectionFull,
    /// No card has that id.
    #[display("no such card")]
    UnknownCard,
    /// The card is already face up.
    #[display("card already revealed")]
    AlreadyRevealed,
    /// The card has already been matched.
    #[display("card already matched")]
    AlreadyResolved,
}

/// Result of a single selection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum SelectOutcome {
    /// Nothing changed.
    Ignored {
        /// The card that was clicked.
        card_id: CardId,
        /// Why it was ignored.
        reason: IgnoredSelection,
    },
    /// First card of a turn is face up.
    Revealed {
        /// The revealed card.
        card_id: CardId,
        /// Its symbol.
        symbol: Symbol,
    },
    /// Second card matched the first; both are now resolved.
    Matched {
        /// First card of the turn.
        first: CardId,
        /// Second card of the turn.
        second: CardId,
        /// The shared symbol.
        symbol: Symbol,
    },
    /// Second card differed; both are face down again.
    Mismatched {
        /// First card of the turn.
        first: CardId,
        /// Symbol of the first card.
        first_symbol: Symbol,
        /// Second card of the turn.
        second: CardId,
        /// Symbol of the second card.
        second_symbol: Symbol,
    },
    /// The final pair was matched.
    Completed {
        /// First card of the turn.
        first: CardId,
        /// Second card of the turn.
        second: CardId,
        /// The shared symbol.
        symbol: Symbol,
        /// Final result of the session.
        result: CompletedGame,
    },
}

impl SelectOutcome {
    /// True unless the selection was ignored.
    pub fn changed_state(&self) -> bool {
        !matches!(self, Self::Ignored { .. })
    }

    /// True if this selection finished a turn (two cards compared).
    pub fn ended_turn(&self) -> bool {
        matches!(
            self,
            Self::Matched { .. } | Self::Mismatched { .. } | Self::Completed { .. }
        )
    }

    /// The completed result, if this selection finished the game.
    pub fn completed(&self) -> Option<&CompletedGame> {
        match self {
            Self::Completed { result, .. } => Some(result),
            _ => None,
        }
    }
}

/// What [`crate::Session::apply`] reports for each action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum SessionEvent {
    /// A new board was dealt.
    Started {
        /// Layout of the new board.
        size: BoardSize,
    },
    /// A card selection was processed.
    Selected(SelectOutcome),
    /// The clock was advanced (or ignored if no game is running).
    Ticked {
        /// Whether the clock moved.
        counted: bool,
        /// Elapsed seconds after the tick.
        elapsed_time: u32,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_actions_deserialize_from_tagged_json() {
        let start: Action =
            serde_json::from_str(r#"{"type":"start_game","size":"6x6"}"#).expect("Valid json");
        assert_eq!(
            start,
            Action::StartGame {
                size: BoardSize::SixBySix
            }
        );

        let select: Action =
            serde_json::from_str(r#"{"type":"select_card","card_id":3}"#).expect("Valid json");
        assert_eq!(select, Action::SelectCard { card_id: 3 });

        let tick: Action = serde_json::from_str(r#"{"type":"tick"}"#).expect("Valid json");
        assert_eq!(tick, Action::Tick);
    }

    #[test]
    fn test_unsupported_size_fails_to_deserialize() {
        let result = serde_json::from_str::<Action>(r#"{"type":"start_game","size":"5x5"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_outcome_classification() {
        let ignored = SelectOutcome::Ignored {
            card_id: 1,
            reason: IgnoredSelection::AlreadyResolved,
        };
        assert!(!ignored.changed_state());
        assert!(!ignored.ended_turn());

        let mismatched = SelectOutcome::Mismatched {
            first: 0,
            first_symbol: Symbol::from("A"),
            second: 1,
            second_symbol: Symbol::from("B"),
        };
        assert!(mismatched.ended_turn());
        assert!(mismatched.completed().is_none());
    }
}
