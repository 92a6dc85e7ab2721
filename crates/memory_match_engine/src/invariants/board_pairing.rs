//! Board pairing invariant: every symbol appears exactly twice.

use std::collections::HashMap;

use super::Invariant;
use crate::{Board, Session, Symbol};

/// Invariant: the board holds `n / 2` distinct symbols, each on exactly two
/// cards, and every card id equals its position.
pub struct BoardPairingInvariant;

impl Invariant<Board> for BoardPairingInvariant {
    fn holds(board: &Board) -> bool {
        if board.len() != board.size().card_count() {
            return false;
        }
        if board.cards().iter().enumerate().any(|(pos, card)| card.id() != pos) {
            return false;
        }

        let mut counts: HashMap<&Symbol, usize> = HashMap::new();
        for card in board.cards() {
            *counts.entry(card.symbol()).or_default() += 1;
        }
        counts.len() == board.size().pair_count() && counts.values().all(|&n| n == 2)
    }

    fn description() -> &'static str {
        "Every symbol appears on exactly two cards"
    }
}

impl Invariant<Session> for BoardPairingInvariant {
    fn holds(session: &Session) -> bool {
        session
            .board()
            .is_none_or(<Self as Invariant<Board>>::holds)
    }

    fn description() -> &'static str {
        <Self as Invariant<Board>>::description()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::BoardSize;

    fn board_from(labels: &[&str]) -> Board {
        Board::from_symbols(
            BoardSize::FourByFour,
            labels.iter().map(|s| Symbol::from(*s)).collect(),
        )
        .expect("Sixteen symbols")
    }

    #[test]
    fn test_paired_board_holds() {
        let board = board_from(&[
            "A", "B", "C", "D", "E", "F", "G", "H", "H", "G", "F", "E", "D", "C", "B", "A",
        ]);
        assert!(<BoardPairingInvariant as Invariant<Board>>::holds(&board));
    }

    #[test]
    fn test_triplicated_symbol_violates() {
        let board = board_from(&[
            "A", "A", "A", "D", "E", "F", "G", "H", "H", "G", "F", "E", "D", "C", "B", "B",
        ]);
        assert!(!<BoardPairingInvariant as Invariant<Board>>::holds(&board));
    }

    #[test]
    fn test_unstarted_session_holds() {
        assert!(<BoardPairingInvariant as Invariant<Session>>::holds(
            &Session::new()
        ));
    }
}
