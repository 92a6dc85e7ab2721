//! Selection bound invariant: at most two cards are face up at once.

use super::Invariant;
use crate::Session;

/// Invariant: the active selection holds at most two cards, each of them
/// revealed and unresolved, and no other card is revealed.
pub struct SelectionBoundedInvariant;

impl Invariant<Session> for SelectionBoundedInvariant {
    fn holds(session: &Session) -> bool {
        let selection = session.active_selection();
        if selection.len() > 2 {
            return false;
        }

        let Some(board) = session.board() else {
            return selection.is_empty();
        };

        let selection_face_up = selection.iter().all(|&id| {
            board
                .get(id)
                .is_some_and(|card| card.is_revealed() && !card.is_resolved())
        });
        let revealed = board
            .cards()
            .iter()
            .filter(|card| card.is_revealed() && !card.is_resolved())
            .count();

        selection_face_up && revealed == selection.len()
    }

    fn description() -> &'static str {
        "At most two cards are revealed, and exactly the selected ones"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{BoardGenerator, BoardSize, SymbolPool};

    #[test]
    fn test_holds_through_a_turn() {
        let mut session = Session::with_generator(BoardGenerator::seeded(SymbolPool::default(), 11));
        session.start(BoardSize::FourByFour).expect("Valid board");
        assert!(SelectionBoundedInvariant::holds(&session));

        session.select(0);
        assert!(SelectionBoundedInvariant::holds(&session));
        assert_eq!(session.active_selection(), &[0]);

        session.select(1);
        assert!(SelectionBoundedInvariant::holds(&session));
        assert!(session.active_selection().is_empty());
    }
}
