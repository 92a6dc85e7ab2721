//! Pair accounting invariant: resolved cards match the matched-pair counter.

use std::collections::HashMap;

use super::Invariant;
use crate::{Session, SessionStatus, Symbol};

/// Invariant: resolved cards number exactly `2 * matched_pairs`, they come in
/// same-symbol pairs, and the session is completed exactly when every pair
/// is matched.
pub struct PairAccountingInvariant;

impl Invariant<Session> for PairAccountingInvariant {
    fn holds(session: &Session) -> bool {
        let matched = session.matched_pairs() as usize;
        let Some(board) = session.board() else {
            return matched == 0 && session.status() == SessionStatus::NotStarted;
        };

        let mut resolved: HashMap<&Symbol, usize> = HashMap::new();
        for card in board.cards().iter().filter(|card| card.is_resolved()) {
            *resolved.entry(card.symbol()).or_default() += 1;
        }
        let pairs_intact = resolved.values().all(|&n| n == 2);
        let count_matches = board.resolved_count() == matched * 2;
        let completion_matches =
            (session.status() == SessionStatus::Completed) == (matched == board.size().pair_count());

        pairs_intact && count_matches && completion_matches
    }

    fn description() -> &'static str {
        "Resolved cards equal matched pairs, and completion means every pair matched"
    }
}
