//! First-class invariants for memory match.
//!
//! Invariants are logical properties that must hold after every session
//! transition. They are checked in debug builds and can be tested
//! independently.

mod board_pairing;
mod pair_accounting;
mod selection_bounded;

pub use board_pairing::BoardPairingInvariant;
pub use pair_accounting::PairAccountingInvariant;
pub use selection_bounded::SelectionBoundedInvariant;

use crate::Session;

/// A logical property that must hold for a given state.
pub trait Invariant<S> {
    /// Checks if the invariant holds for the given state.
    fn holds(state: &S) -> bool;

    /// Human-readable description of the invariant.
    fn description() -> &'static str;
}

/// Violation of an invariant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvariantViolation {
    /// Description of the violated invariant.
    pub description: String,
}

impl InvariantViolation {
    /// Creates a new invariant violation.
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
        }
    }
}

/// A set of invariants that can be checked together.
///
/// Implemented for tuples of invariants over the same state.
pub trait InvariantSet<S> {
    /// Checks all invariants in the set, collecting every violation.
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>>;
}

impl<S, I1, I2, I3> InvariantSet<S> for (I1, I2, I3)
where
    I1: Invariant<S>,
    I2: Invariant<S>,
    I3: Invariant<S>,
{
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>> {
        let violations: Vec<_> = [
            (I1::holds(state), I1::description()),
            (I2::holds(state), I2::description()),
            (I3::holds(state), I3::description()),
        ]
        .into_iter()
        .filter(|(holds, _)| !holds)
        .map(|(_, description)| InvariantViolation::new(description))
        .collect();

        if violations.is_empty() {
            Ok(())
        } else {
            Err(violations)
        }
    }
}

/// Every invariant a session must satisfy between transitions.
pub type SessionInvariants = (
    SelectionBoundedInvariant,
    BoardPairingInvariant,
    PairAccountingInvariant,
);

/// Panics if any session invariant is violated. No-op in release builds.
pub(crate) fn assert_invariants(session: &Session) {
    #[cfg(debug_assertions)]
    if let Err(violations) = SessionInvariants::check_all(session) {
        let descriptions = violations
            .iter()
            .map(|v| v.description.as_str())
            .collect::<Vec<_>>()
            .join("; ");
        panic!("Session invariant violated: {descriptions}");
    }
    #[cfg(not(debug_assertions))]
    let _ = session;
}
