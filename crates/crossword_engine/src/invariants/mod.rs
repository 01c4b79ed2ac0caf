//! First-class invariants for a crossword game.
//!
//! Invariants are logical properties that must hold after every accepted
//! action. They are testable independently and the contracts check them
//! as postconditions.

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
/// Implemented for tuples so sets compose at the type level.
pub trait InvariantSet<S> {
    /// Checks all invariants in the set, collecting every violation.
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>>;
}

fn collect<S, I: Invariant<S>>(state: &S, violations: &mut Vec<InvariantViolation>) {
    if !I::holds(state) {
        violations.push(InvariantViolation::new(I::description()));
    }
}

impl<S, I1, I2> InvariantSet<S> for (I1, I2)
where
    I1: Invariant<S>,
    I2: Invariant<S>,
{
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>> {
        let mut violations = Vec::new();
        collect::<S, I1>(state, &mut violations);
        collect::<S, I2>(state, &mut violations);
        if violations.is_empty() { Ok(()) } else { Err(violations) }
    }
}

impl<S, I1, I2, I3> InvariantSet<S> for (I1, I2, I3)
where
    I1: Invariant<S>,
    I2: Invariant<S>,
    I3: Invariant<S>,
{
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>> {
        let mut violations = Vec::new();
        collect::<S, I1>(state, &mut violations);
        collect::<S, I2>(state, &mut violations);
        collect::<S, I3>(state, &mut violations);
        if violations.is_empty() { Ok(()) } else { Err(violations) }
    }
}

pub mod announcer_in_roster;
pub mod round_consistent;
pub mod squares_filled_bounded;

pub use announcer_in_roster::AnnouncerInRosterInvariant;
pub use round_consistent::RoundConsistentInvariant;
pub use squares_filled_bounded::SquaresFilledBoundedInvariant;

/// All crossword game invariants as a composable set.
pub type CrosswordInvariants = (
    RoundConsistentInvariant,
    AnnouncerInRosterInvariant,
    SquaresFilledBoundedInvariant,
);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::Game;
    use crate::types::{GameId, PlayerId};

    fn game() -> Game {
        Game::new(GameId::new("g"), vec![PlayerId::new("a"), PlayerId::new("b")], 2).unwrap()
    }

    #[test]
    fn test_invariant_set_holds_for_new_game() {
        assert!(CrosswordInvariants::check_all(&game()).is_ok());
    }

    #[test]
    fn test_invariant_set_holds_mid_round() {
        let mut game = game();
        game.announce(&PlayerId::new("a"), "T").unwrap();
        game.place(&PlayerId::new("b"), 1, 0).unwrap();
        assert!(CrosswordInvariants::check_all(&game).is_ok());
    }

    #[test]
    fn test_invariant_set_reports_every_violation() {
        let mut game = game();
        game.announcer = 7;
        game.squares_filled = 9;
        let violations = CrosswordInvariants::check_all(&game).unwrap_err();
        assert_eq!(violations.len(), 3);
    }

    #[test]
    fn test_two_invariants_as_set() {
        type TwoInvariants = (RoundConsistentInvariant, AnnouncerInRosterInvariant);
        assert!(TwoInvariants::check_all(&game()).is_ok());
    }
}
