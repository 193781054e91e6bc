//! Contract-based validation for Tower of Hanoi.
//!
//! Contracts define correctness through preconditions and postconditions.
//! They formalize the Hoare-style reasoning: {P} action {Q}

use super::action::MoveError;
use super::game::GameState;
use super::invariants::{HanoiInvariants, InvariantSet};
use super::{Disk, PegId, Pegs};
use crate::clock::Clock;
use tracing::{instrument, warn};

// ─────────────────────────────────────────────────────────────
//  Contract Trait
// ─────────────────────────────────────────────────────────────

/// A contract defines preconditions and postconditions for state transitions.
///
/// - Precondition: {P(state, action)} - must hold before applying action
/// - Postcondition: {Q(before, after)} - must hold after applying action
pub trait Contract<S, A> {
    /// Output of a satisfied precondition.
    type Checked;

    /// Checks preconditions before applying the action.
    fn pre(state: &S, action: &A) -> Result<Self::Checked, MoveError>;

    /// Checks postconditions after applying the action.
    fn post(before: &S, after: &S) -> Result<(), MoveError>;
}

// ─────────────────────────────────────────────────────────────
//  Move Preconditions
// ─────────────────────────────────────────────────────────────

/// Precondition: source and destination differ.
pub struct DistinctPegs;

impl DistinctPegs {
    /// Rejects a move from a peg onto itself.
    #[instrument]
    pub fn check(from: PegId, to: PegId) -> Result<(), MoveError> {
        if from == to {
            Err(MoveError::SamePeg(from))
        } else {
            Ok(())
        }
    }
}

/// Precondition: the source peg has a disk to move.
pub struct SourceNotEmpty;

impl SourceNotEmpty {
    /// Returns the top disk of the source peg.
    #[instrument(skip(pegs))]
    pub fn check(pegs: &Pegs, from: PegId) -> Result<Disk, MoveError> {
        pegs.get(from).top().ok_or(MoveError::EmptySource(from))
    }
}

/// Precondition: the moving disk is smaller than the destination's top.
pub struct FitsOnDestination;

impl FitsOnDestination {
    /// An empty destination always accepts.
    #[instrument(skip(pegs))]
    pub fn check(pegs: &Pegs, disk: Disk, to: PegId) -> Result<(), MoveError> {
        match pegs.get(to).top() {
            Some(onto) if onto < disk => Err(MoveError::DiskTooLarge { disk, onto }),
            _ => Ok(()),
        }
    }
}

/// Composite precondition over raw peg indices.
pub struct LegalMove;

impl LegalMove {
    /// Validates all preconditions, returning the resolved pegs and moving disk.
    #[instrument(skip(pegs))]
    pub fn check(pegs: &Pegs, from: usize, to: usize) -> Result<(PegId, PegId, Disk), MoveError> {
        let from_id = PegId::from_index(from).ok_or(MoveError::PegOutOfRange(from))?;
        let to_id = PegId::from_index(to).ok_or(MoveError::PegOutOfRange(to))?;
        DistinctPegs::check(from_id, to_id)?;
        let disk = SourceNotEmpty::check(pegs, from_id)?;
        FitsOnDestination::check(pegs, disk, to_id)?;
        Ok((from_id, to_id, disk))
    }
}

// ─────────────────────────────────────────────────────────────
//  Move Contract (Pre + Post)
// ─────────────────────────────────────────────────────────────

/// Contract for move actions.
///
/// Preconditions:
/// - Indices in range, pegs distinct
/// - Source not empty
/// - Moving disk fits on destination
///
/// Postconditions:
/// - Every peg strictly decreasing bottom to top
/// - Each disk present exactly once
/// - History replays to the current pegs
pub struct MoveContract;

impl<C: Clock> Contract<GameState<C>, (usize, usize)> for MoveContract {
    type Checked = (PegId, PegId, Disk);

    fn pre(game: &GameState<C>, action: &(usize, usize)) -> Result<Self::Checked, MoveError> {
        LegalMove::check(game.pegs(), action.0, action.1)
    }

    fn post(_before: &GameState<C>, after: &GameState<C>) -> Result<(), MoveError> {
        HanoiInvariants::check_all(after).map_err(|violations| {
            let descriptions = violations
                .iter()
                .map(|v| v.description.as_str())
                .collect::<Vec<_>>()
                .join("; ");
            warn!(%descriptions, "Move postcondition failed");
            MoveError::InvariantViolation(format!("Postcondition failed: {}", descriptions))
        })
    }
}
