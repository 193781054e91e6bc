//! First-class action types for Tower of Hanoi.
//!
//! Moves are domain events, not side effects. An applied move is recorded in
//! the game history and can be replayed to rebuild the pegs.

use super::{Disk, PegId};
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// A move: the top disk of `from` placed onto `to`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    /// Peg the disk was taken from.
    pub from: PegId,
    /// Peg the disk was placed on.
    pub to: PegId,
    /// The disk that moved.
    pub disk: Disk,
}

impl Move {
    /// Creates a new move.
    #[instrument]
    pub fn new(from: PegId, to: PegId, disk: Disk) -> Self {
        Self { from, to, disk }
    }
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "disk {}: {} -> {}", self.disk, self.from, self.to)
    }
}

/// Reason a move was refused.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum MoveError {
    /// A raw peg index was outside `0..=2`.
    #[display("Peg index {} is out of range", _0)]
    PegOutOfRange(usize),

    /// Source and destination are the same peg.
    #[display("Cannot move a disk from the {} peg onto itself", _0)]
    SamePeg(PegId),

    /// The source peg holds no disks.
    #[display("The {} peg is empty", _0)]
    EmptySource(PegId),

    /// The moving disk is larger than the destination's top disk.
    #[display("Disk {} cannot go on top of smaller disk {}", disk, onto)]
    DiskTooLarge {
        /// Disk being moved.
        disk: Disk,
        /// Top disk of the destination.
        onto: Disk,
    },

    /// The puzzle is already solved.
    #[display("Game is already over")]
    GameOver,

    /// An invariant was violated (postcondition failure).
    #[display("Invariant violation: {}", _0)]
    InvariantViolation(String),
}

impl std::error::Error for MoveError {}
