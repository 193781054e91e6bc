mod action;
mod contracts;
mod game;
mod invariants;
mod phases;
mod scoring;
mod snapshot;
mod solver;
mod types;

pub use action::{Move, MoveError};
pub use contracts::{
    Contract, DistinctPegs, FitsOnDestination, LegalMove, MoveContract, SourceNotEmpty,
};
pub use game::{FALLBACK_HINT, GameState, Hint, MoveOutcome, Selection};
pub use invariants::{
    DisksConserved, HanoiInvariants, HistoryConsistent, Invariant, InvariantSet,
    InvariantViolation, StrictlyDecreasingPegs,
};
pub use phases::GameStatus;
pub use scoring::{
    Achievement, FinalResults, NEAR_OPTIMAL_SLACK, STREAK_LENGTH, ScoreManager,
    TIME_BONUS_WINDOW_SECS,
};
pub use snapshot::GameSnapshot;
pub use solver::solve;
pub use types::{Disk, DiskCount, Peg, PegId, Pegs};
