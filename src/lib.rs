//! Strictly Hanoi library - contract-checked Tower of Hanoi rules and scoring
//!
//! This library is the game core of a single-player Tower of Hanoi puzzle,
//! decoupled from any presentation layer.
//!
//! # Architecture
//!
//! - **ScoreManager**: pure score calculator (efficiency, streaks, penalties, bonuses)
//! - **GameState**: pegs, move counter, timing anchor and selection cursor
//! - **Contracts**: move preconditions and invariant postconditions
//! - **HanoiController**: owned application object holding a game and the best-score store
//!
//! # Example
//!
//! ```
//! use strictly_hanoi::{HanoiController, MemoryBestScoreStore, ScoringConfig};
//!
//! # fn example() -> Result<(), strictly_hanoi::HanoiError> {
//! let store = MemoryBestScoreStore::new();
//! let mut controller = HanoiController::new(3, ScoringConfig::default(), store)?;
//!
//! let report = controller.move_disk(0, 2);
//! assert!(report.outcome.moved);
//!
//! // Illegal: disk 2 cannot go on top of disk 1.
//! let report = controller.move_disk(0, 2);
//! assert!(report.refusal.is_some());
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod clock;
mod config;
mod controller;
mod error;
mod games;
mod store;

// Crate-level exports - Time
pub use clock::{Clock, ManualClock, SystemClock, elapsed_minutes, elapsed_seconds};

// Crate-level exports - Configuration
pub use config::{ConfigError, MAX_DISKS, MIN_DISKS, ScoringConfig};

// Crate-level exports - Errors
pub use error::{HanoiError, HanoiErrorKind};

// Crate-level exports - Controller
pub use controller::{HanoiController, TurnReport};

// Crate-level exports - Best score
pub use store::{
    BEST_SCORE_KEY, BestScoreStore, JsonFileBestScoreStore, MAX_STORED_SCORE,
    MemoryBestScoreStore, is_storable,
};

// Crate-level exports - Game types
pub use games::hanoi::{
    Achievement, Contract, Disk, DiskCount, DisksConserved, DistinctPegs, FALLBACK_HINT,
    FinalResults, FitsOnDestination, GameSnapshot, GameState, GameStatus, HanoiInvariants, Hint,
    HistoryConsistent, Invariant, InvariantSet, InvariantViolation, LegalMove, Move, MoveContract,
    MoveError, MoveOutcome, NEAR_OPTIMAL_SLACK, Peg, PegId, Pegs, STREAK_LENGTH, ScoreManager,
    Selection, SourceNotEmpty, StrictlyDecreasingPegs, TIME_BONUS_WINDOW_SECS, solve,
};
