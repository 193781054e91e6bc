//! Game lifecycle phases.

use serde::{Deserialize, Serialize};

/// Where a game is in its lifecycle.
///
/// `NotStarted -> InProgress -> Won`; `Won` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, strum::Display)]
pub enum GameStatus {
    /// No move made yet; the clock has not started.
    #[default]
    NotStarted,
    /// At least one move made.
    InProgress,
    /// Every disk is on the destination peg.
    Won,
}

impl GameStatus {
    /// Returns true once the puzzle is solved.
    pub fn is_finished(&self) -> bool {
        matches!(self, GameStatus::Won)
    }
}
