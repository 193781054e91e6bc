//! Read model handed to the presentation layer.

use super::game::Selection;
use super::phases::GameStatus;
use super::{DiskCount, Pegs};
use derive_getters::Getters;
use derive_new::new;
use serde::{Deserialize, Serialize};

/// Everything a view needs to draw one frame of a game.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize, new)]
pub struct GameSnapshot {
    /// Disks in play.
    disk_count: DiskCount,
    /// Peg contents, bottom to top.
    pegs: Pegs,
    /// Valid moves made so far.
    move_count: u32,
    /// Fewest moves that solve the puzzle.
    minimum_moves: u32,
    /// Lifecycle phase.
    status: GameStatus,
    /// Live score, including a pending perfect-game bonus.
    live_score: i64,
    /// Seconds since the first move.
    elapsed_seconds: i64,
    /// Currently selected disk.
    selection: Option<Selection>,
}

impl GameSnapshot {
    /// Serializes the snapshot as JSON.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}
