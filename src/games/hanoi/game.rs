//! Game state machine for Tower of Hanoi.

use super::action::{Move, MoveError};
use super::contracts::{Contract, MoveContract};
use super::phases::GameStatus;
use super::scoring::{Achievement, FinalResults, ScoreManager};
use super::snapshot::GameSnapshot;
use super::{Disk, DiskCount, Peg, PegId, Pegs};
use crate::clock::{Clock, SystemClock, elapsed_seconds};
use crate::config::ScoringConfig;
use crate::error::HanoiError;
use chrono::{DateTime, Utc};
use derive_getters::Getters;
use derive_new::new;
use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;
use tracing::{debug, info, instrument, warn};

/// Result of [`GameState::attempt_move`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MoveOutcome {
    /// Whether a disk moved.
    pub moved: bool,
    /// Achievement raised by this move, if any.
    pub achievement: Option<Achievement>,
    /// The disk that moved.
    pub disk_moved: Option<Disk>,
}

impl MoveOutcome {
    fn refused() -> Self {
        Self::default()
    }
}

/// The disk a player has picked up but not yet placed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Selection {
    /// Peg the disk sits on.
    pub peg: PegId,
    /// The selected (top) disk.
    pub disk: Disk,
}

/// A suggested next move.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize, new)]
pub struct Hint {
    /// Peg holding the suggested disk.
    peg: Option<PegId>,
    /// Suggested disk.
    disk: Option<Disk>,
    /// Message for the player.
    message: String,
}

/// Fallback hint text when no peg qualifies.
pub const FALLBACK_HINT: &str = "Try moving the smallest disk to a peg where it fits";

/// One game of Tower of Hanoi.
///
/// Owns the pegs, counters and selection cursor, and delegates all scoring
/// to a [`ScoreManager`]. Time is read from `C` at call time.
#[derive(Debug, Clone)]
pub struct GameState<C: Clock = SystemClock> {
    disk_count: DiskCount,
    config: ScoringConfig,
    pegs: Pegs,
    move_count: u32,
    start_time: Option<DateTime<Utc>>,
    started: bool,
    selection: Option<Selection>,
    history: Vec<Move>,
    score: ScoreManager,
    clock: C,
}

impl GameState<SystemClock> {
    /// Creates a new game on the system clock.
    #[instrument(skip(config))]
    pub fn new(disk_count: DiskCount, config: ScoringConfig) -> Self {
        Self::with_clock(disk_count, config, SystemClock)
    }

    /// Creates a new game from a raw disk count, validating it first.
    #[track_caller]
    #[instrument(skip(config))]
    pub fn from_disks(disk_count: u8, config: ScoringConfig) -> Result<Self, HanoiError> {
        Ok(Self::new(DiskCount::new(disk_count)?, config))
    }
}

impl<C: Clock> GameState<C> {
    /// Creates a new game reading time from `clock`.
    #[instrument(skip(config, clock))]
    pub fn with_clock(disk_count: DiskCount, config: ScoringConfig, clock: C) -> Self {
        info!(%disk_count, "New game");
        Self {
            disk_count,
            config,
            pegs: Pegs::new(disk_count),
            move_count: 0,
            start_time: None,
            started: false,
            selection: None,
            history: Vec::new(),
            score: ScoreManager::with_count(disk_count, config),
            clock,
        }
    }

    /// Checks whether moving the top disk of `from` onto `to` is legal.
    ///
    /// Out-of-range indices are simply illegal, and nothing is legal once
    /// the game is won.
    #[instrument(skip(self))]
    pub fn is_legal_move(&self, from: usize, to: usize) -> bool {
        self.checked_move(from, to).is_ok()
    }

    /// Explains why a move would be refused, or `Ok` with the disk that would move.
    #[instrument(skip(self))]
    pub fn check_move(&self, from: usize, to: usize) -> Result<Disk, MoveError> {
        self.checked_move(from, to).map(|(_, _, disk)| disk)
    }

    fn checked_move(&self, from: usize, to: usize) -> Result<(PegId, PegId, Disk), MoveError> {
        if self.is_won() {
            return Err(MoveError::GameOver);
        }
        MoveContract::pre(self, &(from, to))
    }

    /// True only if `disk` is the top disk of `peg`.
    #[instrument(skip(self))]
    pub fn can_pick_up(&self, peg: usize, disk: Disk) -> bool {
        self.pegs
            .get_index(peg)
            .and_then(|p| p.top())
            .is_some_and(|top| top == disk)
    }

    /// Moves the top disk of `from` onto `to` if legal.
    ///
    /// An illegal move changes nothing and is not scored; callers that want
    /// the invalid-move penalty must call [`GameState::record_invalid_attempt`].
    #[instrument(skip(self), fields(move_count = self.move_count))]
    pub fn attempt_move(&mut self, from: usize, to: usize) -> MoveOutcome {
        let (from_id, to_id, disk) = match self.checked_move(from, to) {
            Ok(checked) => checked,
            Err(e) => {
                warn!(error = %e, "Move refused");
                return MoveOutcome::refused();
            }
        };

        #[cfg(debug_assertions)]
        let before = self.clone();

        let now = self.clock.now();
        if !self.started {
            self.started = true;
            self.start_time = Some(now);
            debug!("Clock started");
        }

        self.pegs.transfer(from_id, to_id);
        self.move_count += 1;
        self.history.push(Move::new(from_id, to_id, disk));
        self.selection = None;

        #[cfg(debug_assertions)]
        {
            let checked = MoveContract::post(&before, self);
            debug_assert!(checked.is_ok(), "{:?}", checked);
        }

        let achievement = self.score.record_move(true, self.move_count, self.start_time, now);

        debug!(%from_id, %to_id, disk, move_count = self.move_count, "Disk moved");
        if self.is_won() {
            info!(move_count = self.move_count, "Puzzle solved");
        }

        MoveOutcome {
            moved: true,
            achievement,
            disk_moved: Some(disk),
        }
    }

    /// Charges the invalid-move penalty without touching the pegs.
    #[instrument(skip(self))]
    pub fn record_invalid_attempt(&mut self) {
        let now = self.clock.now();
        self.score.record_move(false, self.move_count, self.start_time, now);
    }

    /// True when the destination peg holds every disk.
    pub fn is_won(&self) -> bool {
        self.pegs.get(PegId::Destination).len() == self.disk_count.get() as usize
    }

    /// Current lifecycle phase.
    pub fn status(&self) -> GameStatus {
        if self.is_won() {
            GameStatus::Won
        } else if self.started {
            GameStatus::InProgress
        } else {
            GameStatus::NotStarted
        }
    }

    /// Finalizes the score of a won game; `None` until the game is won.
    #[instrument(skip(self))]
    pub fn final_results(&mut self) -> Option<FinalResults> {
        if !self.is_won() {
            return None;
        }
        let now = self.clock.now();
        Some(self.score.finalize(self.move_count, self.start_time, now))
    }

    /// Suggests a disk to move, charging the hint penalty.
    ///
    /// The penalty applies even when no suggestion can be made.
    #[instrument(skip(self))]
    pub fn hint(&mut self) -> Hint {
        self.score.apply_hint_penalty();

        let suggestion = self
            .pegs
            .iter()
            .find_map(|(id, peg)| match (peg.top(), peg.min_disk()) {
                (Some(top), Some(min)) if top == min => Some((id, top)),
                _ => None,
            });

        match suggestion {
            Some((peg, disk)) => {
                debug!(%peg, disk, "Hint given");
                Hint::new(
                    Some(peg),
                    Some(disk),
                    format!("Try moving disk {} from the {} peg", disk, peg),
                )
            }
            None => {
                warn!("No hint available");
                Hint::new(None, None, FALLBACK_HINT.to_string())
            }
        }
    }

    /// Restarts with the same disk count, discarding score and progress.
    #[instrument(skip(self))]
    pub fn reset(&mut self) {
        *self = Self::with_clock(self.disk_count, self.config, self.clock.clone());
    }

    /// Selects the top disk of `peg`.
    ///
    /// Selecting the already selected peg clears the selection; an empty peg
    /// selects nothing; an out-of-range index changes nothing.
    #[instrument(skip(self))]
    pub fn select(&mut self, peg: usize) -> Option<Selection> {
        let Some(id) = PegId::from_index(peg) else {
            return self.selection;
        };

        self.selection = match self.selection {
            Some(current) if current.peg == id => None,
            _ => self
                .pegs
                .get(id)
                .top()
                .map(|disk| Selection { peg: id, disk }),
        };
        self.selection
    }

    /// Drops the current selection.
    pub fn clear_selection(&mut self) {
        self.selection = None;
    }

    /// Every legal `(from, to)` pair in index order; empty once won.
    pub fn legal_moves(&self) -> Vec<(PegId, PegId)> {
        PegId::iter()
            .flat_map(|from| PegId::iter().map(move |to| (from, to)))
            .filter(|(from, to)| self.is_legal_move(from.index(), to.index()))
            .collect()
    }

    /// Seconds since the first move, zero before it.
    pub fn elapsed_seconds(&self) -> i64 {
        self.start_time
            .map(|start| elapsed_seconds(start, self.clock.now()))
            .unwrap_or(0)
    }

    /// Read model for the presentation layer.
    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot::new(
            self.disk_count,
            self.pegs.clone(),
            self.move_count,
            self.score.minimum_moves(),
            self.status(),
            self.score.current_score_with_bonuses(),
            self.elapsed_seconds(),
            self.selection,
        )
    }

    /// The pegs.
    pub fn pegs(&self) -> &Pegs {
        &self.pegs
    }

    /// One peg.
    pub fn peg(&self, id: PegId) -> &Peg {
        self.pegs.get(id)
    }

    /// Number of disks in play.
    pub fn disk_count(&self) -> DiskCount {
        self.disk_count
    }

    /// Valid moves made so far.
    pub fn move_count(&self) -> u32 {
        self.move_count
    }

    /// Time of the first move.
    pub fn start_time(&self) -> Option<DateTime<Utc>> {
        self.start_time
    }

    /// Whether the first move has been made.
    pub fn is_started(&self) -> bool {
        self.started
    }

    /// Currently selected disk.
    pub fn selection(&self) -> Option<Selection> {
        self.selection
    }

    /// Applied moves in order.
    pub fn history(&self) -> &[Move] {
        &self.history
    }

    /// Scoring state.
    pub fn score(&self) -> &ScoreManager {
        &self.score
    }

    /// Scoring constants in effect.
    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    #[cfg(test)]
    pub(super) fn pegs_mut(&mut self) -> &mut Pegs {
        &mut self.pegs
    }
}
