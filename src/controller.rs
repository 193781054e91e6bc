//! Application controller: the single owned object a front end drives.

use crate::clock::{Clock, SystemClock};
use crate::config::ScoringConfig;
use crate::error::HanoiError;
use crate::games::hanoi::{
    DiskCount, FinalResults, GameSnapshot, GameState, Hint, MoveError, MoveOutcome, PegId,
};
use crate::store::BestScoreStore;
use tracing::{debug, info, instrument, warn};

/// What happened in response to one player input.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TurnReport {
    /// Result of the move attempt, if one was made.
    pub outcome: MoveOutcome,
    /// Why the move was refused, if it was.
    pub refusal: Option<MoveError>,
    /// Final results, present only on the winning move.
    pub results: Option<FinalResults>,
    /// Whether the winning score became the new best.
    pub new_best: bool,
}

impl TurnReport {
    fn refused(error: MoveError) -> Self {
        Self {
            refusal: Some(error),
            ..Self::default()
        }
    }
}

/// Owns one game at a time plus the best-score store.
///
/// Replaces the game wholesale on new-game or reset, so no state leaks
/// between games.
#[derive(Debug)]
pub struct HanoiController<S: BestScoreStore, C: Clock = SystemClock> {
    config: ScoringConfig,
    store: S,
    clock: C,
    game: GameState<C>,
    results: Option<FinalResults>,
}

impl<S: BestScoreStore> HanoiController<S, SystemClock> {
    /// Creates a controller on the system clock.
    #[track_caller]
    #[instrument(skip(config, store))]
    pub fn new(disk_count: u8, config: ScoringConfig, store: S) -> Result<Self, HanoiError> {
        Self::with_clock(disk_count, config, store, SystemClock)
    }
}

impl<S: BestScoreStore, C: Clock> HanoiController<S, C> {
    /// Creates a controller reading time from `clock`.
    ///
    /// Fails if the disk count is out of range.
    #[track_caller]
    #[instrument(skip(config, store, clock))]
    pub fn with_clock(
        disk_count: u8,
        config: ScoringConfig,
        store: S,
        clock: C,
    ) -> Result<Self, HanoiError> {
        let count = DiskCount::new(disk_count)?;
        info!(%count, best = store.get_best(), "Creating HanoiController");
        Ok(Self {
            config,
            game: GameState::with_clock(count, config, clock.clone()),
            store,
            clock,
            results: None,
        })
    }

    /// Starts a fresh game with `disk_count` disks.
    #[track_caller]
    #[instrument(skip(self))]
    pub fn new_game(&mut self, disk_count: u8) -> Result<(), HanoiError> {
        let count = DiskCount::new(disk_count)?;
        self.game = GameState::with_clock(count, self.config, self.clock.clone());
        self.results = None;
        Ok(())
    }

    /// Restarts the current game with the same disk count.
    #[instrument(skip(self))]
    pub fn reset(&mut self) {
        self.game.reset();
        self.results = None;
    }

    /// Moves the top disk of `from` onto `to`.
    ///
    /// A refused move is charged the invalid-move penalty. Malformed peg
    /// indices and moves after the win are refused without a charge. The
    /// winning move finalizes the score and offers it to the best-score store.
    #[instrument(skip(self))]
    pub fn move_disk(&mut self, from: usize, to: usize) -> TurnReport {
        if let Err(e) = self.game.check_move(from, to) {
            if !matches!(e, MoveError::PegOutOfRange(_) | MoveError::GameOver) {
                self.game.record_invalid_attempt();
            }
            warn!(error = %e, "Invalid move attempt");
            return TurnReport::refused(e);
        }

        let outcome = self.game.attempt_move(from, to);
        let mut report = TurnReport {
            outcome,
            ..TurnReport::default()
        };

        if self.game.is_won()
            && self.results.is_none()
            && let Some(results) = self.game.final_results()
        {
            report.new_best = self.submit_best(*results.score());
            report.results = Some(results);
            self.results = Some(results);
        }

        report
    }

    /// Click-to-select, click-to-move.
    ///
    /// With nothing selected, selects the top disk of `peg`. With a disk
    /// selected, clicking the same peg deselects it and clicking another peg
    /// moves it there. Out-of-range indices are ignored.
    #[instrument(skip(self))]
    pub fn select_peg(&mut self, peg: usize) -> TurnReport {
        if PegId::from_index(peg).is_none() {
            debug!("Ignoring out-of-range peg");
            return TurnReport::default();
        }

        match self.game.selection() {
            Some(selected) if selected.peg.index() != peg => {
                let report = self.move_disk(selected.peg.index(), peg);
                self.game.clear_selection();
                report
            }
            _ => {
                self.game.select(peg);
                TurnReport::default()
            }
        }
    }

    /// Asks the game for a hint, charging the hint penalty.
    #[instrument(skip(self))]
    pub fn hint(&mut self) -> Hint {
        self.game.hint()
    }

    /// Offers a score to the store; returns whether it became the new best.
    #[instrument(skip(self))]
    fn submit_best(&mut self, score: i64) -> bool {
        let best = self.store.get_best();
        if score <= best {
            debug!(score, best, "Score did not beat best");
            return false;
        }
        let saved = self.store.set_best(score);
        if saved {
            info!(score, previous = best, "New best score");
        }
        saved
    }

    /// The current game.
    pub fn game(&self) -> &GameState<C> {
        &self.game
    }

    /// Final results of the current game once won.
    pub fn results(&self) -> Option<FinalResults> {
        self.results
    }

    /// Best score from the store.
    pub fn best_score(&self) -> i64 {
        self.store.get_best()
    }

    /// Live score: the final score once won, otherwise the preview.
    pub fn live_score(&self) -> i64 {
        match self.results {
            Some(results) => *results.score(),
            None => self.game.score().current_score_with_bonuses(),
        }
    }

    /// Read model of the current game.
    pub fn snapshot(&self) -> GameSnapshot {
        self.game.snapshot()
    }

    /// Scoring constants in effect.
    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    /// The best-score store.
    pub fn store(&self) -> &S {
        &self.store
    }
}
