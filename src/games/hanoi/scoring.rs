//! Score model for Tower of Hanoi.
//!
//! Rules:
//! - A move is near-optimal when its index is within `minimum_moves + 2`.
//!   Each near-optimal move earns the efficiency bonus; the third in a row
//!   also earns the streak bonus.
//! - Every valid move costs `max(move_penalty, floor(score * percentage))`.
//! - Invalid attempts cost a fixed penalty and end the perfect-game run.
//! - Each move also costs one time penalty per whole elapsed minute.
//! - The score never drops below zero.
//!
//! The manager never reads a clock. Callers pass `now` explicitly.

use super::DiskCount;
use crate::clock::{elapsed_minutes, elapsed_seconds};
use crate::config::ScoringConfig;
use crate::error::HanoiError;
use chrono::{DateTime, Utc};
use derive_getters::Getters;
use derive_new::new;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

/// Slack above the minimum move count that still counts as near-optimal.
pub const NEAR_OPTIMAL_SLACK: u32 = 2;

/// Consecutive near-optimal moves needed for the streak bonus.
pub const STREAK_LENGTH: u32 = 3;

/// Seconds of play covered by the time bonus.
pub const TIME_BONUS_WINDOW_SECS: i64 = 300;

/// Signal raised by a move for the presentation layer to celebrate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display)]
pub enum Achievement {
    /// Three consecutive near-optimal moves.
    Streak,
}

/// Outcome of finalizing a won game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Getters, Serialize, Deserialize, new)]
pub struct FinalResults {
    /// Final score after bonuses.
    score: i64,
    /// `round(minimum_moves / move_count * 100)`.
    efficiency_percent: u32,
    /// Won in exactly the minimum number of moves.
    is_perfect_solution: bool,
    /// No invalid attempts and no move outside the near-optimal window.
    is_perfect_game: bool,
}

/// Tracks the score of a single game.
#[derive(Debug, Clone)]
pub struct ScoreManager {
    config: ScoringConfig,
    disk_count: DiskCount,
    minimum_moves: u32,
    base_score: i64,
    current_score: i64,
    perfect_game: bool,
    consecutive_perfect_moves: u32,
    perfect_solution_bonus_applied: bool,
    perfect_game_bonus_applied: bool,
    time_bonus_applied: bool,
}

impl ScoreManager {
    /// Creates a manager for a raw disk count, validating it first.
    #[track_caller]
    #[instrument(skip(config))]
    pub fn new(disk_count: u8, config: ScoringConfig) -> Result<Self, HanoiError> {
        let count = DiskCount::new(disk_count)?;
        Ok(Self::with_count(count, config))
    }

    /// Creates a manager for an already validated disk count.
    #[instrument(skip(config))]
    pub fn with_count(disk_count: DiskCount, config: ScoringConfig) -> Self {
        let per_disk = config
            .difficulty_multiplier()
            .saturating_mul(disk_count.get() as i64);
        let base_score = config.base_score().saturating_add(per_disk);
        debug!(%disk_count, base_score, "Creating score manager");
        Self {
            config,
            disk_count,
            minimum_moves: disk_count.minimum_moves(),
            base_score,
            current_score: base_score,
            perfect_game: true,
            consecutive_perfect_moves: 0,
            perfect_solution_bonus_applied: false,
            perfect_game_bonus_applied: false,
            time_bonus_applied: false,
        }
    }

    /// Scores one move attempt.
    ///
    /// `move_count` is the number of valid moves made so far, including this
    /// one when `is_valid`.
    #[instrument(skip(self), fields(score = self.current_score))]
    pub fn record_move(
        &mut self,
        is_valid: bool,
        move_count: u32,
        start_time: Option<DateTime<Utc>>,
        now: DateTime<Utc>,
    ) -> Option<Achievement> {
        let mut achievement = None;

        if is_valid {
            if move_count <= self.minimum_moves + NEAR_OPTIMAL_SLACK {
                self.consecutive_perfect_moves += 1;
                self.adjust(*self.config.efficiency_bonus());
                if self.consecutive_perfect_moves == STREAK_LENGTH {
                    self.adjust(*self.config.streak_bonus());
                    achievement = Some(Achievement::Streak);
                    debug!("Streak bonus awarded");
                }
            } else {
                self.consecutive_perfect_moves = 0;
                self.perfect_game = false;
            }

            let proportional =
                (self.current_score as f64 * self.config.move_penalty_percentage()).floor() as i64;
            let penalty = (*self.config.move_penalty()).max(proportional);
            self.adjust(-penalty);
        } else {
            self.adjust(-*self.config.invalid_move_penalty());
            self.perfect_game = false;
            self.consecutive_perfect_moves = 0;
        }

        if let Some(start) = start_time {
            let minutes = elapsed_minutes(start, now);
            self.adjust(-minutes.saturating_mul(*self.config.time_penalty_per_minute()));
        }

        debug!(
            score = self.current_score,
            streak = self.consecutive_perfect_moves,
            "Move scored"
        );
        achievement
    }

    /// Deducts the hint penalty.
    #[instrument(skip(self))]
    pub fn apply_hint_penalty(&mut self) {
        self.adjust(-*self.config.hint_penalty());
    }

    /// Live score preview, including a pending perfect-game bonus.
    ///
    /// Commits nothing.
    pub fn current_score_with_bonuses(&self) -> i64 {
        if self.perfect_game && !self.perfect_game_bonus_applied {
            self.current_score.saturating_add(*self.config.perfect_game_bonus())
        } else {
            self.current_score
        }
    }

    /// Applies end-of-game bonuses and reports the result.
    ///
    /// Every bonus is awarded at most once, so a repeated call returns the
    /// same score. A zero move count yields an all-zero result.
    #[instrument(skip(self), fields(score = self.current_score))]
    pub fn finalize(
        &mut self,
        move_count: u32,
        start_time: Option<DateTime<Utc>>,
        now: DateTime<Utc>,
    ) -> FinalResults {
        if move_count == 0 {
            return FinalResults::default();
        }

        let is_perfect_solution = move_count == self.minimum_moves;
        if is_perfect_solution && !self.perfect_solution_bonus_applied {
            self.adjust(*self.config.perfect_solution_bonus());
            self.perfect_solution_bonus_applied = true;
        }

        if self.perfect_game && !self.perfect_game_bonus_applied {
            self.adjust(*self.config.perfect_game_bonus());
            self.perfect_game_bonus_applied = true;
        }

        if !self.time_bonus_applied {
            let elapsed = start_time.map(|start| elapsed_seconds(start, now)).unwrap_or(0);
            self.adjust((TIME_BONUS_WINDOW_SECS - elapsed).max(0));
            self.time_bonus_applied = true;
        }

        let efficiency_percent =
            (self.minimum_moves as f64 / move_count as f64 * 100.0).round() as u32;

        info!(
            score = self.current_score,
            efficiency_percent,
            is_perfect_solution,
            is_perfect_game = self.perfect_game,
            "Game finalized"
        );

        FinalResults::new(
            self.current_score,
            efficiency_percent,
            is_perfect_solution,
            self.perfect_game,
        )
    }

    /// Disk count this manager scores.
    pub fn disk_count(&self) -> DiskCount {
        self.disk_count
    }

    /// Fewest moves that solve the puzzle.
    pub fn minimum_moves(&self) -> u32 {
        self.minimum_moves
    }

    /// Score the game started from.
    pub fn base_score(&self) -> i64 {
        self.base_score
    }

    /// Committed score, without pending bonuses.
    pub fn current_score(&self) -> i64 {
        self.current_score
    }

    /// Whether the game is still perfect.
    pub fn is_perfect_game(&self) -> bool {
        self.perfect_game
    }

    /// Current run of near-optimal moves.
    pub fn consecutive_perfect_moves(&self) -> u32 {
        self.consecutive_perfect_moves
    }

    fn adjust(&mut self, delta: i64) {
        self.current_score = self.current_score.saturating_add(delta).max(0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeDelta;

    fn epoch() -> DateTime<Utc> {
        DateTime::<Utc>::UNIX_EPOCH
    }

    fn manager(disks: u8) -> ScoreManager {
        ScoreManager::new(disks, ScoringConfig::default()).expect("valid disk count")
    }

    #[test]
    fn test_rejects_bad_disk_counts() {
        assert!(ScoreManager::new(2, ScoringConfig::default()).is_err());
        assert!(ScoreManager::new(9, ScoringConfig::default()).is_err());
    }

    #[test]
    fn test_minimum_moves_and_base() {
        let m = manager(3);
        assert_eq!(m.minimum_moves(), 7);
        assert_eq!(m.base_score(), 1000);
        assert_eq!(m.current_score(), 1000);
        assert!(m.is_perfect_game());
    }

    #[test]
    fn test_difficulty_multiplier_raises_base() {
        let config: ScoringConfig = toml::from_str(
            r#"
BASE_SCORE = 1000
DIFFICULTY_MULTIPLIER = 100
MOVE_PENALTY = 5
MOVE_PENALTY_PERCENTAGE = 0.01
INVALID_MOVE_PENALTY = 25
EFFICIENCY_BONUS = 10
STREAK_BONUS = 50
PERFECT_SOLUTION_BONUS = 500
PERFECT_GAME_BONUS = 250
TIME_PENALTY_PER_MINUTE = 10
HINT_PENALTY = 20
"#,
        )
        .unwrap();
        let m = ScoreManager::new(5, config).unwrap();
        assert_eq!(m.base_score(), 1500);
    }

    #[test]
    fn test_near_optimal_move_scoring() {
        let mut m = manager(3);
        // 1000 + 10 efficiency = 1010, penalty max(5, floor(10.1)) = 10.
        let signal = m.record_move(true, 1, None, epoch());
        assert_eq!(signal, None);
        assert_eq!(m.current_score(), 1000);
        assert_eq!(m.consecutive_perfect_moves(), 1);
    }

    #[test]
    fn test_streak_on_third_move() {
        let mut m = manager(3);
        assert_eq!(m.record_move(true, 1, None, epoch()), None);
        assert_eq!(m.record_move(true, 2, None, epoch()), None);
        assert_eq!(m.record_move(true, 3, None, epoch()), Some(Achievement::Streak));
        // Counter keeps growing; the bonus is not repeated.
        assert_eq!(m.record_move(true, 4, None, epoch()), None);
        assert_eq!(m.consecutive_perfect_moves(), 4);
    }

    #[test]
    fn test_move_outside_window_breaks_perfect_game() {
        let mut m = manager(3);
        m.record_move(true, 1, None, epoch());
        m.record_move(true, 10, None, epoch());
        assert_eq!(m.consecutive_perfect_moves(), 0);
        assert!(!m.is_perfect_game());
        // Window boundary (7 + 2) still counts.
        let mut m = manager(3);
        m.record_move(true, 9, None, epoch());
        assert!(m.is_perfect_game());
    }

    #[test]
    fn test_invalid_move_penalty() {
        let mut m = manager(3);
        m.record_move(true, 1, None, epoch());
        m.record_move(true, 2, None, epoch());
        let before = m.current_score();
        assert_eq!(m.record_move(false, 2, None, epoch()), None);
        assert_eq!(m.current_score(), before - 25);
        assert!(!m.is_perfect_game());
        assert_eq!(m.consecutive_perfect_moves(), 0);
    }

    #[test]
    fn test_time_penalty_per_whole_minute() {
        let mut m = manager(3);
        let start = epoch();
        let now = start + TimeDelta::seconds(150);
        m.record_move(false, 0, Some(start), now);
        // 25 invalid + 2 minutes * 10.
        assert_eq!(m.current_score(), 1000 - 25 - 20);
    }

    #[test]
    fn test_score_clamped_at_zero() {
        let mut m = manager(3);
        for _ in 0..100 {
            m.record_move(false, 0, None, epoch());
        }
        assert_eq!(m.current_score(), 0);
        m.apply_hint_penalty();
        assert_eq!(m.current_score(), 0);
    }

    #[test]
    fn test_hint_penalty() {
        let mut m = manager(4);
        m.apply_hint_penalty();
        assert_eq!(m.current_score(), 980);
        assert!(m.is_perfect_game());
    }

    #[test]
    fn test_preview_includes_pending_perfect_bonus() {
        let mut m = manager(3);
        assert_eq!(m.current_score_with_bonuses(), 1250);
        assert_eq!(m.current_score(), 1000);
        m.record_move(false, 0, None, epoch());
        assert_eq!(m.current_score_with_bonuses(), m.current_score());
    }

    #[test]
    fn test_finalize_zero_moves() {
        let mut m = manager(3);
        assert_eq!(m.finalize(0, None, epoch()), FinalResults::default());
        assert_eq!(m.current_score(), 1000);
    }

    #[test]
    fn test_finalize_perfect_solution() {
        let mut m = manager(3);
        let start = epoch();
        let now = start + TimeDelta::seconds(100);
        let results = m.finalize(7, Some(start), now);
        // 1000 + 500 + 250 + (300 - 100).
        assert_eq!(*results.score(), 1950);
        assert_eq!(*results.efficiency_percent(), 100);
        assert!(*results.is_perfect_solution());
        assert!(*results.is_perfect_game());
    }

    #[test]
    fn test_finalize_is_idempotent() {
        let mut m = manager(3);
        let first = m.finalize(7, Some(epoch()), epoch());
        let second = m.finalize(7, Some(epoch()), epoch());
        assert_eq!(first, second);
        assert_eq!(m.current_score_with_bonuses(), m.current_score());
    }

    #[test]
    fn test_finalize_withholds_perfect_game_bonus_after_invalid_move() {
        let mut m = manager(3);
        m.record_move(false, 0, None, epoch());
        assert_eq!(m.current_score(), 975);
        let start = epoch();
        let results = m.finalize(7, Some(start), start + TimeDelta::seconds(100));
        // 975 + 500 solution + 200 time, no 250 perfect-game bonus.
        assert_eq!(*results.score(), 1675);
        assert!(*results.is_perfect_solution());
        assert!(!*results.is_perfect_game());
    }

    #[test]
    fn test_finalize_efficiency_rounding() {
        let mut m = manager(3);
        m.record_move(true, 12, None, epoch());
        let results = m.finalize(12, None, epoch());
        // 7 / 12 = 58.33%
        assert_eq!(*results.efficiency_percent(), 58);
        assert!(!*results.is_perfect_solution());
        assert!(!*results.is_perfect_game());
    }

    #[test]
    fn test_time_bonus_expires_after_five_minutes() {
        let mut m = manager(3);
        let start = epoch();
        let results = m.finalize(8, Some(start), start + TimeDelta::minutes(6));
        // No perfect-solution bonus (8 != 7), perfect game still holds.
        assert_eq!(*results.score(), 1250);
    }
}
