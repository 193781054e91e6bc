//! Scoring configuration loaded once at startup.

use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info, instrument, warn};

/// Smallest playable disk count.
pub const MIN_DISKS: u8 = 3;

/// Largest playable disk count.
pub const MAX_DISKS: u8 = 8;

/// Numeric constants that drive the score model.
///
/// Every field is required when loading from TOML; a missing key fails the
/// load rather than falling back to a default. Keys use the upper-case
/// constant names (`BASE_SCORE`, `HINT_PENALTY`, ...).
///
/// Deserialization runs [`ScoringConfig::validate`], so every value of this
/// type holds valid constants.
#[derive(Debug, Clone, Copy, PartialEq, Getters, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE", try_from = "RawScoringConfig")]
pub struct ScoringConfig {
    /// Score every game starts from.
    base_score: i64,
    /// Extra base score per disk.
    difficulty_multiplier: i64,
    /// Minimum deduction for each valid move.
    move_penalty: i64,
    /// Fraction of the current score deducted per valid move, if larger than `move_penalty`.
    move_penalty_percentage: f64,
    /// Deduction for an invalid move attempt.
    invalid_move_penalty: i64,
    /// Bonus for each move inside the near-optimal window.
    efficiency_bonus: i64,
    /// Bonus for reaching three consecutive near-optimal moves.
    streak_bonus: i64,
    /// Bonus for winning in exactly the minimum number of moves.
    perfect_solution_bonus: i64,
    /// Bonus for a game with no invalid or out-of-window moves.
    perfect_game_bonus: i64,
    /// Deduction per whole elapsed minute, charged on every move.
    time_penalty_per_minute: i64,
    /// Deduction for requesting a hint.
    hint_penalty: i64,
}

/// Wire form of [`ScoringConfig`], checked on conversion.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE", deny_unknown_fields)]
struct RawScoringConfig {
    base_score: i64,
    difficulty_multiplier: i64,
    move_penalty: i64,
    move_penalty_percentage: f64,
    invalid_move_penalty: i64,
    efficiency_bonus: i64,
    streak_bonus: i64,
    perfect_solution_bonus: i64,
    perfect_game_bonus: i64,
    time_penalty_per_minute: i64,
    hint_penalty: i64,
}

impl TryFrom<RawScoringConfig> for ScoringConfig {
    type Error = ConfigError;

    fn try_from(raw: RawScoringConfig) -> Result<Self, Self::Error> {
        let config = Self {
            base_score: raw.base_score,
            difficulty_multiplier: raw.difficulty_multiplier,
            move_penalty: raw.move_penalty,
            move_penalty_percentage: raw.move_penalty_percentage,
            invalid_move_penalty: raw.invalid_move_penalty,
            efficiency_bonus: raw.efficiency_bonus,
            streak_bonus: raw.streak_bonus,
            perfect_solution_bonus: raw.perfect_solution_bonus,
            perfect_game_bonus: raw.perfect_game_bonus,
            time_penalty_per_minute: raw.time_penalty_per_minute,
            hint_penalty: raw.hint_penalty,
        };
        config.validate()?;
        Ok(config)
    }
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            base_score: 1000,
            difficulty_multiplier: 0,
            move_penalty: 5,
            move_penalty_percentage: 0.01,
            invalid_move_penalty: 25,
            efficiency_bonus: 10,
            streak_bonus: 50,
            perfect_solution_bonus: 500,
            perfect_game_bonus: 250,
            time_penalty_per_minute: 10,
            hint_penalty: 20,
        }
    }
}

impl ScoringConfig {
    /// Loads and validates a configuration from a TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading scoring config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;
        let config = Self::from_toml(&content)?;
        info!("Scoring config loaded successfully");
        Ok(config)
    }

    /// Parses and validates a configuration from TOML text.
    #[instrument(skip(content))]
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))
    }

    /// Checks sign and range constraints on every constant.
    #[instrument(skip(self))]
    pub fn validate(&self) -> Result<(), ConfigError> {
        let integers = [
            ("BASE_SCORE", self.base_score),
            ("DIFFICULTY_MULTIPLIER", self.difficulty_multiplier),
            ("MOVE_PENALTY", self.move_penalty),
            ("INVALID_MOVE_PENALTY", self.invalid_move_penalty),
            ("EFFICIENCY_BONUS", self.efficiency_bonus),
            ("STREAK_BONUS", self.streak_bonus),
            ("PERFECT_SOLUTION_BONUS", self.perfect_solution_bonus),
            ("PERFECT_GAME_BONUS", self.perfect_game_bonus),
            ("TIME_PENALTY_PER_MINUTE", self.time_penalty_per_minute),
            ("HINT_PENALTY", self.hint_penalty),
        ];

        for (name, value) in integers {
            if value < 0 {
                warn!(name, value, "Negative scoring constant");
                return Err(ConfigError::new(format!(
                    "{} must be non-negative, got {}",
                    name, value
                )));
            }
        }

        let pct = self.move_penalty_percentage;
        if !pct.is_finite() || !(0.0..=1.0).contains(&pct) {
            warn!(pct, "Move penalty percentage out of range");
            return Err(ConfigError::new(format!(
                "MOVE_PENALTY_PERCENTAGE must be a finite value in [0, 1], got {}",
                pct
            )));
        }

        Ok(())
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}
