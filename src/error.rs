//! Crate error types with caller location tracking.

use crate::config::{ConfigError, MAX_DISKS, MIN_DISKS};
use derive_more::{Display, Error, From};
use tracing::instrument;

/// The specific failure behind a [`HanoiError`].
#[derive(Debug, Clone, Display, Error, From)]
pub enum HanoiErrorKind {
    /// Disk count outside the playable range.
    #[display("Disk count {} is outside {}..={}", _0, MIN_DISKS, MAX_DISKS)]
    #[from(ignore)]
    InvalidDiskCount(#[error(not(source))] u8),

    /// Peg index outside `0..=2`.
    #[display("Peg index {} is out of range (must be 0-2)", _0)]
    #[from(ignore)]
    InvalidPeg(#[error(not(source))] usize),

    /// Configuration failed to load or validate.
    #[display("{}", _0)]
    Config(ConfigError),

    /// Best-score persistence failed.
    #[display("Store error: {}", _0)]
    #[from(ignore)]
    Store(#[error(not(source))] String),
}

/// Error returned by fallible construction paths.
#[derive(Debug, Clone, Display, Error)]
#[display("Hanoi error: {} at {}:{}", kind, file, line)]
pub struct HanoiError {
    /// What went wrong.
    pub kind: HanoiErrorKind,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl HanoiError {
    /// Creates a new error with caller location tracking.
    #[track_caller]
    #[instrument]
    pub fn new(kind: HanoiErrorKind) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            kind,
            line: loc.line(),
            file: loc.file(),
        }
    }
}

impl From<ConfigError> for HanoiError {
    #[track_caller]
    fn from(err: ConfigError) -> Self {
        Self::new(HanoiErrorKind::Config(err))
    }
}
