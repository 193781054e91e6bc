//! Best-score persistence.
//!
//! Best-score tracking is best-effort: reads that fail degrade to zero and
//! writes that fail report `false`, so gameplay is never blocked.

use crate::error::{HanoiError, HanoiErrorKind};
use serde_json::{Map, Value};
use std::io::ErrorKind;
use std::path::PathBuf;
use tracing::{debug, info, instrument, warn};

/// Fixed key the best score is stored under.
pub const BEST_SCORE_KEY: &str = "hanoi_best_score";

/// Exclusive upper bound on storable scores.
pub const MAX_STORED_SCORE: i64 = 1_000_000;

/// Whether `score` may be stored (`0 <= score < 1_000_000`).
pub fn is_storable(score: i64) -> bool {
    (0..MAX_STORED_SCORE).contains(&score)
}

/// Storage for the single best score.
pub trait BestScoreStore: std::fmt::Debug {
    /// Best score so far; 0 if absent, invalid or unreadable.
    fn get_best(&self) -> i64;

    /// Stores `score`, rejecting values outside `0..1_000_000`.
    ///
    /// Returns whether the value was written.
    fn set_best(&mut self, score: i64) -> bool;
}

/// Best score kept in memory for the lifetime of the process.
#[derive(Debug, Clone, Default)]
pub struct MemoryBestScoreStore {
    best: Option<i64>,
}

impl MemoryBestScoreStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl BestScoreStore for MemoryBestScoreStore {
    fn get_best(&self) -> i64 {
        self.best.filter(|s| is_storable(*s)).unwrap_or(0)
    }

    #[instrument(skip(self))]
    fn set_best(&mut self, score: i64) -> bool {
        if !is_storable(score) {
            warn!(score, "Rejected out-of-range best score");
            return false;
        }
        self.best = Some(score);
        true
    }
}

/// Best score persisted in a JSON object file under [`BEST_SCORE_KEY`].
///
/// Other keys in the file are preserved on write.
#[derive(Debug, Clone)]
pub struct JsonFileBestScoreStore {
    path: PathBuf,
}

impl JsonFileBestScoreStore {
    /// Creates a store backed by the file at `path` (created on first write).
    #[instrument(skip(path), fields(path = %path.display()))]
    pub fn new(path: PathBuf) -> Self {
        info!("Creating JsonFileBestScoreStore");
        Self { path }
    }

    /// Path of the backing file.
    pub fn path(&self) -> &std::path::Path {
        &self.path
    }

    /// Reads the whole JSON object; a missing file reads as empty.
    #[instrument(skip(self))]
    fn read_map(&self) -> Result<Map<String, Value>, HanoiError> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "Best score file not found");
                return Ok(Map::new());
            }
            Err(e) => {
                return Err(HanoiError::new(HanoiErrorKind::Store(format!(
                    "Failed to read '{}': {}",
                    self.path.display(),
                    e
                ))));
            }
        };

        match serde_json::from_str::<Value>(&content) {
            Ok(Value::Object(map)) => Ok(map),
            Ok(_) => Err(HanoiError::new(HanoiErrorKind::Store(
                "Best score file is not a JSON object".to_string(),
            ))),
            Err(e) => Err(HanoiError::new(HanoiErrorKind::Store(format!(
                "Failed to parse '{}': {}",
                self.path.display(),
                e
            )))),
        }
    }

    #[instrument(skip(self, map))]
    fn write_map(&self, map: Map<String, Value>) -> Result<(), HanoiError> {
        let content = serde_json::to_string_pretty(&Value::Object(map))
            .map_err(|e| HanoiError::new(HanoiErrorKind::Store(e.to_string())))?;
        std::fs::write(&self.path, content).map_err(|e| {
            HanoiError::new(HanoiErrorKind::Store(format!(
                "Failed to write '{}': {}",
                self.path.display(),
                e
            )))
        })
    }
}

impl BestScoreStore for JsonFileBestScoreStore {
    #[instrument(skip(self))]
    fn get_best(&self) -> i64 {
        match self.read_map() {
            Ok(map) => map
                .get(BEST_SCORE_KEY)
                .and_then(Value::as_i64)
                .filter(|s| is_storable(*s))
                .unwrap_or(0),
            Err(e) => {
                warn!(error = %e, "Best score unreadable, using 0");
                0
            }
        }
    }

    #[instrument(skip(self))]
    fn set_best(&mut self, score: i64) -> bool {
        if !is_storable(score) {
            warn!(score, "Rejected out-of-range best score");
            return false;
        }

        let mut map = self.read_map().unwrap_or_else(|e| {
            warn!(error = %e, "Replacing unreadable best score file");
            Map::new()
        });
        map.insert(BEST_SCORE_KEY.to_string(), Value::from(score));

        match self.write_map(map) {
            Ok(()) => {
                debug!(score, "Best score saved");
                true
            }
            Err(e) => {
                warn!(error = %e, "Failed to save best score");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_storable_range() {
        assert!(is_storable(0));
        assert!(is_storable(999_999));
        assert!(!is_storable(1_000_000));
        assert!(!is_storable(-1));
    }

    #[test]
    fn test_memory_store() {
        let mut store = MemoryBestScoreStore::new();
        assert_eq!(store.get_best(), 0);
        assert!(store.set_best(1200));
        assert_eq!(store.get_best(), 1200);
        assert!(!store.set_best(-5));
        assert!(!store.set_best(1_000_000));
        assert_eq!(store.get_best(), 1200);
    }
}
