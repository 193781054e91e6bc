//! Tests for the JSON file best-score store.

use serde_json::{Value, json};
use strictly_hanoi::{BEST_SCORE_KEY, BestScoreStore, JsonFileBestScoreStore};
use tempfile::TempDir;

fn store_in(dir: &TempDir) -> JsonFileBestScoreStore {
    JsonFileBestScoreStore::new(dir.path().join("best.json"))
}

fn read_json(store: &JsonFileBestScoreStore) -> Value {
    let content = std::fs::read_to_string(store.path()).expect("file written");
    serde_json::from_str(&content).expect("valid json")
}

#[test]
fn test_missing_file_reads_zero() {
    let dir = TempDir::new().expect("temp dir");
    let store = store_in(&dir);
    assert_eq!(store.get_best(), 0);
    assert!(!store.path().exists());
}

#[test]
fn test_set_then_get() {
    let dir = TempDir::new().expect("temp dir");
    let mut store = store_in(&dir);
    assert!(store.set_best(1234));
    assert_eq!(store.get_best(), 1234);
    assert_eq!(read_json(&store)[BEST_SCORE_KEY], json!(1234));

    // A fresh handle on the same file sees the value.
    let reopened = store_in(&dir);
    assert_eq!(reopened.get_best(), 1234);
}

#[test]
fn test_out_of_range_scores_rejected() {
    let dir = TempDir::new().expect("temp dir");
    let mut store = store_in(&dir);
    assert!(store.set_best(500));
    assert!(!store.set_best(-5));
    assert!(!store.set_best(1_000_000));
    assert_eq!(store.get_best(), 500);
}

#[test]
fn test_corrupt_file_reads_zero_and_is_replaced() {
    let dir = TempDir::new().expect("temp dir");
    let mut store = store_in(&dir);
    std::fs::write(store.path(), "not json {").expect("write");
    assert_eq!(store.get_best(), 0);

    assert!(store.set_best(42));
    assert_eq!(store.get_best(), 42);
}

#[test]
fn test_invalid_stored_values_read_zero() {
    let dir = TempDir::new().expect("temp dir");
    let store = store_in(&dir);

    for value in [json!(-3), json!(2_000_000), json!("1200"), json!(null)] {
        let content = format!(r#"{{"{}": {}}}"#, BEST_SCORE_KEY, value);
        std::fs::write(store.path(), content).expect("write");
        assert_eq!(store.get_best(), 0);
    }

    std::fs::write(store.path(), "[1, 2, 3]").expect("write");
    assert_eq!(store.get_best(), 0);
}

#[test]
fn test_other_keys_preserved() {
    let dir = TempDir::new().expect("temp dir");
    let mut store = store_in(&dir);
    std::fs::write(store.path(), r#"{"theme": "dark", "hanoi_best_score": 10}"#).expect("write");

    assert!(store.set_best(900));
    let value = read_json(&store);
    assert_eq!(value["theme"], json!("dark"));
    assert_eq!(value[BEST_SCORE_KEY], json!(900));
}
