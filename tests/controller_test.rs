//! Tests for the application controller.

use strictly_hanoi::{
    BestScoreStore, GameStatus, HanoiController, ManualClock, MemoryBestScoreStore, MoveError,
    PegId, ScoringConfig, solve,
};

type Controller = HanoiController<MemoryBestScoreStore, ManualClock>;

fn controller(n: u8) -> Controller {
    HanoiController::with_clock(
        n,
        ScoringConfig::default(),
        MemoryBestScoreStore::new(),
        ManualClock::default(),
    )
    .expect("valid controller")
}

fn win(controller: &mut Controller) -> strictly_hanoi::TurnReport {
    let count = controller.game().disk_count();
    let mut last = None;
    for (from, to) in solve(count, PegId::Source, PegId::Destination) {
        last = Some(controller.move_disk(from.index(), to.index()));
    }
    last.expect("at least one move")
}

#[test]
fn test_invalid_move_is_penalized() {
    let mut c = controller(3);
    let report = c.move_disk(1, 2);
    assert_eq!(report.refusal, Some(MoveError::EmptySource(PegId::Auxiliary)));
    assert!(!report.outcome.moved);
    assert_eq!(c.game().score().current_score(), 975);
    assert_eq!(c.game().move_count(), 0);
}

#[test]
fn test_winning_move_reports_results_and_best() {
    let mut c = controller(3);
    let report = win(&mut c);

    let results = report.results.expect("winning move carries results");
    // 1050 after play, then 500 + 250 + 300 in bonuses.
    assert_eq!(*results.score(), 2100);
    assert!(report.new_best);
    assert_eq!(c.best_score(), 2100);
    assert_eq!(c.results(), Some(results));
    assert_eq!(c.live_score(), 2100);
}

#[test]
fn test_equal_score_is_not_a_new_best() {
    let mut c = controller(3);
    win(&mut c);
    c.reset();
    assert_eq!(c.results(), None);
    let report = win(&mut c);
    assert!(report.results.is_some());
    assert!(!report.new_best);
    assert_eq!(c.best_score(), 2100);
}

#[test]
fn test_higher_stored_best_is_kept() {
    let mut store = MemoryBestScoreStore::new();
    assert!(store.set_best(5000));
    let mut c = HanoiController::with_clock(
        3,
        ScoringConfig::default(),
        store,
        ManualClock::default(),
    )
    .expect("valid controller");

    let report = win(&mut c);
    assert!(!report.new_best);
    assert_eq!(c.best_score(), 5000);
}

#[test]
fn test_moves_after_win_are_refused_without_penalty() {
    let mut c = controller(3);
    win(&mut c);
    let score = c.game().score().current_score();

    let report = c.move_disk(2, 0);
    assert_eq!(report.refusal, Some(MoveError::GameOver));
    assert_eq!(report.results, None);
    assert_eq!(c.game().score().current_score(), score);
    assert_eq!(c.game().status(), GameStatus::Won);
}

#[test]
fn test_select_then_move() {
    let mut c = controller(3);
    let report = c.select_peg(0);
    assert!(!report.outcome.moved);
    assert_eq!(c.game().selection().map(|s| s.disk), Some(1));

    let report = c.select_peg(2);
    assert!(report.outcome.moved);
    assert_eq!(report.outcome.disk_moved, Some(1));
    assert_eq!(c.game().selection(), None);
    assert_eq!(c.game().pegs().get(PegId::Destination).top(), Some(1));
}

#[test]
fn test_select_same_peg_deselects() {
    let mut c = controller(3);
    c.select_peg(0);
    c.select_peg(0);
    assert_eq!(c.game().selection(), None);
    assert_eq!(c.game().move_count(), 0);
}

#[test]
fn test_select_illegal_target_clears_selection() {
    let mut c = controller(3);
    c.select_peg(0);
    c.select_peg(1);
    c.select_peg(0);
    assert_eq!(c.game().selection().map(|s| s.disk), Some(2));

    let report = c.select_peg(1);
    assert!(matches!(report.refusal, Some(MoveError::DiskTooLarge { .. })));
    assert_eq!(c.game().selection(), None);
    assert!(!c.game().score().is_perfect_game());
}

#[test]
fn test_select_ignores_bad_input() {
    let mut c = controller(3);
    assert_eq!(c.select_peg(5), Default::default());
    // Empty peg selects nothing.
    c.select_peg(1);
    assert_eq!(c.game().selection(), None);
}

#[test]
fn test_new_game_validates_disk_count() {
    let mut c = controller(3);
    c.move_disk(0, 2);

    assert!(c.new_game(9).is_err());
    assert_eq!(c.game().move_count(), 1);

    c.new_game(5).expect("valid disk count");
    assert_eq!(c.game().disk_count().get(), 5);
    assert_eq!(c.game().move_count(), 0);
    assert_eq!(c.snapshot().minimum_moves(), &31);
}

#[test]
fn test_invalid_config_cannot_be_built() {
    let result = toml::from_str::<ScoringConfig>(
        r#"
BASE_SCORE = 1000
DIFFICULTY_MULTIPLIER = 0
MOVE_PENALTY = -5
MOVE_PENALTY_PERCENTAGE = 0.01
INVALID_MOVE_PENALTY = 25
EFFICIENCY_BONUS = 10
STREAK_BONUS = 50
PERFECT_SOLUTION_BONUS = 500
PERFECT_GAME_BONUS = 250
TIME_PENALTY_PER_MINUTE = 10
HINT_PENALTY = 20
"#,
    );
    assert!(result.is_err());
}

#[test]
fn test_out_of_range_peg_is_not_penalized() {
    let mut c = controller(3);
    let report = c.move_disk(7, 0);
    assert_eq!(report.refusal, Some(MoveError::PegOutOfRange(7)));
    assert_eq!(c.game().score().current_score(), 1000);
    assert!(c.game().score().is_perfect_game());

    let report = c.move_disk(0, 3);
    assert_eq!(report.refusal, Some(MoveError::PegOutOfRange(3)));
    assert_eq!(c.game().score().current_score(), 1000);
}

#[test]
fn test_hint_costs_points() {
    let mut c = controller(3);
    let hint = c.hint();
    assert_eq!(*hint.disk(), Some(1));
    assert_eq!(c.game().score().current_score(), 980);
}
