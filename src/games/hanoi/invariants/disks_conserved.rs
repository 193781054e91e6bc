//! Conservation invariant: each disk exists exactly once.

use super::super::GameState;
use super::Invariant;
use crate::clock::Clock;

/// Invariant: the disks across all pegs are exactly `{1..=n}`, each once.
pub struct DisksConserved;

impl<C: Clock> Invariant<GameState<C>> for DisksConserved {
    fn holds(game: &GameState<C>) -> bool {
        let n = game.disk_count().get() as usize;
        let mut seen = vec![false; n + 1];

        for (_, peg) in game.pegs().iter() {
            for &disk in peg.disks() {
                let slot = disk as usize;
                if slot == 0 || slot > n || seen[slot] {
                    return false;
                }
                seen[slot] = true;
            }
        }

        seen[1..].iter().all(|present| *present)
    }

    fn description() -> &'static str {
        "Each disk 1..=n appears exactly once across all pegs"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::hanoi::DiskCount;

    #[test]
    fn test_new_game_holds() {
        let game = GameState::new(DiskCount::new(5).unwrap(), Default::default());
        assert!(DisksConserved::holds(&game));
    }

    #[test]
    fn test_holds_after_moves() {
        let mut game = GameState::new(DiskCount::new(3).unwrap(), Default::default());
        game.attempt_move(0, 2);
        game.attempt_move(0, 1);
        game.attempt_move(2, 1);
        assert!(DisksConserved::holds(&game));
    }
}
