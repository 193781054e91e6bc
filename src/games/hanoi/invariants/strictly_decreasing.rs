//! Ordering invariant: no disk rests on a smaller one.

use super::super::GameState;
use super::Invariant;
use crate::clock::Clock;

/// Invariant: every peg is strictly decreasing from bottom to top.
pub struct StrictlyDecreasingPegs;

impl<C: Clock> Invariant<GameState<C>> for StrictlyDecreasingPegs {
    fn holds(game: &GameState<C>) -> bool {
        game.pegs()
            .iter()
            .all(|(_, peg)| peg.disks().windows(2).all(|pair| pair[0] > pair[1]))
    }

    fn description() -> &'static str {
        "Every peg is strictly decreasing bottom to top"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::hanoi::{DiskCount, PegId};

    #[test]
    fn test_new_game_holds() {
        let game = GameState::new(DiskCount::new(8).unwrap(), Default::default());
        assert!(StrictlyDecreasingPegs::holds(&game));
    }

    #[test]
    fn test_larger_on_smaller_violates() {
        let mut game = GameState::new(DiskCount::new(3).unwrap(), Default::default());
        game.pegs_mut().transfer(PegId::Source, PegId::Destination);
        game.pegs_mut().transfer(PegId::Source, PegId::Destination);
        assert!(!StrictlyDecreasingPegs::holds(&game));
    }
}
