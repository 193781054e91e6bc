//! History invariant: replaying the recorded moves reproduces the pegs.

use super::super::contracts::LegalMove;
use super::super::{GameState, Pegs};
use super::Invariant;
use crate::clock::Clock;

/// Invariant: history replays legally from the start to the current pegs.
///
/// Also requires one history entry per counted move.
pub struct HistoryConsistent;

impl<C: Clock> Invariant<GameState<C>> for HistoryConsistent {
    fn holds(game: &GameState<C>) -> bool {
        if game.history().len() != game.move_count() as usize {
            return false;
        }

        let mut replayed = Pegs::new(game.disk_count());
        for mv in game.history() {
            match LegalMove::check(&replayed, mv.from.index(), mv.to.index()) {
                Ok((_, _, disk)) if disk == mv.disk => {
                    replayed.transfer(mv.from, mv.to);
                }
                _ => return false,
            }
        }

        replayed == *game.pegs()
    }

    fn description() -> &'static str {
        "Move history replays to the current pegs"
    }
}
