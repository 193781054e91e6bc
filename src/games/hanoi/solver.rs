//! Optimal solver using the classic recursion.

use super::{DiskCount, PegId};
use tracing::instrument;

/// Returns the `2^n - 1` moves that carry a full tower from `from` to `to`.
#[instrument]
pub fn solve(count: DiskCount, from: PegId, to: PegId) -> Vec<(PegId, PegId)> {
    let mut moves = Vec::with_capacity(count.minimum_moves() as usize);
    if from != to {
        solve_into(count.get(), from, to, from.third(to), &mut moves);
    }
    moves
}

fn solve_into(n: u8, from: PegId, to: PegId, via: PegId, moves: &mut Vec<(PegId, PegId)>) {
    if n == 0 {
        return;
    }
    solve_into(n - 1, from, via, to, moves);
    moves.push((from, to));
    solve_into(n - 1, via, to, from, moves);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{MAX_DISKS, MIN_DISKS};

    #[test]
    fn test_three_disk_solution() {
        use PegId::*;
        let moves = solve(DiskCount::new(3).unwrap(), Source, Destination);
        assert_eq!(
            moves,
            vec![
                (Source, Destination),
                (Source, Auxiliary),
                (Destination, Auxiliary),
                (Source, Destination),
                (Auxiliary, Source),
                (Auxiliary, Destination),
                (Source, Destination),
            ]
        );
    }

    #[test]
    fn test_solution_length() {
        for n in MIN_DISKS..=MAX_DISKS {
            let count = DiskCount::new(n).unwrap();
            let moves = solve(count, PegId::Source, PegId::Destination);
            assert_eq!(moves.len() as u32, count.minimum_moves());
        }
    }
}
