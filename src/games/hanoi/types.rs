//! Core domain types for Tower of Hanoi.

use crate::config::{MAX_DISKS, MIN_DISKS};
use crate::error::{HanoiError, HanoiErrorKind};
use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;
use tracing::instrument;

/// One of the three pegs.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    strum::EnumIter,
    strum::Display,
)]
#[strum(serialize_all = "lowercase")]
pub enum PegId {
    /// Starting peg (index 0).
    Source,
    /// Auxiliary peg (index 1).
    Auxiliary,
    /// Target peg (index 2).
    Destination,
}

impl PegId {
    /// Converts a raw index, returning `None` outside `0..=2`.
    pub fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(PegId::Source),
            1 => Some(PegId::Auxiliary),
            2 => Some(PegId::Destination),
            _ => None,
        }
    }

    /// Returns the raw index of this peg.
    pub fn index(self) -> usize {
        match self {
            PegId::Source => 0,
            PegId::Auxiliary => 1,
            PegId::Destination => 2,
        }
    }

    /// Returns the peg that is neither `self` nor `other`.
    ///
    /// Only meaningful when `self != other`.
    pub fn third(self, other: PegId) -> PegId {
        PegId::iter()
            .find(|p| *p != self && *p != other)
            .unwrap_or(PegId::Auxiliary)
    }
}

impl TryFrom<usize> for PegId {
    type Error = HanoiError;

    #[track_caller]
    fn try_from(index: usize) -> Result<Self, Self::Error> {
        PegId::from_index(index).ok_or_else(|| HanoiError::new(HanoiErrorKind::InvalidPeg(index)))
    }
}

/// A disk, identified by its size (1 is the smallest).
pub type Disk = u8;

/// Validated number of disks in a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display)]
#[serde(try_from = "u8", into = "u8")]
pub struct DiskCount(u8);

impl DiskCount {
    /// Validates a disk count against [`MIN_DISKS`]..=[`MAX_DISKS`].
    #[track_caller]
    #[instrument]
    pub fn new(count: u8) -> Result<Self, HanoiError> {
        if (MIN_DISKS..=MAX_DISKS).contains(&count) {
            Ok(Self(count))
        } else {
            Err(HanoiError::new(HanoiErrorKind::InvalidDiskCount(count)))
        }
    }

    /// Returns the raw count.
    pub fn get(self) -> u8 {
        self.0
    }

    /// Fewest moves that solve a game of this size: `2^n - 1`.
    pub fn minimum_moves(self) -> u32 {
        (1u32 << self.0) - 1
    }
}

impl TryFrom<u8> for DiskCount {
    type Error = HanoiError;

    #[track_caller]
    fn try_from(count: u8) -> Result<Self, Self::Error> {
        DiskCount::new(count)
    }
}

impl From<DiskCount> for u8 {
    fn from(count: DiskCount) -> Self {
        count.0
    }
}

/// A single peg: disks from bottom to top, the last element is the top.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Peg {
    disks: Vec<Disk>,
}

impl Peg {
    /// Creates an empty peg.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a peg holding `n..=1`, largest at the bottom.
    pub fn full(count: DiskCount) -> Self {
        Self {
            disks: (1..=count.get()).rev().collect(),
        }
    }

    /// The movable disk, if any.
    pub fn top(&self) -> Option<Disk> {
        self.disks.last().copied()
    }

    /// Smallest disk on this peg.
    pub fn min_disk(&self) -> Option<Disk> {
        self.disks.iter().min().copied()
    }

    /// Number of disks on the peg.
    pub fn len(&self) -> usize {
        self.disks.len()
    }

    /// Whether the peg holds no disks.
    pub fn is_empty(&self) -> bool {
        self.disks.is_empty()
    }

    /// Disks from bottom to top.
    pub fn disks(&self) -> &[Disk] {
        &self.disks
    }

    pub(super) fn push(&mut self, disk: Disk) {
        self.disks.push(disk);
    }

    pub(super) fn pop(&mut self) -> Option<Disk> {
        self.disks.pop()
    }
}

/// The three pegs of a game.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Pegs {
    pegs: [Peg; 3],
}

impl Pegs {
    /// Starting arrangement: every disk on the source peg.
    #[instrument]
    pub fn new(count: DiskCount) -> Self {
        Self {
            pegs: [Peg::full(count), Peg::new(), Peg::new()],
        }
    }

    /// Builds an arbitrary arrangement (unchecked; used for replay and tests).
    pub fn from_stacks(source: Vec<Disk>, auxiliary: Vec<Disk>, destination: Vec<Disk>) -> Self {
        Self {
            pegs: [
                Peg { disks: source },
                Peg { disks: auxiliary },
                Peg { disks: destination },
            ],
        }
    }

    /// Gets the peg with the given id.
    pub fn get(&self, id: PegId) -> &Peg {
        &self.pegs[id.index()]
    }

    /// Gets a peg by raw index, `None` when out of range.
    pub fn get_index(&self, index: usize) -> Option<&Peg> {
        self.pegs.get(index)
    }

    /// Iterates the pegs with their ids in index order.
    pub fn iter(&self) -> impl Iterator<Item = (PegId, &Peg)> {
        PegId::iter().zip(self.pegs.iter())
    }

    /// Total disks across all pegs.
    pub fn disk_count(&self) -> usize {
        self.pegs.iter().map(Peg::len).sum()
    }

    /// Moves the top disk without checking legality.
    ///
    /// Returns the moved disk, or `None` if the source was empty.
    pub(super) fn transfer(&mut self, from: PegId, to: PegId) -> Option<Disk> {
        let disk = self.pegs[from.index()].pop()?;
        self.pegs[to.index()].push(disk);
        Some(disk)
    }

    /// Formats the pegs as a human-readable string, one row per peg.
    pub fn display(&self) -> String {
        let mut result = String::new();
        for (id, peg) in self.iter() {
            result.push_str(&format!("{}: ", id.index()));
            let disks: Vec<String> = peg.disks().iter().map(|d| d.to_string()).collect();
            if disks.is_empty() {
                result.push('-');
            } else {
                result.push_str(&disks.join(" "));
            }
            if id != PegId::Destination {
                result.push('\n');
            }
        }
        result
    }
}
