use bitvec::prelude::{BitVec, bitvec};
use std::fmt;

/// Fixed-universe bitset over tile indices
///
/// Backs both per-cell candidate sets and the learned per-direction
/// allow-sets. Indices are positions in the derived tile universe.
/// Provides O(1) membership testing and word-wise set operations.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CandidateSet {
    bits: BitVec,
    universe: usize,
}

impl CandidateSet {
    /// Create a set with no members
    pub fn new(universe: usize) -> Self {
        Self {
            bits: bitvec![0; universe],
            universe,
        }
    }

    /// Create a set containing the whole universe
    pub fn full(universe: usize) -> Self {
        Self {
            bits: bitvec![1; universe],
            universe,
        }
    }

    /// Size of the universe this set ranges over
    pub const fn universe(&self) -> usize {
        self.universe
    }

    /// Insert a tile index; returns whether it was newly added
    pub fn insert(&mut self, tile: usize) -> bool {
        if tile >= self.universe {
            return false;
        }
        let present = self.bits.get(tile).as_deref() == Some(&true);
        self.bits.set(tile, true);
        !present
    }

    /// Remove a tile index; returns whether a removal occurred
    pub fn remove(&mut self, tile: usize) -> bool {
        if tile >= self.universe {
            return false;
        }
        let present = self.bits.get(tile).as_deref() == Some(&true);
        self.bits.set(tile, false);
        present
    }

    /// Test tile membership
    pub fn contains(&self, tile: usize) -> bool {
        self.bits.get(tile).as_deref() == Some(&true)
    }

    /// Count members
    pub fn len(&self) -> usize {
        self.bits.count_ones()
    }

    /// Test if no members are present
    pub fn is_empty(&self) -> bool {
        self.bits.not_any()
    }

    /// The single member, if the set holds exactly one
    pub fn sole(&self) -> Option<usize> {
        let mut ones = self.bits.iter_ones();
        let first = ones.next()?;
        ones.next().is_none().then_some(first)
    }

    /// Iterate members in ascending order
    pub fn ones(&self) -> impl Iterator<Item = usize> + '_ {
        self.bits.iter_ones()
    }

    /// Grow this set to include every member of `other`
    pub fn union_with(&mut self, other: &Self) {
        self.bits |= &other.bits;
    }

    /// Shrink this set to members shared with `other`
    pub fn intersect_with(&mut self, other: &Self) {
        self.bits &= &other.bits;
    }
}

impl fmt::Display for CandidateSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let members: Vec<usize> = self.ones().collect();
        write!(f, "CandidateSet({} tiles: {members:?})", members.len())
    }
}
