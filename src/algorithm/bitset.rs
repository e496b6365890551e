use bitvec::prelude::*;
use std::fmt;

/// Fixed-capacity set of tile ids backed by 32-bit words
///
/// Indices are 0-based tile ids and must be below the capacity. Bits past the
/// capacity in the trailing word are never set, so population counts and
/// enumeration only ever see valid ids.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TileBitset {
    bits: BitVec<u32, Lsb0>,
}

impl TileBitset {
    /// Create a bitset with no tiles present
    pub fn new(capacity: usize) -> Self {
        Self {
            bits: bitvec![u32, Lsb0; 0; capacity],
        }
    }

    /// Create a bitset containing every id below `capacity`
    pub fn all(capacity: usize) -> Self {
        let mut bits = bitvec![u32, Lsb0; 1; capacity];
        // The fill covers whole words; clear the tail past the capacity
        bits.set_uninitialized(false);
        Self { bits }
    }

    /// Number of ids this set can hold
    pub fn capacity(&self) -> usize {
        self.bits.len()
    }

    /// Number of backing words
    pub fn word_count(&self) -> usize {
        self.bits.as_raw_slice().len()
    }

    /// Backing words, lowest ids in the least significant bits
    pub fn words(&self) -> &[u32] {
        self.bits.as_raw_slice()
    }

    /// Insert a tile id
    ///
    /// # Panics
    ///
    /// Panics if `tile` is not below the capacity
    pub fn insert(&mut self, tile: usize) {
        self.bits.set(tile, true);
    }

    /// Remove a tile id
    ///
    /// # Panics
    ///
    /// Panics if `tile` is not below the capacity
    pub fn remove(&mut self, tile: usize) {
        self.bits.set(tile, false);
    }

    /// Test tile membership; ids past the capacity are never members
    pub fn contains(&self, tile: usize) -> bool {
        self.bits.get(tile).as_deref() == Some(&true)
    }

    /// Count tiles in the set, one hardware popcount per word
    pub fn count(&self) -> usize {
        self.bits.count_ones()
    }

    /// Test if no tiles are present
    pub fn is_empty(&self) -> bool {
        self.bits.not_any()
    }

    /// Lazily enumerate member ids in ascending order
    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.bits.iter_ones()
    }

    /// Intersect this bitset with another in-place
    ///
    /// # Panics
    ///
    /// Panics if the capacities differ
    pub fn intersect_with(&mut self, other: &Self) {
        assert_eq!(
            self.capacity(),
            other.capacity(),
            "bitset capacities must match"
        );
        self.bits &= &other.bits;
    }

    /// Create a new bitset containing the intersection
    ///
    /// # Panics
    ///
    /// Panics if the capacities differ
    #[must_use]
    pub fn intersection(&self, other: &Self) -> Self {
        let mut result = self.clone();
        result.intersect_with(other);
        result
    }

    /// Extract all member ids as a vector
    pub fn to_vec(&self) -> Vec<usize> {
        self.iter().collect()
    }
}

impl<'a> IntoIterator for &'a TileBitset {
    type Item = usize;
    type IntoIter = bitvec::slice::IterOnes<'a, u32, Lsb0>;

    fn into_iter(self) -> Self::IntoIter {
        self.bits.iter_ones()
    }
}

impl FromIterator<usize> for TileBitset {
    /// Collect ids into a bitset just large enough to hold the largest one
    fn from_iter<I: IntoIterator<Item = usize>>(iter: I) -> Self {
        let ids: Vec<usize> = iter.into_iter().collect();
        let capacity = ids.iter().max().map_or(0, |&max| max + 1);
        let mut bitset = Self::new(capacity);
        for id in ids {
            bitset.insert(id);
        }
        bitset
    }
}

impl fmt::Display for TileBitset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TileBitset({} tiles: {:?})", self.count(), self.to_vec())
    }
}
