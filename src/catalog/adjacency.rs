//! Directional compatibility between tiles
//!
//! Every link is recorded from both sides: if tile `b` may sit in direction
//! `d` of tile `a`, then `a` may sit in the opposite direction of `b`. The
//! table is never written one-sidedly, so the symmetry holds by construction.

use crate::algorithm::bitset::TileBitset;
use crate::spatial::direction::Direction;

/// Per-direction neighbor sets, `allowed[direction][tile]`
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AdjacencyTable {
    allowed: [Vec<TileBitset>; Direction::COUNT],
}

impl AdjacencyTable {
    /// Table for `tile_count` tiles with no links
    pub fn new(tile_count: usize) -> Self {
        Self {
            allowed: std::array::from_fn(|_| vec![TileBitset::new(tile_count); tile_count]),
        }
    }

    /// Table with a link wherever `compatible(a, direction, b)` holds
    ///
    /// The predicate is only asked about West and North; East and South
    /// entries are the mirrors filled in by [`Self::link`], so it must be
    /// geometric (`b` west of `a` exactly when `a` is east of `b`).
    pub fn infer(
        tile_count: usize,
        mut compatible: impl FnMut(usize, Direction, usize) -> bool,
    ) -> Self {
        let mut table = Self::new(tile_count);
        for direction in [Direction::West, Direction::North] {
            for a in 0..tile_count {
                for b in 0..tile_count {
                    if compatible(a, direction, b) {
                        table.link(a, direction, b);
                    }
                }
            }
        }
        table
    }

    /// Number of tiles covered
    pub fn tile_count(&self) -> usize {
        self.allowed.first().map_or(0, Vec::len)
    }

    /// Allow `to` in `direction` of `from`, and `from` in the opposite direction of `to`
    ///
    /// # Panics
    ///
    /// Panics if either id is outside the table
    pub fn link(&mut self, from: usize, direction: Direction, to: usize) {
        let tile_count = self.tile_count();
        assert!(
            from < tile_count && to < tile_count,
            "tile ids {from} and {to} must be below {tile_count}"
        );
        for (side, owner, member) in [
            (direction, from, to),
            (direction.opposite(), to, from),
        ] {
            if let Some(set) = self
                .allowed
                .get_mut(side.index())
                .and_then(|sets| sets.get_mut(owner))
            {
                set.insert(member);
            }
        }
    }

    /// Neighbors allowed in `direction` of `tile`
    pub fn allowed(&self, tile: usize, direction: Direction) -> Option<&TileBitset> {
        self.allowed
            .get(direction.index())
            .and_then(|sets| sets.get(tile))
    }

    /// Whether `to` may sit in `direction` of `from`
    pub fn allows(&self, from: usize, direction: Direction, to: usize) -> bool {
        self.allowed(from, direction)
            .is_some_and(|set| set.contains(to))
    }

    /// Number of tiles allowed in `direction` of `tile`
    pub fn support_count(&self, tile: usize, direction: Direction) -> usize {
        self.allowed(tile, direction).map_or(0, TileBitset::count)
    }

    /// Check that every link has its mirrored counterpart
    pub fn is_symmetric(&self) -> bool {
        let tile_count = self.tile_count();
        Direction::ALL.iter().all(|&direction| {
            (0..tile_count).all(|from| {
                self.allowed(from, direction).is_none_or(|set| {
                    set.iter()
                        .all(|to| self.allows(to, direction.opposite(), from))
                })
            })
        })
    }
}
