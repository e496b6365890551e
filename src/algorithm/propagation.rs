//! Support counting and worklist propagation
//!
//! For every cell, tile and direction the support table records how many
//! tiles still possible in the neighbor on that side are compatible with the
//! tile. When a count reaches zero the tile has lost all support from that
//! side and is banned, which may in turn starve tiles further away. Bans
//! queue on an explicit stack so arbitrarily long chains never recurse.

use crate::algorithm::cell::Cell;
use crate::catalog::TileCatalog;
use crate::spatial::direction::Direction;
use crate::spatial::grid::GridSpec;
use ndarray::Array3;
use std::fmt;

/// A cell ran out of possible tiles
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Contradiction {
    /// Row-major index of the emptied cell
    pub cell: usize,
}

impl fmt::Display for Contradiction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "cell {} has no possible tiles left", self.cell)
    }
}

/// Supporter counts indexed `[cell, tile, direction]`
#[derive(Clone, Debug)]
pub struct SupportTable {
    counts: Array3<u32>,
}

impl SupportTable {
    /// Full support for every tile in every one of `cell_count` cells
    pub fn new(cell_count: usize, catalog: &TileCatalog) -> Self {
        let mut table = Self {
            counts: Array3::zeros((cell_count, catalog.len(), Direction::COUNT)),
        };
        table.reset(catalog);
        table
    }

    /// Restore every count to the size of the tile's neighbor set
    pub fn reset(&mut self, catalog: &TileCatalog) {
        let adjacency = catalog.adjacency();
        for ((_, tile, direction), count) in self.counts.indexed_iter_mut() {
            *count = adjacency.support_count(tile, Direction::from_index(direction)) as u32;
        }
    }

    /// Current support of `tile` in `cell` from `direction`
    pub fn get(&self, cell: usize, tile: usize, direction: Direction) -> u32 {
        self.counts
            .get([cell, tile, direction.index()])
            .copied()
            .unwrap_or(0)
    }

    /// Zero all four counts of a banned tile
    pub fn clear(&mut self, cell: usize, tile: usize) {
        for direction in Direction::ALL {
            if let Some(count) = self.counts.get_mut([cell, tile, direction.index()]) {
                *count = 0;
            }
        }
    }

    /// Remove one supporter and return what is left
    pub fn decrement(&mut self, cell: usize, tile: usize, direction: Direction) -> u32 {
        self.counts
            .get_mut([cell, tile, direction.index()])
            .map_or(0, |count| {
                *count = count.saturating_sub(1);
                *count
            })
    }
}

/// Support table plus the stack of bans whose effects are still pending
#[derive(Clone, Debug)]
pub struct Propagator {
    supports: SupportTable,
    worklist: Vec<(usize, usize)>,
}

impl Propagator {
    /// Propagator for a fresh grid of `cell_count` cells
    pub fn new(cell_count: usize, catalog: &TileCatalog) -> Self {
        Self {
            supports: SupportTable::new(cell_count, catalog),
            worklist: Vec::with_capacity(cell_count),
        }
    }

    /// Drop pending work and restore full support
    pub fn reset(&mut self, catalog: &TileCatalog) {
        self.worklist.clear();
        self.supports.reset(catalog);
    }

    /// Support table
    pub const fn supports(&self) -> &SupportTable {
        &self.supports
    }

    /// Number of `(cell, tile)` bans awaiting propagation
    pub fn pending(&self) -> usize {
        self.worklist.len()
    }

    /// Ban `tile` from `cell`, queueing its effect on the neighbors
    ///
    /// Returns `Ok(false)` if the tile was already excluded.
    ///
    /// # Errors
    ///
    /// Returns a contradiction if the ban leaves the cell empty
    pub fn ban(
        &mut self,
        cells: &mut [Cell],
        cell: usize,
        tile: usize,
        catalog: &TileCatalog,
    ) -> Result<bool, Contradiction> {
        let Some(target) = cells.get_mut(cell) else {
            return Ok(false);
        };
        if !target.ban(tile, catalog) {
            return Ok(false);
        }
        self.worklist.push((cell, tile));
        self.supports.clear(cell, tile);
        if target.is_contradiction() {
            return Err(Contradiction { cell });
        }
        Ok(true)
    }

    /// Ban every tile that starts without support from an existing neighbor
    ///
    /// Counts only drop to zero through decrements, so a tile whose neighbor
    /// set on some side is empty from the outset has to be removed up front.
    /// The consequences are propagated before returning.
    ///
    /// # Errors
    ///
    /// Returns the first contradiction reached
    pub fn prune_unsupported(
        &mut self,
        grid: &GridSpec,
        catalog: &TileCatalog,
        cells: &mut [Cell],
    ) -> Result<(), Contradiction> {
        for cell in 0..cells.len() {
            if !grid.is_legal_origin(cell) {
                continue;
            }
            for direction in Direction::ALL {
                if grid.neighbor(cell, direction).is_none() {
                    continue;
                }
                for tile in 0..catalog.len() {
                    if self.supports.get(cell, tile, direction) == 0 {
                        self.ban(cells, cell, tile, catalog)?;
                    }
                }
            }
        }
        self.propagate(grid, catalog, cells)
    }

    /// Drain the worklist, most recent ban first
    ///
    /// # Errors
    ///
    /// Returns the first contradiction reached; the remaining work is dropped
    /// since the grid has to be reset anyway
    pub fn propagate(
        &mut self,
        grid: &GridSpec,
        catalog: &TileCatalog,
        cells: &mut [Cell],
    ) -> Result<(), Contradiction> {
        while let Some((cell, tile)) = self.worklist.pop() {
            for direction in Direction::ALL {
                let Some(neighbor) = grid.neighbor(cell, direction) else {
                    continue;
                };
                let Some(supported) = catalog.allowed(tile, direction) else {
                    continue;
                };
                let facing = direction.opposite();

                for candidate in supported {
                    let still_possible = cells
                        .get(neighbor)
                        .is_some_and(|target| target.is_possible(candidate));
                    if !still_possible {
                        continue;
                    }
                    if self.supports.decrement(neighbor, candidate, facing) > 0 {
                        continue;
                    }
                    if let Err(contradiction) = self.ban(cells, neighbor, candidate, catalog) {
                        self.worklist.clear();
                        return Err(contradiction);
                    }
                }
            }
        }
        Ok(())
    }
}
