//! The grid being solved and its select, collapse, propagate cycle
//!
//! A contradiction is never repaired locally. The caller resets the whole
//! wave and starts over; see [`crate::algorithm::executor`].

use crate::algorithm::cell::Cell;
use crate::algorithm::propagation::{Contradiction, Propagator};
use crate::algorithm::selection::Heuristic;
use crate::catalog::TileCatalog;
use crate::io::error::{AlgorithmError, Result};
use crate::math::color::{to_bytes, to_unit, widen};
use crate::spatial::grid::GridSpec;
use rand::Rng;

/// Result of one successful cycle
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StepOutcome {
    /// A cell was collapsed and the consequences propagated
    Collapsed {
        /// Row-major index of the collapsed cell
        cell: usize,
        /// Tile it was collapsed to
        tile: usize,
    },
    /// No legal uncollapsed cell remains
    Complete,
}

/// Cells, catalog and propagation state of one generation run
#[derive(Clone, Debug)]
pub struct Wave {
    grid: GridSpec,
    catalog: TileCatalog,
    cells: Vec<Cell>,
    propagator: Propagator,
    heuristic: Heuristic,
    collapsed_count: usize,
    pruned: bool,
}

impl Wave {
    /// Wave with every cell at full possibility
    ///
    /// # Errors
    ///
    /// Returns an error if the catalog holds no tiles
    pub fn new(catalog: TileCatalog, grid: GridSpec, heuristic: Heuristic) -> Result<Self> {
        if catalog.is_empty() {
            return Err(AlgorithmError::InvalidSourceData {
                reason: "cannot solve with an empty catalog".to_string(),
            });
        }
        let cells = fresh_cells(&grid, &catalog);
        let propagator = Propagator::new(grid.cell_count(), &catalog);
        Ok(Self {
            grid,
            catalog,
            cells,
            propagator,
            heuristic,
            collapsed_count: 0,
            pruned: false,
        })
    }

    /// Recreate every cell at full possibility and restore full support
    pub fn reset(&mut self) {
        self.cells = fresh_cells(&self.grid, &self.catalog);
        self.propagator.reset(&self.catalog);
        self.collapsed_count = 0;
        self.pruned = false;
    }

    /// Grid geometry
    pub const fn grid(&self) -> &GridSpec {
        &self.grid
    }

    /// Tile catalog
    pub const fn catalog(&self) -> &TileCatalog {
        &self.catalog
    }

    /// Cells in row-major order
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Cell at a row-major index
    pub fn cell(&self, index: usize) -> Option<&Cell> {
        self.cells.get(index)
    }

    /// Active selection heuristic
    pub const fn heuristic(&self) -> Heuristic {
        self.heuristic
    }

    /// Cells collapsed since the last reset
    pub const fn collapsed_count(&self) -> usize {
        self.collapsed_count
    }

    /// Number of cells that will be collapsed in a complete run
    pub fn legal_cell_count(&self) -> usize {
        (0..self.grid.cell_count())
            .filter(|&index| self.grid.is_legal_origin(index))
            .count()
    }

    /// Support table and pending bans
    pub const fn propagator(&self) -> &Propagator {
        &self.propagator
    }

    /// Next cell to collapse according to the heuristic
    pub fn choose_next_cell<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<usize> {
        self.heuristic.choose(&self.grid, &self.cells, rng)
    }

    /// Collapse `cell` to a weighted random choice among its possible tiles
    ///
    /// Every other possible tile is banned first, queueing its effect for
    /// [`Self::propagate`]. Returns the chosen tile.
    ///
    /// # Errors
    ///
    /// Returns a contradiction if the cell has nothing left to choose from
    pub fn observe<R: Rng + ?Sized>(
        &mut self,
        cell: usize,
        rng: &mut R,
    ) -> std::result::Result<usize, Contradiction> {
        let chosen = self
            .cells
            .get(cell)
            .and_then(|target| target.choose_random_tile(&self.catalog, rng))
            .ok_or(Contradiction { cell })?;

        let others: Vec<usize> = self
            .cells
            .get(cell)
            .map(|target| target.possible().iter().filter(|&tile| tile != chosen).collect())
            .unwrap_or_default();
        for tile in others {
            self.propagator
                .ban(&mut self.cells, cell, tile, &self.catalog)?;
        }

        if let Some(target) = self.cells.get_mut(cell) {
            target.collapse_to(chosen, &self.catalog);
            self.collapsed_count += 1;
        }
        Ok(chosen)
    }

    /// Ban `tile` from `cell` outside of a collapse
    ///
    /// Returns whether the tile was still possible. Call
    /// [`Self::propagate`] afterwards to apply the consequences.
    ///
    /// # Errors
    ///
    /// Returns a contradiction if the ban empties the cell
    pub fn ban(&mut self, cell: usize, tile: usize) -> std::result::Result<bool, Contradiction> {
        self.propagator
            .ban(&mut self.cells, cell, tile, &self.catalog)
    }

    /// Apply every pending ban until the grid is arc-consistent again
    ///
    /// # Errors
    ///
    /// Returns the first contradiction reached
    pub fn propagate(&mut self) -> std::result::Result<(), Contradiction> {
        self.propagator
            .propagate(&self.grid, &self.catalog, &mut self.cells)
    }

    /// Remove tiles that lack support from the start, once per reset
    ///
    /// [`Self::step`] calls this before its first selection, so it only
    /// needs calling directly when driving `observe` by hand.
    ///
    /// # Errors
    ///
    /// Returns a contradiction if some cell cannot hold any tile at all
    pub fn prune_unsupported(&mut self) -> std::result::Result<(), Contradiction> {
        if self.pruned {
            return Ok(());
        }
        self.pruned = true;
        self.propagator
            .prune_unsupported(&self.grid, &self.catalog, &mut self.cells)
    }

    /// One full select, collapse and propagate cycle
    ///
    /// # Errors
    ///
    /// Returns a contradiction from the collapse or its propagation; the
    /// wave must be reset before continuing
    pub fn step<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
    ) -> std::result::Result<StepOutcome, Contradiction> {
        self.prune_unsupported()?;
        let Some(cell) = self.choose_next_cell(rng) else {
            return Ok(StepOutcome::Complete);
        };
        let tile = self.observe(cell, rng)?;
        self.propagate()?;
        log::trace!("Collapsed cell {cell} to tile {tile}");
        Ok(StepOutcome::Collapsed { cell, tile })
    }

    /// Whether every legal cell has been collapsed
    pub fn is_complete(&self) -> bool {
        self.cells
            .iter()
            .enumerate()
            .all(|(index, cell)| cell.is_collapsed() || !self.grid.is_legal_origin(index))
    }

    /// Whether some cell has run out of tiles
    pub fn has_contradiction(&self) -> bool {
        self.cells.iter().any(Cell::is_contradiction)
    }

    /// Chosen tile per cell, row-major
    pub fn collapsed_tiles(&self) -> Vec<Option<usize>> {
        self.cells.iter().map(Cell::collapsed_tile).collect()
    }

    /// One display color per grid cell, floats in `[0, 1]`
    ///
    /// Legal origins show their own color: the chosen tile's main color once
    /// collapsed. Cells outside the legal origins of a bounded grid show the
    /// sample of the nearest covering pattern, once that pattern is collapsed.
    pub fn cell_colors(&self) -> Vec<[f32; 4]> {
        let (width, height) = (self.grid.width(), self.grid.height());
        let mut colors = Vec::with_capacity(self.grid.cell_count());
        for y in 0..height {
            for x in 0..width {
                let (origin, dx, dy) = self.grid.covering_origin(x, y);
                let Some(cell) = self.cells.get(origin) else {
                    colors.push([0.0; 4]);
                    continue;
                };
                if (dx, dy) == (0, 0) {
                    colors.push(cell.color());
                    continue;
                }
                let sample = cell
                    .collapsed_tile()
                    .and_then(|tile| self.catalog.tiles().get(tile))
                    .and_then(|tile| tile.pixels().get(dy, dx));
                colors.push(sample.map_or_else(|| cell.color(), |rgba| to_unit(widen(rgba))));
            }
        }
        colors
    }

    /// Tile-level pixel buffer, one RGBA block per cell in row-major cell order
    ///
    /// Collapsed cells contribute their tile's samples row by row; the rest a
    /// flat block of the averaged color of their remaining tiles. The buffer
    /// holds `width * height * tile_size^2 * 4` bytes.
    pub fn tile_buffer(&self) -> Vec<u8> {
        let area = self.catalog.tile_size() * self.catalog.tile_size();
        let mut buffer = Vec::with_capacity(self.cells.len() * area * 4);
        for cell in &self.cells {
            match cell
                .collapsed_tile()
                .and_then(|tile| self.catalog.tiles().get(tile))
            {
                Some(tile) => buffer.extend(tile.pixels().samples().flatten()),
                None => {
                    let flat = to_bytes(cell.average_color());
                    buffer.extend(std::iter::repeat_n(flat, area).flatten());
                }
            }
        }
        buffer
    }
}

fn fresh_cells(grid: &GridSpec, catalog: &TileCatalog) -> Vec<Cell> {
    (0..grid.cell_count())
        .map(|index| Cell::new(grid.coords(index), catalog))
        .collect()
}
