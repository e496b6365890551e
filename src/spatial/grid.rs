//! Output grid geometry: dimensions, wrapping and legal placement origins
//!
//! Cells are stored row-major. A grid may be toroidal, in which case every
//! neighbor lookup wraps around the edges. On a bounded grid each cell is a
//! placement origin for a square footprint; cells whose footprint would
//! leave the grid are not legal origins and take no part in solving.

use crate::io::configuration::MAX_GRID_DIMENSION;
use crate::io::error::{Result, invalid_parameter};
use crate::spatial::direction::Direction;

/// Dimensions and topology of the grid being solved
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GridSpec {
    width: usize,
    height: usize,
    periodic: bool,
    footprint: usize,
}

impl GridSpec {
    /// Create a grid where every cell holds one whole tile
    ///
    /// # Errors
    ///
    /// Returns an error if either dimension is zero or exceeds
    /// [`MAX_GRID_DIMENSION`]
    pub fn new(width: usize, height: usize, periodic: bool) -> Result<Self> {
        Self::with_footprint(width, height, periodic, 1)
    }

    /// Create a grid whose cells are origins of `footprint`-sized patterns
    ///
    /// The overlapping model uses the pattern size as footprint, so on a
    /// bounded grid only the first `width - footprint + 1` columns (and rows)
    /// are legal origins.
    ///
    /// # Errors
    ///
    /// Returns an error if a dimension is zero or too large, if the footprint
    /// is zero, or if the footprint does not fit on a bounded grid
    pub fn with_footprint(
        width: usize,
        height: usize,
        periodic: bool,
        footprint: usize,
    ) -> Result<Self> {
        for (parameter, value) in [("width", width), ("height", height)] {
            if value == 0 || value > MAX_GRID_DIMENSION {
                return Err(invalid_parameter(
                    parameter,
                    &value,
                    &format!("must be between 1 and {MAX_GRID_DIMENSION}"),
                ));
            }
        }

        if footprint == 0 {
            return Err(invalid_parameter(
                "footprint",
                &footprint,
                &"must be at least 1",
            ));
        }

        if !periodic && (footprint > width || footprint > height) {
            return Err(invalid_parameter(
                "footprint",
                &footprint,
                &format!("does not fit a bounded {width}x{height} grid"),
            ));
        }

        Ok(Self {
            width,
            height,
            periodic,
            footprint,
        })
    }

    /// Number of columns
    pub const fn width(&self) -> usize {
        self.width
    }

    /// Number of rows
    pub const fn height(&self) -> usize {
        self.height
    }

    /// Whether neighbor lookups wrap around the edges
    pub const fn is_periodic(&self) -> bool {
        self.periodic
    }

    /// Side length of the pattern anchored at each cell
    pub const fn footprint(&self) -> usize {
        self.footprint
    }

    /// Total number of cells
    pub const fn cell_count(&self) -> usize {
        self.width * self.height
    }

    /// Row-major index of `(x, y)`
    pub const fn index(&self, x: usize, y: usize) -> usize {
        y * self.width + x
    }

    /// `(x, y)` coordinates of a row-major index
    pub const fn coords(&self, index: usize) -> (usize, usize) {
        (index % self.width, index / self.width)
    }

    /// Whether the cell at `index` may be selected and collapsed
    pub const fn is_legal_origin(&self, index: usize) -> bool {
        if self.periodic {
            return true;
        }
        let (x, y) = self.coords(index);
        x + self.footprint <= self.width && y + self.footprint <= self.height
    }

    /// Neighbor of `index` in `direction`
    ///
    /// Wraps on a periodic grid; on a bounded grid returns `None` when the
    /// neighbor falls outside the grid or is not a legal origin.
    pub fn neighbor(&self, index: usize, direction: Direction) -> Option<usize> {
        let (x, y) = self.coords(index);
        let (dx, dy) = direction.offset();
        let nx = x as i64 + dx;
        let ny = y as i64 + dy;
        let width = self.width as i64;
        let height = self.height as i64;

        let neighbor = if self.periodic {
            self.index(nx.rem_euclid(width) as usize, ny.rem_euclid(height) as usize)
        } else {
            if nx < 0 || ny < 0 || nx >= width || ny >= height {
                return None;
            }
            self.index(nx as usize, ny as usize)
        };

        self.is_legal_origin(neighbor).then_some(neighbor)
    }

    /// Origin cell whose pattern covers pixel `(x, y)` and the offset inside it
    ///
    /// Legal origins cover themselves at offset zero. Cells in the trailing
    /// band of a bounded grid are covered by the nearest legal origin.
    pub fn covering_origin(&self, x: usize, y: usize) -> (usize, usize, usize) {
        if self.periodic {
            return (self.index(x, y), 0, 0);
        }
        let ox = x.min(self.width - self.footprint);
        let oy = y.min(self.height - self.footprint);
        (self.index(ox, oy), x - ox, y - oy)
    }
}
