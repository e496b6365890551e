//! Next-cell selection heuristics
//!
//! Only uncollapsed cells that are legal placement origins are candidates.

use crate::algorithm::cell::Cell;
use crate::io::configuration::ENTROPY_JITTER;
use crate::spatial::grid::GridSpec;
use rand::Rng;
use std::fmt;
use std::str::FromStr;

/// Rule for picking which cell to collapse next
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Heuristic {
    /// First candidate in row-major order
    Scanline,
    /// Candidate with the lowest entropy, ties broken by a little noise
    #[default]
    MinEntropy,
}

impl Heuristic {
    /// Index of the next cell to collapse, or `None` once every candidate is collapsed
    pub fn choose<R: Rng + ?Sized>(
        self,
        grid: &GridSpec,
        cells: &[Cell],
        rng: &mut R,
    ) -> Option<usize> {
        match self {
            Self::Scanline => scanline(grid, cells),
            Self::MinEntropy => min_entropy(grid, cells, rng),
        }
    }
}

fn is_candidate(grid: &GridSpec, index: usize, cell: &Cell) -> bool {
    !cell.is_collapsed() && grid.is_legal_origin(index)
}

fn scanline(grid: &GridSpec, cells: &[Cell]) -> Option<usize> {
    cells
        .iter()
        .enumerate()
        .position(|(index, cell)| is_candidate(grid, index, cell))
}

// First cell with a strictly lower jittered entropy wins
fn min_entropy<R: Rng + ?Sized>(grid: &GridSpec, cells: &[Cell], rng: &mut R) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (index, cell) in cells.iter().enumerate() {
        if !is_candidate(grid, index, cell) {
            continue;
        }
        let score = cell.entropy() + ENTROPY_JITTER * rng.random::<f64>();
        if best.is_none_or(|(_, lowest)| score < lowest) {
            best = Some((index, score));
        }
    }
    best.map(|(index, _)| index)
}

impl FromStr for Heuristic {
    type Err = String;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        match name.to_ascii_lowercase().as_str() {
            "scanline" => Ok(Self::Scanline),
            "entropy" | "min-entropy" => Ok(Self::MinEntropy),
            other => Err(format!("unknown heuristic '{other}'")),
        }
    }
}

impl fmt::Display for Heuristic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Scanline => f.write_str("scanline"),
            Self::MinEntropy => f.write_str("entropy"),
        }
    }
}
