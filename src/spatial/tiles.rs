//! Square RGBA pixel blocks and their dihedral transformations
//!
//! A block is the raw material of a catalog tile: either an overlapping
//! window cut from a source image or a whole tile image named by a rule set.
//! Blocks are compared by an order-sensitive content hash so that visually
//! identical windows collapse into one tile.

use crate::io::error::{AlgorithmError, Result};
use ndarray::Array2;

/// One RGBA sample
pub type Rgba = [u8; 4];

/// Color with `f32` channels on the 0-255 scale
pub type ColorSum = [f32; 4];

const FNV_OFFSET_BASIS: u64 = 0xcbf2_9ce4_8422_2325;
const FNV_PRIME: u64 = 0x0000_0100_0000_01b3;

/// Which symmetry variants of each extracted window to emit
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum SymmetryMode {
    /// Only the window itself
    None,
    /// The window and its horizontal mirror
    MirrorX,
    /// The window and its vertical mirror
    MirrorY,
    /// The window and its three mirror combinations
    MirrorXY,
    /// All eight rotations and reflections
    #[default]
    All,
}

/// Square block of RGBA samples indexed `[row, col]`
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PixelBlock {
    pixels: Array2<Rgba>,
}

impl PixelBlock {
    /// Build a block from row-major samples
    ///
    /// # Errors
    ///
    /// Returns an error if `size` is zero or `samples` does not hold exactly
    /// `size * size` entries
    pub fn new(size: usize, samples: Vec<Rgba>) -> Result<Self> {
        if size == 0 {
            return Err(AlgorithmError::InvalidParameter {
                parameter: "tile_size",
                value: size.to_string(),
                reason: "pixel blocks must be at least 1x1".to_string(),
            });
        }
        let found = samples.len();
        Array2::from_shape_vec((size, size), samples)
            .map(|pixels| Self { pixels })
            .map_err(|_shape_error| AlgorithmError::InconsistentTileSize {
                tile: "<samples>".to_string(),
                expected: size,
                found: found.isqrt(),
            })
    }

    /// Build a block by evaluating `f(row, col)` for every sample
    pub fn from_fn(size: usize, mut f: impl FnMut(usize, usize) -> Rgba) -> Self {
        Self {
            pixels: Array2::from_shape_fn((size, size), |(row, col)| f(row, col)),
        }
    }

    /// Block filled with a single color
    pub fn filled(size: usize, color: Rgba) -> Self {
        Self {
            pixels: Array2::from_elem((size, size), color),
        }
    }

    /// Side length in samples
    pub fn size(&self) -> usize {
        self.pixels.nrows()
    }

    /// Sample at `(row, col)`
    pub fn get(&self, row: usize, col: usize) -> Option<Rgba> {
        self.pixels.get([row, col]).copied()
    }

    /// Samples in row-major order
    pub fn samples(&self) -> impl Iterator<Item = Rgba> + '_ {
        self.pixels.iter().copied()
    }

    /// Center sample, used as the tile's display color once collapsed
    pub fn main_color(&self) -> Rgba {
        let center = self.size() / 2;
        self.get(center, center).unwrap_or([0, 0, 0, 0])
    }

    /// Mean over all samples, per channel
    pub fn average_color(&self) -> ColorSum {
        let mut sums = [0.0_f64; 4];
        for sample in &self.pixels {
            for (sum, &channel) in sums.iter_mut().zip(sample) {
                *sum += f64::from(channel);
            }
        }
        let count = self.pixels.len().max(1) as f64;
        sums.map(|sum| (sum / count) as f32)
    }

    /// FNV-1a 64 over the samples packed as big-endian `RRGGBBAA` words
    pub fn content_hash(&self) -> u64 {
        self.pixels
            .iter()
            .flat_map(|&sample| sample)
            .fold(FNV_OFFSET_BASIS, |hash, byte| {
                (hash ^ u64::from(byte)).wrapping_mul(FNV_PRIME)
            })
    }

    /// Rotate a quarter turn counter-clockwise
    #[must_use]
    pub fn rotate_ccw(&self) -> Self {
        let n = self.size();
        Self::from_fn(n, |row, col| {
            self.get(col, n - 1 - row).unwrap_or_default()
        })
    }

    /// Mirror left to right
    #[must_use]
    pub fn mirror_x(&self) -> Self {
        let n = self.size();
        Self::from_fn(n, |row, col| {
            self.get(row, n - 1 - col).unwrap_or_default()
        })
    }

    /// Mirror top to bottom
    #[must_use]
    pub fn mirror_y(&self) -> Self {
        let n = self.size();
        Self::from_fn(n, |row, col| {
            self.get(n - 1 - row, col).unwrap_or_default()
        })
    }

    /// This block followed by its variants under `mode`
    ///
    /// Variants are not deduplicated; the catalog folds repeats into
    /// frequency counts.
    pub fn variants(&self, mode: SymmetryMode) -> Vec<Self> {
        match mode {
            SymmetryMode::None => vec![self.clone()],
            SymmetryMode::MirrorX => vec![self.clone(), self.mirror_x()],
            SymmetryMode::MirrorY => vec![self.clone(), self.mirror_y()],
            SymmetryMode::MirrorXY => vec![
                self.clone(),
                self.mirror_x(),
                self.mirror_y(),
                self.mirror_x().mirror_y(),
            ],
            SymmetryMode::All => {
                let mut variants = Vec::with_capacity(8);
                let mut current = self.clone();
                for _ in 0..4 {
                    let mirrored = current.mirror_x();
                    let next = current.rotate_ccw();
                    variants.push(current);
                    variants.push(mirrored);
                    current = next;
                }
                variants
            }
        }
    }
}
