//! Immutable tile catalogs and the strategies that build them
//!
//! A catalog is built once and only read while solving. Tile ids are
//! positions in the catalog and stay stable for its lifetime.

/// Per-direction compatibility table
pub mod adjacency;
/// Tagged construction strategies producing a catalog
pub mod builder;
/// Expansion of declared tiles into orientations and neighbor links
pub mod declarative;
/// Deduplication of overlapping windows and pixel-overlap comparison
pub mod overlapping;
/// Declared tiles, neighbor pairs and tile references
pub mod rules;
/// Symmetry classes of declared tiles
pub mod symmetry;

pub use adjacency::AdjacencyTable;
pub use builder::CatalogSource;

use crate::algorithm::bitset::TileBitset;
use crate::io::error::{AlgorithmError, Result, invalid_parameter};
use crate::math::color::widen;
use crate::math::entropy::weight_log_weight;
use crate::spatial::direction::Direction;
use crate::spatial::tiles::{ColorSum, PixelBlock, Rgba};

/// One catalogued pattern
#[derive(Clone, Debug, PartialEq)]
pub struct Tile {
    id: usize,
    pixels: PixelBlock,
    main_color: Rgba,
    average_color: ColorSum,
    hash: u64,
}

impl Tile {
    /// Wrap a pixel block under the given id
    pub fn new(id: usize, pixels: PixelBlock) -> Self {
        Self {
            id,
            main_color: pixels.main_color(),
            average_color: pixels.average_color(),
            hash: pixels.content_hash(),
            pixels,
        }
    }

    /// Position in the catalog
    pub const fn id(&self) -> usize {
        self.id
    }

    /// Pixel samples
    pub const fn pixels(&self) -> &PixelBlock {
        &self.pixels
    }

    /// Center sample
    pub const fn main_color(&self) -> Rgba {
        self.main_color
    }

    /// Mean over all samples on the 0-255 scale
    pub const fn average_color(&self) -> ColorSum {
        self.average_color
    }

    /// Content hash of the samples
    pub const fn hash(&self) -> u64 {
        self.hash
    }
}

/// Deduplicated tiles, their normalized weights and their adjacency
#[derive(Clone, Debug)]
pub struct TileCatalog {
    tile_size: usize,
    tiles: Vec<Tile>,
    weights: Vec<f64>,
    weight_log_weights: Vec<f64>,
    adjacency: AdjacencyTable,
    total_weight_log_weight: f64,
    weighted_main_color: [f64; 4],
    weighted_average_color: [f64; 4],
}

impl TileCatalog {
    /// Assemble a catalog from blocks, raw weights and a finished adjacency table
    ///
    /// Weights are normalized to sum to one.
    ///
    /// # Errors
    ///
    /// Returns an error if there are no blocks, the blocks differ in size,
    /// the weight or adjacency lengths do not match the block count, a weight
    /// is not positive and finite, or the adjacency table is not symmetric
    pub fn new(
        blocks: Vec<PixelBlock>,
        raw_weights: &[f64],
        adjacency: AdjacencyTable,
    ) -> Result<Self> {
        let Some(first) = blocks.first() else {
            return Err(AlgorithmError::InvalidSourceData {
                reason: "a catalog needs at least one tile".to_string(),
            });
        };
        let tile_size = first.size();

        if raw_weights.len() != blocks.len() || adjacency.tile_count() != blocks.len() {
            return Err(AlgorithmError::InvalidSourceData {
                reason: format!(
                    "{} tiles but {} weights and {} adjacency entries",
                    blocks.len(),
                    raw_weights.len(),
                    adjacency.tile_count()
                ),
            });
        }

        if let Some((index, block)) = blocks
            .iter()
            .enumerate()
            .find(|(_, block)| block.size() != tile_size)
        {
            return Err(AlgorithmError::InconsistentTileSize {
                tile: format!("#{index}"),
                expected: tile_size,
                found: block.size(),
            });
        }

        if let Some(&weight) = raw_weights
            .iter()
            .find(|weight| !weight.is_finite() || **weight <= 0.0)
        {
            return Err(invalid_parameter(
                "weight",
                &weight,
                &"tile weights must be positive and finite",
            ));
        }

        if !adjacency.is_symmetric() {
            return Err(AlgorithmError::InvalidSourceData {
                reason: "adjacency table is not symmetric across opposite directions"
                    .to_string(),
            });
        }

        let total: f64 = raw_weights.iter().sum();
        let weights: Vec<f64> = raw_weights.iter().map(|weight| weight / total).collect();
        let weight_log_weights: Vec<f64> =
            weights.iter().copied().map(weight_log_weight).collect();

        let tiles: Vec<Tile> = blocks
            .into_iter()
            .enumerate()
            .map(|(id, pixels)| Tile::new(id, pixels))
            .collect();

        let mut weighted_main_color = [0.0; 4];
        let mut weighted_average_color = [0.0; 4];
        for (tile, &weight) in tiles.iter().zip(&weights) {
            for (sum, channel) in weighted_main_color
                .iter_mut()
                .zip(widen(tile.main_color()))
            {
                *sum += weight * channel;
            }
            for (sum, channel) in weighted_average_color
                .iter_mut()
                .zip(tile.average_color())
            {
                *sum += weight * f64::from(channel);
            }
        }

        Ok(Self {
            tile_size,
            total_weight_log_weight: weight_log_weights.iter().sum(),
            tiles,
            weights,
            weight_log_weights,
            adjacency,
            weighted_main_color,
            weighted_average_color,
        })
    }

    /// Number of tiles
    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    /// Whether the catalog holds no tiles; never true for a built catalog
    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// Side length of every tile's pixel block
    pub const fn tile_size(&self) -> usize {
        self.tile_size
    }

    /// All tiles in id order
    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    /// Tile with the given id
    ///
    /// # Errors
    ///
    /// Returns an error if `id` is not in the catalog
    pub fn tile(&self, id: usize) -> Result<&Tile> {
        self.tiles
            .get(id)
            .ok_or(AlgorithmError::InvalidTileIndex {
                index: id,
                max_tiles: self.tiles.len(),
            })
    }

    /// Normalized weights in id order
    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    /// Normalized weight of a tile, zero for unknown ids
    pub fn weight(&self, id: usize) -> f64 {
        self.weights.get(id).copied().unwrap_or(0.0)
    }

    /// `w·ln(w)` of a tile's normalized weight, zero for unknown ids
    pub fn weight_log_weight(&self, id: usize) -> f64 {
        self.weight_log_weights.get(id).copied().unwrap_or(0.0)
    }

    /// `Σ w·ln(w)` over the whole catalog
    pub const fn total_weight_log_weight(&self) -> f64 {
        self.total_weight_log_weight
    }

    /// `Σ w·mainColor` over the whole catalog, 0-255 scale
    pub const fn weighted_main_color(&self) -> [f64; 4] {
        self.weighted_main_color
    }

    /// `Σ w·averageColor` over the whole catalog, 0-255 scale
    pub const fn weighted_average_color(&self) -> [f64; 4] {
        self.weighted_average_color
    }

    /// Compatibility table
    pub const fn adjacency(&self) -> &AdjacencyTable {
        &self.adjacency
    }

    /// Tiles allowed in `direction` of `tile`
    pub fn allowed(&self, tile: usize, direction: Direction) -> Option<&TileBitset> {
        self.adjacency.allowed(tile, direction)
    }

    /// Whether `to` may sit in `direction` of `from`
    pub fn is_compatible(&self, from: usize, direction: Direction, to: usize) -> bool {
        self.adjacency.allows(from, direction, to)
    }
}
