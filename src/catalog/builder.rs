//! Closed set of catalog construction strategies

use crate::catalog::TileCatalog;
use crate::catalog::declarative::{build_declarative, build_inferred};
use crate::catalog::overlapping::build_overlapping;
use crate::catalog::rules::RuleSet;
use crate::io::error::Result;
use crate::spatial::tiles::PixelBlock;

/// Where a catalog's tiles and adjacency come from
#[derive(Clone, Debug)]
pub enum CatalogSource {
    /// Windows cut from a source image, compared by exact overlap
    Overlapping {
        /// Equally sized windows, repeats included
        blocks: Vec<PixelBlock>,
    },
    /// Declared tiles linked by declared neighbor pairs
    Declarative {
        /// Tiles and neighbor pairs
        rules: RuleSet,
        /// Also link the mirror image of every declared pair
        reflections: bool,
    },
    /// Declared tiles linked by comparing their border bands
    Inferred {
        /// Tiles; neighbor pairs are ignored
        rules: RuleSet,
        /// Width of the compared border band in samples
        band_width: usize,
        /// Largest accepted mean RGBA distance across the band
        tolerance: f64,
    },
}

impl CatalogSource {
    /// Run the strategy
    ///
    /// # Errors
    ///
    /// Returns any configuration error raised while building
    pub fn build(&self) -> Result<TileCatalog> {
        let catalog = match self {
            Self::Overlapping { blocks } => build_overlapping(blocks.iter().cloned())?,
            Self::Declarative { rules, reflections } => build_declarative(rules, *reflections)?,
            Self::Inferred {
                rules,
                band_width,
                tolerance,
            } => build_inferred(rules, *band_width, *tolerance)?,
        };
        log::info!(
            "Built {} catalog with {} tiles of {}x{}",
            self.name(),
            catalog.len(),
            catalog.tile_size(),
            catalog.tile_size()
        );
        Ok(catalog)
    }

    /// Side length of the pattern each grid cell anchors
    ///
    /// Overlapping patterns extend past their origin cell; declared tiles
    /// occupy exactly one cell.
    pub fn footprint(&self) -> usize {
        match self {
            Self::Overlapping { blocks } => blocks.first().map_or(1, PixelBlock::size),
            Self::Declarative { .. } | Self::Inferred { .. } => 1,
        }
    }

    /// Short name for log output
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Overlapping { .. } => "overlapping",
            Self::Declarative { .. } => "declarative",
            Self::Inferred { .. } => "inferred",
        }
    }
}
