//! Simple-tiled catalogs built from declared tiles
//!
//! Every base tile expands into the orientations of its symmetry class.
//! Adjacency then comes either from the declared neighbor pairs, turned
//! through all four rotations (and optionally mirrored), or is inferred
//! from how well the tiles' border bands line up.

use crate::catalog::overlapping::overlap_mean_distance;
use crate::catalog::rules::{RuleSet, TileRef};
use crate::catalog::symmetry::Symmetry;
use crate::catalog::{AdjacencyTable, TileCatalog};
use crate::io::error::{Result, invalid_parameter, malformed_rules};
use crate::spatial::direction::Direction;
use crate::spatial::tiles::PixelBlock;

/// Orientations of every declared tile, flattened into catalog order
#[derive(Clone, Debug)]
pub struct Orbits {
    /// Pixel block per catalog tile
    pub blocks: Vec<PixelBlock>,
    /// Declared weight per catalog tile
    pub weights: Vec<f64>,
    /// Catalog id of orientation 0 and the class, per base tile
    pub bases: Vec<(usize, Symmetry)>,
}

impl Orbits {
    /// Expand each base tile into its orientations
    ///
    /// Orientation `i` is the base image turned `i` quarter turns
    /// counter-clockwise and carries the base tile's weight.
    ///
    /// # Errors
    ///
    /// Returns an error if the rule set fails validation
    pub fn expand(rules: &RuleSet) -> Result<Self> {
        rules.validate()?;

        let mut blocks = Vec::new();
        let mut weights = Vec::new();
        let mut bases = Vec::with_capacity(rules.tiles.len());

        for tile in &rules.tiles {
            bases.push((blocks.len(), tile.symmetry));
            let mut current = tile.pixels.clone();
            for _ in 0..tile.symmetry.cardinality() {
                let next = current.rotate_ccw();
                blocks.push(current);
                weights.push(tile.weight);
                current = next;
            }
        }

        Ok(Self {
            blocks,
            weights,
            bases,
        })
    }

    /// Catalog id of `reference` after a further `quarter_turns`, optionally mirrored
    ///
    /// # Errors
    ///
    /// Returns an error if the reference names an unknown tile
    pub fn resolve(
        &self,
        rules: &RuleSet,
        reference: &TileRef,
        quarter_turns: usize,
        mirrored: bool,
    ) -> Result<usize> {
        let (first, symmetry) = rules
            .position(&reference.name)
            .and_then(|index| self.bases.get(index).copied())
            .ok_or_else(|| {
                malformed_rules(&format!("unknown tile '{}'", reference.name))
            })?;
        let member = if mirrored {
            symmetry.reflection(reference.rotation)
        } else {
            symmetry.rotation(reference.rotation)
        };
        Ok(first + symmetry.rotation(member + quarter_turns))
    }

    /// Number of catalog tiles
    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    /// Whether no tiles were expanded
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }
}

/// Build a catalog linking tiles only as the neighbor rules declare
///
/// A rule `left | right` says `right` may sit east of `left`. Turning the
/// pair `r` quarter turns counter-clockwise turns that east into the
/// direction `East.rotate_ccw()` applied `r` times, so each rule yields four
/// links. With `reflections` each rule is also mirrored, which swaps the
/// roles of the two tiles.
///
/// # Errors
///
/// Returns an error if the rule set is invalid
pub fn build_declarative(rules: &RuleSet, reflections: bool) -> Result<TileCatalog> {
    let orbits = Orbits::expand(rules)?;
    let mut adjacency = AdjacencyTable::new(orbits.len());

    let mirror_passes: &[bool] = if reflections { &[false, true] } else { &[false] };
    for rule in &rules.neighbors {
        for &mirrored in mirror_passes {
            let mut direction = Direction::East;
            for quarter_turns in 0..4 {
                let left = orbits.resolve(rules, &rule.left, quarter_turns, mirrored)?;
                let right = orbits.resolve(rules, &rule.right, quarter_turns, mirrored)?;
                if mirrored {
                    adjacency.link(right, direction, left);
                } else {
                    adjacency.link(left, direction, right);
                }
                direction = direction.rotate_ccw();
            }
        }
    }

    log::debug!(
        "Expanded {} declared tiles into {} orientations",
        rules.tiles.len(),
        orbits.len()
    );

    TileCatalog::new(orbits.blocks, &orbits.weights, adjacency)
}

/// Build a catalog whose adjacency is inferred from tile borders
///
/// Neighbor rules are ignored. Two orientations are linked in a direction
/// when the `band_width`-sample strips where they would meet differ by at
/// most `tolerance` in mean RGBA distance.
///
/// # Errors
///
/// Returns an error if the rule set is invalid, the band is empty or wider
/// than a tile, or the tolerance is negative or not finite
pub fn build_inferred(rules: &RuleSet, band_width: usize, tolerance: f64) -> Result<TileCatalog> {
    let orbits = Orbits::expand(rules)?;
    let tile_size = orbits.blocks.first().map_or(0, PixelBlock::size);

    if band_width == 0 || band_width > tile_size {
        return Err(invalid_parameter(
            "band_width",
            &band_width,
            &format!("must be between 1 and the tile size {tile_size}"),
        ));
    }
    if !tolerance.is_finite() || tolerance < 0.0 {
        return Err(invalid_parameter(
            "tolerance",
            &tolerance,
            &"must be a non-negative finite distance",
        ));
    }

    let shift = tile_size - band_width;
    let adjacency = AdjacencyTable::infer(orbits.len(), |a, direction, b| {
        match (orbits.blocks.get(a), orbits.blocks.get(b)) {
            (Some(a), Some(b)) => overlap_mean_distance(a, b, direction, shift) <= tolerance,
            _ => false,
        }
    });

    log::debug!(
        "Inferred adjacency for {} orientations across a {band_width}-sample band",
        orbits.len()
    );

    TileCatalog::new(orbits.blocks, &orbits.weights, adjacency)
}
