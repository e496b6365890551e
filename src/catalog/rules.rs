//! Declared tiles and neighbor pairs, as read from a tile-set definition

use crate::catalog::symmetry::Symmetry;
use crate::io::error::{AlgorithmError, Result, invalid_parameter, malformed_rules};
use crate::spatial::tiles::PixelBlock;

/// One base tile of a rule set
#[derive(Clone, Debug, PartialEq)]
pub struct TileRule {
    /// Unique name used by neighbor rules
    pub name: String,
    /// Orbit the base image is expanded into
    pub symmetry: Symmetry,
    /// Relative frequency shared by every orientation
    pub weight: f64,
    /// Base image, orientation 0
    pub pixels: PixelBlock,
}

/// Reference to one orientation of a named tile
///
/// Written as `name` or `name k` where `k` is the number of counter-clockwise
/// quarter turns applied to the base image.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TileRef {
    /// Name of the base tile
    pub name: String,
    /// Quarter turns applied to the base image
    pub rotation: usize,
}

impl TileRef {
    /// Parse a `name [rotation]` reference
    ///
    /// # Errors
    ///
    /// Returns an error if the reference is empty, the rotation is not a
    /// non-negative integer, or extra tokens follow it
    pub fn parse(text: &str) -> Result<Self> {
        let mut tokens = text.split_whitespace();
        let name = tokens
            .next()
            .ok_or_else(|| malformed_rules(&"empty tile reference"))?;
        let rotation = match tokens.next() {
            Some(token) => token.parse::<usize>().map_err(|error| {
                malformed_rules(&format!("bad rotation '{token}' in '{text}': {error}"))
            })?,
            None => 0,
        };
        if tokens.next().is_some() {
            return Err(malformed_rules(&format!(
                "unexpected trailing tokens in '{text}'"
            )));
        }
        Ok(Self {
            name: name.to_string(),
            rotation,
        })
    }
}

/// Declared horizontal adjacency: `right` may sit immediately east of `left`
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NeighborRule {
    /// Western tile of the pair
    pub left: TileRef,
    /// Eastern tile of the pair
    pub right: TileRef,
}

/// Base tiles and neighbor pairs making up a tile set
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RuleSet {
    /// Base tiles in declaration order
    pub tiles: Vec<TileRule>,
    /// Declared neighbor pairs
    pub neighbors: Vec<NeighborRule>,
}

impl RuleSet {
    /// Position of the base tile called `name`
    pub fn position(&self, name: &str) -> Option<usize> {
        self.tiles.iter().position(|tile| tile.name == name)
    }

    /// Check names are unique, weights are usable and tile images agree in size
    ///
    /// # Errors
    ///
    /// Returns an error describing the first problem found
    pub fn validate(&self) -> Result<()> {
        let Some(first) = self.tiles.first() else {
            return Err(malformed_rules(&"rule set declares no tiles"));
        };
        let expected = first.pixels.size();

        for (index, tile) in self.tiles.iter().enumerate() {
            if self.position(&tile.name) != Some(index) {
                return Err(malformed_rules(&format!(
                    "tile '{}' is declared twice",
                    tile.name
                )));
            }
            if !tile.weight.is_finite() || tile.weight <= 0.0 {
                return Err(invalid_parameter(
                    "weight",
                    &tile.weight,
                    &format!("tile '{}' needs a positive finite weight", tile.name),
                ));
            }
            if tile.pixels.size() != expected {
                return Err(AlgorithmError::InconsistentTileSize {
                    tile: tile.name.clone(),
                    expected,
                    found: tile.pixels.size(),
                });
            }
        }

        for rule in &self.neighbors {
            for reference in [&rule.left, &rule.right] {
                if self.position(&reference.name).is_none() {
                    return Err(malformed_rules(&format!(
                        "neighbor rule names unknown tile '{}'",
                        reference.name
                    )));
                }
            }
        }
        Ok(())
    }
}
