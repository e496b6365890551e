//! Tile-set definitions in XML
//!
//! ```xml
//! <set>
//!   <tiles>
//!     <tile name="corner" symmetry="L" weight="0.5"/>
//!   </tiles>
//!   <neighbors>
//!     <neighbor left="corner 1" right="corner"/>
//!   </neighbors>
//! </set>
//! ```
//!
//! `symmetry` defaults to `X` and `weight` to `1.0`. Each tile's image is
//! read from `<name>.png` in the tile directory.

use crate::catalog::rules::{NeighborRule, RuleSet, TileRef, TileRule};
use crate::catalog::symmetry::Symmetry;
use crate::io::error::{AlgorithmError, Result, malformed_rules};
use crate::io::image::load_tile_image;
use crate::spatial::tiles::PixelBlock;
use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};
use std::path::Path;

/// A `<tile>` element before its image is loaded
#[derive(Clone, Debug, PartialEq)]
pub struct TileDeclaration {
    /// Tile name, also the image file stem
    pub name: String,
    /// Symmetry class
    pub symmetry: Symmetry,
    /// Relative frequency
    pub weight: f64,
}

/// Parsed tile-set definition without pixel data
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TileSetDefinition {
    /// Declared tiles in document order
    pub tiles: Vec<TileDeclaration>,
    /// Declared neighbor pairs in document order
    pub neighbors: Vec<NeighborRule>,
}

impl TileSetDefinition {
    /// Parse a tile-set document
    ///
    /// # Errors
    ///
    /// Returns an error if the XML is malformed, a tile lacks a name or has
    /// an unparsable weight, a symmetry class is unknown, or a neighbor lacks
    /// either side
    pub fn parse(xml: &str) -> Result<Self> {
        let mut reader = Reader::from_str(xml);
        reader.config_mut().trim_text(true);

        let mut definition = Self::default();
        let mut in_tiles = false;
        let mut in_neighbors = false;

        loop {
            match reader.read_event() {
                Ok(Event::Start(ref e)) => match element_name(e)?.as_str() {
                    "tiles" => in_tiles = true,
                    "neighbors" => in_neighbors = true,
                    "tile" if in_tiles => definition.tiles.push(parse_tile(e)?),
                    "neighbor" if in_neighbors => definition.neighbors.push(parse_neighbor(e)?),
                    _ => {}
                },
                Ok(Event::Empty(ref e)) => match element_name(e)?.as_str() {
                    "tile" if in_tiles => definition.tiles.push(parse_tile(e)?),
                    "neighbor" if in_neighbors => definition.neighbors.push(parse_neighbor(e)?),
                    _ => {}
                },
                Ok(Event::End(ref e)) => match e.name().as_ref() {
                    b"tiles" => in_tiles = false,
                    b"neighbors" => in_neighbors = false,
                    _ => {}
                },
                Ok(Event::Eof) => break,
                Err(error) => {
                    return Err(malformed_rules(&format!(
                        "XML error at byte {}: {error}",
                        reader.buffer_position()
                    )));
                }
                _ => {}
            }
        }

        Ok(definition)
    }

    /// Attach pixel data to every declared tile
    ///
    /// # Errors
    ///
    /// Returns the first error from `load_pixels`, or a validation error
    /// for the assembled rule set
    pub fn into_rule_set(
        self,
        mut load_pixels: impl FnMut(&str) -> Result<PixelBlock>,
    ) -> Result<RuleSet> {
        let tiles = self
            .tiles
            .into_iter()
            .map(|declaration| -> Result<TileRule> {
                Ok(TileRule {
                    pixels: load_pixels(&declaration.name)?,
                    name: declaration.name,
                    symmetry: declaration.symmetry,
                    weight: declaration.weight,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        let rules = RuleSet {
            tiles,
            neighbors: self.neighbors,
        };
        rules.validate()?;
        Ok(rules)
    }
}

/// Read a tile-set file and the tile images next to it
///
/// Images are looked up in `tile_dir`, or in the definition's own directory
/// when none is given.
///
/// # Errors
///
/// Returns an error if the file cannot be read, fails to parse, or a tile
/// image cannot be loaded
pub fn load_rule_set(path: &Path, tile_dir: Option<&Path>) -> Result<RuleSet> {
    let xml = std::fs::read_to_string(path).map_err(|e| AlgorithmError::FileSystem {
        path: path.to_path_buf(),
        operation: "read tile set",
        source: e,
    })?;
    let definition = TileSetDefinition::parse(&xml)?;
    let directory = tile_dir
        .or_else(|| path.parent())
        .unwrap_or_else(|| Path::new("."));

    log::debug!(
        "Loading {} tile images from {}",
        definition.tiles.len(),
        directory.display()
    );

    definition.into_rule_set(|name| load_tile_image(directory.join(format!("{name}.png")), name))
}

fn element_name(e: &BytesStart<'_>) -> Result<String> {
    std::str::from_utf8(e.name().as_ref())
        .map(str::to_string)
        .map_err(|error| malformed_rules(&format!("element name is not UTF-8: {error}")))
}

fn attributes(e: &BytesStart<'_>) -> Result<Vec<(String, String)>> {
    e.attributes()
        .map(|attribute| -> Result<(String, String)> {
            let attribute = attribute
                .map_err(|error| malformed_rules(&format!("bad attribute: {error}")))?;
            let key = std::str::from_utf8(attribute.key.as_ref())
                .map_err(|error| malformed_rules(&format!("attribute name is not UTF-8: {error}")))?;
            let value = std::str::from_utf8(&attribute.value)
                .map_err(|error| malformed_rules(&format!("attribute value is not UTF-8: {error}")))?;
            Ok((key.to_string(), value.to_string()))
        })
        .collect()
}

fn parse_tile(e: &BytesStart<'_>) -> Result<TileDeclaration> {
    let mut name = None;
    let mut symmetry = Symmetry::X;
    let mut weight = 1.0;

    for (key, value) in attributes(e)? {
        match key.as_str() {
            "name" => name = Some(value),
            "symmetry" => symmetry = value.parse()?,
            "weight" => {
                weight = value.parse().map_err(|error| {
                    malformed_rules(&format!("bad weight '{value}': {error}"))
                })?;
            }
            _ => {}
        }
    }

    let name = name.ok_or_else(|| malformed_rules(&"<tile> without a name"))?;
    Ok(TileDeclaration {
        name,
        symmetry,
        weight,
    })
}

fn parse_neighbor(e: &BytesStart<'_>) -> Result<NeighborRule> {
    let mut left = None;
    let mut right = None;

    for (key, value) in attributes(e)? {
        match key.as_str() {
            "left" => left = Some(TileRef::parse(&value)?),
            "right" => right = Some(TileRef::parse(&value)?),
            _ => {}
        }
    }

    match (left, right) {
        (Some(left), Some(right)) => Ok(NeighborRule { left, right }),
        _ => Err(malformed_rules(&"<neighbor> needs both left and right")),
    }
}
