//! Overlapping-model catalogs and pixel-overlap comparison
//!
//! Windows cut from a source image are deduplicated by content hash, with
//! repeats counted as frequency. Two patterns are compatible in a direction
//! when, shifted one sample apart, their overlapping region agrees exactly.
//! The same comparison with a wider shift and a color tolerance drives
//! adjacency inference between declared tiles.

use crate::catalog::{AdjacencyTable, TileCatalog};
use crate::io::error::{AlgorithmError, Result};
use crate::math::color::rgba_distance;
use crate::spatial::direction::Direction;
use crate::spatial::tiles::{PixelBlock, Rgba};
use std::collections::HashMap;

/// Sample pairs where `b`, placed `shift` samples away from `a` in `direction`, overlaps `a`
///
/// Pairs are `(a_sample, b_sample)` in row-major order of `a`. Nothing overlaps
/// once `shift` reaches the block size.
pub fn overlap_pairs<'a>(
    a: &'a PixelBlock,
    b: &'a PixelBlock,
    direction: Direction,
    shift: usize,
) -> impl Iterator<Item = (Rgba, Rgba)> + 'a {
    let size = a.size().min(b.size()) as i64;
    let (dx, dy) = direction.offset();
    let shift = shift as i64;
    (0..size).flat_map(move |row| {
        (0..size).filter_map(move |col| {
            let b_row = row - dy * shift;
            let b_col = col - dx * shift;
            if b_row < 0 || b_col < 0 || b_row >= size || b_col >= size {
                return None;
            }
            let a_sample = a.get(row as usize, col as usize)?;
            let b_sample = b.get(b_row as usize, b_col as usize)?;
            Some((a_sample, b_sample))
        })
    })
}

/// Whether the overlap of `a` and `b` at `shift` agrees sample for sample
pub fn overlap_agrees(a: &PixelBlock, b: &PixelBlock, direction: Direction, shift: usize) -> bool {
    overlap_pairs(a, b, direction, shift).all(|(x, y)| x == y)
}

/// Mean RGBA distance over the overlap of `a` and `b` at `shift`
///
/// Zero when the blocks do not overlap.
pub fn overlap_mean_distance(
    a: &PixelBlock,
    b: &PixelBlock,
    direction: Direction,
    shift: usize,
) -> f64 {
    let (total, count) = overlap_pairs(a, b, direction, shift)
        .fold((0.0, 0_usize), |(total, count), (x, y)| {
            (total + rgba_distance(x, y), count + 1)
        });
    if count == 0 { 0.0 } else { total / count as f64 }
}

/// Build a catalog from equally sized overlapping windows
///
/// Windows with identical content collapse into one tile whose weight is
/// the number of times it was seen.
///
/// # Errors
///
/// Returns an error if no windows are supplied or their sizes differ
pub fn build_overlapping(
    blocks: impl IntoIterator<Item = PixelBlock>,
) -> Result<TileCatalog> {
    let mut index_by_hash: HashMap<u64, usize> = HashMap::new();
    let mut unique: Vec<PixelBlock> = Vec::new();
    let mut counts: Vec<f64> = Vec::new();
    let mut expected_size = None;

    for (position, block) in blocks.into_iter().enumerate() {
        let expected = *expected_size.get_or_insert(block.size());
        if block.size() != expected {
            return Err(AlgorithmError::InconsistentTileSize {
                tile: format!("window #{position}"),
                expected,
                found: block.size(),
            });
        }

        let hash = block.content_hash();
        if let Some(count) = index_by_hash
            .get(&hash)
            .and_then(|&index| counts.get_mut(index))
        {
            *count += 1.0;
        } else {
            index_by_hash.insert(hash, unique.len());
            unique.push(block);
            counts.push(1.0);
        }
    }

    let adjacency = AdjacencyTable::infer(unique.len(), |a, direction, b| {
        match (unique.get(a), unique.get(b)) {
            (Some(a), Some(b)) => overlap_agrees(a, b, direction, 1),
            _ => false,
        }
    });

    log::debug!(
        "Deduplicated overlapping windows into {} patterns",
        unique.len()
    );

    TileCatalog::new(unique, &counts, adjacency)
}
