//! Wave function collapse tile generator
//!
//! A tile catalog (learned from overlapping windows of a sample image, or
//! declared as named tiles with symmetry classes and neighbor rules) is
//! handed to a wave that repeatedly collapses its most constrained cell and
//! propagates the consequences until every cell holds a compatible tile.

#![forbid(unsafe_code)]

/// Constraint solver: bitsets, cells, propagation and the generation loop
pub mod algorithm;
/// Tile catalogs and their construction strategies
pub mod catalog;
/// Input/output operations and error handling
pub mod io;
/// Entropy and color arithmetic
pub mod math;
/// Directions, grid geometry and pixel blocks
pub mod spatial;

pub use io::error::{AlgorithmError, Result};
