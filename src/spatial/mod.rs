//! Spatial primitives shared by the catalog and the solver
//!
//! This module contains spatial-related functionality including:
//! - Cardinal directions and their opposites
//! - Grid geometry, wrapping and legal placement origins
//! - Square pixel blocks and their symmetry variants

/// Cardinal directions
pub mod direction;
/// Grid geometry and neighbor lookup
pub mod grid;
/// Pixel blocks, hashing and dihedral transforms
pub mod tiles;

pub use direction::Direction;
pub use grid::GridSpec;
