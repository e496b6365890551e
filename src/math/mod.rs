//! Mathematical utilities for the solver and renderers

/// Color distances and channel conversions
pub mod color;
/// Shannon entropy over tile weight distributions
pub mod entropy;
