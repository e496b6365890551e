//! Possibility state of a single grid position
//!
//! A cell starts with every catalog tile possible and only ever loses tiles
//! until it is collapsed or the grid is reset. The weight sums behind its
//! entropy are kept up to date on every ban instead of being recomputed.

use crate::algorithm::bitset::TileBitset;
use crate::catalog::TileCatalog;
use crate::math::color::{to_unit, widen};
use crate::math::entropy::entropy_from_sums;
use rand::Rng;

/// Remaining tiles, running entropy sums and display color of one cell
#[derive(Clone, Debug)]
pub struct Cell {
    position: (usize, usize),
    possible: TileBitset,
    remaining: usize,
    collapsed: Option<usize>,
    sum_weights: f64,
    sum_weight_log_weights: f64,
    entropy: f64,
    main_color_sum: [f64; 4],
    average_color_sum: [f64; 4],
    display_color: [f64; 4],
}

impl Cell {
    /// Cell at `(x, y)` with every tile of `catalog` possible
    pub fn new(position: (usize, usize), catalog: &TileCatalog) -> Self {
        let sum_weights: f64 = catalog.weights().iter().sum();
        let sum_weight_log_weights = catalog.total_weight_log_weight();
        let main_color_sum = catalog.weighted_main_color();
        Self {
            position,
            possible: TileBitset::all(catalog.len()),
            remaining: catalog.len(),
            collapsed: None,
            sum_weights,
            sum_weight_log_weights,
            entropy: entropy_from_sums(sum_weights, sum_weight_log_weights),
            main_color_sum,
            average_color_sum: catalog.weighted_average_color(),
            display_color: main_color_sum.map(|channel| channel / sum_weights),
        }
    }

    /// Remove `tile` from the possible set
    ///
    /// Returns `false` and changes nothing if the tile was already excluded.
    /// Banning the last tile leaves the cell in the contradiction state, with
    /// zero remaining tiles and undefined (`NaN`) entropy.
    pub fn ban(&mut self, tile: usize, catalog: &TileCatalog) -> bool {
        if !self.possible.contains(tile) {
            return false;
        }
        self.possible.remove(tile);
        self.remaining -= 1;

        if self.remaining == 0 {
            self.sum_weights = 0.0;
            self.sum_weight_log_weights = 0.0;
            self.entropy = f64::NAN;
            self.main_color_sum = [0.0; 4];
            self.average_color_sum = [0.0; 4];
            self.display_color = [0.0; 4];
            return true;
        }

        let weight = catalog.weight(tile);
        self.sum_weights -= weight;
        self.sum_weight_log_weights -= catalog.weight_log_weight(tile);
        self.entropy = entropy_from_sums(self.sum_weights, self.sum_weight_log_weights);

        if let Some(pixels) = catalog.tiles().get(tile) {
            for (sum, channel) in self
                .main_color_sum
                .iter_mut()
                .zip(widen(pixels.main_color()))
            {
                *sum -= weight * channel;
            }
            for (sum, channel) in self
                .average_color_sum
                .iter_mut()
                .zip(pixels.average_color())
            {
                *sum -= weight * f64::from(channel);
            }
        }
        if self.collapsed.is_none() {
            self.display_color = self.weighted(self.main_color_sum);
        }
        true
    }

    /// Draw a possible tile with probability proportional to its weight
    ///
    /// Tiles are walked in id order and the first whose cumulative weight
    /// reaches the threshold is returned; floating-point shortfall falls back
    /// to the last possible tile. Returns `None` when nothing is possible.
    pub fn choose_random_tile<R: Rng + ?Sized>(
        &self,
        catalog: &TileCatalog,
        rng: &mut R,
    ) -> Option<usize> {
        let total: f64 = self.possible.iter().map(|tile| catalog.weight(tile)).sum();
        if total <= 0.0 {
            return None;
        }

        let threshold = rng.random::<f64>() * total;
        let mut cumulative = 0.0;
        let mut last = None;
        for tile in &self.possible {
            cumulative += catalog.weight(tile);
            if cumulative >= threshold {
                return Some(tile);
            }
            last = Some(tile);
        }
        last
    }

    /// Fix the cell to `tile`
    ///
    /// The caller is expected to have banned every other tile first. Entropy
    /// drops to zero and the display color becomes the tile's main color.
    pub fn collapse_to(&mut self, tile: usize, catalog: &TileCatalog) {
        self.collapsed = Some(tile);
        self.entropy = 0.0;
        if let Some(chosen) = catalog.tiles().get(tile) {
            self.display_color = widen(chosen.main_color());
        }
    }

    /// `(x, y)` grid position
    pub const fn position(&self) -> (usize, usize) {
        self.position
    }

    /// Tiles still possible
    pub const fn possible(&self) -> &TileBitset {
        &self.possible
    }

    /// Whether `tile` is still possible
    pub fn is_possible(&self, tile: usize) -> bool {
        self.possible.contains(tile)
    }

    /// Number of tiles still possible
    pub const fn remaining(&self) -> usize {
        self.remaining
    }

    /// Chosen tile, once collapsed
    pub const fn collapsed_tile(&self) -> Option<usize> {
        self.collapsed
    }

    /// Whether a tile has been chosen
    pub const fn is_collapsed(&self) -> bool {
        self.collapsed.is_some()
    }

    /// Whether every tile has been banned
    pub const fn is_contradiction(&self) -> bool {
        self.remaining == 0
    }

    /// Shannon entropy over the remaining weights; `NaN` in contradiction
    pub const fn entropy(&self) -> f64 {
        self.entropy
    }

    /// `Σw` over the remaining tiles
    pub const fn sum_weights(&self) -> f64 {
        self.sum_weights
    }

    /// `Σ w·ln(w)` over the remaining tiles
    pub const fn sum_weight_log_weights(&self) -> f64 {
        self.sum_weight_log_weights
    }

    /// Display color as floats in `[0, 1]`
    ///
    /// The chosen tile's main color once collapsed, otherwise the
    /// weight-averaged main color of the remaining tiles.
    pub fn color(&self) -> [f32; 4] {
        to_unit(self.display_color)
    }

    /// Weight-averaged mean color of the remaining tiles, 0-255 scale
    pub fn average_color(&self) -> [f64; 4] {
        self.weighted(self.average_color_sum)
    }

    fn weighted(&self, sum: [f64; 4]) -> [f64; 4] {
        if self.sum_weights > 0.0 {
            sum.map(|channel| channel / self.sum_weights)
        } else {
            [0.0; 4]
        }
    }
}
