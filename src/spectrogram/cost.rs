//! Cost and value of spectrogram cells.
//!
//! A cell's value is its magnitude; its cost is the local entropy term
//! `v * ln(v)`. Candidate partitions are compared on their summed costs after
//! normalising by the energy they cover.

use crate::spectrogram::bank::ResolutionGrid;

/// `x * ln(x)`, with the limit value 0 at `x == 0`.
pub fn xlogx(x: f64) -> f64 {
    if x == 0.0 { 0.0 } else { x * x.ln() }
}

pub fn cell_value(grid: &ResolutionGrid, x: usize, y: usize) -> f64 {
    grid.get(x, y)
}

pub fn cell_cost(grid: &ResolutionGrid, x: usize, y: usize) -> f64 {
    xlogx(grid.get(x, y))
}

/// Normalises the summed cost of a candidate split by the energy it covers:
/// `(cost + E ln E) / E`.
///
/// A candidate covering zero energy costs 0.
pub fn normalized_cost(cost: f64, energy: f64) -> f64 {
    if energy == 0.0 {
        0.0
    } else {
        (cost + xlogx(energy)) / energy
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_xlogx() {
        assert_eq!(xlogx(0.0), 0.0);
        assert_eq!(xlogx(1.0), 0.0);
        assert_abs_diff_eq!(xlogx(std::f64::consts::E), std::f64::consts::E, epsilon = 1e-12);
        assert_abs_diff_eq!(xlogx(0.5), 0.5 * 0.5f64.ln(), epsilon = 1e-12);
    }

    #[test]
    fn test_cell_cost_and_value() {
        let mut grid = ResolutionGrid::new(2, 1);
        grid.data_mut()[[0, 1]] = 2.0;
        assert_eq!(cell_value(&grid, 0, 1), 2.0);
        assert_abs_diff_eq!(cell_cost(&grid, 0, 1), 2.0 * 2.0f64.ln(), epsilon = 1e-12);
        assert_eq!(cell_cost(&grid, 0, 0), 0.0);
    }

    #[test]
    fn test_normalized_cost() {
        assert_eq!(normalized_cost(0.0, 0.0), 0.0);
        // two equal cells of 1.0: raw cost 0, E = 2
        assert_abs_diff_eq!(normalized_cost(0.0, 2.0), 2.0f64.ln(), epsilon = 1e-12);
        let raw = xlogx(0.25) + xlogx(0.75);
        assert_abs_diff_eq!(normalized_cost(raw, 1.0), raw, epsilon = 1e-12);
    }
}
