//! Noise-driven partition of the canvas into non-uniform columns and rows.
//!
//! Every frame each column (and each row) receives a weight from a Perlin
//! sample, the weights are shaped by `contrast` and `strength`, and the result
//! is normalised so the sizes always fill the canvas exactly.

use glam::Vec2;
use noise::{NoiseFn, Perlin};

use crate::params::GridParams;

/// Floor added to every raw weight so a cell never collapses to zero size
pub const WEIGHT_EPSILON: f64 = 1e-4;

/// Compute `count` strictly positive sizes summing to `total_extent`.
///
/// # Arguments
/// * `count` - Number of sizes to produce
/// * `sample` - Noise sample in [0, 1] for index `k`
/// * `contrast` - Power applied to each sample (>1 sharpens differences)
/// * `strength` - Weight multiplier; 0 yields a uniform partition
/// * `total_extent` - Value the sizes sum to
pub fn compute_sizes<F>(
    count: usize,
    mut sample: F,
    contrast: f64,
    strength: f64,
    total_extent: f64,
) -> Vec<f64>
where
    F: FnMut(usize) -> f64,
{
    let strength = strength.max(0.0);
    let weights: Vec<f64> = (0..count)
        .map(|k| sample(k).clamp(0.0, 1.0).powf(contrast) * strength + WEIGHT_EPSILON)
        .collect();

    let sum: f64 = weights.iter().sum();
    weights.iter().map(|w| w / sum * total_extent).collect()
}

/// Axis-aligned rectangle of one grid cell in canvas pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellRect {
    pub col: usize,
    pub row: usize,
    pub origin: Vec2,
    pub size: Vec2,
}

/// Current column widths and row heights
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Partition {
    pub col_widths: Vec<f64>,
    pub row_heights: Vec<f64>,
}

impl Partition {
    /// Evenly sized partition, used before the first frame is computed
    pub fn uniform(cols: usize, rows: usize, width: f64, height: f64) -> Self {
        Self {
            col_widths: vec![width / cols.max(1) as f64; cols],
            row_heights: vec![height / rows.max(1) as f64; rows],
        }
    }

    pub fn cols(&self) -> usize {
        self.col_widths.len()
    }

    pub fn rows(&self) -> usize {
        self.row_heights.len()
    }

    /// Map a canvas-local point to the cell containing it.
    ///
    /// Returns `None` for points outside every cell, including the sliver a
    /// rounding shortfall can leave at the far edges.
    pub fn cell_at(&self, x: f64, y: f64) -> Option<(usize, usize)> {
        let col = find_span(&self.col_widths, x)?;
        let row = find_span(&self.row_heights, y)?;
        Some((col, row))
    }

    /// Rectangle of cell `(col, row)`, or `None` when out of range
    pub fn cell_rect(&self, col: usize, row: usize) -> Option<CellRect> {
        if col >= self.cols() || row >= self.rows() {
            return None;
        }
        let x: f64 = self.col_widths[..col].iter().sum();
        let y: f64 = self.row_heights[..row].iter().sum();
        Some(CellRect {
            col,
            row,
            origin: Vec2::new(x as f32, y as f32),
            size: Vec2::new(self.col_widths[col] as f32, self.row_heights[row] as f32),
        })
    }

    /// All cell rectangles in row-major order
    pub fn cells(&self) -> Vec<CellRect> {
        let mut rects = Vec::with_capacity(self.cols() * self.rows());
        let mut y = 0.0;
        for (row, &h) in self.row_heights.iter().enumerate() {
            let mut x = 0.0;
            for (col, &w) in self.col_widths.iter().enumerate() {
                rects.push(CellRect {
                    col,
                    row,
                    origin: Vec2::new(x as f32, y as f32),
                    size: Vec2::new(w as f32, h as f32),
                });
                x += w;
            }
            y += h;
        }
        rects
    }
}

/// Linear scan accumulating sizes until `pos` falls inside `[acc, acc + size)`
fn find_span(sizes: &[f64], pos: f64) -> Option<usize> {
    if pos < 0.0 {
        return None;
    }
    let mut acc = 0.0;
    for (index, &size) in sizes.iter().enumerate() {
        if pos >= acc && pos < acc + size {
            return Some(index);
        }
        acc += size;
    }
    None
}

/// Perlin-backed partition generator with decorrelated column/row streams
pub struct NoisePartition {
    perlin: Perlin,
    noise_step: f64,
    row_time_offset: f64,
    contrast: f64,
}

impl NoisePartition {
    pub fn new(params: &GridParams) -> Self {
        Self {
            perlin: Perlin::new(params.noise_seed),
            noise_step: params.noise_step,
            row_time_offset: params.row_time_offset,
            contrast: params.contrast,
        }
    }

    /// Noise in [0, 1] for index `k` at time offset `time`
    pub fn sample(&self, k: usize, time: f64) -> f64 {
        let raw = self.perlin.get([k as f64 * self.noise_step, time]);
        ((raw + 1.0) * 0.5).clamp(0.0, 1.0)
    }

    /// Recompute columns, then rows, for simulated time `t`
    pub fn compute(
        &self,
        cols: usize,
        rows: usize,
        t: f64,
        strength: f64,
        width: f64,
        height: f64,
    ) -> Partition {
        let col_widths = compute_sizes(
            cols,
            |k| self.sample(k, t),
            self.contrast,
            strength,
            width,
        );
        let row_heights = compute_sizes(
            rows,
            |k| self.sample(k, t + self.row_time_offset),
            self.contrast,
            strength,
            height,
        );
        Partition {
            col_widths,
            row_heights,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOLERANCE: f64 = 1e-9;

    #[test]
    fn test_sizes_sum_to_extent_and_stay_positive() {
        let samples = [0.0, 0.2, 0.9, 1.0, 0.5, 0.0, 0.33];
        for &strength in &[0.0, 0.01, 0.5, 1.0, 3.0] {
            let sizes = compute_sizes(samples.len(), |k| samples[k], 2.0, strength, 640.0);
            let sum: f64 = sizes.iter().sum();
            assert!((sum - 640.0).abs() < TOLERANCE, "sum {} for strength {}", sum, strength);
            assert!(sizes.iter().all(|&s| s > 0.0));
        }
    }

    #[test]
    fn test_zero_strength_zero_noise_is_uniform() {
        let sizes = compute_sizes(8, |_| 0.0, 2.0, 0.0, 400.0);
        for size in &sizes {
            assert!((size - 50.0).abs() < TOLERANCE);
        }
    }

    #[test]
    fn test_zero_strength_constant_noise_is_uniform() {
        let sizes = compute_sizes(5, |_| 0.7, 3.0, 0.0, 100.0);
        for size in &sizes {
            assert!((size - 20.0).abs() < TOLERANCE);
        }
    }

    #[test]
    fn test_contrast_exaggerates_differences() {
        let samples = [0.25, 0.75];
        let flat = compute_sizes(2, |k| samples[k], 1.0, 1.0, 100.0);
        let sharp = compute_sizes(2, |k| samples[k], 3.0, 1.0, 100.0);

        assert!(sharp[1] / sharp[0] > flat[1] / flat[0]);
    }

    #[test]
    fn test_out_of_range_samples_are_clamped() {
        let samples = [-0.5, 1.5];
        let sizes = compute_sizes(2, |k| samples[k], 1.0, 1.0, 10.0);
        assert!(sizes[0] > 0.0);
        assert!((sizes.iter().sum::<f64>() - 10.0).abs() < TOLERANCE);
    }

    #[test]
    fn test_empty_partition() {
        assert!(compute_sizes(0, |_| 0.5, 2.0, 1.0, 100.0).is_empty());
    }

    #[test]
    fn test_cell_at_maps_points_to_spans() {
        let partition = Partition {
            col_widths: vec![10.0, 30.0, 60.0],
            row_heights: vec![50.0, 50.0],
        };

        assert_eq!(partition.cell_at(0.0, 0.0), Some((0, 0)));
        assert_eq!(partition.cell_at(9.99, 49.99), Some((0, 0)));
        assert_eq!(partition.cell_at(10.0, 50.0), Some((1, 1)));
        assert_eq!(partition.cell_at(99.0, 10.0), Some((2, 0)));
    }

    #[test]
    fn test_cell_at_outside_is_none() {
        let partition = Partition::uniform(3, 3, 90.0, 90.0);

        assert_eq!(partition.cell_at(-1.0, 10.0), None);
        assert_eq!(partition.cell_at(10.0, 90.0), None);
        assert_eq!(partition.cell_at(120.0, 10.0), None);
    }

    #[test]
    fn test_cell_rect_accumulates_offsets() {
        let partition = Partition {
            col_widths: vec![10.0, 30.0, 60.0],
            row_heights: vec![25.0, 75.0],
        };

        let rect = partition.cell_rect(2, 1).unwrap();
        assert_eq!(rect.origin, Vec2::new(40.0, 25.0));
        assert_eq!(rect.size, Vec2::new(60.0, 75.0));
        assert!(partition.cell_rect(3, 0).is_none());

        let cells = partition.cells();
        assert_eq!(cells.len(), 6);
        assert_eq!(cells[5], rect);
    }

    #[test]
    fn test_noise_partition_fills_canvas() {
        let generator = NoisePartition::new(&GridParams::default());

        for step in 0..20 {
            let t = step as f64 * 0.37;
            let partition = generator.compute(12, 9, t, 0.5, 720.0, 480.0);

            let width: f64 = partition.col_widths.iter().sum();
            let height: f64 = partition.row_heights.iter().sum();
            assert!((width - 720.0).abs() < 1e-6);
            assert!((height - 480.0).abs() < 1e-6);
            assert!(partition.col_widths.iter().all(|&w| w > 0.0));
            assert!(partition.row_heights.iter().all(|&h| h > 0.0));
        }
    }

    #[test]
    fn test_rows_and_columns_use_different_streams() {
        let generator = NoisePartition::new(&GridParams::default());
        let partition = generator.compute(12, 12, 0.37, 1.0, 600.0, 600.0);

        assert_ne!(partition.col_widths, partition.row_heights);
    }

    #[test]
    fn test_noise_samples_stay_in_unit_range() {
        let generator = NoisePartition::new(&GridParams::default());
        for k in 0..50 {
            let value = generator.sample(k, k as f64 * 0.13);
            assert!((0.0..=1.0).contains(&value));
        }
    }
}
