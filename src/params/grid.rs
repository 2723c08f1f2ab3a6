//! Grid dimensions and noise-partition parameters.

/// Grid layout and noise-driven partition parameters
#[derive(Debug, Clone)]
pub struct GridParams {
    /// Number of columns (fixed for the session)
    pub cols: usize,

    /// Number of rows (fixed for the session)
    pub rows: usize,

    /// Power applied to each noise sample before weighting.
    /// Values > 1 exaggerate the difference between low and high samples.
    pub contrast: f64,

    /// Noise-space distance between neighbouring column/row indices
    pub noise_step: f64,

    /// Time offset added for the row stream so rows decorrelate from columns
    pub row_time_offset: f64,

    /// Perlin noise seed
    pub noise_seed: u32,
}

impl Default for GridParams {
    fn default() -> Self {
        Self {
            cols: 12,
            rows: 12,
            contrast: 2.0,
            noise_step: 0.1,
            row_time_offset: 100.0,
            noise_seed: 42,
        }
    }
}
