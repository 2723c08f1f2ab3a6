//! Amplitude level of a signal, measured per block.

/// RMS meter with optional exponential smoothing between blocks
#[derive(Debug, Clone)]
pub struct LevelMeter {
    smoothing: f32,
    level: f32,
}

impl LevelMeter {
    /// `smoothing` in [0, 1): 0 reports each block's RMS unchanged
    pub fn new(smoothing: f32) -> Self {
        Self {
            smoothing: smoothing.clamp(0.0, 0.999),
            level: 0.0,
        }
    }

    pub fn level(&self) -> f32 {
        self.level
    }

    /// Update from a block's sum of squares over `count` samples
    pub fn measure(&mut self, sum_squares: f64, count: usize) -> f32 {
        if count == 0 {
            return self.level;
        }
        let rms = ((sum_squares / count as f64).sqrt() as f32).clamp(0.0, 1.0);
        self.level = self.smoothing * self.level + (1.0 - self.smoothing) * rms;
        self.level
    }
}
