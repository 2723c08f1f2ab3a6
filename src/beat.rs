//! Beat detection on a stream of amplitude levels.

use crate::params::BeatParams;

/// Absorbs rounding when a level maps exactly onto an integer intensity
const INTENSITY_TOLERANCE: f64 = 1e-9;

/// Rising-edge spike detector with one sample of memory
#[derive(Debug, Clone)]
pub struct BeatDetector {
    params: BeatParams,
    last_level: f64,
}

impl BeatDetector {
    pub fn new(params: BeatParams) -> Self {
        Self {
            params,
            last_level: 0.0,
        }
    }

    pub fn last_level(&self) -> f64 {
        self.last_level
    }

    /// Linear map of `level` from `[0, level_ceiling]` onto
    /// `[0, max_intensity]`, clamped at both ends and floored
    pub fn intensity(&self, level: f64) -> u32 {
        if self.params.level_ceiling <= 0.0 {
            return self.params.max_intensity;
        }
        let max = self.params.max_intensity as f64;
        let mapped = (level / self.params.level_ceiling * max).clamp(0.0, max);
        (mapped + INTENSITY_TOLERANCE).floor().min(max) as u32
    }

    /// Feed the next level. Returns the beat intensity when the level rose by
    /// more than the spike threshold since the previous call.
    pub fn on_level(&mut self, level: f64) -> Option<u32> {
        let rise = level - self.last_level;
        self.last_level = level;

        if rise > self.params.spike_threshold {
            Some(self.intensity(level))
        } else {
            None
        }
    }
}
