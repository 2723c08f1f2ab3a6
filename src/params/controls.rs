//! Slider ranges for the on-screen controls.

/// Range, step and default of one slider
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SliderSpec {
    pub min: f64,
    pub max: f64,
    pub default: f64,
    pub step: f64,
}

/// Default slider specs
#[derive(Debug, Clone)]
pub struct ControlDefaults {
    /// Simulated time advanced per frame while playing
    pub speed: SliderSpec,

    /// Multiplier applied to noise weights before normalisation
    pub strength: SliderSpec,
}

impl Default for ControlDefaults {
    fn default() -> Self {
        Self {
            speed: SliderSpec {
                min: 0.0,
                max: 0.05,
                default: 0.01,
                step: 0.001,
            },
            strength: SliderSpec {
                min: 0.0,
                max: 1.0,
                default: 0.5,
                step: 0.01,
            },
        }
    }
}
