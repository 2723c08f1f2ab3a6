//! Audio device, effect and beat-detection configuration.

/// Audio output configuration
#[derive(Debug, Clone)]
pub struct AudioConfig {
    /// Directory holding `loop.wav` and a `samples/` folder of one-shots
    pub assets_dir: String,

    /// Fade time when the background track starts or stops (seconds)
    pub fade_secs: f32,

    /// Gain of the one-shot glitch samples relative to the background
    pub sample_gain: f32,

    /// Echo applied to glitch samples
    pub echo: EchoParams,
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            assets_dir: "assets".to_string(),
            fade_secs: 0.8,
            sample_gain: 0.8,
            echo: EchoParams::default(),
        }
    }
}

/// Feedback delay settings for the click echo
#[derive(Debug, Clone, Copy)]
pub struct EchoParams {
    /// Wet/dry mix (0 = dry only, 1 = wet only)
    pub mix: f32,

    /// Portion of the delayed signal fed back into the line (0..1)
    pub feedback: f32,

    /// Delay time (milliseconds)
    pub delay_ms: f32,

    /// How long the echo stays engaged after a click (milliseconds)
    pub active_ms: f32,
}

impl Default for EchoParams {
    fn default() -> Self {
        Self {
            mix: 0.5,
            feedback: 0.6,
            delay_ms: 180.0,
            active_ms: 1500.0,
        }
    }
}

/// Mapping from amplitude level to beat events
#[derive(Debug, Clone)]
pub struct BeatParams {
    /// Minimum rise between consecutive levels that counts as a beat
    pub spike_threshold: f64,

    /// Level at which intensity saturates
    pub level_ceiling: f64,

    /// Intensity reported at or above `level_ceiling`
    pub max_intensity: u32,
}

impl Default for BeatParams {
    fn default() -> Self {
        Self {
            spike_threshold: 0.1,
            level_ceiling: 0.4,
            max_intensity: 15,
        }
    }
}
