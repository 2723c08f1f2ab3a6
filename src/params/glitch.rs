//! Glitch wave, overlay and flash timing parameters.

/// Click-triggered glitch effect parameters
#[derive(Debug, Clone)]
pub struct GlitchParams {
    /// Delay between successive rings of the glitch wave (milliseconds)
    pub stagger_ms: f64,

    /// Maximum ring radius of a wave started by a click
    pub max_depth: u32,

    /// How long a glitch session stays active after a click (milliseconds)
    pub session_ms: f64,

    /// How long the channel-split overlay stays active after a click (milliseconds)
    pub overlay_ms: f64,

    /// Maximum per-channel offset of the overlay (pixels, either direction)
    pub channel_jitter_px: i32,

    /// Maximum positional jitter of a glitching cell (pixels, either direction)
    pub cell_jitter_px: f32,

    /// Number of frames a cell flashes for after a beat
    pub flash_frames: u32,
}

impl Default for GlitchParams {
    fn default() -> Self {
        Self {
            stagger_ms: 40.0,
            max_depth: 5,
            session_ms: 1200.0,
            overlay_ms: 350.0,
            channel_jitter_px: 8,
            cell_jitter_px: 4.0,
            flash_frames: 4,
        }
    }
}
