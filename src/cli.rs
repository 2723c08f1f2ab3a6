//! Command-line argument parsing.

use clap::Parser;

use crate::error::Result;
use crate::params::{
    AudioConfig, ControlDefaults, GlitchParams, GridParams, RecordingConfig, RenderConfig,
};

/// Command line arguments
#[derive(Parser, Debug)]
#[command(name = "glitchgrid")]
#[command(about = "Audio-reactive noise grid with glitch waves", long_about = None)]
pub struct Args {
    /// Number of grid columns
    #[arg(long, default_value_t = 12)]
    pub cols: usize,

    /// Number of grid rows
    #[arg(long, default_value_t = 12)]
    pub rows: usize,

    /// Grid canvas width (pixels)
    #[arg(long, value_name = "PIXELS", default_value_t = 720)]
    pub width: u32,

    /// Grid canvas height (pixels)
    #[arg(long, value_name = "PIXELS", default_value_t = 720)]
    pub height: u32,

    /// Initial Speed slider value (simulated time per frame)
    #[arg(long)]
    pub speed: Option<f64>,

    /// Initial Strength slider value
    #[arg(long)]
    pub strength: Option<f64>,

    /// Power applied to noise samples before weighting
    #[arg(long, default_value_t = 2.0)]
    pub contrast: f64,

    /// Maximum ring radius of a glitch wave
    #[arg(long, default_value_t = 5)]
    pub depth: u32,

    /// Seed for the noise field and random effects
    #[arg(long, default_value_t = 42)]
    pub seed: u32,

    /// Directory holding loop.wav and samples/*.wav
    #[arg(long, value_name = "DIR", default_value = "assets")]
    pub assets: String,

    /// Run without an audio device (beats never fire)
    #[arg(long)]
    pub no_audio: bool,

    /// Record frames and audio (duration in seconds)
    #[arg(long, value_name = "SECONDS")]
    pub record: Option<f32>,
}

impl Args {
    pub fn grid_params(&self) -> GridParams {
        GridParams {
            cols: self.cols.max(1),
            rows: self.rows.max(1),
            contrast: self.contrast,
            noise_seed: self.seed,
            ..GridParams::default()
        }
    }

    pub fn glitch_params(&self) -> GlitchParams {
        GlitchParams {
            max_depth: self.depth,
            ..GlitchParams::default()
        }
    }

    pub fn render_config(&self) -> RenderConfig {
        RenderConfig {
            canvas_width: self.width.max(1),
            canvas_height: self.height.max(1),
            ..RenderConfig::default()
        }
    }

    pub fn audio_config(&self) -> AudioConfig {
        AudioConfig {
            assets_dir: self.assets.clone(),
            ..AudioConfig::default()
        }
    }

    /// Slider specs with the command-line starting values; the sliders clamp
    /// out-of-range values
    pub fn control_defaults(&self) -> ControlDefaults {
        let mut defaults = ControlDefaults::default();
        if let Some(speed) = self.speed {
            defaults.speed.default = speed;
        }
        if let Some(strength) = self.strength {
            defaults.strength.default = strength;
        }
        defaults
    }

    /// Create recording configuration (and its directories) if recording mode is enabled
    pub fn create_recording_config(&self) -> Result<Option<RecordingConfig>> {
        let Some(duration) = self.record else {
            return Ok(None);
        };
        let config = RecordingConfig::new(duration);
        std::fs::create_dir_all(config.frames_dir())?;
        Ok(Some(config))
    }
}
