//! Canvas and recording configuration.

/// Canvas configuration
#[derive(Debug, Clone)]
pub struct RenderConfig {
    /// Grid canvas width (pixels)
    pub canvas_width: u32,

    /// Grid canvas height (pixels)
    pub canvas_height: u32,

    /// Height of the control strip drawn under the grid (pixels)
    pub control_strip_px: u32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            canvas_width: 720,
            canvas_height: 720,
            control_strip_px: 48,
        }
    }
}

impl RenderConfig {
    /// Full window size including the control strip
    pub fn window_size(&self) -> (u32, u32) {
        (
            self.canvas_width,
            self.canvas_height + self.control_strip_px,
        )
    }
}

/// Recording mode configuration
#[derive(Debug, Clone)]
pub struct RecordingConfig {
    /// Duration to record (seconds)
    pub duration_secs: f32,

    /// Output directory for frames and audio
    pub output_dir: String,

    /// Frame rate (FPS)
    pub fps: u32,
}

impl RecordingConfig {
    pub fn new(duration_secs: f32) -> Self {
        Self {
            duration_secs,
            output_dir: "recording".to_string(),
            fps: 60,
        }
    }

    /// Total number of frames to capture
    pub fn total_frames(&self) -> usize {
        (self.duration_secs * self.fps as f32).ceil() as usize
    }

    /// Fixed frame step in milliseconds
    pub fn frame_ms(&self) -> f64 {
        1000.0 / self.fps as f64
    }

    /// Frame directory path
    pub fn frames_dir(&self) -> String {
        format!("{}/frames", self.output_dir)
    }

    /// Path of a single frame
    pub fn frame_path(&self, frame_num: usize) -> String {
        format!("{}/frame_{:05}.png", self.frames_dir(), frame_num)
    }

    /// Audio file path
    pub fn audio_path(&self) -> String {
        format!("{}/audio.wav", self.output_dir)
    }
}
