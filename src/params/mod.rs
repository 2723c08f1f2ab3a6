//! Parameter definitions with units and documented semantics.
//!
//! All tuning constants are extracted here with:
//! - Units (pixels, milliseconds, frames, etc.)
//! - Documented ranges and meanings
//! - Defaults matching the interactive sketch

mod audio;
mod controls;
mod glitch;
mod grid;
mod render;

// Re-export all types
pub use audio::{AudioConfig, BeatParams, EchoParams};
pub use controls::{ControlDefaults, SliderSpec};
pub use glitch::GlitchParams;
pub use grid::GridParams;
pub use render::{RecordingConfig, RenderConfig};
