//! glitchgrid library - noise-partitioned grid with audio-reactive glitch effects

pub mod audio;
pub mod beat;
pub mod cli;
pub mod controls;
pub mod error;
pub mod glitch;
pub mod grid;
pub mod logging;
pub mod orchestrator;
pub mod params;
pub mod render;

pub use error::{Error, Result};
pub use orchestrator::{ClickOutcome, FrameOrchestrator, FrameReport};
