//! Click-triggered glitch effects: wave propagation and timed windows.

mod spreader;
mod timeline;
mod window;

pub use spreader::GlitchSpreader;
pub use timeline::Timeline;
pub use window::{GlitchSession, TimedWindow};
