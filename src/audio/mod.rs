//! Audio playback and level analysis.
//!
//! A background bed (looped clip or Glicol synthesis) fades in and out with
//! play/pause, glitch clicks fire one-shot samples through a timed echo, and
//! the bed's RMS level drives beat detection.

mod bed;
mod clip;
mod echo;
mod meter;
mod mixer;
mod synthesis;
mod system;

// Re-export public types
pub use bed::{BedGain, BedState};
pub use clip::{load_dir, Clip};
pub use echo::Echo;
pub use meter::LevelMeter;
pub use mixer::{BedSource, Mixer};
pub use synthesis::{SynthBed, BLOCK_SIZE, GLICOL_COMPOSITION};
pub use system::AudioSystem;
