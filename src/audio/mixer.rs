//! Sample-accurate mix of the background bed, glitch one-shots and echo.
//!
//! Device independent: the output stream callback hands it interleaved buffers
//! to fill. The level meter follows the background bed only.

use super::bed::{BedGain, BedState};
use super::clip::Clip;
use super::echo::Echo;
use super::meter::LevelMeter;
use super::synthesis::SynthBed;
use crate::params::{AudioConfig, EchoParams};

/// Source of the background track
pub enum BedSource {
    /// Looping clip loaded from disk
    Clip { clip: Clip, pos: usize },
    /// Procedural Glicol bed
    Synth(Box<SynthBed>),
    Silent,
}

impl BedSource {
    pub fn looping(clip: Clip) -> Self {
        if clip.is_empty() {
            return BedSource::Silent;
        }
        BedSource::Clip { clip, pos: 0 }
    }

    fn next_sample(&mut self) -> f32 {
        match self {
            BedSource::Clip { clip, pos } => {
                let sample = clip.sample(*pos);
                *pos = (*pos + 1) % clip.len();
                sample
            }
            BedSource::Synth(synth) => synth.next_sample(),
            BedSource::Silent => 0.0,
        }
    }
}

struct Voice {
    clip: Clip,
    pos: usize,
}

pub struct Mixer {
    bed: BedSource,
    bed_gain: BedGain,
    samples: Vec<Clip>,
    voices: Vec<Voice>,
    sample_gain: f32,
    echo: Echo,
    echo_params: EchoParams,
    meter: LevelMeter,
}

impl Mixer {
    pub fn new(config: &AudioConfig, sample_rate: u32, bed: BedSource, samples: Vec<Clip>) -> Self {
        Self {
            bed,
            bed_gain: BedGain::new(config.fade_secs, sample_rate),
            samples,
            voices: Vec::new(),
            sample_gain: config.sample_gain,
            echo: Echo::new(sample_rate),
            echo_params: config.echo,
            meter: LevelMeter::new(0.0),
        }
    }

    /// Fade the background in (`true`) or out and then pause (`false`)
    pub fn set_playing(&mut self, playing: bool) {
        if playing {
            self.bed_gain.play();
        } else {
            self.bed_gain.pause();
        }
    }

    pub fn bed_state(&self) -> BedState {
        self.bed_gain.state()
    }

    pub fn sample_count(&self) -> usize {
        self.samples.len()
    }

    pub fn active_voices(&self) -> usize {
        self.voices.len()
    }

    pub fn echo_engaged(&self) -> bool {
        self.echo.is_engaged()
    }

    /// Play sample `index` once and engage the echo. Unknown indices are ignored.
    pub fn trigger(&mut self, index: usize) {
        let Some(clip) = self.samples.get(index) else {
            return;
        };
        self.voices.push(Voice {
            clip: clip.clone(),
            pos: 0,
        });
        self.echo.engage(&self.echo_params);
    }

    /// Current amplitude level of the background, in [0, 1]
    pub fn level(&self) -> f32 {
        self.meter.level()
    }

    /// Fill an interleaved buffer with `channels` channels
    pub fn render(&mut self, out: &mut [f32], channels: usize) {
        let channels = channels.max(1);
        let frames = out.len() / channels;
        let mut sum_squares = 0.0_f64;

        for frame in 0..frames {
            let gain = self.bed_gain.next_gain();
            let bed = if self.bed_gain.is_running() {
                self.bed.next_sample() * gain
            } else {
                0.0
            };
            sum_squares += (bed as f64) * (bed as f64);

            let mut fx = 0.0;
            for voice in &mut self.voices {
                fx += voice.clip.sample(voice.pos);
                voice.pos += 1;
            }
            let fx = self.echo.process(fx * self.sample_gain);

            // Safety limiter
            let mixed = (bed + fx).clamp(-1.0, 1.0);
            let start = frame * channels;
            out[start..start + channels].fill(mixed);
        }

        self.voices.retain(|voice| voice.pos < voice.clip.len());
        self.meter.measure(sum_squares, frames);
    }
}
