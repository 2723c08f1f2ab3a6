//! Mono sample clips loaded from WAV files.

use std::path::Path;
use std::sync::Arc;

use crate::error::{Error, Result};

/// Immutable mono audio at a fixed sample rate; cheap to clone
#[derive(Debug, Clone)]
pub struct Clip {
    name: String,
    samples: Arc<[f32]>,
    sample_rate: u32,
}

impl Clip {
    pub fn from_samples(name: &str, samples: Vec<f32>, sample_rate: u32) -> Self {
        Self {
            name: name.to_string(),
            samples: samples.into(),
            sample_rate,
        }
    }

    /// Load a WAV file, mix it down to mono and resample to `target_rate`
    pub fn load(path: &Path, target_rate: u32) -> Result<Self> {
        let asset_err = |source| Error::Asset {
            path: path.display().to_string(),
            source,
        };

        let mut reader = hound::WavReader::open(path).map_err(asset_err)?;
        let spec = reader.spec();

        let interleaved: Vec<f32> = match spec.sample_format {
            hound::SampleFormat::Float => reader
                .samples::<f32>()
                .collect::<std::result::Result<_, _>>()
                .map_err(asset_err)?,
            hound::SampleFormat::Int => {
                let scale = (1_i64 << (spec.bits_per_sample.max(1) - 1)) as f32;
                reader
                    .samples::<i32>()
                    .map(|s| s.map(|v| v as f32 / scale))
                    .collect::<std::result::Result<_, _>>()
                    .map_err(asset_err)?
            }
        };

        let mono = downmix(&interleaved, spec.channels as usize);
        let name = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();

        Ok(Self::from_samples(&name, mono, spec.sample_rate).resampled(target_rate))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Sample at `index`, silence past the end
    pub fn sample(&self, index: usize) -> f32 {
        self.samples.get(index).copied().unwrap_or(0.0)
    }

    pub fn duration_secs(&self) -> f32 {
        if self.sample_rate == 0 {
            return 0.0;
        }
        self.len() as f32 / self.sample_rate as f32
    }

    /// Linearly resampled copy at `rate`
    pub fn resampled(&self, rate: u32) -> Self {
        if rate == self.sample_rate || self.is_empty() || self.sample_rate == 0 || rate == 0 {
            return self.clone();
        }

        let ratio = self.sample_rate as f64 / rate as f64;
        let out_len = ((self.len() as f64) / ratio).round() as usize;
        let last = self.len() - 1;

        let samples = (0..out_len)
            .map(|i| {
                let pos = i as f64 * ratio;
                let index = (pos.floor() as usize).min(last);
                let frac = (pos - index as f64) as f32;
                let a = self.samples[index];
                let b = self.samples[(index + 1).min(last)];
                a + (b - a) * frac
            })
            .collect();

        Self::from_samples(&self.name, samples, rate)
    }
}

/// Average interleaved frames down to one channel
fn downmix(interleaved: &[f32], channels: usize) -> Vec<f32> {
    if channels <= 1 {
        return interleaved.to_vec();
    }
    interleaved
        .chunks(channels)
        .map(|frame| frame.iter().sum::<f32>() / frame.len() as f32)
        .collect()
}

/// Load every `.wav` in `dir`, sorted by file name. Unreadable files are
/// skipped with a warning; a missing directory yields no clips.
pub fn load_dir(dir: &Path, target_rate: u32) -> Vec<Clip> {
    let entries = match std::fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) => {
            log::warn!("No samples in {}: {}", dir.display(), e);
            return Vec::new();
        }
    };

    let mut paths: Vec<_> = entries
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| {
            path.extension()
                .is_some_and(|ext| ext.eq_ignore_ascii_case("wav"))
        })
        .collect();
    paths.sort();

    paths
        .iter()
        .filter_map(|path| match Clip::load(path, target_rate) {
            Ok(clip) => Some(clip),
            Err(e) => {
                log::warn!("{}", e);
                None
            }
        })
        .collect()
}
