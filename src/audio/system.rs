//! Audio system owning the output stream and the shared mixer.

use std::path::Path;
use std::sync::{Arc, Mutex};

use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use rand::Rng;

use super::clip::{load_dir, Clip};
use super::mixer::{BedSource, Mixer};
use super::synthesis::SynthBed;
use crate::error::{Error, Result};
use crate::params::{AudioConfig, RecordingConfig};

type WavWriter = hound::WavWriter<std::io::BufWriter<std::fs::File>>;

/// Audio system: background bed, glitch samples and level metering
pub struct AudioSystem {
    /// Mixer shared with the audio callback
    mixer: Arc<Mutex<Mixer>>,

    /// WAV capture of the output (recording mode only)
    wav_writer: Arc<Mutex<Option<WavWriter>>>,

    /// Audio output stream (kept alive)
    _stream: cpal::Stream,
}

impl AudioSystem {
    /// Open the default output device, load assets and start the stream
    pub fn new(config: &AudioConfig, recording: Option<&RecordingConfig>) -> Result<Self> {
        let host = cpal::default_host();
        let device = host
            .default_output_device()
            .ok_or_else(|| Error::Audio("no audio output device found".to_string()))?;

        let supported = device
            .default_output_config()
            .map_err(|e| Error::Audio(format!("failed to get audio config: {}", e)))?;
        let sample_rate = supported.sample_rate().0;
        let channels = supported.channels() as usize;

        log::info!(
            "Audio: {} @ {}Hz, {} channels",
            device.name().unwrap_or_else(|_| "Unknown".to_string()),
            sample_rate,
            channels
        );

        let assets = Path::new(&config.assets_dir);
        let bed = load_bed(&assets.join("loop.wav"), sample_rate);
        let samples = load_dir(&assets.join("samples"), sample_rate);
        log::info!("Loaded {} glitch samples", samples.len());

        let mixer = Arc::new(Mutex::new(Mixer::new(config, sample_rate, bed, samples)));
        let mixer_callback = Arc::clone(&mixer);

        let wav_writer = match recording {
            Some(rec) => {
                let spec = hound::WavSpec {
                    channels: channels as u16,
                    sample_rate,
                    bits_per_sample: 32,
                    sample_format: hound::SampleFormat::Float,
                };
                let writer = hound::WavWriter::create(rec.audio_path(), spec).map_err(|e| {
                    Error::Audio(format!("failed to create {}: {}", rec.audio_path(), e))
                })?;
                Some(writer)
            }
            None => None,
        };
        let wav_writer = Arc::new(Mutex::new(wav_writer));
        let wav_callback = Arc::clone(&wav_writer);

        let stream = device
            .build_output_stream(
                &supported.into(),
                move |data: &mut [f32], _: &cpal::OutputCallbackInfo| {
                    let Ok(mut mixer) = mixer_callback.lock() else {
                        data.fill(0.0);
                        return;
                    };
                    mixer.render(data, channels);

                    if let Ok(mut guard) = wav_callback.lock() {
                        if let Some(writer) = guard.as_mut() {
                            for &sample in data.iter() {
                                let _ = writer.write_sample(sample);
                            }
                        }
                    }
                },
                |err| log::warn!("Audio stream error: {}", err),
                None,
            )
            .map_err(|e| Error::Audio(format!("failed to build audio stream: {}", e)))?;

        stream
            .play()
            .map_err(|e| Error::Audio(format!("failed to start audio stream: {}", e)))?;

        Ok(Self {
            mixer,
            wav_writer,
            _stream: stream,
        })
    }

    /// Fade the background in or out
    pub fn set_playing(&self, playing: bool) {
        if let Ok(mut mixer) = self.mixer.lock() {
            mixer.set_playing(playing);
        }
    }

    /// Play one random glitch sample with the echo engaged
    pub fn trigger_glitch(&self) {
        let Ok(mut mixer) = self.mixer.lock() else {
            return;
        };
        let count = mixer.sample_count();
        if count == 0 {
            return;
        }
        let index = rand::rng().random_range(0..count);
        mixer.trigger(index);
    }

    /// Current level of the background track in [0, 1]
    pub fn level(&self) -> f32 {
        self.mixer.lock().map(|m| m.level()).unwrap_or(0.0)
    }

    /// Flush and close the WAV capture, if any
    pub fn finish_recording(&self) {
        let writer = self.wav_writer.lock().ok().and_then(|mut guard| guard.take());
        if let Some(writer) = writer {
            if let Err(e) = writer.finalize() {
                log::warn!("Failed to finalize recorded audio: {}", e);
            }
        }
    }
}

/// Background source: the loop clip when present, otherwise the Glicol bed
fn load_bed(path: &Path, sample_rate: u32) -> BedSource {
    match Clip::load(path, sample_rate) {
        Ok(clip) => {
            log::info!("Background loop: {} ({:.1}s)", clip.name(), clip.duration_secs());
            BedSource::looping(clip)
        }
        Err(e) => {
            log::warn!("{}; using procedural background", e);
            match SynthBed::new(sample_rate) {
                Ok(synth) => BedSource::Synth(Box::new(synth)),
                Err(e) => {
                    log::warn!("{}; background disabled", e);
                    BedSource::Silent
                }
            }
        }
    }
}
