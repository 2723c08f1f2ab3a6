//! Procedural background used when no loop asset is available.

use glicol::Engine;

use crate::error::{Error, Result};

/// Audio block size (samples per Glicol buffer)
pub const BLOCK_SIZE: usize = 128;

/// Glicol composition: a plucked saw pattern with a slow filter sweep
pub const GLICOL_COMPOSITION: &str = r#"
~gate: speed 2.0 >> seq 60 _60 _~a 48
~a: choose 48 48 48 72 0 0 0
~amp: ~gate >> envperc 0.001 0.25
~pit: ~gate >> mul 130.81
~lead: saw ~pit >> mul ~amp >> lpf ~mod 3.0 >> mul 0.3
~mod: sin 0.1 >> mul 900 >> add 1200
o: ~lead >> plate 0.1
"#;

/// Pulls mono samples out of a Glicol engine one block at a time
pub struct SynthBed {
    engine: Engine<BLOCK_SIZE>,
    block: [f32; BLOCK_SIZE],
    pos: usize,
}

impl SynthBed {
    pub fn new(sample_rate: u32) -> Result<Self> {
        let mut engine = Engine::<BLOCK_SIZE>::new();
        engine.set_sr(sample_rate as usize);
        engine.update_with_code(GLICOL_COMPOSITION);
        engine
            .update()
            .map_err(|e| Error::Audio(format!("Glicol engine init failed: {:?}", e)))?;

        Ok(Self {
            engine,
            block: [0.0; BLOCK_SIZE],
            pos: BLOCK_SIZE,
        })
    }

    pub fn next_sample(&mut self) -> f32 {
        if self.pos >= BLOCK_SIZE {
            let (buffers, _) = self.engine.next_block(vec![]);
            for i in 0..BLOCK_SIZE {
                self.block[i] = buffers[0][i];
            }
            self.pos = 0;
        }
        let sample = self.block[self.pos];
        self.pos += 1;
        sample
    }
}
