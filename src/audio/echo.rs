//! Feedback delay used as the click echo.
//!
//! ```text
//! delayed = line[n - delay]
//! line[n] = input + feedback * delayed
//! out     = (1 - mix) * input + mix * delayed
//! ```
//!
//! The echo stays engaged for a fixed number of samples and then tears itself
//! down, so no external timer has to remember to switch it off.

use crate::params::EchoParams;

/// Longest supported delay (milliseconds)
pub const MAX_DELAY_MS: f32 = 2000.0;

pub struct Echo {
    sample_rate: u32,
    buffer: Vec<f32>,
    write_pos: usize,
    delay_samples: usize,
    mix: f32,
    feedback: f32,
    remaining: usize,
}

impl Echo {
    pub fn new(sample_rate: u32) -> Self {
        let len = ms_to_samples(MAX_DELAY_MS, sample_rate).max(2);
        Self {
            sample_rate,
            buffer: vec![0.0; len],
            write_pos: 0,
            delay_samples: 1,
            mix: 0.0,
            feedback: 0.0,
            remaining: 0,
        }
    }

    /// Engage with `params` for `params.active_ms`, restarting any running echo window
    pub fn engage(&mut self, params: &EchoParams) {
        self.delay_samples = ms_to_samples(params.delay_ms, self.sample_rate)
            .clamp(1, self.buffer.len() - 1);
        self.mix = params.mix.clamp(0.0, 1.0);
        self.feedback = params.feedback.clamp(0.0, 0.99);
        self.remaining = ms_to_samples(params.active_ms, self.sample_rate);
    }

    pub fn is_engaged(&self) -> bool {
        self.remaining > 0
    }

    pub fn process(&mut self, input: f32) -> f32 {
        if self.remaining == 0 {
            return input;
        }

        let len = self.buffer.len();
        let read_pos = (self.write_pos + len - self.delay_samples) % len;
        let delayed = self.buffer[read_pos];
        self.buffer[self.write_pos] = input + delayed * self.feedback;
        self.write_pos = (self.write_pos + 1) % len;

        self.remaining -= 1;
        if self.remaining == 0 {
            self.reset();
        }

        input * (1.0 - self.mix) + delayed * self.mix
    }

    pub fn reset(&mut self) {
        self.buffer.fill(0.0);
        self.write_pos = 0;
    }
}

fn ms_to_samples(ms: f32, sample_rate: u32) -> usize {
    (ms.max(0.0) * sample_rate as f32 / 1000.0).round() as usize
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(delay_ms: f32, active_ms: f32) -> EchoParams {
        EchoParams {
            mix: 0.5,
            feedback: 0.5,
            delay_ms,
            active_ms,
        }
    }

    #[test]
    fn test_bypassed_until_engaged() {
        let mut echo = Echo::new(1000);
        assert!(!echo.is_engaged());
        assert_eq!(echo.process(0.7), 0.7);
    }

    #[test]
    fn test_impulse_repeats_with_feedback() {
        // 1 kHz rate: 3 ms delay = 3 samples
        let mut echo = Echo::new(1000);
        echo.engage(&params(3.0, 100.0));

        let out: Vec<f32> = (0..10)
            .map(|n| echo.process(if n == 0 { 1.0 } else { 0.0 }))
            .collect();

        assert!((out[0] - 0.5).abs() < 1e-6);
        assert!((out[3] - 0.5).abs() < 1e-6);
        assert!((out[6] - 0.25).abs() < 1e-6);
        assert!((out[9] - 0.125).abs() < 1e-6);
        assert_eq!(out[1], 0.0);
    }

    #[test]
    fn test_tears_down_after_active_window() {
        let mut echo = Echo::new(1000);
        echo.engage(&params(2.0, 5.0));

        for _ in 0..5 {
            echo.process(1.0);
        }

        assert!(!echo.is_engaged());
        assert_eq!(echo.process(0.3), 0.3);
    }

    #[test]
    fn test_delay_is_clamped_to_buffer() {
        let mut echo = Echo::new(100);
        echo.engage(&params(10_000.0, 10.0));
        assert!(echo.delay_samples < echo.buffer.len());
    }
}
