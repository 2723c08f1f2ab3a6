//! Gain envelope of the background track.
//!
//! `Stopped -> FadingIn -> Playing -> FadingOut -> Paused`, advanced one sample
//! at a time by the mixer. Toggling mid-fade reverses from the current gain, so
//! rapid play/pause never leaves a stale pause pending.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BedState {
    Stopped,
    FadingIn,
    Playing,
    FadingOut,
    Paused,
}

#[derive(Debug, Clone)]
pub struct BedGain {
    state: BedState,
    gain: f32,
    step: f32,
}

impl BedGain {
    pub fn new(fade_secs: f32, sample_rate: u32) -> Self {
        let fade_samples = fade_secs.max(0.0) * sample_rate as f32;
        Self {
            state: BedState::Stopped,
            gain: 0.0,
            step: if fade_samples >= 1.0 { 1.0 / fade_samples } else { 1.0 },
        }
    }

    pub fn state(&self) -> BedState {
        self.state
    }

    pub fn gain(&self) -> f32 {
        self.gain
    }

    pub fn play(&mut self) {
        if matches!(
            self.state,
            BedState::Stopped | BedState::Paused | BedState::FadingOut
        ) {
            log::debug!("bed: {:?} -> FadingIn", self.state);
            self.state = BedState::FadingIn;
        }
    }

    pub fn pause(&mut self) {
        if matches!(self.state, BedState::Playing | BedState::FadingIn) {
            log::debug!("bed: {:?} -> FadingOut", self.state);
            self.state = BedState::FadingOut;
        }
    }

    /// Whether the track position should advance
    pub fn is_running(&self) -> bool {
        !matches!(self.state, BedState::Stopped | BedState::Paused)
    }

    /// Advance one sample and return the gain to apply to it
    pub fn next_gain(&mut self) -> f32 {
        match self.state {
            BedState::FadingIn => {
                self.gain = (self.gain + self.step).min(1.0);
                if self.gain >= 1.0 {
                    self.state = BedState::Playing;
                }
            }
            BedState::FadingOut => {
                self.gain = (self.gain - self.step).max(0.0);
                if self.gain <= 0.0 {
                    self.state = BedState::Paused;
                }
            }
            BedState::Playing | BedState::Stopped | BedState::Paused => {}
        }
        self.gain
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fades_in_then_plays() {
        let mut bed = BedGain::new(1.0, 4);
        assert!(!bed.is_running());

        bed.play();
        let gains: Vec<f32> = (0..5).map(|_| bed.next_gain()).collect();

        assert_eq!(gains, vec![0.25, 0.5, 0.75, 1.0, 1.0]);
        assert_eq!(bed.state(), BedState::Playing);
    }

    #[test]
    fn test_fade_out_ends_paused() {
        let mut bed = BedGain::new(1.0, 4);
        bed.play();
        for _ in 0..4 {
            bed.next_gain();
        }

        bed.pause();
        assert_eq!(bed.state(), BedState::FadingOut);
        for _ in 0..4 {
            bed.next_gain();
        }

        assert_eq!(bed.state(), BedState::Paused);
        assert_eq!(bed.gain(), 0.0);
        assert!(!bed.is_running());
    }

    #[test]
    fn test_play_during_fade_out_reverses() {
        let mut bed = BedGain::new(1.0, 4);
        bed.play();
        for _ in 0..4 {
            bed.next_gain();
        }
        bed.pause();
        bed.next_gain();

        bed.play();
        assert_eq!(bed.state(), BedState::FadingIn);
        assert_eq!(bed.next_gain(), 1.0);
        assert_eq!(bed.state(), BedState::Playing);
    }

    #[test]
    fn test_pause_when_stopped_is_ignored() {
        let mut bed = BedGain::new(1.0, 4);
        bed.pause();
        assert_eq!(bed.state(), BedState::Stopped);
    }

    #[test]
    fn test_zero_fade_is_instant() {
        let mut bed = BedGain::new(0.0, 44100);
        bed.play();
        assert_eq!(bed.next_gain(), 1.0);
        assert_eq!(bed.state(), BedState::Playing);
    }
}
