//! Per-frame driver owning the whole simulation state.
//!
//! Wall-clock timers (glitch session, overlay, spread steps) take `now_ms`
//! from the caller; simulated time `t` only advances while playing.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::beat::BeatDetector;
use crate::glitch::{GlitchSession, GlitchSpreader, TimedWindow};
use crate::grid::{Cell, GridState, NoisePartition, Partition};
use crate::params::{BeatParams, ControlDefaults, GlitchParams, GridParams};
use crate::render::{channel_image, Blend, CellLook, Channel, Surface, PAPER};

/// What a click did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickOutcome {
    /// Paused: the cell's fill state flipped
    Toggled(Cell),
    /// Playing: a glitch wave started at the cell
    Glitched(Cell),
}

/// Summary of one rendered frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameReport {
    /// The glitch session ended at the start of this frame
    pub session_expired: bool,
    /// The channel-split overlay was applied
    pub overlay_applied: bool,
    /// Beat intensity, if a beat fired
    pub beat: Option<u32>,
}

pub struct FrameOrchestrator {
    grid_params: GridParams,
    glitch_params: GlitchParams,
    width: f64,
    height: f64,

    grid: GridState,
    noise: NoisePartition,
    partition: Partition,
    session: GlitchSession,
    overlay: TimedWindow,
    spreader: GlitchSpreader,
    beat: BeatDetector,

    /// Simulated time
    t: f64,
    playing: bool,
    speed: f64,
    strength: f64,

    rng: StdRng,
}

impl FrameOrchestrator {
    pub fn new(
        grid_params: GridParams,
        glitch_params: GlitchParams,
        beat_params: BeatParams,
        canvas_size: (u32, u32),
        seed: u64,
    ) -> Self {
        let controls = ControlDefaults::default();
        let width = canvas_size.0 as f64;
        let height = canvas_size.1 as f64;
        let noise = NoisePartition::new(&grid_params);
        let partition = noise.compute(
            grid_params.cols,
            grid_params.rows,
            0.0,
            controls.strength.default,
            width,
            height,
        );

        Self {
            grid: GridState::new(grid_params.cols, grid_params.rows),
            noise,
            partition,
            session: GlitchSession::new(glitch_params.session_ms),
            overlay: TimedWindow::new(glitch_params.overlay_ms),
            spreader: GlitchSpreader::new(glitch_params.stagger_ms),
            beat: BeatDetector::new(beat_params),
            grid_params,
            glitch_params,
            width,
            height,
            t: 0.0,
            playing: false,
            speed: controls.speed.default,
            strength: controls.strength.default,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn grid(&self) -> &GridState {
        &self.grid
    }

    pub fn grid_mut(&mut self) -> &mut GridState {
        &mut self.grid
    }

    pub fn partition(&self) -> &Partition {
        &self.partition
    }

    pub fn session(&self) -> &GlitchSession {
        &self.session
    }

    pub fn overlay(&self) -> &TimedWindow {
        &self.overlay
    }

    pub fn spreader(&self) -> &GlitchSpreader {
        &self.spreader
    }

    pub fn time(&self) -> f64 {
        self.t
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn set_playing(&mut self, playing: bool) {
        self.playing = playing;
    }

    /// Flip play/pause; returns the new state
    pub fn toggle_play(&mut self) -> bool {
        self.playing = !self.playing;
        self.playing
    }

    pub fn speed(&self) -> f64 {
        self.speed
    }

    pub fn set_speed(&mut self, speed: f64) {
        self.speed = speed;
    }

    pub fn strength(&self) -> f64 {
        self.strength
    }

    pub fn set_strength(&mut self, strength: f64) {
        self.strength = strength;
    }

    /// Unfill every cell
    pub fn clear(&mut self) {
        self.grid.clear();
    }

    /// Run deferred spread steps due at `now_ms`
    pub fn pump_timers(&mut self, now_ms: f64) -> usize {
        self.spreader.run_due(&self.grid, self.session.cells_mut(), now_ms)
    }

    /// Handle a click at canvas coordinates. Clicks that miss every cell do
    /// nothing.
    pub fn click(&mut self, x: f64, y: f64, now_ms: f64) -> Option<ClickOutcome> {
        let cell = self.partition.cell_at(x, y)?;

        if !self.playing {
            self.grid.toggle(cell.0, cell.1);
            log::debug!("Toggled cell {:?}", cell);
            return Some(ClickOutcome::Toggled(cell));
        }

        self.spreader.cancel();
        self.session.restart(now_ms);
        self.overlay.start(now_ms);
        self.spreader.spread(
            &self.grid,
            self.session.cells_mut(),
            cell,
            self.glitch_params.max_depth,
            now_ms,
        );
        log::debug!("Glitch wave from {:?} at {:.0}ms", cell, now_ms);
        Some(ClickOutcome::Glitched(cell))
    }

    /// Advance and draw one frame onto `surface`, then feed `level` to the
    /// beat detector
    pub fn frame<S: Surface + ?Sized>(
        &mut self,
        now_ms: f64,
        level: f64,
        surface: &mut S,
    ) -> FrameReport {
        let mut report = FrameReport::default();

        if self.session.expire_if_due(now_ms) {
            self.spreader.cancel();
            report.session_expired = true;
        }

        if self.playing {
            self.t += self.speed;
        }

        self.partition = self.noise.compute(
            self.grid_params.cols,
            self.grid_params.rows,
            self.t,
            self.strength,
            self.width,
            self.height,
        );

        self.render_cells(surface);

        if self.overlay.is_within(now_ms) {
            self.channel_split(surface);
            report.overlay_applied = true;
        } else {
            self.overlay.expire_if_due(now_ms);
        }

        report.beat = self.beat.on_level(level);
        if let Some(intensity) = report.beat {
            self.flash_random_cells(intensity);
            log::debug!("Beat at level {:.3}, intensity {}", level, intensity);
        }

        report
    }

    fn render_cells<S: Surface + ?Sized>(&mut self, surface: &mut S) {
        surface.clear(PAPER);
        let session_active = self.session.is_active();
        let mut flashed = false;

        for rect in self.partition.cells() {
            let look = CellLook::resolve(
                self.grid.flash_counter(rect.col, rect.row),
                self.session.contains((rect.col, rect.row)),
                session_active,
                self.grid.is_filled(rect.col, rect.row),
            );
            flashed |= look.consumes_flash();
            look.draw(surface, &rect, &mut self.rng, self.glitch_params.cell_jitter_px);
        }

        // Every flashing cell was drawn once this frame
        if flashed {
            self.grid.tick_flash();
        }
    }

    /// Re-draw the frame as three offset colour channels
    fn channel_split<S: Surface + ?Sized>(&mut self, surface: &mut S) {
        let snapshot = surface.snapshot();
        let jitter = self.glitch_params.channel_jitter_px.max(0);

        surface.clear(image::Rgba([0, 0, 0, 255]));
        for channel in Channel::ALL {
            let layer = channel_image(&snapshot, channel);
            let dx = self.rng.random_range(-jitter..=jitter);
            let dy = self.rng.random_range(-jitter..=jitter);
            surface.draw_image(&layer, dx, dy, Blend::Add);
        }
    }

    fn flash_random_cells(&mut self, count: u32) {
        let (cols, rows) = (self.grid.cols(), self.grid.rows());
        if cols == 0 || rows == 0 {
            return;
        }
        for _ in 0..count {
            let col = self.rng.random_range(0..cols);
            let row = self.rng.random_range(0..rows);
            self.grid.set_flash(col, row, self.glitch_params.flash_frames);
        }
    }
}
