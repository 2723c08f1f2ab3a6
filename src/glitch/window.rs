//! Timed effect windows: `Idle -> Active -> Idle`, restartable at any time.

use std::collections::HashSet;

use crate::grid::Cell;

/// A window that is active for `duration_ms` after each `start`
#[derive(Debug, Clone)]
pub struct TimedWindow {
    duration_ms: f64,
    started_at: Option<f64>,
}

impl TimedWindow {
    pub fn new(duration_ms: f64) -> Self {
        Self {
            duration_ms,
            started_at: None,
        }
    }

    /// Enter (or re-enter) the active state at `now_ms`
    pub fn start(&mut self, now_ms: f64) {
        self.started_at = Some(now_ms);
    }

    pub fn is_active(&self) -> bool {
        self.started_at.is_some()
    }

    pub fn started_at(&self) -> Option<f64> {
        self.started_at
    }

    pub fn duration_ms(&self) -> f64 {
        self.duration_ms
    }

    /// Whether `now_ms` still falls inside the active window
    pub fn is_within(&self, now_ms: f64) -> bool {
        self.started_at
            .is_some_and(|start| now_ms - start <= self.duration_ms)
    }

    /// Return to idle once `now_ms` is past the window. Returns true on the
    /// transition.
    pub fn expire_if_due(&mut self, now_ms: f64) -> bool {
        if self.is_active() && !self.is_within(now_ms) {
            self.started_at = None;
            return true;
        }
        false
    }

    /// Progress through the window in [0, 1], or `None` when idle
    pub fn progress(&self, now_ms: f64) -> Option<f32> {
        let start = self.started_at?;
        if self.duration_ms <= 0.0 {
            return Some(1.0);
        }
        Some(((now_ms - start) / self.duration_ms).clamp(0.0, 1.0) as f32)
    }
}

/// Glitch session: a timed window plus the cells the wave has reached
#[derive(Debug, Clone)]
pub struct GlitchSession {
    window: TimedWindow,
    cells: HashSet<Cell>,
}

impl GlitchSession {
    pub fn new(duration_ms: f64) -> Self {
        Self {
            window: TimedWindow::new(duration_ms),
            cells: HashSet::new(),
        }
    }

    /// Reset the start time and forget every glitching cell
    pub fn restart(&mut self, now_ms: f64) {
        self.cells.clear();
        self.window.start(now_ms);
    }

    /// End the session once its duration has passed. Returns true on the
    /// transition.
    pub fn expire_if_due(&mut self, now_ms: f64) -> bool {
        if self.window.expire_if_due(now_ms) {
            self.cells.clear();
            return true;
        }
        false
    }

    pub fn is_active(&self) -> bool {
        self.window.is_active()
    }

    pub fn started_at(&self) -> Option<f64> {
        self.window.started_at()
    }

    pub fn contains(&self, cell: Cell) -> bool {
        self.cells.contains(&cell)
    }

    pub fn cells(&self) -> &HashSet<Cell> {
        &self.cells
    }

    pub fn cells_mut(&mut self) -> &mut HashSet<Cell> {
        &mut self.cells
    }
}
