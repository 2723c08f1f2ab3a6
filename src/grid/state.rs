//! Fill and flash state of every grid cell.

/// Boolean fill state plus per-cell flash countdowns.
///
/// A pure container: callers validate indices and decide when toggling is
/// allowed.
#[derive(Debug, Clone)]
pub struct GridState {
    cols: usize,
    rows: usize,
    filled: Vec<bool>,
    flash: Vec<u32>,
}

impl GridState {
    pub fn new(cols: usize, rows: usize) -> Self {
        Self {
            cols,
            rows,
            filled: vec![false; cols * rows],
            flash: vec![0; cols * rows],
        }
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Whether `(col, row)` lies inside the grid (signed so neighbours can be probed)
    pub fn contains(&self, col: i64, row: i64) -> bool {
        col >= 0 && row >= 0 && (col as usize) < self.cols && (row as usize) < self.rows
    }

    fn index(&self, col: usize, row: usize) -> usize {
        row * self.cols + col
    }

    pub fn is_filled(&self, col: usize, row: usize) -> bool {
        self.filled[self.index(col, row)]
    }

    pub fn set_filled(&mut self, col: usize, row: usize, filled: bool) {
        let index = self.index(col, row);
        self.filled[index] = filled;
    }

    pub fn toggle(&mut self, col: usize, row: usize) {
        let index = self.index(col, row);
        self.filled[index] = !self.filled[index];
    }

    /// Start (or restart) a flash lasting `frames` rendered frames
    pub fn set_flash(&mut self, col: usize, row: usize, frames: u32) {
        let index = self.index(col, row);
        self.flash[index] = frames;
    }

    pub fn flash_counter(&self, col: usize, row: usize) -> u32 {
        self.flash[self.index(col, row)]
    }

    /// Count every active flash down by one frame; never goes below zero
    pub fn tick_flash(&mut self) {
        for counter in self.flash.iter_mut().filter(|c| **c > 0) {
            *counter -= 1;
        }
    }

    /// Unfill every cell. Flash counters are left alone.
    pub fn clear(&mut self) {
        self.filled.fill(false);
    }

    pub fn filled_count(&self) -> usize {
        self.filled.iter().filter(|&&f| f).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_twice_restores_state() {
        let mut grid = GridState::new(4, 3);
        grid.toggle(2, 1);
        assert!(grid.is_filled(2, 1));
        grid.toggle(2, 1);
        assert!(!grid.is_filled(2, 1));
        assert_eq!(grid.filled_count(), 0);
    }

    #[test]
    fn test_flash_counts_down_to_zero_and_stops() {
        let mut grid = GridState::new(3, 3);
        grid.set_flash(1, 2, 4);

        for expected in [3, 2, 1, 0] {
            grid.tick_flash();
            assert_eq!(grid.flash_counter(1, 2), expected);
        }

        grid.tick_flash();
        assert_eq!(grid.flash_counter(1, 2), 0);
    }

    #[test]
    fn test_clear_keeps_flash_counters() {
        let mut grid = GridState::new(2, 2);
        grid.set_filled(0, 0, true);
        grid.set_filled(1, 1, true);
        grid.set_flash(1, 1, 3);

        grid.clear();

        assert_eq!(grid.filled_count(), 0);
        assert_eq!(grid.flash_counter(1, 1), 3);
    }

    #[test]
    fn test_contains_rejects_negative_and_overflow() {
        let grid = GridState::new(3, 2);
        assert!(grid.contains(0, 0));
        assert!(grid.contains(2, 1));
        assert!(!grid.contains(-1, 0));
        assert!(!grid.contains(3, 0));
        assert!(!grid.contains(0, 2));
    }

    #[test]
    fn test_cells_are_indexed_independently() {
        let mut grid = GridState::new(3, 2);
        grid.set_filled(2, 0, true);
        assert!(grid.is_filled(2, 0));
        assert!(!grid.is_filled(0, 1));
    }
}
