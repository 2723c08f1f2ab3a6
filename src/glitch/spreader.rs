//! Time-staggered glitch wave across filled cells.
//!
//! A wave starts at the clicked cell and expands into all eight neighbours one
//! stagger interval later, ring after ring, until its depth runs out. Only
//! filled cells carry the wave; empty cells stop it.
//!
//! Every scheduled step remembers the generation it belongs to. Cancelling
//! bumps the generation, so steps from an earlier wave never touch the cell set
//! of a later one.

use std::collections::HashSet;

use super::timeline::Timeline;
use crate::grid::{Cell, GridState};

const NEIGHBOURS: [(i64, i64); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

/// One deferred expansion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct SpreadStep {
    generation: u64,
    col: i64,
    row: i64,
    depth: u32,
}

/// Schedules and runs the recursive steps of glitch waves
pub struct GlitchSpreader {
    stagger_ms: f64,
    generation: u64,
    timeline: Timeline<SpreadStep>,
    /// Steps currently queued; identical steps are only queued once
    pending: HashSet<SpreadStep>,
}

impl GlitchSpreader {
    pub fn new(stagger_ms: f64) -> Self {
        Self {
            stagger_ms,
            generation: 0,
            timeline: Timeline::new(),
            pending: HashSet::new(),
        }
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Number of queued steps belonging to the current wave
    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    /// Invalidate every in-flight step of the current wave
    pub fn cancel(&mut self) {
        self.generation += 1;
        let current = self.generation;
        self.timeline.retain(|step| step.generation == current);
        self.pending.retain(|step| step.generation == current);
    }

    /// Start a wave at `origin` with radius bound `max_depth`
    pub fn spread(
        &mut self,
        grid: &GridState,
        cells: &mut HashSet<Cell>,
        origin: Cell,
        max_depth: u32,
        now_ms: f64,
    ) {
        self.visit(
            grid,
            cells,
            origin.0 as i64,
            origin.1 as i64,
            max_depth,
            now_ms,
        );
    }

    /// Run every step due at `now_ms`. Returns how many steps ran.
    ///
    /// Children of the steps run here are due one stagger after `now_ms`, so a
    /// single call advances the wave by at most one ring.
    pub fn run_due(&mut self, grid: &GridState, cells: &mut HashSet<Cell>, now_ms: f64) -> usize {
        let mut ran = 0;
        let mut children = Vec::new();

        while let Some(step) = self.timeline.pop_due(now_ms) {
            self.pending.remove(&step);
            if step.generation != self.generation {
                continue;
            }
            children.push(step);
            ran += 1;
        }

        for step in children {
            self.visit(grid, cells, step.col, step.row, step.depth, now_ms);
        }
        ran
    }

    fn visit(
        &mut self,
        grid: &GridState,
        cells: &mut HashSet<Cell>,
        col: i64,
        row: i64,
        depth: u32,
        now_ms: f64,
    ) {
        if depth == 0 || !grid.contains(col, row) {
            return;
        }
        let cell = (col as usize, row as usize);
        if !grid.is_filled(cell.0, cell.1) {
            return;
        }

        cells.insert(cell);

        // A child with no depth left would terminate immediately
        if depth == 1 {
            return;
        }

        let due_ms = now_ms + self.stagger_ms;
        for (dc, dr) in NEIGHBOURS {
            let step = SpreadStep {
                generation: self.generation,
                col: col + dc,
                row: row + dr,
                depth: depth - 1,
            };
            if self.pending.insert(step) {
                self.timeline.schedule(due_ms, step);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const STAGGER: f64 = 40.0;

    fn grid_with(cols: usize, rows: usize, filled: &[Cell]) -> GridState {
        let mut grid = GridState::new(cols, rows);
        for &(c, r) in filled {
            grid.set_filled(c, r, true);
        }
        grid
    }

    fn pump(
        spreader: &mut GlitchSpreader,
        grid: &GridState,
        cells: &mut HashSet<Cell>,
        until_ms: f64,
    ) {
        let mut now = 0.0;
        while now <= until_ms {
            spreader.run_due(grid, cells, now);
            now += STAGGER;
        }
    }

    #[test]
    fn test_unfilled_origin_is_a_no_op() {
        let grid = grid_with(3, 3, &[]);
        let mut spreader = GlitchSpreader::new(STAGGER);
        let mut cells = HashSet::new();

        spreader.spread(&grid, &mut cells, (1, 1), 3, 0.0);

        assert!(cells.is_empty());
        assert_eq!(spreader.pending_len(), 0);
    }

    #[test]
    fn test_zero_depth_is_a_no_op() {
        let grid = grid_with(3, 3, &[(1, 1)]);
        let mut spreader = GlitchSpreader::new(STAGGER);
        let mut cells = HashSet::new();

        spreader.spread(&grid, &mut cells, (1, 1), 0, 0.0);

        assert!(cells.is_empty());
    }

    #[test]
    fn test_isolated_filled_cell_stays_alone() {
        let grid = grid_with(5, 5, &[(2, 2)]);
        let mut spreader = GlitchSpreader::new(STAGGER);
        let mut cells = HashSet::new();

        spreader.spread(&grid, &mut cells, (2, 2), 3, 0.0);
        pump(&mut spreader, &grid, &mut cells, 400.0);

        assert_eq!(cells, HashSet::from([(2, 2)]));
        assert_eq!(spreader.pending_len(), 0);
    }

    #[test]
    fn test_depth_one_schedules_nothing() {
        let grid = grid_with(3, 3, &[(0, 0), (1, 0), (1, 1)]);
        let mut spreader = GlitchSpreader::new(STAGGER);
        let mut cells = HashSet::new();

        spreader.spread(&grid, &mut cells, (1, 1), 1, 0.0);

        assert_eq!(spreader.pending_len(), 0);
        pump(&mut spreader, &grid, &mut cells, 200.0);
        assert_eq!(cells, HashSet::from([(1, 1)]));
    }

    #[test]
    fn test_rings_arrive_one_stagger_apart() {
        let filled: Vec<Cell> = (0..6).map(|c| (c, 0)).collect();
        let grid = grid_with(6, 1, &filled);
        let mut spreader = GlitchSpreader::new(STAGGER);
        let mut cells = HashSet::new();

        spreader.spread(&grid, &mut cells, (0, 0), 6, 0.0);
        assert_eq!(cells.len(), 1);

        spreader.run_due(&grid, &mut cells, 39.0);
        assert_eq!(cells.len(), 1);

        spreader.run_due(&grid, &mut cells, 40.0);
        assert!(cells.contains(&(1, 0)));
        assert_eq!(cells.len(), 2);

        spreader.run_due(&grid, &mut cells, 80.0);
        assert!(cells.contains(&(2, 0)));
        assert_eq!(cells.len(), 3);
    }

    #[test]
    fn test_depth_bounds_radius() {
        let filled: Vec<Cell> = (0..8).map(|c| (c, 0)).collect();
        let grid = grid_with(8, 1, &filled);
        let mut spreader = GlitchSpreader::new(STAGGER);
        let mut cells = HashSet::new();

        spreader.spread(&grid, &mut cells, (0, 0), 3, 0.0);
        pump(&mut spreader, &grid, &mut cells, 1000.0);

        assert_eq!(cells, HashSet::from([(0, 0), (1, 0), (2, 0)]));
    }

    #[test]
    fn test_empty_cells_act_as_firebreaks() {
        let grid = grid_with(5, 1, &[(0, 0), (1, 0), (3, 0), (4, 0)]);
        let mut spreader = GlitchSpreader::new(STAGGER);
        let mut cells = HashSet::new();

        spreader.spread(&grid, &mut cells, (0, 0), 5, 0.0);
        pump(&mut spreader, &grid, &mut cells, 1000.0);

        assert_eq!(cells, HashSet::from([(0, 0), (1, 0)]));
    }

    #[test]
    fn test_spreads_diagonally() {
        let grid = grid_with(3, 3, &[(0, 0), (1, 1), (2, 2)]);
        let mut spreader = GlitchSpreader::new(STAGGER);
        let mut cells = HashSet::new();

        spreader.spread(&grid, &mut cells, (0, 0), 3, 0.0);
        pump(&mut spreader, &grid, &mut cells, 400.0);

        assert_eq!(cells.len(), 3);
    }

    #[test]
    fn test_cancel_discards_in_flight_steps() {
        let filled: Vec<Cell> = (0..4).map(|c| (c, 0)).collect();
        let grid = grid_with(4, 1, &filled);
        let mut spreader = GlitchSpreader::new(STAGGER);
        let mut cells = HashSet::new();

        spreader.spread(&grid, &mut cells, (0, 0), 4, 0.0);
        let before = spreader.generation();
        spreader.cancel();

        assert_eq!(spreader.generation(), before + 1);
        assert_eq!(spreader.pending_len(), 0);

        pump(&mut spreader, &grid, &mut cells, 400.0);
        assert_eq!(cells, HashSet::from([(0, 0)]));
    }

    #[test]
    fn test_duplicate_steps_are_coalesced() {
        let filled: Vec<Cell> = (0..3)
            .flat_map(|c| (0..3).map(move |r| (c, r)))
            .collect();
        let grid = grid_with(3, 3, &filled);
        let mut spreader = GlitchSpreader::new(STAGGER);
        let mut cells = HashSet::new();

        spreader.spread(&grid, &mut cells, (1, 1), 4, 0.0);
        spreader.run_due(&grid, &mut cells, 40.0);

        // Second ring: every in-grid and out-of-grid neighbour of the 3x3 block
        // at depth 2, each queued once
        assert_eq!(spreader.pending_len(), 25);
        assert_eq!(cells.len(), 9);
    }
}
