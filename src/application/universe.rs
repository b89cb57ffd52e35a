use anyhow::{Context, Result};

use super::scheduler::Scheduler;
use crate::domain::{CellPainter, Grid, Pattern, Rule, default_rule, diff_paint, full_paint};

/// Dead margin added on all sides when a pattern re-initializes the grid.
pub const PATTERN_PADDING: usize = 10;

/// Grids with at least this many cells evolve on the rayon pool.
const PARALLEL_THRESHOLD: usize = 10_000;

/// Grid dimensions a pattern occupies once the dead margin is added.
/// An absurd declared bounding box overflows here instead of wrapping.
pub fn padded_dimensions(pattern: &Pattern) -> Result<(usize, usize)> {
    let width = pattern
        .width
        .checked_add(2 * PATTERN_PADDING)
        .context("pattern width overflows the padded grid size")?;
    let height = pattern
        .height
        .checked_add(2 * PATTERN_PADDING)
        .context("pattern height overflows the padded grid size")?;
    Ok((width, height))
}

/// Universe owns one simulation: grid, rule, clock, and generation counter.
/// Everything operates on an explicit universe value, so several can
/// coexist and be tested in isolation.
pub struct Universe {
    grid: Grid,
    rule: Box<dyn Rule>,
    scheduler: Scheduler,
    generation: u64,
}

impl Universe {
    /// Create a universe with an all-dead grid of the given dimensions.
    pub fn new(width: usize, height: usize) -> Result<Self> {
        Ok(Self {
            grid: Grid::new(width, height)?,
            rule: default_rule(),
            scheduler: Scheduler::new(),
            generation: 0,
        })
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Direct access for interactive editing. Edits land in the current
    /// generation, so the next advance incorporates them in full.
    pub fn grid_mut(&mut self) -> &mut Grid {
        &mut self.grid
    }

    pub const fn generation(&self) -> u64 {
        self.generation
    }

    /// Advance one generation: compute the staging generation from the
    /// current one, paint only the cells that changed, then commit.
    pub fn advance(&mut self, painter: &mut dyn CellPainter) {
        let (width, height) = self.grid.dimensions();
        let next = if width * height >= PARALLEL_THRESHOLD {
            self.grid.evolve_parallel(self.rule.as_ref())
        } else {
            self.grid.evolve(self.rule.as_ref())
        };

        diff_paint(&self.grid, &next, painter);
        self.grid = next;
        self.generation += 1;
    }

    /// Drive the simulation from the frame loop. Advances exactly one
    /// generation when the clock says a tick is due.
    pub fn frame(&mut self, delta_time: f32, painter: &mut dyn CellPainter) -> bool {
        if self.scheduler.due(delta_time) {
            self.advance(painter);
            true
        } else {
            false
        }
    }

    /// Kill every cell, reset the generation counter, and repaint.
    pub fn clear(&mut self, painter: &mut dyn CellPainter) {
        self.grid.clear();
        self.generation = 0;
        self.scheduler.stop();
        full_paint(&self.grid, painter);
    }

    /// Reseed the grid randomly, reset the generation counter, and repaint.
    pub fn randomize(&mut self, painter: &mut dyn CellPainter) {
        self.grid.randomize();
        self.generation = 0;
        self.scheduler.stop();
        full_paint(&self.grid, painter);
    }

    /// Re-initialize the grid to fit the pattern plus a dead margin on all
    /// sides, stamp the pattern at the margin offset, and repaint. The new
    /// grid is built before any state is replaced, so a failure leaves the
    /// universe exactly as it was.
    pub fn load_pattern(&mut self, pattern: &Pattern, painter: &mut dyn CellPainter) -> Result<()> {
        let (width, height) = padded_dimensions(pattern)?;
        let mut grid = Grid::new(width, height)?;
        pattern.place_on(&mut grid, PATTERN_PADDING, PATTERN_PADDING);

        log::info!(
            "loaded {}x{} pattern into {width}x{height} grid",
            pattern.width,
            pattern.height
        );

        self.grid = grid;
        self.generation = 0;
        self.scheduler.stop();
        full_paint(&self.grid, painter);
        Ok(())
    }

    // Clock operations, delegated to the scheduler.

    pub fn start(&mut self) {
        self.scheduler.start();
    }

    pub fn stop(&mut self) {
        self.scheduler.stop();
    }

    pub fn toggle_running(&mut self) {
        self.scheduler.toggle();
    }

    pub const fn is_running(&self) -> bool {
        self.scheduler.is_running()
    }

    pub fn set_speed(&mut self, level: u8) -> bool {
        self.scheduler.set_speed(level)
    }

    pub const fn speed(&self) -> u8 {
        self.scheduler.speed()
    }
}
