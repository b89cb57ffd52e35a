use anyhow::{Result, ensure};
use rayon::prelude::*;

use super::{Cell, rules::Rule};

/// Grid manages one generation of the 2D cellular automaton.
/// Evolution is functional: `evolve` reads only `self` and returns the next
/// generation as a new value, so a pass never observes its own writes.
/// Boundary policy is toroidal wrap; coordinates are 0-indexed.
pub struct Grid {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
}

impl Grid {
    /// Create a new grid with all cells initially dead.
    /// Zero-sized grids are rejected; nothing is allocated on failure.
    pub fn new(width: usize, height: usize) -> Result<Self> {
        ensure!(
            width >= 1 && height >= 1,
            "grid dimensions must be at least 1x1, got {width}x{height}"
        );
        Ok(Self {
            width,
            height,
            cells: vec![Cell::Dead; width * height],
        })
    }

    /// Get grid dimensions
    pub const fn dimensions(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    /// Convert 2D coordinates to 1D index
    const fn get_index(&self, x: usize, y: usize) -> usize {
        y * self.width + x
    }

    /// Get cell at position (with bounds checking)
    pub fn get(&self, x: usize, y: usize) -> Option<Cell> {
        (x < self.width && y < self.height).then(|| self.cells[self.get_index(x, y)])
    }

    /// Set cell at position. Out-of-bounds coordinates are a silent no-op,
    /// matching the "ignore clicks outside the grid" contract.
    pub fn set(&mut self, x: usize, y: usize, cell: Cell) {
        if x < self.width && y < self.height {
            let idx = self.get_index(x, y);
            self.cells[idx] = cell;
        }
    }

    /// Flip the cell at position and return its new state.
    /// Returns None (no mutation) out of bounds.
    pub fn toggle(&mut self, x: usize, y: usize) -> Option<Cell> {
        let flipped = self.get(x, y)?.toggle();
        self.set(x, y, flipped);
        Some(flipped)
    }

    /// Count live neighbors using toroidal wrapping (grid wraps like a torus).
    /// Negative offsets are normalized by adding the dimension before the
    /// modulus, so the arithmetic never underflows.
    fn count_live_neighbors(&self, x: usize, y: usize) -> u8 {
        let w = self.width as i32;
        let h = self.height as i32;

        (-1..=1)
            .flat_map(|dy| (-1..=1).map(move |dx| (dx, dy)))
            .filter(|&(dx, dy)| dx != 0 || dy != 0)
            .map(|(dx, dy)| {
                let nx = ((x as i32 + dx) % w + w) % w;
                let ny = ((y as i32 + dy) % h + h) % h;
                self.cells[self.get_index(nx as usize, ny as usize)]
            })
            .filter(|cell| cell.is_alive())
            .count() as u8
    }

    /// Pure functional evolution - returns the next generation (serial).
    /// All neighbor counts read the current generation only.
    pub fn evolve(&self, rule: &dyn Rule) -> Self {
        let cells = (0..self.height)
            .flat_map(|y| (0..self.width).map(move |x| (x, y)))
            .map(|(x, y)| {
                let current = self.cells[self.get_index(x, y)];
                let neighbors = self.count_live_neighbors(x, y);
                rule.evolve(current, neighbors)
            })
            .collect();

        Self {
            width: self.width,
            height: self.height,
            cells,
        }
    }

    /// Parallel evolution using rayon, row by row.
    /// Worth it for grids past roughly 100x100; result is identical to `evolve`.
    pub fn evolve_parallel(&self, rule: &dyn Rule) -> Self {
        let cells: Vec<Cell> = (0..self.height)
            .into_par_iter()
            .flat_map(|y| (0..self.width).into_par_iter().map(move |x| (x, y)))
            .map(|(x, y)| {
                let current = self.cells[self.get_index(x, y)];
                let neighbors = self.count_live_neighbors(x, y);
                rule.evolve(current, neighbors)
            })
            .collect();

        Self {
            width: self.width,
            height: self.height,
            cells,
        }
    }

    /// Clear all cells to dead state
    pub fn clear(&mut self) {
        self.cells.iter_mut().for_each(|cell| *cell = Cell::Dead);
    }

    /// Randomize grid (30% chance of alive)
    pub fn randomize(&mut self) {
        use rand::Rng;

        let mut rng = rand::rng();
        self.cells
            .iter_mut()
            .for_each(|cell| *cell = Cell::from_alive(rng.random_bool(0.3)));
    }

    /// Number of live cells
    pub fn population(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_alive()).count()
    }

    /// Iterate over all cells with their positions
    pub fn iter_cells(&self) -> impl Iterator<Item = (usize, usize, Cell)> + '_ {
        (0..self.height)
            .flat_map(move |y| (0..self.width).map(move |x| (x, y)))
            .map(|(x, y)| (x, y, self.cells[self.get_index(x, y)]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::rules::ConwayRule;

    #[test]
    fn test_rejects_zero_dimensions() {
        assert!(Grid::new(0, 10).is_err());
        assert!(Grid::new(10, 0).is_err());
        assert!(Grid::new(0, 0).is_err());
        assert!(Grid::new(1, 1).is_ok());
    }

    #[test]
    fn test_out_of_bounds_access_is_a_no_op() {
        let mut grid = Grid::new(4, 4).unwrap();
        assert_eq!(grid.get(4, 0), None);
        assert_eq!(grid.get(0, 4), None);

        grid.set(4, 0, Cell::Alive);
        grid.set(0, 4, Cell::Alive);
        assert_eq!(grid.toggle(4, 4), None);
        assert_eq!(grid.population(), 0);
    }

    #[test]
    fn test_toggle_returns_new_state() {
        let mut grid = Grid::new(4, 4).unwrap();
        assert_eq!(grid.toggle(1, 1), Some(Cell::Alive));
        assert_eq!(grid.get(1, 1), Some(Cell::Alive));
        assert_eq!(grid.toggle(1, 1), Some(Cell::Dead));
        assert_eq!(grid.get(1, 1), Some(Cell::Dead));
    }

    #[test]
    fn test_corner_wraps_to_opposite_corner() {
        // On a torus, (w-1, h-1) is a diagonal neighbor of (0, 0)
        let mut grid = Grid::new(5, 4).unwrap();
        grid.set(4, 3, Cell::Alive);
        assert_eq!(grid.count_live_neighbors(0, 0), 1);
    }

    #[test]
    fn test_all_dead_grid_stays_dead() {
        let grid = Grid::new(7, 5).unwrap();
        let next = grid.evolve(&ConwayRule);
        assert_eq!(next.population(), 0);
    }

    #[test]
    fn test_block_is_a_still_life() {
        let mut grid = Grid::new(5, 5).unwrap();
        grid.set(1, 1, Cell::Alive);
        grid.set(2, 1, Cell::Alive);
        grid.set(1, 2, Cell::Alive);
        grid.set(2, 2, Cell::Alive);

        let next = grid.evolve(&ConwayRule);
        for (x, y, cell) in grid.iter_cells() {
            assert_eq!(next.get(x, y), Some(cell), "cell ({x}, {y}) changed");
        }
    }

    #[test]
    fn test_blinker_oscillates_with_period_two() {
        let mut grid = Grid::new(5, 5).unwrap();
        // Horizontal triple centered on (2, 2)
        grid.set(1, 2, Cell::Alive);
        grid.set(2, 2, Cell::Alive);
        grid.set(3, 2, Cell::Alive);

        let gen1 = grid.evolve(&ConwayRule);
        assert_eq!(gen1.population(), 3);
        assert_eq!(gen1.get(2, 1), Some(Cell::Alive));
        assert_eq!(gen1.get(2, 2), Some(Cell::Alive));
        assert_eq!(gen1.get(2, 3), Some(Cell::Alive));
        assert_eq!(gen1.get(1, 2), Some(Cell::Dead));
        assert_eq!(gen1.get(3, 2), Some(Cell::Dead));

        let gen2 = gen1.evolve(&ConwayRule);
        for (x, y, cell) in grid.iter_cells() {
            assert_eq!(gen2.get(x, y), Some(cell), "cell ({x}, {y}) changed");
        }
    }

    #[test]
    fn test_parallel_matches_serial() {
        let mut grid = Grid::new(32, 17).unwrap();
        grid.randomize();

        let serial = grid.evolve(&ConwayRule);
        let parallel = grid.evolve_parallel(&ConwayRule);
        for (x, y, cell) in serial.iter_cells() {
            assert_eq!(parallel.get(x, y), Some(cell));
        }
    }
}
