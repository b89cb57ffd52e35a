use super::Grid;

/// Rendering collaborator: receives one draw instruction per cell that
/// needs repainting. Implemented by the pixel canvas and by test recorders.
pub trait CellPainter {
    fn draw_cell(&mut self, x: usize, y: usize, alive: bool);
}

/// Emit a draw instruction for every cell where the two generations differ.
/// Identical generations emit nothing. The result on screen is the same as
/// a naive full repaint of `next`, minus the untouched cells.
pub fn diff_paint(prev: &Grid, next: &Grid, painter: &mut dyn CellPainter) {
    debug_assert_eq!(prev.dimensions(), next.dimensions());

    for (x, y, cell) in next.iter_cells() {
        if prev.get(x, y) != Some(cell) {
            painter.draw_cell(x, y, cell.is_alive());
        }
    }
}

/// Emit a draw instruction for every cell unconditionally.
/// Used after init, clear, randomize, and pattern load.
pub fn full_paint(grid: &Grid, painter: &mut dyn CellPainter) {
    for (x, y, cell) in grid.iter_cells() {
        painter.draw_cell(x, y, cell.is_alive());
    }
}

#[cfg(test)]
pub(crate) mod recorder {
    use super::CellPainter;

    /// Test double that records draw instructions in order.
    #[derive(Default)]
    pub struct RecordingPainter {
        pub calls: Vec<(usize, usize, bool)>,
    }

    impl CellPainter for RecordingPainter {
        fn draw_cell(&mut self, x: usize, y: usize, alive: bool) {
            self.calls.push((x, y, alive));
        }
    }
}
