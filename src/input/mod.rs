use macroquad::prelude::*;

use crate::application::Universe;
use crate::domain::{Cell, CellPainter, Grid};
use crate::ui::{self, CELL_SIZE};

/// Drag-painting state. Pointer-down flips the cell under the pointer
/// exactly once and latches the flipped value as the brush; pointer-move
/// paints the brush value (never re-toggles); release forgets the brush.
pub struct PaintController {
    brush: Option<Cell>,
}

impl PaintController {
    pub fn new() -> Self {
        Self { brush: None }
    }

    /// Map an element-relative pixel position to 0-indexed cell coordinates.
    /// Negative or out-of-grid positions map to None.
    fn cell_under_pointer(grid: &Grid, pos: (f32, f32), cell_size: f32) -> Option<(usize, usize)> {
        if pos.0 < 0.0 || pos.1 < 0.0 {
            return None;
        }
        let x = (pos.0 / cell_size) as usize;
        let y = (pos.1 / cell_size) as usize;
        let (width, height) = grid.dimensions();
        (x < width && y < height).then_some((x, y))
    }

    /// Handle a pointer press. Out-of-grid presses are silently ignored.
    pub fn pointer_down(
        &mut self,
        grid: &mut Grid,
        pos: (f32, f32),
        cell_size: f32,
        painter: &mut dyn CellPainter,
    ) {
        let Some((x, y)) = Self::cell_under_pointer(grid, pos, cell_size) else {
            return;
        };
        // toggle is in bounds here, so this always latches a brush
        let Some(state) = grid.toggle(x, y) else {
            return;
        };
        self.brush = Some(state);
        painter.draw_cell(x, y, state.is_alive());
    }

    /// Handle pointer movement while the button is held. Cells visited by
    /// the drag are set to the latched brush value; moves with no active
    /// brush or outside the grid do nothing.
    pub fn pointer_move(
        &mut self,
        grid: &mut Grid,
        pos: (f32, f32),
        cell_size: f32,
        painter: &mut dyn CellPainter,
    ) {
        let Some(brush) = self.brush else {
            return;
        };
        let Some((x, y)) = Self::cell_under_pointer(grid, pos, cell_size) else {
            return;
        };
        grid.set(x, y, brush);
        painter.draw_cell(x, y, brush.is_alive());
    }

    /// Handle pointer release: the next press latches a fresh brush.
    pub fn pointer_up(&mut self) {
        self.brush = None;
    }
}

impl Default for PaintController {
    fn default() -> Self {
        Self::new()
    }
}

/// Translate macroquad mouse state into paint-controller events.
pub fn handle_mouse_paint(
    controller: &mut PaintController,
    universe: &mut Universe,
    painter: &mut dyn CellPainter,
    mouse_pos: (f32, f32),
) {
    if is_mouse_button_pressed(MouseButton::Left) {
        // Presses over the control panel belong to the UI, not the grid
        if mouse_pos.0 < ui::grid_area_width() {
            controller.pointer_down(universe.grid_mut(), mouse_pos, CELL_SIZE, painter);
        }
    } else if is_mouse_button_down(MouseButton::Left) {
        controller.pointer_move(universe.grid_mut(), mouse_pos, CELL_SIZE, painter);
    } else {
        controller.pointer_up();
    }
}

/// Raise the speed level by one; a press at the maximum level is a no-op.
pub fn speed_up(universe: &mut Universe) {
    universe.set_speed(universe.speed().saturating_add(1));
}

/// Lower the speed level by one; a press at level 0 is a no-op.
pub fn slow_down(universe: &mut Universe) {
    if universe.speed() > 0 {
        universe.set_speed(universe.speed() - 1);
    }
}

/// Process keyboard shortcuts for the frame.
pub fn process_keyboard_input(universe: &mut Universe, painter: &mut dyn CellPainter) {
    if is_key_pressed(KeyCode::Space) {
        universe.toggle_running();
    }
    if is_key_pressed(KeyCode::C) {
        universe.clear(painter);
    }
    if is_key_pressed(KeyCode::R) {
        universe.randomize(painter);
    }
    if is_key_pressed(KeyCode::Up) {
        speed_up(universe);
    }
    if is_key_pressed(KeyCode::Down) {
        slow_down(universe);
    }
}

/// Dispatch control-panel button clicks. Button order matches
/// `ui::create_buttons`.
pub fn process_button_clicks(
    universe: &mut Universe,
    painter: &mut dyn CellPainter,
    buttons: &[crate::ui::Button],
    mouse_pos: (f32, f32),
) {
    for (idx, button) in buttons.iter().enumerate() {
        if !button.is_clicked(mouse_pos) {
            continue;
        }
        match idx {
            0 => universe.toggle_running(),
            1 => universe.clear(painter),
            2 => universe.randomize(painter),
            3 => speed_up(universe),
            4 => slow_down(universe),
            _ => {}
        }
    }
}
