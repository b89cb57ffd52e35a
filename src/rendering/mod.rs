use anyhow::{Result, ensure};
use macroquad::prelude::*;

use crate::application::Universe;
use crate::domain::CellPainter;
use crate::ui::{Button, Dropdown, panel_x};

/// Cell square edge in pixels, including the 1 px grid line.
pub const CELL_PX: usize = 10;

/// Largest grid edge whose pixel canvas still fits a u16 image dimension.
pub const MAX_GRID_CELLS: usize = (u16::MAX as usize - 1) / CELL_PX;

/// Palette: live cells green, dead cells red, grid lines dark gray.
pub const ALIVE_COLOR: Color = Color::new(0.0, 200.0 / 255.0, 0.0, 1.0);
pub const DEAD_COLOR: Color = Color::new(200.0 / 255.0, 0.0, 0.0, 1.0);
pub const GRID_COLOR: Color = Color::new(50.0 / 255.0, 50.0 / 255.0, 50.0 / 255.0, 1.0);

/// Pixel canvas the simulation paints into. Draw instructions update a CPU
/// image; `present` uploads it once per frame, so repainting a handful of
/// dirty cells never costs a full grid redraw.
pub struct CanvasPainter {
    image: Image,
    texture: Texture2D,
}

impl CanvasPainter {
    /// Allocate a canvas for a grid of the given dimensions, grid lines
    /// pre-drawn. Every cell interior starts in the dead color once the
    /// caller issues its initial full paint. Grids whose pixel canvas
    /// would not fit a u16 image dimension are rejected up front, before
    /// anything is allocated.
    pub fn new(grid_width: usize, grid_height: usize) -> Result<Self> {
        ensure!(
            grid_width <= MAX_GRID_CELLS && grid_height <= MAX_GRID_CELLS,
            "{grid_width}x{grid_height} grid exceeds the \
             {MAX_GRID_CELLS}x{MAX_GRID_CELLS} canvas limit"
        );
        let width = (grid_width * CELL_PX + 1) as u16;
        let height = (grid_height * CELL_PX + 1) as u16;
        let image = Image::gen_image_color(width, height, GRID_COLOR);
        let texture = Texture2D::from_image(&image);
        texture.set_filter(FilterMode::Nearest);
        Ok(Self { image, texture })
    }

    /// Upload the image and draw it at the canvas origin.
    pub fn present(&mut self) {
        self.texture.update(&self.image);
        draw_texture(&self.texture, 0.0, 0.0, WHITE);
    }
}

impl CellPainter for CanvasPainter {
    fn draw_cell(&mut self, x: usize, y: usize, alive: bool) {
        let colour = if alive { ALIVE_COLOR } else { DEAD_COLOR };
        // Fill the cell interior, leaving the 1 px grid line on each edge
        let left = (x * CELL_PX + 1) as u32;
        let top = (y * CELL_PX + 1) as u32;
        for py in top..top + (CELL_PX - 1) as u32 {
            for px in left..left + (CELL_PX - 1) as u32 {
                self.image.set_pixel(px, py, colour);
            }
        }
    }
}

/// Draw the control panel: buttons, pattern dropdown, help, and status.
pub fn draw_controls(
    universe: &Universe,
    buttons: &[Button],
    dropdown: &Dropdown,
    mouse_pos: (f32, f32),
) {
    let px = panel_x();

    // Panel background
    draw_rectangle(
        px,
        0.0,
        crate::ui::PANEL_WIDTH,
        screen_height(),
        Color::from_rgba(30, 30, 30, 255),
    );

    buttons.iter().for_each(|btn| btn.draw(mouse_pos));

    let controls = [
        ("Controls:", 330.0, 14.0, WHITE),
        ("Click/drag: Paint", 345.0, 12.0, GRAY),
        ("Space: Play", 358.0, 12.0, GRAY),
        ("C: Clear  R: Random", 371.0, 12.0, GRAY),
        ("Up/Down: Speed", 384.0, 12.0, GRAY),
    ];
    controls.iter().for_each(|(text, y, size, color)| {
        draw_text(text, px, *y, *size, *color);
    });

    let (gw, gh) = universe.grid().dimensions();
    let labels = [
        (format!("Grid: {gw}x{gh}"), 420.0, 12.0, GRAY),
        (
            format!("Population: {}", universe.grid().population()),
            435.0,
            12.0,
            GRAY,
        ),
        ("Speed:".to_string(), 470.0, 16.0, WHITE),
        (format!("level {}", universe.speed()), 490.0, 14.0, GRAY),
        ("Generation:".to_string(), 520.0, 16.0, WHITE),
        (
            format!("{}", universe.generation()),
            540.0,
            20.0,
            Color::from_rgba(0, 200, 0, 255),
        ),
        ("Status:".to_string(), 575.0, 16.0, WHITE),
        (
            if universe.is_running() {
                "Running".to_string()
            } else {
                "Paused".to_string()
            },
            595.0,
            16.0,
            if universe.is_running() {
                Color::from_rgba(0, 255, 0, 255)
            } else {
                Color::from_rgba(255, 165, 0, 255)
            },
        ),
    ];
    labels.iter().for_each(|(text, y, size, color)| {
        draw_text(text, px, *y, *size, *color);
    });

    // Dropdown last so the open menu sits on top of the panel
    dropdown.draw(mouse_pos);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canvas_for_oversized_grid_is_rejected() {
        // 6554 cells need 65 541 px, past what a u16 image edge can hold.
        // The guard fires before any image or texture is created.
        assert!(CanvasPainter::new(MAX_GRID_CELLS + 1, 10).is_err());
        assert!(CanvasPainter::new(10, MAX_GRID_CELLS + 1).is_err());
    }
}
