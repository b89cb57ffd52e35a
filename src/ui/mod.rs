mod button;
mod dropdown;

pub use button::Button;
pub use dropdown::Dropdown;

use macroquad::prelude::screen_width;

pub const PANEL_WIDTH: f32 = 180.0;
pub const BUTTON_HEIGHT: f32 = 40.0;

/// Cell edge in screen pixels; the canvas is drawn unscaled.
pub const CELL_SIZE: f32 = crate::rendering::CELL_PX as f32;

/// Get the X position where the panel starts (right side)
pub fn panel_x() -> f32 {
    screen_width() - PANEL_WIDTH
}

/// Get the width of the grid area
pub fn grid_area_width() -> f32 {
    screen_width() - PANEL_WIDTH
}

/// Create UI buttons. Order matters: input dispatch matches by index.
pub fn create_buttons() -> Vec<Button> {
    let px = panel_x();
    vec![
        Button::new(px, 90.0, PANEL_WIDTH, BUTTON_HEIGHT, "Play/Pause"),
        Button::new(px, 140.0, PANEL_WIDTH, BUTTON_HEIGHT, "Clear"),
        Button::new(px, 190.0, PANEL_WIDTH, BUTTON_HEIGHT, "Random"),
        Button::new(px, 240.0, PANEL_WIDTH, BUTTON_HEIGHT, "Faster"),
        Button::new(px, 290.0, PANEL_WIDTH, BUTTON_HEIGHT, "Slower"),
    ]
}
