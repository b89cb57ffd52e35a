use anyhow::Context;
use macroquad::prelude::*;

use canvas_life::{
    CanvasPainter, PaintController, Pattern, Universe,
    application::padded_dimensions,
    domain::{full_paint, parse_rle, presets},
    input, rendering,
    ui::{self, CELL_SIZE, Dropdown, PANEL_WIDTH, grid_area_width, panel_x},
};

fn window_conf() -> Conf {
    Conf {
        window_title: "Canvas Life".to_owned(),
        window_width: 1000,
        window_height: 800,
        window_resizable: true,
        ..Default::default()
    }
}

#[macroquad::main(window_conf)]
async fn main() {
    env_logger::init();

    // Size the universe so its canvas fills the grid area
    let xcells = (((grid_area_width() - 1.0) / CELL_SIZE) as usize).max(1);
    let ycells = (((screen_height() - 1.0) / CELL_SIZE) as usize).max(1);

    let mut universe = match Universe::new(xcells, ycells) {
        Ok(universe) => universe,
        Err(err) => {
            log::error!("failed to create universe: {err:#}");
            return;
        }
    };
    let mut painter = match CanvasPainter::new(xcells, ycells) {
        Ok(painter) => painter,
        Err(err) => {
            log::error!("failed to create canvas: {err:#}");
            return;
        }
    };
    full_paint(universe.grid(), &mut painter);
    log::info!("initialized {xcells}x{ycells} universe");

    // An .rle file given on the command line replaces the empty grid
    if let Some(path) = std::env::args().nth(1)
        && let Err(err) = load_pattern_file(&path, &mut universe, &mut painter)
    {
        log::error!("could not load pattern {path}: {err:#}");
    }

    let patterns = presets::all();
    let pattern_items: Vec<String> = patterns.iter().map(|(name, _)| name.to_string()).collect();
    let mut pattern_dropdown = Dropdown::new(panel_x(), 30.0, PANEL_WIDTH, "Pattern", pattern_items);

    let mut controller = PaintController::new();

    loop {
        let mouse_pos = mouse_position();
        let pressed = is_mouse_button_pressed(MouseButton::Left);

        // Update UI positions for responsiveness
        pattern_dropdown.set_position(panel_x(), 30.0);
        let buttons = ui::create_buttons();

        // Captured before update: selecting an item closes the menu, and
        // that press must not reach the buttons or grid underneath
        let menu_owns_pointer =
            pattern_dropdown.is_open() || pattern_dropdown.wants_pointer(mouse_pos);

        if pattern_dropdown.update(mouse_pos, pressed) {
            let (name, pattern) = &patterns[pattern_dropdown.selected()];
            log::info!("loading preset {name}");
            if let Err(err) = load_into(pattern, &mut universe, &mut painter) {
                log::error!("pattern load failed: {err:#}");
            }
        }

        if !menu_owns_pointer {
            input::process_button_clicks(&mut universe, &mut painter, &buttons, mouse_pos);
            input::handle_mouse_paint(&mut controller, &mut universe, &mut painter, mouse_pos);
        }
        input::process_keyboard_input(&mut universe, &mut painter);

        universe.frame(get_frame_time(), &mut painter);

        clear_background(BLACK);
        painter.present();
        rendering::draw_controls(&universe, &buttons, &pattern_dropdown, mouse_pos);

        next_frame().await;
    }
}

/// Re-initialize universe and canvas around a decoded pattern. The new
/// canvas is built and painted first, so a failure (pattern too large for
/// the canvas, overflowing bounding box) leaves both untouched.
fn load_into(
    pattern: &Pattern,
    universe: &mut Universe,
    painter: &mut CanvasPainter,
) -> anyhow::Result<()> {
    let (width, height) = padded_dimensions(pattern)?;
    let mut canvas = CanvasPainter::new(width, height)?;
    universe.load_pattern(pattern, &mut canvas)?;
    *painter = canvas;
    Ok(())
}

fn load_pattern_file(
    path: &str,
    universe: &mut Universe,
    painter: &mut CanvasPainter,
) -> anyhow::Result<()> {
    let text = std::fs::read_to_string(path).with_context(|| format!("reading {path}"))?;
    let pattern = parse_rle(&text).with_context(|| format!("decoding {path}"))?;
    load_into(&pattern, universe, painter)
}
