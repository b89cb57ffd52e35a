// Domain layer - simulation core
pub mod domain;

// Application layer - universe and clock
pub mod application;

// Infrastructure layer - UI, rendering, input
pub mod input;
pub mod rendering;
pub mod ui;

// Re-exports for convenience
pub use application::{MAX_SPEED_LEVEL, PATTERN_PADDING, Scheduler, Universe};
pub use domain::{Cell, CellPainter, Grid, Pattern, parse_rle, presets};
pub use input::PaintController;
pub use rendering::CanvasPainter;
