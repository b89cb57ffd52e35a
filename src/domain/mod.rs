mod cell;
mod grid;
mod painter;
mod pattern;
mod rules;

pub use cell::Cell;
pub use grid::Grid;
pub use painter::{CellPainter, diff_paint, full_paint};
pub use pattern::{Pattern, parse_rle, presets};
pub use rules::{ConwayRule, Rule, default_rule};

#[cfg(test)]
pub(crate) use painter::recorder::RecordingPainter;
