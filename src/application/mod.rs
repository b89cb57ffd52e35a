mod scheduler;
mod universe;

pub use scheduler::{DEFAULT_SPEED_LEVEL, MAX_SPEED_LEVEL, Scheduler};
pub use universe::{PATTERN_PADDING, Universe, padded_dimensions};
