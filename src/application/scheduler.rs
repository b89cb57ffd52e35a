/// Highest accepted speed level (inclusive); level 0 is the slowest.
pub const MAX_SPEED_LEVEL: u8 = 10;

/// Default speed level, a 100 ms tick interval.
pub const DEFAULT_SPEED_LEVEL: u8 = 9;

/// Scheduler drives periodic generation advancement from the frame loop.
/// A single frame-time accumulator replaces the original's interval timer,
/// so there is never more than one logical tick loop per universe.
pub struct Scheduler {
    running: bool,
    level: u8,
    accumulator: f32,
}

impl Scheduler {
    pub fn new() -> Self {
        Self {
            running: false,
            level: DEFAULT_SPEED_LEVEL,
            accumulator: 0.0,
        }
    }

    /// Begin ticking. No-op if already running.
    pub fn start(&mut self) {
        if !self.running {
            self.running = true;
            self.accumulator = 0.0;
        }
    }

    /// Halt ticking. No-op if already stopped.
    pub fn stop(&mut self) {
        self.running = false;
    }

    pub fn toggle(&mut self) {
        if self.running {
            self.stop();
        } else {
            self.start();
        }
    }

    pub const fn is_running(&self) -> bool {
        self.running
    }

    /// Change the speed level. Out-of-range levels are rejected and the
    /// previous interval is retained. Accumulated time is preserved, so a
    /// change mid-interval neither drops nor duplicates a tick.
    pub fn set_speed(&mut self, level: u8) -> bool {
        if level > MAX_SPEED_LEVEL {
            return false;
        }
        self.level = level;
        true
    }

    pub const fn speed(&self) -> u8 {
        self.level
    }

    /// Tick interval in seconds. Monotonically decreasing in the level:
    /// level 0 is one generation per second, level 10 one per frame.
    pub const fn interval(&self) -> f32 {
        (MAX_SPEED_LEVEL - self.level) as f32 * 0.1
    }

    /// Advance the clock by one frame's delta time. Returns true when a
    /// generation advance is due; at most one per call.
    pub fn due(&mut self, delta_time: f32) -> bool {
        if !self.running {
            return false;
        }

        self.accumulator += delta_time;
        if self.accumulator >= self.interval() {
            self.accumulator = 0.0;
            true
        } else {
            false
        }
    }
}

impl Default for Scheduler {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stopped_scheduler_is_never_due() {
        let mut scheduler = Scheduler::new();
        assert!(!scheduler.due(10.0));
    }

    #[test]
    fn test_due_once_per_interval() {
        let mut scheduler = Scheduler::new();
        scheduler.set_speed(9); // 100 ms
        scheduler.start();

        assert!(!scheduler.due(0.05));
        assert!(scheduler.due(0.05));
        // Accumulator was reset, so the next frame is not due again
        assert!(!scheduler.due(0.05));
    }

    #[test]
    fn test_double_start_does_not_double_tick() {
        let mut scheduler = Scheduler::new();
        scheduler.set_speed(9);
        scheduler.start();
        scheduler.start();

        let mut advances = 0;
        for _ in 0..10 {
            if scheduler.due(0.05) {
                advances += 1;
            }
        }
        // 0.5 s at a 100 ms interval: exactly five advances
        assert_eq!(advances, 5);
    }

    #[test]
    fn test_out_of_range_speed_is_rejected() {
        let mut scheduler = Scheduler::new();
        let before = scheduler.interval();

        assert!(!scheduler.set_speed(MAX_SPEED_LEVEL + 1));
        assert_eq!(scheduler.speed(), DEFAULT_SPEED_LEVEL);
        assert_eq!(scheduler.interval(), before);
    }

    #[test]
    fn test_interval_decreases_with_level() {
        let mut scheduler = Scheduler::new();
        let mut previous = f32::MAX;
        for level in 0..=MAX_SPEED_LEVEL {
            assert!(scheduler.set_speed(level));
            assert!(scheduler.interval() < previous);
            previous = scheduler.interval();
        }
        assert_eq!(scheduler.interval(), 0.0);
    }

    #[test]
    fn test_speed_change_takes_effect_next_tick() {
        let mut scheduler = Scheduler::new();
        scheduler.set_speed(9); // 100 ms
        scheduler.start();

        assert!(!scheduler.due(0.05));
        // Slow down mid-interval; the accumulated 50 ms is kept
        scheduler.set_speed(8); // 200 ms
        assert!(!scheduler.due(0.05));
        assert!(!scheduler.due(0.05));
        assert!(scheduler.due(0.05));
    }

    #[test]
    fn test_stop_is_idempotent_and_halts_ticks() {
        let mut scheduler = Scheduler::new();
        scheduler.start();
        scheduler.stop();
        scheduler.stop();
        assert!(!scheduler.is_running());
        assert!(!scheduler.due(10.0));
    }
}
