//! Scoring and level progression

use std::time::Duration;

/// Lines needed per level
pub const LINES_PER_LEVEL: u32 = 10;
/// Points per cleared line, before the level multiplier
pub const POINTS_PER_LINE: u64 = 100;

/// Tick interval at level 1
pub const INITIAL_INTERVAL_MS: u64 = 500;
/// Interval reduction per level
pub const INTERVAL_STEP_MS: u64 = 50;
/// Fastest possible tick
pub const MIN_INTERVAL_MS: u64 = 50;

/// Score tracking
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Score {
    /// Current score
    pub points: u64,
    /// Current level, starts at 1
    pub level: u32,
    /// Total lines cleared
    pub lines: u32,
}

impl Default for Score {
    fn default() -> Self {
        Self::new()
    }
}

impl Score {
    pub fn new() -> Self {
        Self {
            points: 0,
            level: 1,
            lines: 0,
        }
    }

    /// Add score for `lines` cleared at once.
    /// Returns true when the level changed.
    pub fn add_clear(&mut self, lines: u32) -> bool {
        if lines == 0 {
            return false;
        }

        self.points += u64::from(lines) * POINTS_PER_LINE * u64::from(self.level);
        self.lines += lines;

        let new_level = self.lines / LINES_PER_LEVEL + 1;
        if new_level == self.level {
            return false;
        }
        self.level = new_level;
        true
    }

    /// Gravity interval for the current level
    pub fn tick_interval(&self) -> Duration {
        tick_interval(self.level)
    }
}

/// Gravity interval for a level: 500ms, 50ms faster per level, floored at 50ms
pub fn tick_interval(level: u32) -> Duration {
    let reduction = u64::from(level.saturating_sub(1)) * INTERVAL_STEP_MS;
    let ms = INITIAL_INTERVAL_MS.saturating_sub(reduction).max(MIN_INTERVAL_MS);
    Duration::from_millis(ms)
}
