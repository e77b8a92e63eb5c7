//! Gravity timer for the driving loop
//!
//! The game does not own a clock. The loop asks the ticker how long it may
//! wait for input, and whether a step is due; after a level change it
//! reschedules with the game's new interval.

use std::time::{Duration, Instant};

#[derive(Debug, Clone)]
pub struct Ticker {
    interval: Duration,
    next_due: Instant,
}

impl Ticker {
    /// First tick fires one interval after `now`
    pub fn new(interval: Duration, now: Instant) -> Self {
        Self {
            interval,
            next_due: now + interval,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Replace the schedule. Any pending deadline is dropped.
    pub fn reschedule(&mut self, interval: Duration, now: Instant) {
        self.interval = interval;
        self.next_due = now + interval;
    }

    /// Time left before the next tick (zero when overdue)
    pub fn timeout(&self, now: Instant) -> Duration {
        self.next_due.saturating_duration_since(now)
    }

    /// Consume a due tick. Fixed rate: the next deadline is one interval
    /// after the previous one, unless the loop fell a whole interval behind.
    pub fn poll(&mut self, now: Instant) -> bool {
        if now < self.next_due {
            return false;
        }
        self.next_due += self.interval;
        if self.next_due <= now {
            self.next_due = now + self.interval;
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MS: Duration = Duration::from_millis(1);

    #[test]
    fn test_fires_once_per_interval() {
        let start = Instant::now();
        let mut ticker = Ticker::new(500 * MS, start);

        assert!(!ticker.poll(start + 499 * MS));
        assert_eq!(ticker.timeout(start + 400 * MS), 100 * MS);
        assert!(ticker.poll(start + 500 * MS));
        assert!(!ticker.poll(start + 600 * MS));
        assert!(ticker.poll(start + 1000 * MS));
    }

    #[test]
    fn test_overdue_does_not_burst() {
        let start = Instant::now();
        let mut ticker = Ticker::new(100 * MS, start);

        assert!(ticker.poll(start + 1000 * MS));
        assert!(!ticker.poll(start + 1000 * MS));
        assert_eq!(ticker.timeout(start + 1000 * MS), 100 * MS);
    }

    #[test]
    fn test_reschedule_drops_pending_tick() {
        let start = Instant::now();
        let mut ticker = Ticker::new(500 * MS, start);

        ticker.reschedule(450 * MS, start + 490 * MS);
        assert_eq!(ticker.interval(), 450 * MS);
        assert!(!ticker.poll(start + 500 * MS));
        assert!(ticker.poll(start + 940 * MS));
    }

    #[test]
    fn test_timeout_saturates() {
        let start = Instant::now();
        let ticker = Ticker::new(50 * MS, start);
        assert_eq!(ticker.timeout(start + 80 * MS), Duration::ZERO);
    }
}
