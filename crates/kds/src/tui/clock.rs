//! Redraw clock.
//!
//! The header shows wall-clock time, so the screen is redrawn on a fixed
//! tick even when no new queue data arrives.

use std::time::{Duration, Instant};

#[derive(Debug)]
pub struct Clock {
    interval: Duration,
    last_tick: Instant,
}

impl Clock {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            last_tick: Instant::now(),
        }
    }

    pub fn is_due(&self) -> bool {
        self.last_tick.elapsed() >= self.interval
    }

    /// Time left until the next tick (zero when due).
    pub fn remaining(&self) -> Duration {
        self.interval.saturating_sub(self.last_tick.elapsed())
    }

    pub fn reset(&mut self) {
        self.last_tick = Instant::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_interval_is_always_due() {
        let clock = Clock::new(Duration::ZERO);
        assert!(clock.is_due());
        assert_eq!(clock.remaining(), Duration::ZERO);
    }

    #[test]
    fn test_long_interval_not_due() {
        let mut clock = Clock::new(Duration::from_secs(3600));
        assert!(!clock.is_due());
        assert!(clock.remaining() <= Duration::from_secs(3600));
        assert!(clock.remaining() > Duration::from_secs(3500));

        clock.reset();
        assert!(!clock.is_due());
    }
}
