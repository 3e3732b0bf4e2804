//! Tick pacing for hosts without their own frame clock

use std::time::{Duration, Instant};

/// Converts elapsed wall-clock time into whole ticks
pub struct TickScheduler {
    /// Time the last counted tick was due
    last_tick: Instant,

    /// Tick interval
    interval: Duration,
}

impl TickScheduler {
    /// Create a scheduler starting now
    pub fn new(interval: Duration) -> Self {
        Self::starting_at(interval, Instant::now())
    }

    /// Create a scheduler whose first tick is due one interval after `start`
    pub fn starting_at(interval: Duration, start: Instant) -> Self {
        Self {
            last_tick: start,
            interval: interval.max(Duration::from_millis(1)),
        }
    }

    /// Tick interval
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Number of ticks that became due since the last poll
    pub fn poll(&mut self, now: Instant) -> u32 {
        let elapsed = now.saturating_duration_since(self.last_tick);
        let due = (elapsed.as_nanos() / self.interval.as_nanos()) as u32;
        self.last_tick += self.interval * due;
        due
    }

    /// Get time until the next tick is due
    pub fn time_until_next_tick(&self, now: Instant) -> Duration {
        let elapsed = now.saturating_duration_since(self.last_tick);
        self.interval.checked_sub(elapsed).unwrap_or(Duration::ZERO)
    }

    /// Restart counting from `now`
    pub fn reset(&mut self, now: Instant) {
        self.last_tick = now;
    }
}

impl Default for TickScheduler {
    fn default() -> Self {
        Self::new(Duration::from_millis(16))
    }
}
