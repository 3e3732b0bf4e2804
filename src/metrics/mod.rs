//! Performance and activity metrics for the scroller
//!
//! `TickMetrics` checks how long each tick takes against the tick interval;
//! `ScrollMetrics` counts what the scroller did.

use std::time::{Duration, Instant};

/// Budget used when no tick interval is configured (one 60 Hz frame)
pub const DEFAULT_TICK_BUDGET: Duration = Duration::from_millis(16);

/// Time spent inside `Scroller::tick`, checked against the tick interval
#[derive(Debug, Clone)]
pub struct TickMetrics {
    budget: Duration,
    last: Duration,
    total: Duration,
    slowest: Duration,
    count: u64,
    over_budget: u64,
}

impl TickMetrics {
    /// Metrics against the default 16 ms budget
    pub fn new() -> Self {
        Self::with_budget(DEFAULT_TICK_BUDGET)
    }

    /// Metrics that flag ticks slower than `budget`
    pub fn with_budget(budget: Duration) -> Self {
        Self {
            budget,
            last: Duration::ZERO,
            total: Duration::ZERO,
            slowest: Duration::ZERO,
            count: 0,
            over_budget: 0,
        }
    }

    /// Record how long one tick took
    pub fn record_tick(&mut self, duration: Duration) {
        self.last = duration;
        self.total = self.total.saturating_add(duration);
        self.slowest = self.slowest.max(duration);
        self.count += 1;
        if duration > self.budget {
            self.over_budget += 1;
        }
    }

    /// Budget a tick is measured against
    pub fn budget(&self) -> Duration {
        self.budget
    }

    /// Mean tick time
    pub fn avg_tick_time(&self) -> Duration {
        match self.count {
            0 => Duration::ZERO,
            n => Duration::from_nanos((self.total.as_nanos() / n as u128) as u64),
        }
    }

    /// Duration of the most recent tick
    pub fn last_tick_time(&self) -> Duration {
        self.last
    }

    /// Slowest tick seen
    pub fn max_tick_time(&self) -> Duration {
        self.slowest
    }

    /// Number of recorded ticks
    pub fn tick_count(&self) -> u64 {
        self.count
    }

    /// Share of ticks that ran over budget, in percent
    pub fn ticks_over_budget_percent(&self) -> f64 {
        if self.count == 0 {
            0.0
        } else {
            (self.over_budget as f64 / self.count as f64) * 100.0
        }
    }

    /// Whether the most recent tick ran over budget
    pub fn is_over_budget(&self) -> bool {
        self.last > self.budget
    }

    /// Log a summary
    pub fn log_summary(&self) {
        tracing::debug!(
            tick_count = %self.count,
            budget_ms = %self.budget.as_millis(),
            avg_tick_us = %self.avg_tick_time().as_micros(),
            max_tick_us = %self.slowest.as_micros(),
            ticks_over_budget_pct = %self.ticks_over_budget_percent(),
            "Tick timing summary"
        );
    }
}

impl Default for TickMetrics {
    fn default() -> Self {
        Self::new()
    }
}

/// Counters of scroller activity
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ScrollMetrics {
    /// Ticks processed
    pub ticks: u64,
    /// Times a different item reached the anchor
    pub page_changes: u64,
    /// Drags started
    pub drags: u64,
    /// Animation sessions started
    pub animations_started: u64,
    /// Sessions that reached their target
    pub animations_completed: u64,
    /// Sessions stopped before arrival
    pub animations_cancelled: u64,
}

impl ScrollMetrics {
    /// Create zeroed counters
    pub fn new() -> Self {
        Self::default()
    }

    /// Share of started animations that reached their target
    pub fn completion_rate(&self) -> f64 {
        if self.animations_started == 0 {
            0.0
        } else {
            (self.animations_completed as f64 / self.animations_started as f64) * 100.0
        }
    }

    /// Log a summary
    pub fn log_summary(&self) {
        tracing::debug!(
            ticks = %self.ticks,
            page_changes = %self.page_changes,
            drags = %self.drags,
            animations_started = %self.animations_started,
            animations_completed = %self.animations_completed,
            animations_cancelled = %self.animations_cancelled,
            "Scroller activity summary"
        );
    }
}

/// A simple timer for measuring operation duration
#[derive(Debug)]
pub struct Timer {
    start: Instant,
}

impl Timer {
    /// Start a new timer
    pub fn start() -> Self {
        Self {
            start: Instant::now(),
        }
    }

    /// Get elapsed time since timer started
    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }

    /// Stop timer and return elapsed duration
    pub fn stop(self) -> Duration {
        self.start.elapsed()
    }
}
