//! Pointer sample queue used while dragging
//!
//! Raw pointer moves arrive at irregular intervals. The queue keeps the last
//! [`CAPACITY`] samples and collapses samples closer than
//! [`SAMPLE_PERIOD_MS`] so a fast input device cannot flood it. The drag tick
//! reads one smoothed position per frame through [`EventQueue::average`].

/// Maximum number of samples kept
pub const CAPACITY: usize = 10;

/// Minimum spacing between recorded samples, in milliseconds
pub const SAMPLE_PERIOD_MS: u64 = 9;

/// A pointer position at a point in time
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Sample {
    /// Horizontal position
    pub x: f64,
    /// Vertical position
    pub y: f64,
    /// Monotonic timestamp in milliseconds
    pub timestamp_ms: u64,
}

impl Sample {
    /// Create a sample
    pub fn new(x: f64, y: f64, timestamp_ms: u64) -> Self {
        Self { x, y, timestamp_ms }
    }
}

/// What [`EventQueue::push`] did with a sample
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PushOutcome {
    /// Stored as a new entry
    Appended,
    /// Arrived within the sampling period; overwrote the newest position
    Replaced,
    /// Stored as a new entry after evicting the oldest one
    Evicted(Sample),
}

/// Fixed-capacity circular buffer of pointer samples
#[derive(Debug, Clone)]
pub struct EventQueue {
    samples: [Sample; CAPACITY],
    /// Slot of the oldest sample
    start: usize,
    len: usize,
}

impl EventQueue {
    /// Create an empty queue
    pub fn new() -> Self {
        Self {
            samples: [Sample::default(); CAPACITY],
            start: 0,
            len: 0,
        }
    }

    /// Number of stored samples (never more than [`CAPACITY`])
    pub fn len(&self) -> usize {
        self.len
    }

    /// True when no sample is queued
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Drop every sample
    pub fn reset(&mut self) {
        self.start = 0;
        self.len = 0;
    }

    /// Newest sample
    pub fn latest(&self) -> Option<Sample> {
        self.newest_first().next()
    }

    /// Record a sample
    ///
    /// A sample within the sampling period of the newest recorded timestamp
    /// replaces that entry's position and keeps its timestamp, so a steady
    /// fast stream still lands one entry per period.
    pub fn push(&mut self, sample: Sample) -> PushOutcome {
        if let Some(latest) = self.latest() {
            if sample.timestamp_ms.saturating_sub(latest.timestamp_ms) < SAMPLE_PERIOD_MS {
                let slot = self.slot(self.len - 1);
                self.samples[slot].x = sample.x;
                self.samples[slot].y = sample.y;
                return PushOutcome::Replaced;
            }
        }

        if self.len == CAPACITY {
            let evicted = self.samples[self.start];
            self.samples[self.start] = sample;
            self.start = (self.start + 1) % CAPACITY;
            PushOutcome::Evicted(evicted)
        } else {
            let slot = self.slot(self.len);
            self.samples[slot] = sample;
            self.len += 1;
            PushOutcome::Appended
        }
    }

    /// Recency-weighted average x position as of `now_ms`
    ///
    /// Walking back from the newest sample, each sample's age in sampling
    /// periods is clamped to the count of samples still ahead of the walk and
    /// subtracted from that count. Weights therefore fall in
    /// `[1, remaining]`: recent samples dominate, older ones still count.
    pub fn average(&self, now_ms: u64) -> Option<f64> {
        let reference = self.latest()?.x;
        let mut weighted = 0.0;
        let mut total = 0.0;

        for (k, sample) in self.newest_first().enumerate() {
            let remaining = (self.len - k) as f64;
            let age = now_ms.saturating_sub(sample.timestamp_ms) as f64 / SAMPLE_PERIOD_MS as f64;
            let weight = remaining - age.clamp(0.0, remaining - 1.0);
            weighted += weight * (sample.x - reference);
            total += weight;
        }

        Some(reference + weighted / total)
    }

    /// Samples from oldest to newest
    pub fn iter(&self) -> impl Iterator<Item = Sample> + '_ {
        (0..self.len).map(move |i| self.samples[self.slot(i)])
    }

    fn newest_first(&self) -> impl Iterator<Item = Sample> + '_ {
        (0..self.len).rev().map(move |i| self.samples[self.slot(i)])
    }

    fn slot(&self, offset: usize) -> usize {
        (self.start + offset) % CAPACITY
    }
}

impl Default for EventQueue {
    fn default() -> Self {
        Self::new()
    }
}
