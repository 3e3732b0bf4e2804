//! Pointer handling for carousel drags
//!
//! This module turns raw pointer down/move/up events into the drag state
//! machine (idle, pressed, dragging) and feeds the sample queue while a
//! drag is in progress.

use tracing::{debug, trace};

use crate::sampler::{EventQueue, Sample};

/// Raw pointer event in canvas coordinates
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PointerEvent {
    /// Horizontal position
    pub x: f64,
    /// Vertical position
    pub y: f64,
    /// Monotonic timestamp in milliseconds
    pub timestamp_ms: u64,
}

impl PointerEvent {
    /// Create a pointer event
    pub fn new(x: f64, y: f64, timestamp_ms: u64) -> Self {
        Self { x, y, timestamp_ms }
    }

    fn sample(&self) -> Sample {
        Sample::new(self.x, self.y, self.timestamp_ms)
    }
}

/// Drag state machine phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DragPhase {
    /// No pointer pressed
    #[default]
    Idle,
    /// Pointer pressed, not yet past the drag threshold
    Pressed,
    /// Pointer is dragging the items
    Dragging,
}

/// What a pointer move did to the state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    /// Nothing to do (idle, below threshold, or sampling suppressed)
    Ignored,
    /// The press just crossed the threshold
    DragStarted,
    /// A sample was recorded for an ongoing drag
    Sampled,
}

/// Displacement reported when a drag ends
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragRelease {
    /// Horizontal travel from press to release
    pub dx: f64,
    /// Vertical travel from press to release
    pub dy: f64,
    /// Smoothed motion not yet consumed by a tick
    pub pending_dx: f64,
}

/// Drag state tracker for pointer events
#[derive(Debug, Clone)]
pub struct DragTracker {
    phase: DragPhase,
    threshold: f64,
    press: PointerEvent,
    /// Last known pointer position
    pointer: PointerEvent,
    samples: EventQueue,
    /// Smoothed position already applied to the items
    applied_x: f64,
}

impl DragTracker {
    /// Create a tracker that starts dragging after `threshold` pixels
    pub fn new(threshold: f64) -> Self {
        Self {
            phase: DragPhase::Idle,
            threshold,
            press: PointerEvent::default(),
            pointer: PointerEvent::default(),
            samples: EventQueue::new(),
            applied_x: 0.0,
        }
    }

    /// Current phase
    pub fn phase(&self) -> DragPhase {
        self.phase
    }

    /// Whether a drag is in progress
    pub fn is_dragging(&self) -> bool {
        self.phase == DragPhase::Dragging
    }

    /// Get last known pointer position
    pub fn pointer_position(&self) -> (f64, f64) {
        (self.pointer.x, self.pointer.y)
    }

    /// Samples recorded for the current drag
    pub fn samples(&self) -> &EventQueue {
        &self.samples
    }

    /// Pointer down: remember the press and start a fresh sample queue
    pub fn press(&mut self, event: PointerEvent) {
        self.phase = DragPhase::Pressed;
        self.press = event;
        self.pointer = event;
        self.samples.reset();
        self.applied_x = event.x;
        trace!(x = event.x, y = event.y, "Pointer pressed");
    }

    /// Pointer move
    ///
    /// With `sampling` false (scroller frozen) only the pointer position is
    /// tracked: no drag starts and no sample is recorded.
    pub fn motion(&mut self, event: PointerEvent, sampling: bool) -> MoveOutcome {
        self.pointer = event;
        if !sampling {
            return MoveOutcome::Ignored;
        }

        match self.phase {
            DragPhase::Idle => MoveOutcome::Ignored,
            DragPhase::Pressed => {
                if (event.x - self.press.x).abs() > self.threshold {
                    self.phase = DragPhase::Dragging;
                    self.samples.push(event.sample());
                    debug!(
                        press_x = self.press.x,
                        x = event.x,
                        threshold = self.threshold,
                        "Drag started"
                    );
                    MoveOutcome::DragStarted
                } else {
                    MoveOutcome::Ignored
                }
            }
            DragPhase::Dragging => {
                self.samples.push(event.sample());
                MoveOutcome::Sampled
            }
        }
    }

    /// Per-tick drag delta: `average(now) - average(previous tick)`
    ///
    /// The first baseline is the press position, so the items catch up with
    /// the distance travelled before the threshold was crossed.
    pub fn tick_delta(&mut self, now_ms: u64) -> f64 {
        if !self.is_dragging() {
            return 0.0;
        }
        match self.samples.average(now_ms) {
            Some(average) => {
                let delta = average - self.applied_x;
                self.applied_x = average;
                delta
            }
            None => 0.0,
        }
    }

    /// Pointer up: back to idle
    ///
    /// Returns the total displacement when a drag was in progress. With
    /// `sampling` on, the release position is recorded as a final sample and
    /// the smoothed motion the ticks have not applied yet is reported too.
    pub fn release(&mut self, event: PointerEvent, sampling: bool) -> Option<DragRelease> {
        self.pointer = event;
        let was_dragging = self.is_dragging();
        let pending_dx = if was_dragging && sampling {
            self.samples.push(event.sample());
            self.tick_delta(event.timestamp_ms)
        } else {
            0.0
        };
        self.phase = DragPhase::Idle;

        if was_dragging {
            let release = DragRelease {
                dx: event.x - self.press.x,
                dy: event.y - self.press.y,
                pending_dx,
            };
            debug!(dx = release.dx, dy = release.dy, "Drag released");
            Some(release)
        } else {
            trace!("Pointer released without dragging");
            None
        }
    }

    /// Abandon any press or drag without reporting it
    pub fn cancel(&mut self) {
        self.phase = DragPhase::Idle;
        self.samples.reset();
    }
}

impl Default for DragTracker {
    fn default() -> Self {
        Self::new(100.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tracker_creation() {
        let tracker = DragTracker::default();
        assert_eq!(tracker.phase(), DragPhase::Idle);
        assert_eq!(tracker.pointer_position(), (0.0, 0.0));
    }

    #[test]
    fn test_press_then_small_move_stays_pressed() {
        let mut tracker = DragTracker::new(100.0);
        tracker.press(PointerEvent::new(500.0, 100.0, 0));
        assert_eq!(tracker.phase(), DragPhase::Pressed);

        let outcome = tracker.motion(PointerEvent::new(420.0, 100.0, 10), true);
        assert_eq!(outcome, MoveOutcome::Ignored);
        assert_eq!(tracker.phase(), DragPhase::Pressed);
        assert_eq!(tracker.pointer_position(), (420.0, 100.0));
    }

    #[test]
    fn test_threshold_starts_drag() {
        let mut tracker = DragTracker::new(100.0);
        tracker.press(PointerEvent::new(500.0, 100.0, 0));
        let outcome = tracker.motion(PointerEvent::new(390.0, 100.0, 10), true);
        assert_eq!(outcome, MoveOutcome::DragStarted);
        assert!(tracker.is_dragging());
        assert_eq!(tracker.samples().len(), 1);

        let outcome = tracker.motion(PointerEvent::new(380.0, 100.0, 20), true);
        assert_eq!(outcome, MoveOutcome::Sampled);
    }

    #[test]
    fn test_tick_delta_tracks_average() {
        let mut tracker = DragTracker::new(100.0);
        tracker.press(PointerEvent::new(500.0, 0.0, 0));
        tracker.motion(PointerEvent::new(380.0, 0.0, 10), true);

        // Single sample: average is its position, baseline is the press
        assert_eq!(tracker.tick_delta(16), -120.0);
        assert_eq!(tracker.tick_delta(32), 0.0);
    }

    #[test]
    fn test_release_reports_displacement() {
        let mut tracker = DragTracker::new(100.0);
        tracker.press(PointerEvent::new(500.0, 100.0, 0));
        tracker.motion(PointerEvent::new(300.0, 110.0, 10), true);

        let release = tracker.release(PointerEvent::new(250.0, 120.0, 30), true).unwrap();
        assert_eq!((release.dx, release.dy), (-250.0, 20.0));
        // Nothing was ticked yet: the whole smoothed motion is pending
        let average = tracker.samples().average(30).unwrap();
        assert_eq!(release.pending_dx, average - 500.0);
        assert_eq!(tracker.phase(), DragPhase::Idle);
    }

    #[test]
    fn test_tap_release_reports_nothing() {
        let mut tracker = DragTracker::new(100.0);
        tracker.press(PointerEvent::new(10.0, 10.0, 0));
        assert_eq!(tracker.release(PointerEvent::new(12.0, 10.0, 50), true), None);
        assert_eq!(tracker.phase(), DragPhase::Idle);
    }

    #[test]
    fn test_suppressed_sampling_keeps_bookkeeping() {
        let mut tracker = DragTracker::new(100.0);
        tracker.press(PointerEvent::new(500.0, 0.0, 0));
        let outcome = tracker.motion(PointerEvent::new(100.0, 0.0, 10), false);
        assert_eq!(outcome, MoveOutcome::Ignored);
        assert_eq!(tracker.phase(), DragPhase::Pressed);
        assert!(tracker.samples().is_empty());

        assert_eq!(tracker.release(PointerEvent::new(100.0, 0.0, 20), false), None);
        assert_eq!(tracker.phase(), DragPhase::Idle);
    }

    #[test]
    fn test_press_resets_samples() {
        let mut tracker = DragTracker::new(10.0);
        tracker.press(PointerEvent::new(0.0, 0.0, 0));
        tracker.motion(PointerEvent::new(50.0, 0.0, 10), true);
        tracker.release(PointerEvent::new(60.0, 0.0, 30), true);
        assert!(!tracker.samples().is_empty());

        tracker.press(PointerEvent::new(0.0, 0.0, 100));
        assert!(tracker.samples().is_empty());
    }
}
