//! Carousel scroller facade
//!
//! `Scroller` owns the item ring, the drag tracker and the animation driver.
//! The host feeds it pointer events and calls [`Scroller::tick`] from its own
//! frame clock; the scroller answers with [`ScrollerEvent`]s delivered to the
//! registered listeners.

use std::time::Duration;

use tracing::{debug, info, warn};

use crate::animation::{self, AnimationDriver, AnimationTiming, ScrollPlan};
use crate::config::ScrollerConfig;
use crate::error::{Result, ScrollerError};
use crate::event::{EventListeners, EventSink, ListenerId, ScrollerEvent};
use crate::input::{DragPhase, DragTracker, MoveOutcome, PointerEvent};
use crate::layout::{self, LayoutOutcome, Rect, Viewport};
use crate::metrics::{ScrollMetrics, TickMetrics, Timer};
use crate::ring::{ItemHandle, Ring};

/// Circular page carousel
pub struct Scroller<H: ItemHandle> {
    config: ScrollerConfig,
    viewport: Viewport,
    ring: Ring<H>,
    looping: bool,
    freeze_depth: u32,
    drag: DragTracker,
    animation: AnimationDriver,
    listeners: EventListeners<H>,
    metrics: ScrollMetrics,
    tick_metrics: TickMetrics,
    /// Host clock in milliseconds, advanced by ticks and pointer timestamps
    clock_ms: u64,
}

impl<H: ItemHandle> Scroller<H> {
    /// Create an empty scroller showing items through `viewport`
    pub fn new(config: ScrollerConfig, viewport: Viewport) -> Self {
        info!(
            looping = config.looping,
            clip_x = viewport.x,
            clip_w = viewport.w,
            "Creating scroller"
        );
        Self {
            looping: config.looping,
            drag: DragTracker::new(config.drag_threshold_px),
            tick_metrics: TickMetrics::with_budget(config.tick_interval()),
            config,
            viewport,
            ring: Ring::new(),
            freeze_depth: 0,
            animation: AnimationDriver::new(),
            listeners: EventListeners::new(),
            metrics: ScrollMetrics::new(),
            clock_ms: 0,
        }
    }

    /// Tear the scroller down, handing every item handle back to the host
    pub fn destroy(mut self) -> Vec<H> {
        self.cancel_animation();
        self.drag.cancel();
        self.metrics.log_summary();
        self.tick_metrics.log_summary();
        let handles = self.ring.clear();
        for handle in &handles {
            handle.set_visible(false);
        }
        debug!(items = handles.len(), "Scroller destroyed");
        handles
    }

    // ----- items -----

    /// Append an item sized like the viewport; returns its index
    pub fn append(&mut self, handle: H) -> Result<usize> {
        self.append_with_size(handle, self.viewport.w, self.viewport.h)
    }

    /// Append an item with explicit size; returns its index
    pub fn append_with_size(&mut self, handle: H, w: f64, h: f64) -> Result<usize> {
        if !(w > 0.0 && w.is_finite()) || !(h >= 0.0 && h.is_finite()) {
            return Err(ScrollerError::InvalidArgument(format!(
                "item size {}x{} is not usable",
                w, h
            )));
        }
        if self.ring.find(&handle).is_some() {
            return Err(ScrollerError::InvalidArgument(format!(
                "handle {:?} already in the scroller",
                handle
            )));
        }

        let first = self.ring.is_empty();
        let rect = Rect::new(self.viewport.x, self.viewport.y, w, h);
        handle.set_visible(false);
        self.ring.append(handle, rect)?;
        let index = self.ring.len() - 1;
        debug!(index, count = self.ring.len(), "Item appended");

        self.relayout(0.0);
        if first {
            self.listeners.emit(ScrollerEvent::PageChanged { index: 0 });
        }
        debug_assert!(self.ring.is_closed());
        Ok(index)
    }

    /// Remove the item at `index`, returning its handle for disposal
    pub fn remove_at(&mut self, index: usize) -> Result<H> {
        if index >= self.ring.len() {
            return Err(ScrollerError::index_out_of_range(index, self.ring.len()));
        }
        let before = self.current_index();
        let current_removed = before == Some(index);

        // Geometry is about to change under the running session
        self.cancel_animation();
        let handle = self.ring.remove_at(index)?;
        handle.set_visible(false);
        debug!(index, count = self.ring.len(), "Item removed");

        if let Some(current) = self.ring.current() {
            let dx = if current_removed {
                let x = self.ring.get(current).map(|item| item.rect().x);
                self.viewport.x - x.unwrap_or(self.viewport.x)
            } else {
                0.0
            };
            let outcome = self.relayout(dx);
            let after = self.current_index();
            if outcome.page_changed.is_none() && after != before {
                if let Some(index) = after {
                    self.listeners.emit(ScrollerEvent::PageChanged { index });
                }
            }
        }
        debug_assert!(self.ring.is_closed());
        Ok(handle)
    }

    /// Remove the item carrying `handle`; returns the index it had
    pub fn remove_handle(&mut self, handle: &H) -> Result<usize> {
        let index = self
            .ring
            .index_of_handle(handle)
            .ok_or(ScrollerError::NotFound)?;
        self.remove_at(index)?;
        Ok(index)
    }

    /// Handle of the item at `index`
    pub fn item(&self, index: usize) -> Option<&H> {
        let id = self.ring.nth(index)?;
        self.ring.get(id).map(|item| item.handle())
    }

    /// Geometry of the item at `index` from the last layout pass
    pub fn item_geometry(&self, index: usize) -> Option<Rect> {
        let id = self.ring.nth(index)?;
        self.ring.get(id).map(|item| item.rect())
    }

    /// Whether the item at `index` was placed by the last layout pass
    pub fn item_visible(&self, index: usize) -> Option<bool> {
        let id = self.ring.nth(index)?;
        self.ring.get(id).map(|item| item.is_visible())
    }

    /// Number of items
    pub fn item_count(&self) -> usize {
        self.ring.len()
    }

    /// Display index of the item carrying `handle`
    pub fn item_index(&self, handle: &H) -> Option<usize> {
        self.ring.index_of_handle(handle)
    }

    /// Display index of the item on the viewport anchor
    pub fn current_index(&self) -> Option<usize> {
        self.ring.current().and_then(|id| self.ring.index_of(id))
    }

    /// Item handles in display order
    pub fn items(&self) -> impl Iterator<Item = &H> + '_ {
        self.ring.iter().map(|(_, item)| item.handle())
    }

    // ----- looping and locking -----

    /// Enable or disable wrapping at the ring ends
    ///
    /// Disabling re-lays the items out as a bounded line.
    pub fn set_looping(&mut self, looping: bool) {
        if self.looping == looping {
            return;
        }
        // A running session may have been planned across the wrap point
        self.cancel_animation();
        self.looping = looping;
        debug!(looping, "Loop mode changed");
        self.relayout(0.0);
    }

    /// Whether the ring wraps at its ends
    pub fn is_looping(&self) -> bool {
        self.looping
    }

    /// Disable scrolling; calls nest
    pub fn freeze(&mut self) {
        self.freeze_depth += 1;
        debug!(depth = self.freeze_depth, "Scroller frozen");
    }

    /// Undo one `freeze`
    pub fn thaw(&mut self) -> Result<()> {
        if self.freeze_depth == 0 {
            warn!("thaw called on a scroller that is not frozen");
            return Err(ScrollerError::InvalidArgument(
                "scroller is not frozen".to_string(),
            ));
        }
        self.freeze_depth -= 1;
        debug!(depth = self.freeze_depth, "Scroller thawed");
        Ok(())
    }

    /// Whether at least one freeze is active
    pub fn is_frozen(&self) -> bool {
        self.freeze_depth > 0
    }

    /// Number of unmatched `freeze` calls
    pub fn freeze_depth(&self) -> u32 {
        self.freeze_depth
    }

    // ----- navigation -----

    /// Animate to the item at `index` shifted by `offset` items
    ///
    /// Fails with `Busy` while frozen, while dragging, or when the running
    /// animation already converges to the same item.
    pub fn scroll_to(&mut self, index: usize, duration: Duration, offset: i64) -> Result<()> {
        if self.is_frozen() {
            warn!(index, "scroll_to rejected: scroller frozen");
            return Err(ScrollerError::Busy);
        }
        if self.drag.is_dragging() {
            warn!(index, "scroll_to rejected: drag in progress");
            return Err(ScrollerError::Busy);
        }
        let plan = animation::resolve_index(&self.ring, &self.viewport, self.looping, index, offset)?;
        if self.animation.target() == Some(plan.target) {
            debug!(to = plan.to, "Already animating to the requested item");
            return Err(ScrollerError::Busy);
        }
        self.start_animation(plan, duration);
        Ok(())
    }

    /// Animate to `index` with the short fast-scroll duration
    pub fn fast_scroll(&mut self, index: usize) -> Result<()> {
        let duration = Duration::from_millis(self.config.fast_scroll_duration_ms);
        self.scroll_to(index, duration, 0)
    }

    /// Move the item at `index` onto the anchor without animating
    pub fn jump_to(&mut self, index: usize) -> Result<()> {
        if self.is_frozen() {
            warn!(index, "jump_to rejected: scroller frozen");
            return Err(ScrollerError::Busy);
        }
        if self.ring.is_empty() {
            return Err(ScrollerError::Empty);
        }
        let id = self
            .ring
            .nth(index)
            .ok_or_else(|| ScrollerError::index_out_of_range(index, self.ring.len()))?;

        self.cancel_animation();
        let changed = self.ring.current() != Some(id);
        self.ring.set_current(id);
        let x = self.ring.get(id).map(|item| item.rect().x).unwrap_or(self.viewport.x);
        self.relayout(self.viewport.x - x);
        if changed {
            self.metrics.page_changes += 1;
            self.listeners.emit(ScrollerEvent::PageChanged { index });
        }
        debug!(index, "Jumped to item");
        Ok(())
    }

    /// Re-run layout and re-emit every item's geometry
    pub fn update(&mut self) {
        self.relayout(0.0);
    }

    /// Change the clip rectangle, keeping items at the same offset from it
    pub fn set_viewport(&mut self, viewport: Viewport) -> Result<()> {
        if !(viewport.w >= 0.0 && viewport.w.is_finite() && viewport.x.is_finite()) {
            return Err(ScrollerError::InvalidArgument(format!(
                "unusable viewport {:?}",
                viewport
            )));
        }
        let dx = viewport.x - self.viewport.x;
        self.viewport = viewport;
        debug!(clip_x = viewport.x, clip_w = viewport.w, "Viewport changed");
        self.relayout(dx);
        Ok(())
    }

    /// Current clip rectangle
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    // ----- pointer input -----

    /// Pointer pressed
    pub fn pointer_down(&mut self, event: PointerEvent) {
        self.sync_clock(event.timestamp_ms);
        self.drag.press(event);
    }

    /// Pointer moved
    pub fn pointer_move(&mut self, event: PointerEvent) {
        self.sync_clock(event.timestamp_ms);
        let sampling = !self.is_frozen() && !self.ring.is_empty();
        if self.drag.motion(event, sampling) == MoveOutcome::DragStarted {
            self.metrics.drags += 1;
            self.listeners.emit(ScrollerEvent::DragStart);
            self.cancel_animation();
        }
    }

    /// Pointer released; a finished drag snaps to the nearest or flicked item
    pub fn pointer_up(&mut self, event: PointerEvent) {
        self.sync_clock(event.timestamp_ms);
        let sampling = !self.is_frozen();
        let Some(release) = self.drag.release(event, sampling) else {
            return;
        };

        if !sampling {
            self.listeners.emit(ScrollerEvent::DragStop {
                dx: release.dx,
                dy: release.dy,
            });
            return;
        }

        // Apply what the last tick has not consumed yet
        if release.pending_dx != 0.0 {
            self.relayout(release.pending_dx);
        }
        self.listeners.emit(ScrollerEvent::DragStop {
            dx: release.dx,
            dy: release.dy,
        });

        match animation::resolve_release(
            &self.ring,
            &self.viewport,
            self.looping,
            release.dx,
            self.config.flick_threshold_px,
        ) {
            Ok(plan) => {
                let duration = Duration::from_millis(self.config.default_duration_ms);
                self.start_animation(plan, duration);
            }
            Err(err) => debug!(error = %err, "No snap after drag"),
        }
    }

    /// Phase of the drag state machine
    pub fn drag_phase(&self) -> DragPhase {
        self.drag.phase()
    }

    /// Whether a drag is in progress
    pub fn is_dragging(&self) -> bool {
        self.drag.is_dragging()
    }

    // ----- ticking -----

    /// Advance one frame; returns whether further ticks are needed
    ///
    /// While frozen, drag and animation motion pause and resume on thaw.
    pub fn tick(&mut self, dt: Duration) -> bool {
        let timer = Timer::start();
        self.clock_ms = self.clock_ms.saturating_add(dt.as_millis() as u64);
        self.metrics.ticks += 1;
        if !self.is_frozen() {
            self.advance_motion();
        }
        self.tick_metrics.record_tick(timer.stop());
        self.needs_tick()
    }

    fn advance_motion(&mut self) {
        if self.drag.is_dragging() {
            let dx = self.drag.tick_delta(self.clock_ms);
            if dx != 0.0 {
                self.relayout(dx);
            }
        } else if let Some(step) = self.animation.advance() {
            self.relayout(step.dx);
            if step.arrived {
                self.finish_animation();
            }
        }
    }

    /// Whether a drag or animation is waiting for ticks
    pub fn needs_tick(&self) -> bool {
        self.drag.is_dragging() || self.animation.is_running()
    }

    /// Whether an animation session is running
    pub fn is_animating(&self) -> bool {
        self.animation.is_running()
    }

    // ----- listeners and introspection -----

    /// Register an event listener
    pub fn subscribe<F>(&mut self, listener: F) -> ListenerId
    where
        F: FnMut(&ScrollerEvent<H>) + 'static,
    {
        self.listeners.subscribe(listener)
    }

    /// Remove an event listener
    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        self.listeners.unsubscribe(id)
    }

    /// Counters kept since creation
    pub fn metrics(&self) -> &ScrollMetrics {
        &self.metrics
    }

    /// Time spent inside `tick`
    pub fn tick_metrics(&self) -> &TickMetrics {
        &self.tick_metrics
    }

    /// Configuration the scroller was built with
    pub fn config(&self) -> &ScrollerConfig {
        &self.config
    }

    /// Milliseconds on the scroller's clock
    pub fn clock_ms(&self) -> u64 {
        self.clock_ms
    }

    // ----- internals -----

    fn relayout(&mut self, dx: f64) -> LayoutOutcome {
        let outcome = layout::layout(
            &mut self.ring,
            &self.viewport,
            dx,
            self.looping,
            &mut self.listeners,
        );
        if let Some(index) = outcome.page_changed {
            self.metrics.page_changes += 1;
            debug!(index, "Page changed");
        }
        outcome
    }

    fn sync_clock(&mut self, timestamp_ms: u64) {
        self.clock_ms = self.clock_ms.max(timestamp_ms);
    }

    fn timing(&self) -> AnimationTiming {
        AnimationTiming {
            tick_interval: self.config.tick_interval(),
            min_step_px: self.config.min_step_px,
        }
    }

    fn start_animation(&mut self, plan: ScrollPlan, duration: Duration) {
        self.cancel_animation();
        let from = self.current_index().unwrap_or(0);
        let timing = self.timing();
        if self.animation.start(&plan, from, duration, timing).is_some() {
            self.ring.set_target(Some(plan.target));
            self.metrics.animations_started += 1;
            self.listeners
                .emit(ScrollerEvent::AnimStart { from, to: plan.to });
        }
    }

    fn cancel_animation(&mut self) {
        if let Some(session) = self.animation.stop() {
            self.ring.set_target(None);
            self.metrics.animations_cancelled += 1;
            debug!(from = session.from, to = session.to, "Animation cancelled");
            self.listeners.emit(ScrollerEvent::AnimStop);
        }
    }

    fn finish_animation(&mut self) {
        let Some(session) = self.animation.stop() else {
            return;
        };
        let target = session.target();

        // Land exactly on the anchor, whatever rounding the steps left behind
        if self.ring.current() != Some(target) {
            self.ring.set_current(target);
            if let Some(index) = self.ring.index_of(target) {
                self.metrics.page_changes += 1;
                self.listeners.emit(ScrollerEvent::PageChanged { index });
            }
        }
        let x = self.ring.get(target).map(|item| item.rect().x);
        let correction = self.viewport.x - x.unwrap_or(self.viewport.x);
        self.relayout(correction);

        self.ring.set_target(None);
        self.metrics.animations_completed += 1;
        debug!(from = session.from, to = session.to, "Animation arrived");
        self.listeners.emit(ScrollerEvent::AnimStop);
    }
}

impl<H: ItemHandle> Default for Scroller<H> {
    fn default() -> Self {
        Self::new(ScrollerConfig::default(), Viewport::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    const TICK: Duration = Duration::from_millis(16);

    fn scroller(n: u32) -> Scroller<u32> {
        let mut scroller = Scroller::new(
            ScrollerConfig::default(),
            Viewport::new(0.0, 0.0, 800.0, 300.0),
        );
        for handle in 0..n {
            scroller.append_with_size(handle, 200.0, 300.0).unwrap();
        }
        scroller
    }

    fn record(scroller: &mut Scroller<u32>) -> Rc<RefCell<Vec<ScrollerEvent<u32>>>> {
        let log = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&log);
        scroller.subscribe(move |event| sink.borrow_mut().push(event.clone()));
        log
    }

    fn settle(scroller: &mut Scroller<u32>) -> usize {
        let mut ticks = 0;
        while scroller.tick(TICK) {
            ticks += 1;
            assert!(ticks < 1000, "animation never settled");
        }
        ticks
    }

    #[test]
    fn test_first_append_becomes_current() {
        let mut scroller = Scroller::new(
            ScrollerConfig::default(),
            Viewport::new(0.0, 0.0, 800.0, 300.0),
        );
        let log = record(&mut scroller);
        assert_eq!(scroller.current_index(), None);

        assert_eq!(scroller.append(7), Ok(0));
        assert_eq!(scroller.current_index(), Some(0));
        assert_eq!(scroller.item_geometry(0), Some(Rect::new(0.0, 0.0, 800.0, 300.0)));
        assert!(log
            .borrow()
            .contains(&ScrollerEvent::PageChanged { index: 0 }));
    }

    #[test]
    fn test_append_rejects_bad_input() {
        let mut scroller = scroller(2);
        assert!(matches!(
            scroller.append_with_size(9, 0.0, 10.0),
            Err(ScrollerError::InvalidArgument(_))
        ));
        assert!(matches!(
            scroller.append(1),
            Err(ScrollerError::InvalidArgument(_))
        ));
        assert_eq!(scroller.item_count(), 2);
    }

    #[test]
    fn test_queries() {
        let scroller = scroller(3);
        assert_eq!(scroller.item(2), Some(&2));
        assert_eq!(scroller.item(3), None);
        assert_eq!(scroller.item_index(&1), Some(1));
        assert_eq!(scroller.items().copied().collect::<Vec<_>>(), vec![0, 1, 2]);
    }

    #[test]
    fn test_thaw_without_freeze() {
        let mut scroller = scroller(1);
        assert!(matches!(
            scroller.thaw(),
            Err(ScrollerError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_animation_events_and_metrics() {
        let mut scroller = scroller(5);
        let log = record(&mut scroller);

        scroller.scroll_to(2, Duration::from_millis(160), 0).unwrap();
        assert!(scroller.is_animating());
        settle(&mut scroller);

        assert_eq!(scroller.current_index(), Some(2));
        let events = log.borrow();
        assert_eq!(events.first(), Some(&ScrollerEvent::AnimStart { from: 0, to: 2 }));
        assert_eq!(events.last(), Some(&ScrollerEvent::AnimStop));
        assert_eq!(scroller.metrics().animations_completed, 1);
        assert_eq!(scroller.metrics().page_changes, 2);
    }

    #[test]
    fn test_same_target_is_busy() {
        let mut scroller = scroller(5);
        scroller.scroll_to(2, Duration::from_millis(300), 0).unwrap();
        assert_eq!(
            scroller.scroll_to(2, Duration::from_millis(300), 0),
            Err(ScrollerError::Busy)
        );
        // A different target replaces the session
        let log = record(&mut scroller);
        scroller.scroll_to(4, Duration::from_millis(300), 0).unwrap();
        assert_eq!(
            log.borrow()[..2],
            [ScrollerEvent::AnimStop, ScrollerEvent::AnimStart { from: 0, to: 4 }]
        );
        assert_eq!(scroller.metrics().animations_cancelled, 1);
    }

    #[test]
    fn test_scroll_to_current_is_noop() {
        let mut scroller = scroller(3);
        let log = record(&mut scroller);
        assert_eq!(scroller.scroll_to(0, Duration::from_millis(300), 0), Ok(()));
        assert!(!scroller.is_animating());
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn test_remove_current_realigns_head() {
        let mut scroller = scroller(4);
        scroller.jump_to(2).unwrap();
        let log = record(&mut scroller);

        assert_eq!(scroller.remove_at(2), Ok(2));
        assert_eq!(scroller.current_index(), Some(0));
        assert_eq!(scroller.item_geometry(0).unwrap().x, 0.0);
        assert!(log
            .borrow()
            .contains(&ScrollerEvent::PageChanged { index: 0 }));
    }

    #[test]
    fn test_remove_before_current_reports_new_index() {
        let mut scroller = scroller(4);
        scroller.jump_to(2).unwrap();
        let log = record(&mut scroller);

        scroller.remove_handle(&0).unwrap();
        assert_eq!(scroller.current_index(), Some(1));
        assert_eq!(scroller.item(1), Some(&2));
        assert!(log
            .borrow()
            .contains(&ScrollerEvent::PageChanged { index: 1 }));
    }

    #[test]
    fn test_remove_cancels_animation() {
        let mut scroller = scroller(5);
        scroller.scroll_to(3, Duration::from_millis(300), 0).unwrap();
        scroller.remove_at(3).unwrap();
        assert!(!scroller.is_animating());
        assert!(scroller.ring.target().is_none());
    }

    #[test]
    fn test_remove_errors_leave_state() {
        let mut scroller = scroller(3);
        assert!(matches!(
            scroller.remove_at(3),
            Err(ScrollerError::InvalidArgument(_))
        ));
        assert_eq!(scroller.remove_handle(&42), Err(ScrollerError::NotFound));
        assert_eq!(scroller.item_count(), 3);
    }

    #[test]
    fn test_remove_all_items() {
        let mut scroller = scroller(2);
        scroller.remove_at(0).unwrap();
        scroller.remove_at(0).unwrap();
        assert_eq!(scroller.current_index(), None);
        assert_eq!(scroller.jump_to(0), Err(ScrollerError::Empty));
        assert_eq!(
            scroller.scroll_to(0, Duration::ZERO, 0),
            Err(ScrollerError::Empty)
        );
    }

    #[test]
    fn test_loop_toggle_cancels_animation() {
        let mut scroller = scroller(5);
        scroller.scroll_to(4, Duration::from_millis(160), 0).unwrap();
        scroller.tick(TICK);
        let log = record(&mut scroller);

        scroller.set_looping(false);
        assert!(!scroller.is_animating());
        assert!(scroller.ring.target().is_none());
        assert_eq!(log.borrow().first(), Some(&ScrollerEvent::AnimStop));
        assert_eq!(scroller.metrics().animations_cancelled, 1);

        let current = scroller.current_index().unwrap();
        assert_eq!(scroller.item_visible(current), Some(true));
        assert_eq!(scroller.item_geometry(current).unwrap().x, 0.0);
    }

    #[test]
    fn test_ticks_are_timed() {
        let mut scroller = scroller(3);
        assert_eq!(scroller.tick_metrics().budget(), Duration::from_millis(16));
        for _ in 0..4 {
            scroller.tick(TICK);
        }
        assert_eq!(scroller.tick_metrics().tick_count(), 4);
        assert_eq!(scroller.metrics().ticks, 4);
    }

    #[test]
    fn test_frozen_tick_pauses_animation() {
        let mut scroller = scroller(5);
        scroller.scroll_to(1, Duration::from_millis(160), 0).unwrap();
        scroller.tick(TICK);
        let x = scroller.item_geometry(0).unwrap().x;

        scroller.freeze();
        assert!(scroller.tick(TICK));
        assert_eq!(scroller.item_geometry(0).unwrap().x, x);

        scroller.thaw().unwrap();
        settle(&mut scroller);
        assert_eq!(scroller.current_index(), Some(1));
    }

    #[test]
    fn test_set_viewport_keeps_offset() {
        let mut scroller = scroller(3);
        scroller
            .set_viewport(Viewport::new(50.0, 20.0, 600.0, 300.0))
            .unwrap();
        let rect = scroller.item_geometry(0).unwrap();
        assert_eq!((rect.x, rect.y), (50.0, 20.0));
        assert_eq!(scroller.current_index(), Some(0));

        assert!(scroller
            .set_viewport(Viewport::new(0.0, 0.0, f64::NAN, 0.0))
            .is_err());
    }

    #[test]
    fn test_destroy_returns_handles() {
        let mut scroller = scroller(3);
        scroller.scroll_to(1, Duration::from_millis(300), 0).unwrap();
        assert_eq!(scroller.destroy(), vec![0, 1, 2]);
    }
}
