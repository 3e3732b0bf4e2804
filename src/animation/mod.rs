//! Snap animations between carousel items
//!
//! A scroll request is resolved into a [`ScrollPlan`]: the target item and the
//! signed pixel distance that brings it onto the viewport anchor. The
//! [`AnimationDriver`] turns a plan into a session with a fixed per-tick step
//! and feeds those steps to the layout pass until the distance is used up.

use std::time::Duration;

use tracing::debug;

use crate::error::{Result, ScrollerError};
use crate::layout::Viewport;
use crate::ring::{ItemHandle, ItemId, Ring};

/// Resolved scroll request
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollPlan {
    /// Item that ends up on the anchor
    pub target: ItemId,
    /// Display index of the target
    pub to: usize,
    /// Signed pixel distance to apply (negative moves items left)
    pub delta: f64,
}

/// Plan a scroll to `index`, shifted by `offset` whole items
///
/// Looping rings take the directionally shorter path (ties go forward) and
/// wrap the shifted index; bounded rings clamp it and never wrap.
pub fn resolve_index<H: ItemHandle>(
    ring: &Ring<H>,
    viewport: &Viewport,
    looping: bool,
    index: usize,
    offset: i64,
) -> Result<ScrollPlan> {
    let count = ring.len();
    let current = ring.current().ok_or(ScrollerError::Empty)?;
    if index >= count {
        return Err(ScrollerError::index_out_of_range(index, count));
    }
    let from = ring.index_of(current).ok_or(ScrollerError::NotFound)?;

    let n = count as i64;
    let shifted = index as i64 + offset;
    let to = if looping {
        shifted.rem_euclid(n)
    } else {
        shifted.clamp(0, n - 1)
    };

    let (forward, hops) = if looping {
        let ahead = (to - from as i64).rem_euclid(n);
        let behind = (from as i64 - to).rem_euclid(n);
        if ahead <= behind {
            (true, ahead)
        } else {
            (false, behind)
        }
    } else if to >= from as i64 {
        (true, to - from as i64)
    } else {
        (false, from as i64 - to)
    };

    Ok(plan_hops(ring, viewport, current, forward, hops as usize))
}

/// Plan the snap that follows a drag release
///
/// A flick (`|net_dx| > flick_threshold`) targets the neighbour in the flick
/// direction; otherwise the item whose left edge is nearest the anchor wins.
pub fn resolve_release<H: ItemHandle>(
    ring: &Ring<H>,
    viewport: &Viewport,
    looping: bool,
    net_dx: f64,
    flick_threshold: f64,
) -> Result<ScrollPlan> {
    let current = ring.current().ok_or(ScrollerError::Empty)?;
    let rect = ring.get(current).ok_or(ScrollerError::NotFound)?.rect();
    let bx = viewport.x;
    let can_forward = looping || Some(current) != ring.tail();
    let can_back = looping || Some(current) != ring.head();

    let (forward, hops) = if net_dx < -flick_threshold {
        // Content moved left: bring in the item on the right
        (true, usize::from(can_forward))
    } else if net_dx > flick_threshold {
        if rect.x < bx {
            (true, 0)
        } else {
            (false, usize::from(can_back))
        }
    } else if rect.x < bx && bx - rect.x > rect.w / 2.0 && can_forward {
        (true, 1)
    } else {
        (true, 0)
    };

    Ok(plan_hops(ring, viewport, current, forward, hops))
}

fn plan_hops<H: ItemHandle>(
    ring: &Ring<H>,
    viewport: &Viewport,
    from: ItemId,
    forward: bool,
    hops: usize,
) -> ScrollPlan {
    let width = |id: ItemId| ring.get(id).map(|item| item.rect().w).unwrap_or(0.0);
    let start_x = ring.get(from).map(|item| item.rect().x).unwrap_or(viewport.x);

    let mut delta = viewport.x - start_x;
    let mut target = from;
    for _ in 0..hops {
        if forward {
            delta -= width(target);
            target = ring.next(target).unwrap_or(target);
        } else {
            target = ring.prev(target).unwrap_or(target);
            delta += width(target);
        }
    }

    ScrollPlan {
        target,
        to: ring.index_of(target).unwrap_or(0),
        delta,
    }
}

/// Running animation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimationSession {
    /// Index current when the session started
    pub from: usize,
    /// Index of the target item
    pub to: usize,
    target: ItemId,
    step: f64,
    remaining: f64,
}

impl AnimationSession {
    /// Item the session converges toward
    pub fn target(&self) -> ItemId {
        self.target
    }

    /// Signed pixels applied per tick
    pub fn step(&self) -> f64 {
        self.step
    }

    /// Signed pixels left to apply
    pub fn remaining(&self) -> f64 {
        self.remaining
    }
}

/// One tick's worth of motion
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimationStep {
    /// Signed pixels to apply this tick
    pub dx: f64,
    /// True when this step uses up the remaining distance
    pub arrived: bool,
}

/// Timing parameters shared by every session
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimationTiming {
    /// Nominal tick period
    pub tick_interval: Duration,
    /// Smallest step a session may take
    pub min_step_px: f64,
}

/// Stopped/Running animation state
#[derive(Debug, Clone, Default)]
pub struct AnimationDriver {
    session: Option<AnimationSession>,
}

impl AnimationDriver {
    /// Create a stopped driver
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a session is running
    pub fn is_running(&self) -> bool {
        self.session.is_some()
    }

    /// The running session, if any
    pub fn session(&self) -> Option<&AnimationSession> {
        self.session.as_ref()
    }

    /// Target of the running session
    pub fn target(&self) -> Option<ItemId> {
        self.session.map(|session| session.target)
    }

    /// Start a session for `plan`; a zero-distance plan starts nothing
    ///
    /// The per-tick step is the distance scaled by `tick / duration`, no
    /// smaller than `min_step_px` and no larger than the distance itself.
    /// Callers stop any previous session first.
    pub fn start(
        &mut self,
        plan: &ScrollPlan,
        from: usize,
        duration: Duration,
        timing: AnimationTiming,
    ) -> Option<&AnimationSession> {
        debug_assert!(self.session.is_none(), "sessions must not overlap");
        if plan.delta == 0.0 {
            debug!(to = plan.to, "Scroll target already aligned");
            return None;
        }

        let distance = plan.delta.abs();
        let scaled = if duration.is_zero() {
            distance
        } else {
            distance * timing.tick_interval.as_nanos() as f64 / duration.as_nanos() as f64
        };
        let magnitude = scaled.max(timing.min_step_px).min(distance);

        self.session = Some(AnimationSession {
            from,
            to: plan.to,
            target: plan.target,
            step: magnitude.copysign(plan.delta),
            remaining: plan.delta,
        });
        debug!(from, to = plan.to, delta = plan.delta, step = magnitude, "Animation started");
        self.session.as_ref()
    }

    /// Take the next step of the running session
    pub fn advance(&mut self) -> Option<AnimationStep> {
        let session = self.session.as_mut()?;
        if session.remaining.abs() <= session.step.abs() {
            let dx = session.remaining;
            session.remaining = 0.0;
            Some(AnimationStep { dx, arrived: true })
        } else {
            session.remaining -= session.step;
            Some(AnimationStep {
                dx: session.step,
                arrived: false,
            })
        }
    }

    /// End the running session, returning it if there was one
    pub fn stop(&mut self) -> Option<AnimationSession> {
        self.session.take()
    }
}
