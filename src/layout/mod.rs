//! Layout system for positioning carousel items around the viewport
//!
//! A layout pass shifts the current item by a pixel delta, lays its
//! neighbours out left and right until the viewport is covered, and reports
//! which item now sits on the viewport anchor (`clip_x`).

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::event::{EventSink, ScrollerEvent};
use crate::ring::{ItemHandle, ItemId, Ring};

/// Item geometry in canvas pixels
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    /// Left edge
    pub x: f64,
    /// Top edge
    pub y: f64,
    /// Width
    pub w: f64,
    /// Height
    pub h: f64,
}

impl Rect {
    /// Create a rect from origin and size
    pub fn new(x: f64, y: f64, w: f64, h: f64) -> Self {
        Self { x, y, w, h }
    }

    /// Right edge
    pub fn right(&self) -> f64 {
        self.x + self.w
    }

    /// Whether `x` falls inside the half-open span `[left, right)`
    pub fn spans(&self, x: f64) -> bool {
        self.x <= x && x < self.right()
    }
}

/// Visible window through which items appear
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    /// Clip origin (the anchor items snap to)
    pub x: f64,
    /// Clip top
    pub y: f64,
    /// Clip width
    pub w: f64,
    /// Clip height
    pub h: f64,
}

impl Viewport {
    /// Create a viewport from origin and size
    pub fn new(x: f64, y: f64, w: f64, h: f64) -> Self {
        Self { x, y, w, h }
    }

    /// Right edge of the clip
    pub fn right(&self) -> f64 {
        self.x + self.w
    }

    /// Position of `x` relative to the clip, clamped to `[-1, 1]`
    pub fn relative(&self, x: f64) -> f64 {
        if self.w > 0.0 {
            ((x - self.x) / self.w).clamp(-1.0, 1.0)
        } else {
            0.0
        }
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(0.0, 0.0, 400.0, 150.0)
    }
}

/// Result of a layout pass
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LayoutOutcome {
    /// Number of items placed (and shown)
    pub placed: usize,
    /// New current index, when the pass moved the anchor to another item
    pub page_changed: Option<usize>,
}

/// Shift the current item by `dx` and lay the ring out around the viewport
///
/// Without looping the walk never wraps past the head or tail, the head may
/// not move right of the anchor and the tail may not move left of it.
pub fn layout<H, S>(
    ring: &mut Ring<H>,
    viewport: &Viewport,
    dx: f64,
    looping: bool,
    sink: &mut S,
) -> LayoutOutcome
where
    H: ItemHandle,
    S: EventSink<H>,
{
    let (Some(current), Some(head), Some(tail)) = (ring.current(), ring.head(), ring.tail())
    else {
        return LayoutOutcome::default();
    };
    let count = ring.len();
    let bx = viewport.x;

    let mut cx = width_and_x(ring, current).1 + dx;
    if !looping {
        let (before, through_tail) = bounded_reach(ring, current, tail);
        cx = cx.clamp(bx - through_tail, bx + before);
    }

    let pass = ring.begin_pass();
    let mut placer = Placer {
        ring,
        viewport,
        sink,
        pass,
        anchor: None,
        placed: 0,
    };
    placer.place(current, cx);
    let cw = placer.width(current);

    match count {
        1 => {}
        2 => {
            // Single neighbour: put it on whichever side shows a gap
            let other = placer.ring.next(current).unwrap_or(current);
            let left_ok = looping || current != head;
            let right_ok = looping || current != tail;
            if (cx > bx && left_ok) || !right_ok {
                let x = cx - placer.width(other);
                placer.place(other, x);
            } else {
                placer.place(other, cx + cw);
            }
        }
        _ => {
            let mut left = current;
            let mut right = current;
            let mut left_x = cx;
            let mut right_x = cx + cw;

            while placer.placed < count {
                let gap_right = if looping || right != tail {
                    viewport.right() - right_x
                } else {
                    0.0
                };
                let gap_left = if looping || left != head {
                    left_x - bx
                } else {
                    0.0
                };
                if gap_right <= 0.0 && gap_left <= 0.0 {
                    break;
                }

                if gap_right >= gap_left {
                    let Some(next) = placer.ring.next(right) else { break };
                    placer.place(next, right_x);
                    right_x += placer.width(next);
                    right = next;
                } else {
                    let Some(prev) = placer.ring.prev(left) else { break };
                    left_x -= placer.width(prev);
                    placer.place(prev, left_x);
                    left = prev;
                }
            }
        }
    }

    let Placer {
        ring,
        sink,
        anchor,
        placed,
        ..
    } = placer;

    for handle in ring.hide_unplaced(pass) {
        handle.set_visible(false);
    }

    let mut outcome = LayoutOutcome {
        placed,
        page_changed: None,
    };
    if let Some((id, _)) = anchor {
        if id != current {
            ring.set_current(id);
            if let Some(index) = ring.index_of(id) {
                trace!(index, "Anchor moved to a new item");
                sink.emit(ScrollerEvent::PageChanged { index });
                outcome.page_changed = Some(index);
            }
        }
    }
    outcome
}

/// Widths left of `current`, and from `current` up to (not including) the tail
///
/// Keeping `current.x` within `[bx - through_tail, bx + before]` keeps the
/// head at or left of `bx` and the tail at or right of it.
fn bounded_reach<H: ItemHandle>(ring: &Ring<H>, current: ItemId, tail: ItemId) -> (f64, f64) {
    let mut before = 0.0;
    let mut through_tail = 0.0;
    let mut reached = false;
    for (id, item) in ring.iter() {
        reached |= id == current;
        if id == tail {
            break;
        }
        if reached {
            through_tail += item.rect().w;
        } else {
            before += item.rect().w;
        }
    }
    (before, through_tail)
}

fn width_and_x<H: ItemHandle>(ring: &Ring<H>, id: ItemId) -> (f64, f64) {
    ring.get(id)
        .map(|item| (item.rect().w, item.rect().x))
        .unwrap_or_default()
}

struct Placer<'a, H, S> {
    ring: &'a mut Ring<H>,
    viewport: &'a Viewport,
    sink: &'a mut S,
    pass: u64,
    /// Item spanning the anchor; the flag marks an exact hit on `clip_x`
    anchor: Option<(ItemId, bool)>,
    placed: usize,
}

impl<'a, H: ItemHandle, S: EventSink<H>> Placer<'a, H, S> {
    fn width(&self, id: ItemId) -> f64 {
        width_and_x(self.ring, id).0
    }

    fn place(&mut self, id: ItemId, x: f64) {
        let Some(item) = self.ring.get(id) else { return };
        let handle = item.handle().clone();
        let rect = Rect::new(x, self.viewport.y, item.rect().w, item.rect().h);

        if self.ring.stamp(id, self.pass, rect) {
            handle.set_visible(true);
        }
        handle.move_resize(rect);
        self.placed += 1;

        let bx = self.viewport.x;
        if x == bx {
            self.anchor = Some((id, true));
        } else if rect.spans(bx) && !matches!(self.anchor, Some((_, true))) {
            self.anchor = Some((id, false));
        }

        self.sink.emit(ScrollerEvent::ItemMoved {
            handle,
            rect,
            relative: self.viewport.relative(x),
        });
    }
}
