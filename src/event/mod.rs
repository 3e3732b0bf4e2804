//! Scroller notifications and listener registration
//!
//! Events are delivered synchronously, on the caller's thread, to every
//! listener in registration order.

use serde::Serialize;
use tracing::{debug, trace};

use crate::layout::Rect;

/// Notification emitted by the scroller
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "kebab-case")]
pub enum ScrollerEvent<H> {
    /// An item was repositioned by a layout pass
    ItemMoved {
        /// Host handle of the item
        handle: H,
        /// Resulting geometry
        rect: Rect,
        /// `(x - clip_x) / clip_w`, clamped to `[-1, 1]`
        relative: f64,
    },
    /// A different item is now aligned with the viewport anchor
    PageChanged {
        /// Display index of the new current item
        index: usize,
    },
    /// A press turned into a drag
    DragStart,
    /// A drag ended
    DragStop {
        /// Horizontal displacement from press to release
        dx: f64,
        /// Vertical displacement from press to release
        dy: f64,
    },
    /// An animation session started
    AnimStart {
        /// Index current when the session started
        from: usize,
        /// Index the session converges toward
        to: usize,
    },
    /// The animation session ended, by arrival or cancellation
    AnimStop,
}

impl<H> ScrollerEvent<H> {
    /// Host-facing signal name
    pub fn name(&self) -> &'static str {
        match self {
            Self::ItemMoved { .. } => "item,moved",
            Self::PageChanged { .. } => "page,changed",
            Self::DragStart => "drag,start",
            Self::DragStop { .. } => "drag,stop",
            Self::AnimStart { .. } => "anim,start",
            Self::AnimStop => "anim,stop",
        }
    }
}

/// Anything that accepts scroller events
pub trait EventSink<H> {
    /// Deliver one event
    fn emit(&mut self, event: ScrollerEvent<H>);
}

impl<H> EventSink<H> for Vec<ScrollerEvent<H>> {
    fn emit(&mut self, event: ScrollerEvent<H>) {
        self.push(event);
    }
}

/// Boxed listener callback
pub type Listener<H> = Box<dyn FnMut(&ScrollerEvent<H>)>;

/// Token returned by [`EventListeners::subscribe`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

/// Registry of event listeners
pub struct EventListeners<H> {
    listeners: Vec<(ListenerId, Listener<H>)>,
    next_id: u64,
}

impl<H> EventListeners<H> {
    /// Create an empty registry
    pub fn new() -> Self {
        Self {
            listeners: Vec::new(),
            next_id: 0,
        }
    }

    /// Register a listener
    pub fn subscribe<F>(&mut self, listener: F) -> ListenerId
    where
        F: FnMut(&ScrollerEvent<H>) + 'static,
    {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.listeners.push((id, Box::new(listener)));
        debug!(listener = id.0, total = self.listeners.len(), "Listener registered");
        id
    }

    /// Remove a listener; returns false if it was not registered
    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(other, _)| *other != id);
        let removed = self.listeners.len() != before;
        if removed {
            debug!(listener = id.0, "Listener removed");
        }
        removed
    }

    /// Number of registered listeners
    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    /// True when nobody listens
    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }
}

impl<H> Default for EventListeners<H> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H> EventSink<H> for EventListeners<H> {
    fn emit(&mut self, event: ScrollerEvent<H>) {
        trace!(event = event.name(), "Emitting scroller event");
        for (_, listener) in &mut self.listeners {
            listener(&event);
        }
    }
}
