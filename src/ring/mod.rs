//! Item ring for the carousel
//!
//! Items live in an arena addressed by stable [`ItemId`] slot indices and are
//! linked into a circular doubly-linked sequence through explicit `next` /
//! `prev` fields. Freed slots are reused by later appends.

use std::fmt;

use tracing::trace;

use crate::error::{Result, ScrollerError};
use crate::layout::Rect;

/// Visual primitives the host exposes for every carousel item
///
/// The ring only stores a clone of the handle; the visual object behind it
/// stays owned by the host. Both primitives default to no-ops so plain ids
/// can be used as handles.
pub trait ItemHandle: Clone + PartialEq + fmt::Debug {
    /// Apply new geometry to the visual object
    fn move_resize(&self, _rect: Rect) {}

    /// Show or hide the visual object
    fn set_visible(&self, _visible: bool) {}
}

macro_rules! plain_handle {
    ($($ty:ty),*) => {
        $(impl ItemHandle for $ty {})*
    };
}

plain_handle!(u16, u32, u64, usize, i32, i64, String, &'static str);

/// Stable arena slot of an item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ItemId(usize);

/// A carousel item: host handle plus cached geometry
#[derive(Debug, Clone)]
pub struct Item<H> {
    handle: H,
    rect: Rect,
    visible: bool,
    pass: u64,
}

impl<H> Item<H> {
    /// Host handle of this item
    pub fn handle(&self) -> &H {
        &self.handle
    }

    /// Last geometry assigned by a layout pass
    pub fn rect(&self) -> Rect {
        self.rect
    }

    /// Whether the last layout pass placed this item
    pub fn is_visible(&self) -> bool {
        self.visible
    }
}

#[derive(Debug)]
struct Node<H> {
    item: Item<H>,
    next: ItemId,
    prev: ItemId,
}

/// Circular sequence of items with `current` and `target` cursors
#[derive(Debug)]
pub struct Ring<H> {
    slots: Vec<Option<Node<H>>>,
    free: Vec<usize>,
    head: Option<ItemId>,
    current: Option<ItemId>,
    target: Option<ItemId>,
    count: usize,
    pass: u64,
}

impl<H> Default for Ring<H> {
    fn default() -> Self {
        Self {
            slots: Vec::new(),
            free: Vec::new(),
            head: None,
            current: None,
            target: None,
            count: 0,
            pass: 0,
        }
    }
}

impl<H: ItemHandle> Ring<H> {
    /// Create an empty ring
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of items
    pub fn len(&self) -> usize {
        self.count
    }

    /// True when the ring has no items
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// First item in display order
    pub fn head(&self) -> Option<ItemId> {
        self.head
    }

    /// Last item in display order
    pub fn tail(&self) -> Option<ItemId> {
        self.head.and_then(|head| self.prev(head))
    }

    /// Item aligned with the viewport anchor
    pub fn current(&self) -> Option<ItemId> {
        self.current
    }

    /// Item a running animation converges toward
    pub fn target(&self) -> Option<ItemId> {
        self.target
    }

    pub(crate) fn set_current(&mut self, id: ItemId) {
        if self.node(id).is_some() {
            self.current = Some(id);
        }
    }

    pub(crate) fn set_target(&mut self, id: Option<ItemId>) {
        self.target = id.filter(|id| self.node(*id).is_some());
    }

    /// Look up an item by id
    pub fn get(&self, id: ItemId) -> Option<&Item<H>> {
        self.node(id).map(|node| &node.item)
    }

    pub(crate) fn get_mut(&mut self, id: ItemId) -> Option<&mut Item<H>> {
        self.slots
            .get_mut(id.0)
            .and_then(|slot| slot.as_mut())
            .map(|node| &mut node.item)
    }

    /// Following neighbour (wraps from tail to head)
    pub fn next(&self, id: ItemId) -> Option<ItemId> {
        self.node(id).map(|node| node.next)
    }

    /// Preceding neighbour (wraps from head to tail)
    pub fn prev(&self, id: ItemId) -> Option<ItemId> {
        self.node(id).map(|node| node.prev)
    }

    /// Insert an item before the head, i.e. at the end of display order
    pub fn append(&mut self, handle: H, rect: Rect) -> Result<ItemId> {
        let slot = match self.free.pop() {
            Some(slot) => slot,
            None => {
                self.slots
                    .try_reserve(1)
                    .map_err(|_| ScrollerError::ResourceExhausted)?;
                self.slots.push(None);
                self.slots.len() - 1
            }
        };
        let id = ItemId(slot);
        let item = Item {
            handle,
            rect,
            visible: false,
            pass: 0,
        };

        match self.head {
            None => {
                self.slots[slot] = Some(Node {
                    item,
                    next: id,
                    prev: id,
                });
                self.head = Some(id);
                self.current = Some(id);
            }
            Some(head) => {
                let tail = self.prev(head).unwrap_or(head);
                self.slots[slot] = Some(Node {
                    item,
                    next: head,
                    prev: tail,
                });
                self.link_next(tail, id);
                self.link_prev(head, id);
            }
        }
        self.count += 1;

        trace!(slot, count = self.count, "Item appended to ring");
        Ok(id)
    }

    /// Remove the item at a display index and hand its handle back
    pub fn remove_at(&mut self, index: usize) -> Result<H> {
        let id = self
            .nth(index)
            .ok_or_else(|| ScrollerError::index_out_of_range(index, self.count))?;
        self.unlink(id)
    }

    /// Remove the item carrying `handle`, returning its former index
    pub fn remove_handle(&mut self, handle: &H) -> Result<usize> {
        let index = self.index_of_handle(handle).ok_or(ScrollerError::NotFound)?;
        self.remove_at(index)?;
        Ok(index)
    }

    fn unlink(&mut self, id: ItemId) -> Result<H> {
        // Reserve first so a failed allocation leaves the ring untouched
        self.free
            .try_reserve(1)
            .map_err(|_| ScrollerError::ResourceExhausted)?;

        let node = self.slots[id.0].take().ok_or(ScrollerError::NotFound)?;
        self.count -= 1;

        if self.count == 0 {
            self.head = None;
            self.current = None;
            self.target = None;
        } else {
            self.link_next(node.prev, node.next);
            self.link_prev(node.next, node.prev);
            if self.head == Some(id) {
                self.head = Some(node.next);
            }
            if self.current == Some(id) {
                self.current = self.head;
            }
            if self.target == Some(id) {
                self.target = self.head;
            }
        }
        self.free.push(id.0);

        trace!(slot = id.0, count = self.count, "Item removed from ring");
        Ok(node.item.handle)
    }

    /// Item at a display index (O(n))
    pub fn nth(&self, index: usize) -> Option<ItemId> {
        if index >= self.count {
            return None;
        }
        self.iter().nth(index).map(|(id, _)| id)
    }

    /// Item carrying `handle` (O(n))
    pub fn find(&self, handle: &H) -> Option<ItemId> {
        self.iter()
            .find(|(_, item)| item.handle == *handle)
            .map(|(id, _)| id)
    }

    /// Display index of an item (O(n))
    pub fn index_of(&self, id: ItemId) -> Option<usize> {
        self.iter().position(|(other, _)| other == id)
    }

    /// Display index of the item carrying `handle` (O(n))
    pub fn index_of_handle(&self, handle: &H) -> Option<usize> {
        self.iter().position(|(_, item)| item.handle == *handle)
    }

    /// Walk all items from the head in display order
    pub fn iter(&self) -> RingIter<'_, H> {
        RingIter {
            ring: self,
            next: self.head,
            remaining: self.count,
        }
    }

    /// Drop every item, returning the handles for the host to dispose of
    pub fn clear(&mut self) -> Vec<H> {
        let mut handles = Vec::with_capacity(self.count);
        let mut cursor = self.head;
        for _ in 0..self.count {
            let Some(id) = cursor else { break };
            cursor = self.next(id);
            if let Some(node) = self.slots[id.0].take() {
                handles.push(node.item.handle);
            }
        }
        *self = Self {
            pass: self.pass,
            ..Self::default()
        };
        handles
    }

    /// Check that following `next` exactly `len()` times from any node
    /// returns to that node, and that `prev` mirrors `next`
    pub fn is_closed(&self) -> bool {
        let mut seen = 0;
        for (slot, node) in self.slots.iter().enumerate() {
            let Some(node) = node else { continue };
            seen += 1;
            let start = ItemId(slot);
            if self.prev(node.next) != Some(start) {
                return false;
            }
            let mut cursor = start;
            for _ in 0..self.count {
                match self.next(cursor) {
                    Some(next) => cursor = next,
                    None => return false,
                }
            }
            if cursor != start {
                return false;
            }
        }
        seen == self.count && (self.count == 0) == self.head.is_none()
    }

    /// Start a new layout pass and return its stamp
    pub(crate) fn begin_pass(&mut self) -> u64 {
        self.pass = self.pass.wrapping_add(1);
        self.pass
    }

    /// Stamp an item as placed in `pass` and update its geometry
    ///
    /// Returns true when the item was hidden before.
    pub(crate) fn stamp(&mut self, id: ItemId, pass: u64, rect: Rect) -> bool {
        match self.get_mut(id) {
            Some(item) => {
                item.pass = pass;
                item.rect = rect;
                let shown = !item.visible;
                item.visible = true;
                shown
            }
            None => false,
        }
    }

    /// Mark items not placed in `pass` as hidden, returning their handles
    pub(crate) fn hide_unplaced(&mut self, pass: u64) -> Vec<H> {
        self.slots
            .iter_mut()
            .flatten()
            .filter(|node| node.item.pass != pass && node.item.visible)
            .map(|node| {
                node.item.visible = false;
                node.item.handle.clone()
            })
            .collect()
    }

    fn node(&self, id: ItemId) -> Option<&Node<H>> {
        self.slots.get(id.0).and_then(|slot| slot.as_ref())
    }

    fn link_next(&mut self, id: ItemId, next: ItemId) {
        if let Some(Some(node)) = self.slots.get_mut(id.0) {
            node.next = next;
        }
    }

    fn link_prev(&mut self, id: ItemId, prev: ItemId) {
        if let Some(Some(node)) = self.slots.get_mut(id.0) {
            node.prev = prev;
        }
    }
}

/// Iterator over `(ItemId, &Item)` in display order
pub struct RingIter<'a, H> {
    ring: &'a Ring<H>,
    next: Option<ItemId>,
    remaining: usize,
}

impl<'a, H: ItemHandle> Iterator for RingIter<'a, H> {
    type Item = (ItemId, &'a Item<H>);

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let id = self.next?;
        let node = self.ring.node(id)?;
        self.remaining -= 1;
        self.next = Some(node.next);
        Some((id, &node.item))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}
