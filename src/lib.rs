//! Carousel Scroller Library
//!
//! This library provides a circular page carousel engine: an item ring,
//! a layout pass that positions items around a viewport, a pointer sampler
//! and drag state machine, and a tick-driven snap animation driver. Hosts
//! draw the items themselves from the emitted events.

#![warn(missing_docs)]

pub mod animation;
pub mod config;
pub mod error;
pub mod event;
pub mod input;
pub mod layout;
pub mod metrics;
pub mod ring;
pub mod sampler;
pub mod scroller;
pub mod update;

// Re-export commonly used types
pub use animation::{AnimationDriver, AnimationSession, ScrollPlan};
pub use config::ScrollerConfig;
pub use error::{ConfigError, ScrollerError};
pub use event::{EventListeners, EventSink, ListenerId, ScrollerEvent};
pub use input::{DragPhase, DragTracker, PointerEvent};
pub use layout::{layout, LayoutOutcome, Rect, Viewport};
pub use metrics::{ScrollMetrics, TickMetrics, Timer};
pub use ring::{Item, ItemHandle, ItemId, Ring};
pub use sampler::{EventQueue, Sample};
pub use scroller::Scroller;
pub use update::TickScheduler;
