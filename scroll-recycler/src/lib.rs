//! A headless recycling list engine.
//!
//! For navigation utilities (easing, tweened jumps, snapping), see the
//! `scroll-recycler-adapter` crate.
//!
//! The engine keeps per-item geometry in a flat prefix table, resolves which items
//! intersect the viewport, and realizes exactly those items as host views, recycling
//! views that scroll out through a pool keyed by [`ViewKind`]. Lists can loop: the item
//! sequence is tripled and the scroll position silently shifted by one copy whenever it
//! drifts out of the middle region.
//!
//! It is UI-agnostic. A host layer is expected to provide:
//! - a [`ScrollDelegate`] (item count, item sizes, view factory)
//! - viewport size
//! - scroll position and velocity updates
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

#[macro_use]
mod macros;

mod delegate;
mod engine;
mod error;
mod event;
mod geometry;
mod key;
mod looping;
mod options;
mod pool;
pub mod range;
mod recycler;
mod types;

#[cfg(test)]
mod tests;

pub use delegate::{ScrollDelegate, ViewHandle};
pub use engine::Scroller;
pub use error::{BoxError, ScrollerError};
pub use event::ScrollerEvent;
pub use geometry::GeometryTable;
pub use looping::LoopLayout;
pub use options::{EventListener, ScrollerOptions};
pub use pool::RecyclePool;
pub use recycler::{ActiveView, ReconcileMode, ReconcileStats, Recycler, ViewTransition};
pub use types::{
    EdgePadding, ItemEdge, ItemRange, ItemSpan, ScrollAxis, ScrollUpdate, ScrollbarVisibility,
    SpacerLayout, ViewKind,
};
