//! Navigation utilities for the `scroll-recycler` crate.
//!
//! The `scroll-recycler` crate owns geometry, recycling and looping. This crate adds the
//! pieces a host usually wants on top, without binding to any UI framework:
//!
//! - 33 easing curves ([`Easing`]) and a delta-driven [`Tween`]
//! - jump-to-index targeting, loop-aware ([`jump_target`], [`JumpRequest`])
//! - a [`Controller`] running tweened jumps and velocity-triggered snapping
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

#[macro_use]
mod macros;

mod controller;
mod easing;
mod jump;
mod math;
mod snap;
mod tween;


pub use controller::{Controller, JumpComplete};
pub use easing::Easing;
pub use jump::{JumpRequest, LoopJumpDirection, jump_target};
pub use snap::SnapOptions;
pub use tween::{Tween, TweenStep};
