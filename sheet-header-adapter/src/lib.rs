//! Adapter utilities for the `sheet-header` crate.
//!
//! The `sheet-header` crate is UI-agnostic and focuses on the transition math and state
//! machines. This crate provides the framework-neutral pieces an adapter needs around it:
//!
//! - A scroll position with clamping or bouncing physics, an observable "is scrolling"
//!   signal and tween-driven animated scrolling
//! - A frame scheduler that defers state changes out of layout
//! - `SheetController`, the composition root that wires everything together per frame
//!
//! This crate is intentionally framework-agnostic (no toolkit bindings).
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

#[macro_use]
mod macros;

mod controller;
mod frame;
mod scheduler;
mod scroll;

#[cfg(test)]
mod tests;

pub use controller::{DismissCallback, MAX_LAYOUT_CYCLES, SheetController};
pub use frame::{OverlayFrame, SheetFrame};
pub use scheduler::{Deferred, FrameScheduler};
pub use scroll::{AnimationEnd, SETTLE_DURATION_MS, ScrollPosition, ScrollUpdate};
