//! A headless, scroll-driven collapsible header transition for modal sheets.
//!
//! As a sheet's content is dragged or scrolled, a compact header grows into a full-size bar,
//! a title bar overlay fades in over it, and the transition can snap to either end when the
//! user lets go. Swipe-to-dismiss is detected from overscroll.
//!
//! This crate owns the math and the state machines only. A host (see the
//! `sheet-header-adapter` crate) is expected to provide:
//! - the shared scroll offset and its bounds
//! - per-pass layout constraints (preceding scroll extent, viewport, remaining paint extent)
//! - an animated scroll-to and an "is scrolling" signal
//! - a frame clock and a dismiss action
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

#[macro_use]
mod macros;

mod dismiss;
mod error;
mod geometry;
mod listeners;
mod options;
mod overlay;
mod progress;
mod snap;
mod state;
mod tween;
mod types;


pub use dismiss::{DismissDetector, DismissTrigger, ScrollMetrics};
pub use error::{ConfigError, Result};
pub use geometry::{DEFAULT_CORNER_RADIUS, HeaderLayout, HeaderPaint, HeaderTransition};
pub use listeners::{ListenerId, Listeners};
pub use options::{HostEnvironment, SheetDimensions, SheetOptions, TitleBarBuilder};
pub use overlay::{OVERLAY_FADE_OUT_MS, Overlay, OverlayChange, OverlayCoordinator};
pub use progress::ProgressNotifier;
pub use snap::{ListenChange, SNAP_DURATION_MS, SNAP_EASING, SnapController, SnapPlan};
pub use state::{ScrollSnapshot, SheetSnapshot, TransitionSnapshot};
pub use tween::{Easing, Tween};
pub use types::{
    Color, LayoutConstraints, RegionGeometry, ScrollPhysics, SnapBehavior, SnapDirection,
};
