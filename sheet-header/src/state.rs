use crate::{OverlayCoordinator, SnapController};

/// A lightweight, serializable snapshot of the transition state.
///
/// With `feature = "serde"`, this type implements `Serialize`/`Deserialize`.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TransitionSnapshot {
    pub progress: f64,
    pub interpolated_height: f64,
    pub overlay_showing: bool,
    pub overlay_opacity: f64,
    pub snap_listening: bool,
    pub snapping: bool,
}

impl TransitionSnapshot {
    pub fn capture(
        progress: f64,
        interpolated_height: f64,
        overlay: &OverlayCoordinator,
        snap: &SnapController,
    ) -> Self {
        Self {
            progress,
            interpolated_height,
            overlay_showing: overlay.is_showing(),
            overlay_opacity: overlay.overlay().map_or(0.0, |o| o.opacity()),
            snap_listening: snap.is_listening(),
            snapping: snap.is_snapping(),
        }
    }
}

/// A lightweight, serializable snapshot of the scroll state.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScrollSnapshot {
    pub offset: f64,
    pub is_scrolling: bool,
}

/// A combined snapshot of scroll + transition state.
///
/// Useful for inspecting a sheet across frames without holding on to the controller.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SheetSnapshot {
    pub scroll: ScrollSnapshot,
    pub transition: TransitionSnapshot,
    pub fill_height: f64,
    pub dismissed: bool,
}
