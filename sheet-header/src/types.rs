/// An RGBA color with straight (non-premultiplied) components in `[0, 1]`.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const TRANSPARENT: Self = Self::rgba(0.0, 0.0, 0.0, 0.0);
    pub const WHITE: Self = Self::rgba(1.0, 1.0, 1.0, 1.0);

    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub fn is_transparent(&self) -> bool {
        self.a == 0.0
    }
}

/// Where the snap threshold sits along the transition distance.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SnapBehavior {
    /// Any progress past zero snaps forward.
    Start,
    /// Snap forward once past half of the expanded height (minus the top inset).
    #[default]
    Midpoint,
    /// Snap forward only past the full expanded height (minus the top inset).
    End,
    /// Never snap.
    None,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SnapDirection {
    /// Fully expand (progress → 1).
    Forward,
    /// Fully compact (progress → 0).
    Backward,
}

impl SnapDirection {
    /// The progress bound this direction ends at.
    pub fn progress_bound(self) -> f64 {
        match self {
            Self::Forward => 1.0,
            Self::Backward => 0.0,
        }
    }
}

/// Per-pass layout input supplied by the host layout system.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LayoutConstraints {
    /// Absolute scroll offset of the shared scroll position.
    pub scroll_offset: f64,
    /// Scroll extent occupied by regions before the header.
    pub preceding_scroll_extent: f64,
    pub viewport_main_axis_extent: f64,
    pub remaining_paint_extent: f64,
}

impl LayoutConstraints {
    /// Scroll offset measured from the start of the header region (never negative).
    pub fn region_scroll_offset(&self) -> f64 {
        (self.scroll_offset - self.preceding_scroll_extent).max(0.0)
    }
}

/// Geometry emitted back to the host after a layout pass.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RegionGeometry {
    pub scroll_extent: f64,
    pub paint_extent: f64,
    pub max_paint_extent: f64,
    pub layout_extent: f64,
    /// Offset correction the host must apply before the next paint.
    ///
    /// Never `Some(0.0)`.
    pub scroll_offset_correction: Option<f64>,
}

/// How the host scroll mechanism treats offsets beyond its bounds.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ScrollPhysics {
    /// Offsets are clamped to the bounds; overscroll shows up only as drag deltas.
    #[default]
    Clamping,
    /// Offsets may leave the bounds during a drag and settle back on release.
    Bouncing,
}
