use crate::{Color, ConfigError, LayoutConstraints, RegionGeometry, Result};

/// The default top-corner radius of the compact header.
pub const DEFAULT_CORNER_RADIUS: f64 = 28.0;

/// Output of one layout pass of [`HeaderTransition`].
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HeaderLayout {
    /// Normalized transition progress in `[0, 1]`.
    pub progress: f64,
    /// Signed distance left before the transition starts (positive) or how far into it the
    /// region has been scrolled (negative).
    pub extent_to_transform: f64,
    pub interpolated_height: f64,
    pub geometry: RegionGeometry,
}

/// How the header region should be painted at a given progress.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HeaderPaint {
    pub corner_radius: f64,
    pub fill: Color,
    /// Opacity of the compact header content; it fades out as the title bar fades in.
    pub content_opacity: f64,
}

/// The transition geometry engine.
///
/// Maps the shared scroll offset to a normalized progress and an interpolated header height,
/// and bounds the offset correction that keeps the growing header from jumping under the
/// user's finger. Progress is never stored independently of the offset: every
/// [`HeaderTransition::layout`] recomputes it.
#[derive(Clone, Debug)]
pub struct HeaderTransition {
    base_height: f64,
    expanded_height: f64,
    corner_radius: f64,
    background: Color,
    previous_height: f64,
}

impl HeaderTransition {
    pub fn new(
        base_height: f64,
        expanded_height: f64,
        corner_radius: f64,
        background: Color,
    ) -> Result<Self> {
        if !(base_height.is_finite() && base_height > 0.0) {
            return Err(ConfigError::NonPositiveHeaderHeight(base_height));
        }
        if !(expanded_height.is_finite() && expanded_height > 0.0) {
            return Err(ConfigError::NonPositiveExpandedHeight(expanded_height));
        }
        if base_height > expanded_height {
            return Err(ConfigError::HeaderTallerThanExpanded {
                header: base_height,
                expanded: expanded_height,
            });
        }
        if corner_radius.is_nan() || corner_radius < 0.0 {
            return Err(ConfigError::NegativeCornerRadius(corner_radius));
        }
        shdebug!(base_height, expanded_height, "HeaderTransition::new");
        Ok(Self {
            base_height,
            expanded_height,
            corner_radius,
            background,
            previous_height: base_height,
        })
    }

    pub fn base_height(&self) -> f64 {
        self.base_height
    }

    pub fn expanded_height(&self) -> f64 {
        self.expanded_height
    }

    pub fn previous_height(&self) -> f64 {
        self.previous_height
    }

    pub fn background(&self) -> Color {
        self.background
    }

    pub fn extent_to_transform(&self, scroll_offset: f64, preceding_scroll_extent: f64) -> f64 {
        preceding_scroll_extent - scroll_offset - self.expanded_height
    }

    /// Progress for an absolute scroll offset.
    ///
    /// `0` while `scroll_offset <= preceding - expanded`, `1` once `scroll_offset >= preceding`.
    pub fn progress_for(&self, scroll_offset: f64, preceding_scroll_extent: f64) -> f64 {
        let extent = self.extent_to_transform(scroll_offset, preceding_scroll_extent);
        let progress = -extent / self.expanded_height;
        if progress.is_nan() {
            return 0.0;
        }
        progress.clamp(0.0, 1.0)
    }

    /// Linear interpolation between the compact and expanded heights, capped at the viewport.
    pub fn height_for(&self, progress: f64, viewport_main_axis_extent: f64) -> f64 {
        let lerp = self.base_height + (self.expanded_height - self.base_height) * progress;
        lerp.min(viewport_main_axis_extent.max(0.0))
    }

    /// Runs one layout pass.
    ///
    /// The returned correction must be applied by the host after this call returns and before
    /// the next paint. It is bounded by the scroll distance still available before the region,
    /// so a growing header can never push the offset past the region's start.
    pub fn layout(&mut self, constraints: LayoutConstraints) -> HeaderLayout {
        let LayoutConstraints {
            scroll_offset,
            preceding_scroll_extent,
            viewport_main_axis_extent,
            remaining_paint_extent,
        } = constraints;

        let extent_to_transform = self.extent_to_transform(scroll_offset, preceding_scroll_extent);
        let progress = self.progress_for(scroll_offset, preceding_scroll_extent);
        let interpolated_height = self.height_for(progress, viewport_main_axis_extent);

        let layout_extent = (interpolated_height - constraints.region_scroll_offset())
            .clamp(0.0, remaining_paint_extent.max(0.0));

        let available = (preceding_scroll_extent - scroll_offset).max(0.0);
        let height_adjustment = (interpolated_height - self.previous_height).min(available);
        let scroll_offset_correction = (height_adjustment != 0.0).then_some(height_adjustment);

        shtrace!(
            scroll_offset,
            progress,
            interpolated_height,
            correction = height_adjustment,
            "HeaderTransition::layout"
        );

        self.previous_height = interpolated_height;

        HeaderLayout {
            progress,
            extent_to_transform,
            interpolated_height,
            geometry: RegionGeometry {
                scroll_extent: interpolated_height,
                paint_extent: layout_extent,
                max_paint_extent: interpolated_height,
                layout_extent,
                scroll_offset_correction,
            },
        }
    }

    /// Paint parameters for `progress`.
    ///
    /// Corners round off linearly. The fill stays opaque for any partial progress and turns
    /// transparent only at exactly `1`, where the title bar overlay has fully taken over.
    pub fn paint(&self, progress: f64) -> HeaderPaint {
        let progress = progress.clamp(0.0, 1.0);
        let fill = if progress >= 1.0 {
            Color::TRANSPARENT
        } else {
            self.background
        };
        HeaderPaint {
            corner_radius: self.corner_radius * (1.0 - progress),
            fill,
            content_opacity: 1.0 - progress,
        }
    }
}
