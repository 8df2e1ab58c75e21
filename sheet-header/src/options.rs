use alloc::sync::Arc;

use crate::geometry::DEFAULT_CORNER_RADIUS;
use crate::{Color, ConfigError, Result, ScrollPhysics, SnapBehavior};

/// Produces the expanded title bar and reports its preferred main-axis height.
///
/// Invoked exactly once, when the sheet is built.
pub type TitleBarBuilder = Arc<dyn Fn() -> f64 + Send + Sync>;

/// Values supplied by the host environment rather than by the sheet's configuration.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HostEnvironment {
    /// Main-axis extent of the viewport the sheet is presented in.
    pub viewport_extent: f64,
    /// Top safe-area inset.
    pub top_inset: f64,
    /// Fill used when the sheet has no explicit background color.
    pub theme_background: Color,
}

impl HostEnvironment {
    pub fn new(viewport_extent: f64) -> Self {
        Self {
            viewport_extent,
            top_inset: 0.0,
            theme_background: Color::WHITE,
        }
    }

    pub fn with_top_inset(mut self, top_inset: f64) -> Self {
        self.top_inset = top_inset;
        self
    }

    pub fn with_theme_background(mut self, theme_background: Color) -> Self {
        self.theme_background = theme_background;
        self
    }
}

/// Configuration for a sheet with a collapsible header.
///
/// Immutable per sheet instance. Cheap to clone: the title bar builder is stored in an `Arc`.
pub struct SheetOptions {
    /// Initial scroll offset as a fraction of the viewport extent.
    pub initial_child_size: f64,
    /// Minimum sheet extent as a fraction of the viewport extent. Must not exceed
    /// `initial_child_size`.
    pub minimum_child_size: f64,
    /// Compact header height.
    pub header_height: f64,
    /// Whether a compact header content layer exists (it fades out as progress rises).
    pub header_content: bool,
    pub corner_radius: f64,
    /// Sheet and header fill; falls back to [`HostEnvironment::theme_background`].
    pub background_color: Option<Color>,
    pub snap_behavior: SnapBehavior,
    pub title_bar: TitleBarBuilder,
    /// Main-axis extent of the body content below the header.
    pub body_extent: f64,
    pub physics: ScrollPhysics,
}

impl Clone for SheetOptions {
    fn clone(&self) -> Self {
        Self {
            initial_child_size: self.initial_child_size,
            minimum_child_size: self.minimum_child_size,
            header_height: self.header_height,
            header_content: self.header_content,
            corner_radius: self.corner_radius,
            background_color: self.background_color,
            snap_behavior: self.snap_behavior,
            title_bar: Arc::clone(&self.title_bar),
            body_extent: self.body_extent,
            physics: self.physics,
        }
    }
}

impl SheetOptions {
    /// Creates options with default sizing around a title bar builder.
    pub fn new(title_bar: impl Fn() -> f64 + Send + Sync + 'static) -> Self {
        Self {
            initial_child_size: 0.5,
            minimum_child_size: 0.25,
            header_height: 30.0,
            header_content: false,
            corner_radius: DEFAULT_CORNER_RADIUS,
            background_color: None,
            snap_behavior: SnapBehavior::default(),
            title_bar: Arc::new(title_bar),
            body_extent: 0.0,
            physics: ScrollPhysics::default(),
        }
    }

    /// Creates options with a fixed preferred title bar height.
    pub fn with_title_bar_height(title_bar_height: f64) -> Self {
        Self::new(move || title_bar_height)
    }

    pub fn with_child_sizes(mut self, initial_child_size: f64, minimum_child_size: f64) -> Self {
        self.initial_child_size = initial_child_size;
        self.minimum_child_size = minimum_child_size;
        self
    }

    pub fn with_header_height(mut self, header_height: f64) -> Self {
        self.header_height = header_height;
        self
    }

    pub fn with_header_content(mut self, header_content: bool) -> Self {
        self.header_content = header_content;
        self
    }

    pub fn with_corner_radius(mut self, corner_radius: f64) -> Self {
        self.corner_radius = corner_radius;
        self
    }

    pub fn with_background_color(mut self, background_color: Option<Color>) -> Self {
        self.background_color = background_color;
        self
    }

    pub fn with_snap_behavior(mut self, snap_behavior: SnapBehavior) -> Self {
        self.snap_behavior = snap_behavior;
        self
    }

    pub fn with_title_bar(mut self, title_bar: impl Fn() -> f64 + Send + Sync + 'static) -> Self {
        self.title_bar = Arc::new(title_bar);
        self
    }

    pub fn with_body_extent(mut self, body_extent: f64) -> Self {
        self.body_extent = body_extent;
        self
    }

    pub fn with_physics(mut self, physics: ScrollPhysics) -> Self {
        self.physics = physics;
        self
    }

    /// Checks the configuration invariants that do not depend on the host.
    pub fn validate(&self) -> Result<()> {
        check_fraction("initial_child_size", self.initial_child_size)?;
        check_fraction("minimum_child_size", self.minimum_child_size)?;
        if self.minimum_child_size > self.initial_child_size {
            return Err(ConfigError::MinimumExceedsInitial {
                minimum: self.minimum_child_size,
                initial: self.initial_child_size,
            });
        }
        if !(self.header_height.is_finite() && self.header_height > 0.0) {
            return Err(ConfigError::NonPositiveHeaderHeight(self.header_height));
        }
        if self.corner_radius.is_nan() || self.corner_radius < 0.0 {
            return Err(ConfigError::NegativeCornerRadius(self.corner_radius));
        }
        Ok(())
    }

    /// Validates the options, measures the title bar and derives the sheet's dimensions.
    pub fn resolve(&self, env: &HostEnvironment) -> Result<SheetDimensions> {
        self.validate()?;
        if env.top_inset.is_nan() || env.top_inset < 0.0 {
            return Err(ConfigError::NegativeInset(env.top_inset));
        }

        let title_bar_height = (self.title_bar)();
        let expanded_height = title_bar_height + env.top_inset;
        if !(expanded_height.is_finite() && expanded_height > 0.0) {
            return Err(ConfigError::NonPositiveExpandedHeight(expanded_height));
        }
        if self.header_height > expanded_height {
            return Err(ConfigError::HeaderTallerThanExpanded {
                header: self.header_height,
                expanded: expanded_height,
            });
        }

        let viewport = env.viewport_extent.max(0.0);
        let dims = SheetDimensions {
            base_height: self.header_height,
            expanded_height,
            viewport_extent: viewport,
            preceding_scroll_extent: viewport,
            initial_offset: viewport * self.initial_child_size,
            min_scroll_extent: viewport * self.minimum_child_size,
            top_inset: env.top_inset,
            background: self.background_color.unwrap_or(env.theme_background),
        };
        shdebug!(
            base_height = dims.base_height,
            expanded_height = dims.expanded_height,
            viewport,
            "SheetOptions::resolve"
        );
        Ok(dims)
    }
}

fn check_fraction(name: &'static str, value: f64) -> Result<()> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::InvalidChildSize { name, value })
    }
}

impl core::fmt::Debug for SheetOptions {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("SheetOptions")
            .field("initial_child_size", &self.initial_child_size)
            .field("minimum_child_size", &self.minimum_child_size)
            .field("header_height", &self.header_height)
            .field("header_content", &self.header_content)
            .field("corner_radius", &self.corner_radius)
            .field("background_color", &self.background_color)
            .field("snap_behavior", &self.snap_behavior)
            .field("body_extent", &self.body_extent)
            .field("physics", &self.physics)
            .finish_non_exhaustive()
    }
}

/// Dimensions derived from [`SheetOptions`] and the [`HostEnvironment`].
///
/// The sheet's scroll view is laid out as a viewport-tall spacer, then the header, then the
/// body, so the header's preceding scroll extent equals the viewport extent.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SheetDimensions {
    pub base_height: f64,
    pub expanded_height: f64,
    pub viewport_extent: f64,
    pub preceding_scroll_extent: f64,
    pub initial_offset: f64,
    pub min_scroll_extent: f64,
    pub top_inset: f64,
    pub background: Color,
}

impl SheetDimensions {
    /// Maximum scroll extent for a header of `header_height` above `body_extent` of content.
    ///
    /// The body is treated as filling at least the rest of the viewport, so the sheet can
    /// always be dragged up to full height.
    pub fn max_scroll_extent(&self, header_height: f64, body_extent: f64) -> f64 {
        (header_height + body_extent.max(0.0))
            .max(self.viewport_extent)
            .max(self.min_scroll_extent)
    }
}
