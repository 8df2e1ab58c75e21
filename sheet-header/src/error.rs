//! Configuration errors.

use thiserror::Error;

/// Invalid construction-time configuration.
///
/// These are programming errors: the sheet refuses to be built instead of clamping the
/// offending value into range.
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum ConfigError {
    /// A child-size fraction is outside `[0, 1]` or not finite.
    #[error("{name} must be a fraction in [0, 1], got {value}")]
    InvalidChildSize { name: &'static str, value: f64 },

    /// `minimum_child_size` is larger than `initial_child_size`.
    #[error("minimum child size {minimum} exceeds initial child size {initial}")]
    MinimumExceedsInitial { minimum: f64, initial: f64 },

    /// The compact header height is zero, negative or not finite.
    #[error("header height must be positive, got {0}")]
    NonPositiveHeaderHeight(f64),

    /// The expanded height (title bar + inset) is zero, negative or not finite.
    #[error("expanded header height must be positive, got {0}")]
    NonPositiveExpandedHeight(f64),

    /// The compact header would be taller than the fully expanded one.
    #[error("header height {header} exceeds expanded height {expanded}")]
    HeaderTallerThanExpanded { header: f64, expanded: f64 },

    #[error("corner radius must be non-negative, got {0}")]
    NegativeCornerRadius(f64),

    #[error("top inset must be non-negative, got {0}")]
    NegativeInset(f64),
}

/// Result type for sheet construction.
pub type Result<T> = core::result::Result<T, ConfigError>;
