/// Scroll position and bounds as seen by the dismiss detector.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScrollMetrics {
    pub offset: f64,
    pub min_scroll_extent: f64,
    pub max_scroll_extent: f64,
}

impl ScrollMetrics {
    /// How far the offset is past the bottom bound (zero when within bounds).
    pub fn bottom_overscroll(&self) -> f64 {
        (self.offset - self.max_scroll_extent).max(0.0)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DismissTrigger {
    /// The offset was pulled below the minimum extent (bouncing physics).
    Overscroll,
    /// A negative delta was reported while resting at the minimum extent (clamping physics).
    SwipeDelta,
    /// The host closed the sheet itself (e.g. a close button).
    Host,
}

/// Detects swipe-to-dismiss gestures and tracks the bottom overscroll gap.
///
/// Each event is judged on its own. Once a trigger fires the detector disarms itself, so a
/// gesture that keeps reporting qualifying events dismisses exactly once.
#[derive(Clone, Debug)]
pub struct DismissDetector {
    armed: bool,
    fill_height: f64,
}

impl DismissDetector {
    pub fn new() -> Self {
        Self {
            armed: true,
            fill_height: 0.0,
        }
    }

    pub fn is_armed(&self) -> bool {
        self.armed
    }

    pub fn disarm(&mut self) {
        self.armed = false;
    }

    /// Height of the filler that masks the gap below content while overscrolling the bottom.
    pub fn fill_height(&self) -> f64 {
        self.fill_height
    }

    /// Direct overscroll trigger, evaluated on every offset change.
    pub fn on_offset(&mut self, metrics: ScrollMetrics) -> Option<DismissTrigger> {
        if !self.armed || !(metrics.offset < metrics.min_scroll_extent) {
            return None;
        }
        shdebug!(
            offset = metrics.offset,
            min = metrics.min_scroll_extent,
            "dismiss: overscroll past top"
        );
        self.armed = false;
        Some(DismissTrigger::Overscroll)
    }

    /// Delta trigger, evaluated on every scroll update notification.
    pub fn on_scroll_update(&mut self, metrics: ScrollMetrics, delta: f64) -> Option<DismissTrigger> {
        if !self.armed || metrics.offset != metrics.min_scroll_extent || !(delta < 0.0) {
            return None;
        }
        shdebug!(offset = metrics.offset, delta, "dismiss: swipe at rest");
        self.armed = false;
        Some(DismissTrigger::SwipeDelta)
    }

    /// Recomputes the bottom fill height. Returns the new value when it changed.
    pub fn update_fill_height(&mut self, metrics: ScrollMetrics) -> Option<f64> {
        let next = metrics.bottom_overscroll();
        if next == self.fill_height {
            return None;
        }
        self.fill_height = next;
        Some(next)
    }
}

impl Default for DismissDetector {
    fn default() -> Self {
        Self::new()
    }
}
