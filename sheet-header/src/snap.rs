use crate::{Easing, ScrollMetrics, SnapBehavior, SnapDirection};

/// Duration of the automatic snap scroll.
pub const SNAP_DURATION_MS: u64 = 250;

/// Curve of the automatic snap scroll.
pub const SNAP_EASING: Easing = Easing::EaseOutCubic;

/// A snap animation the host scroll mechanism should run.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SnapPlan {
    pub direction: SnapDirection,
    /// Absolute scroll offset to animate to, within the scroll bounds.
    pub target: f64,
    pub duration_ms: u64,
    pub easing: Easing,
    /// `false` when the scroll bounds cut the target short of the direction's bound.
    pub reaches_bound: bool,
}

/// Change in whether the snap controller wants the host's "is scrolling" signal.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ListenChange {
    Attach,
    Detach,
}

/// Decides whether to complete or revert the transition once scrolling goes idle.
///
/// The controller only listens while progress is above zero, and toggles its listening state
/// exactly once per crossing. `is_snapping` guards against starting a second snap while one
/// is still in flight.
#[derive(Clone, Debug)]
pub struct SnapController {
    behavior: SnapBehavior,
    expanded_height: f64,
    top_inset: f64,
    is_listening: bool,
    is_snapping: bool,
    in_flight: Option<SnapPlan>,
}

impl SnapController {
    pub fn new(behavior: SnapBehavior, expanded_height: f64, top_inset: f64) -> Self {
        Self {
            behavior,
            expanded_height,
            top_inset,
            is_listening: false,
            is_snapping: false,
            in_flight: None,
        }
    }

    pub fn behavior(&self) -> SnapBehavior {
        self.behavior
    }

    pub fn is_listening(&self) -> bool {
        self.is_listening
    }

    pub fn is_snapping(&self) -> bool {
        self.is_snapping
    }

    pub fn in_flight(&self) -> Option<SnapPlan> {
        self.in_flight
    }

    /// Distance into the transition past which a snap goes forward.
    ///
    /// `None` when snapping is disabled.
    pub fn threshold(&self) -> Option<f64> {
        match self.behavior {
            SnapBehavior::Start => Some(0.0),
            SnapBehavior::Midpoint => Some(self.expanded_height / 2.0 - self.top_inset),
            SnapBehavior::End => Some(self.expanded_height - self.top_inset),
            SnapBehavior::None => None,
        }
    }

    /// Reacts to a published progress value.
    ///
    /// Returns the listener change the host must perform, if any.
    pub fn on_progress(&mut self, progress: f64) -> Option<ListenChange> {
        let want = progress > 0.0 && self.behavior != SnapBehavior::None;
        if want == self.is_listening {
            return None;
        }
        self.is_listening = want;
        shdebug!(listening = want, progress, "SnapController::on_progress");
        Some(if want {
            ListenChange::Attach
        } else {
            ListenChange::Detach
        })
    }

    /// Called when the host's scrolling signal turns idle.
    ///
    /// Returns the animation to start, or `None` when no snap should happen. The target is
    /// clamped into the scroll bounds in `metrics`.
    pub fn decide(&mut self, metrics: ScrollMetrics, preceding_scroll_extent: f64) -> Option<SnapPlan> {
        if !self.is_listening || self.is_snapping {
            return None;
        }
        let scroll_offset = metrics.offset;
        // Scrolled past the header into the body: leave that gesture alone.
        if scroll_offset > preceding_scroll_extent {
            return None;
        }
        let threshold = self.threshold()?;

        let extent_to_transform = preceding_scroll_extent - scroll_offset - self.expanded_height;
        if extent_to_transform >= 0.0 {
            return None;
        }

        let direction = if -extent_to_transform > threshold {
            SnapDirection::Forward
        } else {
            SnapDirection::Backward
        };
        let bound = match direction {
            SnapDirection::Forward => preceding_scroll_extent,
            SnapDirection::Backward => preceding_scroll_extent - self.expanded_height,
        };
        let target = bound
            .min(metrics.max_scroll_extent)
            .max(metrics.min_scroll_extent);
        if target == scroll_offset {
            return None;
        }

        let plan = SnapPlan {
            direction,
            target,
            duration_ms: SNAP_DURATION_MS,
            easing: SNAP_EASING,
            reaches_bound: target == bound,
        };
        shdebug!(?direction, target, scroll_offset, "SnapController::decide");
        self.is_snapping = true;
        self.in_flight = Some(plan);
        Some(plan)
    }

    /// Finishes the in-flight snap.
    ///
    /// Returns the progress bound to force when the animation reached its target exactly, or
    /// `None` when it was interrupted by a new gesture or its target was clamped.
    pub fn complete(&mut self, final_offset: f64) -> Option<f64> {
        self.is_snapping = false;
        let plan = self.in_flight.take()?;
        if final_offset != plan.target {
            shdebug!(final_offset, target = plan.target, "snap interrupted");
            return None;
        }
        if !plan.reaches_bound {
            return None;
        }
        shdebug!(direction = ?plan.direction, "snap completed");
        Some(plan.direction.progress_bound())
    }

    /// Forgets listening and snapping state (sheet teardown).
    pub fn reset(&mut self) {
        self.is_listening = false;
        self.is_snapping = false;
        self.in_flight = None;
    }
}
