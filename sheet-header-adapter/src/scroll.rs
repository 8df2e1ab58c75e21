use sheet_header::{Easing, ListenerId, Listeners, ScrollMetrics, ScrollPhysics, Tween};

/// Duration of the settle animation after releasing an out-of-bounds drag.
pub const SETTLE_DURATION_MS: u64 = 200;

/// A scroll update notification: the offset after the update and the reported delta.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScrollUpdate {
    pub offset: f64,
    pub delta: f64,
}

/// How an animated scroll ended.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AnimationEnd {
    pub final_offset: f64,
    /// `true` when a new gesture or animation took over before the animation finished.
    pub interrupted: bool,
}

/// A framework-neutral scroll position.
///
/// Stands in for the host scroll mechanism: it owns the shared offset and its bounds, runs at
/// most one animated scroll at a time, and exposes an observable "is scrolling" signal.
/// Adapters drive it with drags, releases and frame ticks.
#[derive(Debug)]
pub struct ScrollPosition {
    offset: f64,
    min_scroll_extent: f64,
    max_scroll_extent: f64,
    viewport_extent: f64,
    physics: ScrollPhysics,
    is_scrolling: bool,
    is_scrolling_listeners: Listeners<bool>,
    animation: Option<Tween>,
}

impl ScrollPosition {
    pub fn new(
        offset: f64,
        min_scroll_extent: f64,
        max_scroll_extent: f64,
        viewport_extent: f64,
        physics: ScrollPhysics,
    ) -> Self {
        Self {
            offset,
            min_scroll_extent,
            max_scroll_extent: max_scroll_extent.max(min_scroll_extent),
            viewport_extent,
            physics,
            is_scrolling: false,
            is_scrolling_listeners: Listeners::new(),
            animation: None,
        }
    }

    pub fn offset(&self) -> f64 {
        self.offset
    }

    pub fn min_scroll_extent(&self) -> f64 {
        self.min_scroll_extent
    }

    pub fn max_scroll_extent(&self) -> f64 {
        self.max_scroll_extent
    }

    pub fn viewport_extent(&self) -> f64 {
        self.viewport_extent
    }

    pub fn physics(&self) -> ScrollPhysics {
        self.physics
    }

    pub fn is_scrolling(&self) -> bool {
        self.is_scrolling
    }

    pub fn is_animating(&self) -> bool {
        self.animation.is_some()
    }

    pub fn metrics(&self) -> ScrollMetrics {
        ScrollMetrics {
            offset: self.offset,
            min_scroll_extent: self.min_scroll_extent,
            max_scroll_extent: self.max_scroll_extent,
        }
    }

    pub fn is_out_of_range(&self) -> bool {
        self.offset < self.min_scroll_extent || self.offset > self.max_scroll_extent
    }

    /// Updates the scroll bounds after content changed size. Does not move the offset.
    pub fn set_content_dimensions(&mut self, min_scroll_extent: f64, max_scroll_extent: f64) {
        self.min_scroll_extent = min_scroll_extent;
        self.max_scroll_extent = max_scroll_extent.max(min_scroll_extent);
    }

    pub fn add_is_scrolling_listener(&mut self, listener: impl FnMut(&bool) + 'static) -> ListenerId {
        self.is_scrolling_listeners.add(listener)
    }

    pub fn remove_is_scrolling_listener(&mut self, id: ListenerId) -> bool {
        self.is_scrolling_listeners.remove(id)
    }

    pub fn is_scrolling_listener_count(&self) -> usize {
        self.is_scrolling_listeners.len()
    }

    fn set_is_scrolling(&mut self, is_scrolling: bool) {
        if self.is_scrolling == is_scrolling {
            return;
        }
        self.is_scrolling = is_scrolling;
        self.is_scrolling_listeners.notify(&is_scrolling);
    }

    fn take_animation(&mut self) -> Option<AnimationEnd> {
        self.animation.take().map(|_| AnimationEnd {
            final_offset: self.offset,
            interrupted: true,
        })
    }

    /// Applies a user drag. Any running animation is interrupted and returned.
    ///
    /// With clamping physics the offset stays within bounds but the update still reports the
    /// full gesture delta, so a pull at the top edge is visible as a negative delta.
    pub fn drag_by(&mut self, delta: f64) -> (ScrollUpdate, Option<AnimationEnd>) {
        let interrupted = self.take_animation();
        self.set_is_scrolling(true);

        let next = self.offset + delta;
        self.offset = match self.physics {
            ScrollPhysics::Clamping => next.clamp(self.min_scroll_extent, self.max_scroll_extent),
            ScrollPhysics::Bouncing => next,
        };
        atrace!(offset = self.offset, delta, "ScrollPosition::drag_by");
        (
            ScrollUpdate {
                offset: self.offset,
                delta,
            },
            interrupted,
        )
    }

    /// Ends a drag. Settles back into range when needed, otherwise goes idle.
    pub fn release(&mut self, now_ms: u64) {
        if self.animation.is_some() {
            return;
        }
        if self.is_out_of_range() {
            let target = self
                .offset
                .clamp(self.min_scroll_extent, self.max_scroll_extent);
            self.animation = Some(Tween::new(
                self.offset,
                target,
                now_ms,
                SETTLE_DURATION_MS,
                Easing::EaseOutCubic,
            ));
            return;
        }
        self.set_is_scrolling(false);
    }

    /// Starts an animated scroll. A running animation is interrupted and returned.
    pub fn animate_to(
        &mut self,
        target: f64,
        duration_ms: u64,
        easing: Easing,
        now_ms: u64,
    ) -> Option<AnimationEnd> {
        let interrupted = self.take_animation();
        adebug!(from = self.offset, target, duration_ms, "ScrollPosition::animate_to");
        self.animation = Some(Tween::new(self.offset, target, now_ms, duration_ms, easing));
        self.set_is_scrolling(true);
        interrupted
    }

    /// Advances the running animation.
    ///
    /// Returns the scroll update it produced and, on the last frame, how it ended. The
    /// scrolling signal turns idle before the end is reported.
    pub fn tick(&mut self, now_ms: u64) -> (Option<ScrollUpdate>, Option<AnimationEnd>) {
        let Some(tween) = self.animation else {
            return (None, None);
        };

        let next = tween.sample(now_ms);
        let update = (next != self.offset).then(|| {
            let delta = next - self.offset;
            self.offset = next;
            ScrollUpdate {
                offset: next,
                delta,
            }
        });

        if !tween.is_done(now_ms) {
            return (update, None);
        }
        self.animation = None;
        self.set_is_scrolling(false);
        (
            update,
            Some(AnimationEnd {
                final_offset: self.offset,
                interrupted: false,
            }),
        )
    }

    /// Applies a layout-time offset correction.
    ///
    /// This is the layout channel: it moves the offset without producing a scroll update and
    /// without notifying any listener. With clamping physics the corrected offset stays within
    /// bounds.
    pub fn correct_by(&mut self, correction: f64) {
        atrace!(correction, offset = self.offset, "ScrollPosition::correct_by");
        let next = self.offset + correction;
        self.offset = match self.physics {
            ScrollPhysics::Clamping => next.clamp(self.min_scroll_extent, self.max_scroll_extent),
            ScrollPhysics::Bouncing => next,
        };
    }

    /// Drops every listener and any running animation.
    pub fn dispose(&mut self) {
        self.animation = None;
        self.is_scrolling_listeners.clear();
    }
}
