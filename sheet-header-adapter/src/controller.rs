use alloc::rc::Rc;
use core::cell::Cell;

use sheet_header::{
    DismissDetector, DismissTrigger, HeaderLayout, HeaderTransition, HostEnvironment,
    LayoutConstraints, ListenChange, ListenerId, OverlayCoordinator, ProgressNotifier, Result,
    ScrollSnapshot, SheetDimensions, SheetOptions, SheetSnapshot, SnapController,
    TransitionSnapshot,
};

use crate::{
    AnimationEnd, Deferred, FrameScheduler, OverlayFrame, ScrollPosition, ScrollUpdate,
    SheetFrame,
};

/// Upper bound on layout/correction cycles within one frame. Whatever correction is left is
/// picked up by the next frame.
pub const MAX_LAYOUT_CYCLES: usize = 10;

/// The host's close/pop action.
pub type DismissCallback = Rc<dyn Fn()>;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Lifecycle {
    Created,
    Attached,
    Detached,
}

/// A framework-neutral sheet controller: the composition root.
///
/// It owns the scroll position and wires the transition engine, snap controller, overlay
/// coordinator and dismiss detector together. Adapters drive it by calling:
/// - `attach()` once when the sheet is shown and `detach()` once when it is disposed
/// - `drag(delta)` / `end_drag(now_ms)` for user input
/// - `pump_frame(now_ms)` on every frame, which returns what to draw
pub struct SheetController {
    options: SheetOptions,
    dims: SheetDimensions,
    scroll: ScrollPosition,
    transition: HeaderTransition,
    progress: ProgressNotifier,
    snap: SnapController,
    overlay: OverlayCoordinator,
    dismiss: DismissDetector,
    scheduler: FrameScheduler,
    on_dismiss: Option<DismissCallback>,

    idle_pending: Rc<Cell<bool>>,
    snap_listener: Option<ListenerId>,
    layout: HeaderLayout,
    lifecycle: Lifecycle,
    dismissed: Option<DismissTrigger>,
    now_ms: u64,
}

impl SheetController {
    /// Builds a sheet, rejecting invalid configuration.
    ///
    /// The title bar builder is invoked once here to measure the expanded height.
    pub fn new(options: SheetOptions, env: HostEnvironment) -> Result<Self> {
        let dims = options.resolve(&env)?;
        let transition = HeaderTransition::new(
            dims.base_height,
            dims.expanded_height,
            options.corner_radius,
            dims.background,
        )?;
        let scroll = ScrollPosition::new(
            dims.initial_offset,
            dims.min_scroll_extent,
            dims.max_scroll_extent(dims.base_height, options.body_extent),
            dims.viewport_extent,
            options.physics,
        );
        let snap = SnapController::new(options.snap_behavior, dims.expanded_height, dims.top_inset);
        adebug!(
            initial_offset = dims.initial_offset,
            expanded_height = dims.expanded_height,
            "SheetController::new"
        );

        Ok(Self {
            options,
            dims,
            scroll,
            transition,
            progress: ProgressNotifier::new(),
            snap,
            overlay: OverlayCoordinator::new(),
            dismiss: DismissDetector::new(),
            scheduler: FrameScheduler::new(),
            on_dismiss: None,
            idle_pending: Rc::new(Cell::new(false)),
            snap_listener: None,
            layout: HeaderLayout::default(),
            lifecycle: Lifecycle::Created,
            dismissed: None,
            now_ms: 0,
        })
    }

    pub fn with_on_dismiss(mut self, on_dismiss: impl Fn() + 'static) -> Self {
        self.on_dismiss = Some(Rc::new(on_dismiss));
        self
    }

    pub fn set_on_dismiss(&mut self, on_dismiss: Option<DismissCallback>) {
        self.on_dismiss = on_dismiss;
    }

    pub fn options(&self) -> &SheetOptions {
        &self.options
    }

    pub fn dimensions(&self) -> &SheetDimensions {
        &self.dims
    }

    pub fn scroll(&self) -> &ScrollPosition {
        &self.scroll
    }

    pub fn snap(&self) -> &SnapController {
        &self.snap
    }

    pub fn overlay(&self) -> &OverlayCoordinator {
        &self.overlay
    }

    pub fn progress(&self) -> f64 {
        self.progress.value()
    }

    pub fn last_layout(&self) -> HeaderLayout {
        self.layout
    }

    pub fn fill_height(&self) -> f64 {
        self.dismiss.fill_height()
    }

    pub fn is_attached(&self) -> bool {
        self.lifecycle == Lifecycle::Attached
    }

    pub fn is_dismissed(&self) -> bool {
        self.dismissed.is_some()
    }

    /// Which trigger dismissed the sheet, if any.
    pub fn dismiss_trigger(&self) -> Option<DismissTrigger> {
        self.dismissed
    }

    /// Registers a progress consumer (e.g. a header content fade).
    pub fn add_progress_listener(&mut self, listener: impl FnMut(&f64) + 'static) -> ListenerId {
        self.progress.add_listener(listener)
    }

    pub fn remove_progress_listener(&mut self, id: ListenerId) -> bool {
        self.progress.remove_listener(id)
    }

    /// Starts the sheet's logical lifetime and lays out the initial position.
    ///
    /// A sheet is attached at most once: attaching a detached sheet is ignored.
    pub fn attach(&mut self, now_ms: u64) {
        match self.lifecycle {
            Lifecycle::Created => {}
            Lifecycle::Attached => {
                awarn!("SheetController::attach called twice");
                debug_assert!(false, "SheetController::attach called twice");
                return;
            }
            Lifecycle::Detached => {
                awarn!("SheetController::attach after detach");
                return;
            }
        }
        adebug!(offset = self.scroll.offset(), "SheetController::attach");
        self.lifecycle = Lifecycle::Attached;
        self.now_ms = now_ms;
        self.run_layout();
        self.flush_deferred();
    }

    /// Ends the sheet's logical lifetime, removing every listener it registered.
    ///
    /// Progress drops back to zero together with the overlay, and the snap controller forgets
    /// its listening state.
    pub fn detach(&mut self) {
        if !self.is_attached() {
            awarn!("SheetController::detach without attach");
            return;
        }
        adebug!("SheetController::detach");
        self.stop_snap_listening();
        self.snap.reset();
        self.scroll.dispose();
        self.progress.clear_listeners();
        self.progress.set(0.0);
        self.overlay.clear();
        self.dismiss.disarm();
        self.scheduler.clear();
        self.lifecycle = Lifecycle::Detached;
    }

    /// Applies a user drag of `delta` along the scroll axis.
    pub fn drag(&mut self, delta: f64) {
        if !self.is_attached() {
            return;
        }
        let (update, interrupted) = self.scroll.drag_by(delta);
        if let Some(bound) = interrupted.and_then(|end| self.finish_animation(end)) {
            self.scheduler.schedule(Deferred::ForceProgress(bound));
        }
        self.on_drag_update(update);
    }

    /// Ends a user drag.
    ///
    /// The drag's offset is laid out and published first, so a drag that entered the
    /// transition since the last frame is already observed when scrolling goes idle.
    pub fn end_drag(&mut self, now_ms: u64) {
        if !self.is_attached() {
            return;
        }
        self.now_ms = now_ms;
        self.run_layout();
        self.flush_deferred();
        self.scroll.release(now_ms);
        self.handle_idle();
    }

    /// Dismisses the sheet on behalf of the host. Ignored once the sheet is dismissed.
    pub fn dismiss(&mut self, now_ms: u64) {
        if self.dismissed.is_some() {
            return;
        }
        self.now_ms = now_ms;
        self.dismiss.disarm();
        self.dismiss_sheet(DismissTrigger::Host);
    }

    /// Runs one frame: animation tick, idle handling, layout with offset corrections, then the
    /// deferred state changes.
    pub fn pump_frame(&mut self, now_ms: u64) -> SheetFrame {
        if !self.is_attached() {
            return self.frame();
        }
        self.now_ms = now_ms;

        // Animated scrolling only moves the bottom fill; dismissal needs a user drag.
        let (_, end) = self.scroll.tick(now_ms);
        self.dismiss.update_fill_height(self.scroll.metrics());
        // Idle is observed before the animation's completion, so a finishing snap cannot
        // trigger another one.
        self.handle_idle();
        let forced = end.and_then(|end| self.finish_animation(end));

        self.run_layout();
        // Queued after this frame's publication so the bound wins over any drift.
        if let Some(bound) = forced {
            self.scheduler.schedule(Deferred::ForceProgress(bound));
        }
        self.flush_deferred();
        self.overlay.tick(now_ms);
        self.frame()
    }

    pub fn snapshot(&self) -> SheetSnapshot {
        SheetSnapshot {
            scroll: ScrollSnapshot {
                offset: self.scroll.offset(),
                is_scrolling: self.scroll.is_scrolling(),
            },
            transition: TransitionSnapshot::capture(
                self.progress.value(),
                self.layout.interpolated_height,
                &self.overlay,
                &self.snap,
            ),
            fill_height: self.dismiss.fill_height(),
            dismissed: self.is_dismissed(),
        }
    }

    fn frame(&self) -> SheetFrame {
        let progress = self.progress.value();
        let mut paint = self.transition.paint(progress);
        if !self.options.header_content {
            paint.content_opacity = 0.0;
        }
        SheetFrame {
            scroll_offset: self.scroll.offset(),
            progress,
            layout: self.layout,
            paint,
            overlay: self.overlay.overlay().map(|o| OverlayFrame {
                opacity: o.opacity(),
                accepts_input: o.accepts_input(),
            }),
            fill_height: self.dismiss.fill_height(),
            dismissed: self.is_dismissed(),
        }
    }

    fn constraints(&self) -> LayoutConstraints {
        let offset = self.scroll.offset();
        let viewport = self.dims.viewport_extent;
        let above = (self.dims.preceding_scroll_extent - offset).max(0.0);
        LayoutConstraints {
            scroll_offset: offset,
            preceding_scroll_extent: self.dims.preceding_scroll_extent,
            viewport_main_axis_extent: viewport,
            remaining_paint_extent: (viewport - above).max(0.0),
        }
    }

    fn run_layout(&mut self) {
        self.scheduler.begin_layout();
        for _ in 0..MAX_LAYOUT_CYCLES {
            self.layout = self.transition.layout(self.constraints());
            // Applied between passes, never inside the pass that produced it.
            match self.layout.geometry.scroll_offset_correction {
                Some(correction) => self.scroll.correct_by(correction),
                None => break,
            }
        }
        self.scheduler
            .schedule(Deferred::PublishProgress(self.layout.progress));
        self.scheduler.end_layout();

        let max = self
            .dims
            .max_scroll_extent(self.layout.interpolated_height, self.options.body_extent);
        self.scroll
            .set_content_dimensions(self.dims.min_scroll_extent, max);
        self.dismiss.update_fill_height(self.scroll.metrics());
    }

    fn flush_deferred(&mut self) {
        for task in self.scheduler.drain() {
            match task {
                Deferred::PublishProgress(p) | Deferred::ForceProgress(p) => self.publish(p),
            }
        }
    }

    fn publish(&mut self, progress: f64) {
        if !self.progress.set(progress) {
            return;
        }
        let progress = self.progress.value();
        self.overlay.on_progress(progress);
        match self.snap.on_progress(progress) {
            Some(ListenChange::Attach) => self.start_snap_listening(),
            Some(ListenChange::Detach) => self.stop_snap_listening(),
            None => {}
        }
    }

    fn start_snap_listening(&mut self) {
        if self.snap_listener.is_some() {
            return;
        }
        let idle = Rc::clone(&self.idle_pending);
        let id = self.scroll.add_is_scrolling_listener(move |is_scrolling| {
            if !*is_scrolling {
                idle.set(true);
            }
        });
        self.snap_listener = Some(id);
    }

    fn stop_snap_listening(&mut self) {
        if let Some(id) = self.snap_listener.take() {
            self.scroll.remove_is_scrolling_listener(id);
        }
        self.idle_pending.set(false);
    }

    fn handle_idle(&mut self) {
        if !self.idle_pending.replace(false) {
            return;
        }
        let Some(plan) = self
            .snap
            .decide(self.scroll.metrics(), self.dims.preceding_scroll_extent)
        else {
            return;
        };
        if let Some(end) =
            self.scroll
                .animate_to(plan.target, plan.duration_ms, plan.easing, self.now_ms)
        {
            atrace!(final_offset = end.final_offset, "settle interrupted by snap");
        }
    }

    /// Returns the progress bound to force when a snap landed on its target.
    fn finish_animation(&mut self, end: AnimationEnd) -> Option<f64> {
        if !self.snap.is_snapping() {
            return None;
        }
        atrace!(
            final_offset = end.final_offset,
            interrupted = end.interrupted,
            "snap animation ended"
        );
        self.snap.complete(end.final_offset)
    }

    fn on_drag_update(&mut self, update: ScrollUpdate) {
        let metrics = self.scroll.metrics();
        let trigger = self
            .dismiss
            .on_offset(metrics)
            .or_else(|| self.dismiss.on_scroll_update(metrics, update.delta));
        self.dismiss.update_fill_height(metrics);
        if let Some(trigger) = trigger {
            self.dismiss_sheet(trigger);
        }
    }

    fn dismiss_sheet(&mut self, trigger: DismissTrigger) {
        adebug!(?trigger, "SheetController: dismissing");
        self.dismissed = Some(trigger);
        self.overlay.fade_out(self.now_ms);
        if let Some(cb) = &self.on_dismiss {
            cb();
        }
    }
}

impl Drop for SheetController {
    fn drop(&mut self) {
        if self.is_attached() {
            self.detach();
        }
    }
}

impl core::fmt::Debug for SheetController {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("SheetController")
            .field("options", &self.options)
            .field("dims", &self.dims)
            .field("scroll", &self.scroll)
            .field("progress", &self.progress.value())
            .field("snap", &self.snap)
            .field("lifecycle", &self.lifecycle)
            .field("dismissed", &self.dismissed)
            .finish_non_exhaustive()
    }
}
