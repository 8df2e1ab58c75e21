use crate::*;

use alloc::rc::Rc;
use alloc::vec::Vec;
use core::cell::{Cell, RefCell};

use sheet_header::{
    ConfigError, DismissTrigger, Easing, HostEnvironment, ScrollPhysics, SheetOptions,
    SnapBehavior, SnapDirection,
};

// viewport 800 => header preceded by 800px, transition between offsets 680 and 800.
const ZONE_START: f64 = 680.0;
const PRECEDING: f64 = 800.0;

fn options(snap: SnapBehavior, physics: ScrollPhysics) -> SheetOptions {
    SheetOptions::with_title_bar_height(120.0)
        .with_child_sizes(0.5, 0.25)
        .with_header_height(30.0)
        .with_body_extent(2_000.0)
        .with_snap_behavior(snap)
        .with_physics(physics)
}

fn sheet(snap: SnapBehavior, physics: ScrollPhysics) -> SheetController {
    let mut c = SheetController::new(options(snap, physics), HostEnvironment::new(800.0)).unwrap();
    c.attach(0);
    c
}

/// Pumps 16ms frames over `[from_ms, to_ms]` and returns the last one.
fn pump(c: &mut SheetController, from_ms: u64, to_ms: u64) -> SheetFrame {
    let mut frame = c.pump_frame(from_ms);
    let mut now = from_ms;
    while now < to_ms {
        now = (now + 16).min(to_ms);
        frame = c.pump_frame(now);
    }
    frame
}

/// Drags into the transition zone and lets the offset corrections settle.
///
/// With a 30px header growing to 120px, each pixel dragged past the zone start settles
/// four pixels into the transition.
fn drag_to_progress(c: &mut SheetController, progress: f64) -> SheetFrame {
    let settled = progress * 120.0;
    let delta = ZONE_START + settled / 4.0 - c.scroll().offset();
    c.drag(delta);
    pump(c, 16, 96)
}

fn counter() -> (Rc<Cell<usize>>, impl Fn() + 'static) {
    let count = Rc::new(Cell::new(0));
    let cb = {
        let count = Rc::clone(&count);
        move || count.set(count.get() + 1)
    };
    (count, cb)
}

/// A sheet whose minimum extent sits inside the transition zone: viewport 800 and an 80px
/// title bar put the zone at offsets 720..800, the minimum at 760.
fn short_sheet(physics: ScrollPhysics) -> SheetController {
    let options = SheetOptions::with_title_bar_height(80.0)
        .with_child_sizes(0.95, 0.95)
        .with_header_height(30.0)
        .with_body_extent(2_000.0)
        .with_snap_behavior(SnapBehavior::End)
        .with_physics(physics);
    let mut c = SheetController::new(options, HostEnvironment::new(800.0)).unwrap();
    c.attach(0);
    c
}

#[test]
fn attach_lays_out_the_compact_header_at_the_initial_offset() {
    let c = sheet(SnapBehavior::Midpoint, ScrollPhysics::Clamping);
    assert_eq!(c.scroll().offset(), 400.0);
    assert_eq!(c.scroll().min_scroll_extent(), 200.0);
    assert_eq!(c.scroll().max_scroll_extent(), 2_030.0);
    assert_eq!(c.progress(), 0.0);
    assert_eq!(c.last_layout().interpolated_height, 30.0);
    assert!(!c.overlay().is_showing());
    assert_eq!(c.scroll().is_scrolling_listener_count(), 0);
}

#[test]
fn invalid_configuration_is_rejected() {
    let err = SheetController::new(
        options(SnapBehavior::Midpoint, ScrollPhysics::Clamping).with_child_sizes(0.2, 0.4),
        HostEnvironment::new(800.0),
    )
    .unwrap_err();
    assert_eq!(
        err,
        ConfigError::MinimumExceedsInitial {
            minimum: 0.4,
            initial: 0.2
        }
    );
}

#[test]
fn progress_is_published_at_the_frame_boundary() {
    let mut c = sheet(SnapBehavior::Midpoint, ScrollPhysics::Clamping);
    c.drag(400.0);
    assert_eq!(c.scroll().offset(), PRECEDING);
    assert_eq!(c.progress(), 0.0);
    assert!(!c.overlay().is_showing());

    let frame = c.pump_frame(16);
    assert_eq!(frame.progress, 1.0);
    assert!(frame.paint.fill.is_transparent());
    let overlay = frame.overlay.unwrap();
    assert_eq!(overlay.opacity, 1.0);
    assert!(overlay.accepts_input);
}

#[test]
fn corrections_settle_height_growth_into_the_offset() {
    let mut c = sheet(SnapBehavior::Midpoint, ScrollPhysics::Clamping);
    let frame = drag_to_progress(&mut c, 0.3);
    assert!((frame.progress - 0.3).abs() < 1e-6, "progress={}", frame.progress);
    assert!((frame.scroll_offset - (ZONE_START + 36.0)).abs() < 1e-4);
    assert!((frame.layout.interpolated_height - 57.0).abs() < 1e-4);
    assert!(c.overlay().is_showing());
    assert!(!frame.overlay.unwrap().accepts_input);
}

#[test]
fn release_below_midpoint_snaps_back_to_compact() {
    let mut c = sheet(SnapBehavior::Midpoint, ScrollPhysics::Clamping);
    drag_to_progress(&mut c, 0.3);
    assert_eq!(c.scroll().is_scrolling_listener_count(), 1);

    c.end_drag(100);
    let plan = c.snap().in_flight().unwrap();
    assert_eq!(plan.direction, SnapDirection::Backward);
    assert_eq!(plan.target, ZONE_START);
    assert!(c.snap().is_snapping());
    assert!(c.scroll().is_animating());

    let frame = pump(&mut c, 116, 400);
    assert_eq!(frame.progress, 0.0);
    assert!(frame.overlay.is_none());
    assert!(!c.snap().is_snapping());
    assert!(!c.snap().is_listening());
    assert!(!c.scroll().is_scrolling());
    assert_eq!(c.scroll().is_scrolling_listener_count(), 0);
}

#[test]
fn release_in_the_same_frame_as_the_drag_still_snaps() {
    let mut c = sheet(SnapBehavior::Midpoint, ScrollPhysics::Clamping);
    c.drag(ZONE_START + 9.0 - 400.0);
    assert_eq!(c.progress(), 0.0);

    c.end_drag(5);
    assert!(c.progress() > 0.0);
    let plan = c.snap().in_flight().unwrap();
    assert_eq!(plan.direction, SnapDirection::Backward);
    assert_eq!(plan.target, ZONE_START);

    let frame = pump(&mut c, 16, 1_000);
    assert_eq!(frame.progress, 0.0);
    assert_eq!(frame.scroll_offset, ZONE_START);
    assert!(frame.overlay.is_none());
    assert!(!c.snap().is_snapping());
}

#[test]
fn release_above_midpoint_snaps_to_expanded() {
    let mut c = sheet(SnapBehavior::Midpoint, ScrollPhysics::Clamping);
    drag_to_progress(&mut c, 0.75);

    c.end_drag(100);
    assert_eq!(
        c.snap().in_flight().unwrap().direction,
        SnapDirection::Forward
    );

    let frame = pump(&mut c, 116, 400);
    assert_eq!(frame.scroll_offset, PRECEDING);
    assert_eq!(frame.progress, 1.0);
    assert!(frame.overlay.unwrap().accepts_input);
    assert!(frame.paint.fill.is_transparent());
    assert_eq!(frame.paint.corner_radius, 0.0);
    assert!(!c.snap().is_snapping());
}

#[test]
fn disabled_snapping_leaves_progress_where_the_user_left_it() {
    let mut c = sheet(SnapBehavior::None, ScrollPhysics::Clamping);
    let before = drag_to_progress(&mut c, 0.3).progress;

    c.end_drag(100);
    assert!(!c.scroll().is_animating());
    assert!(c.snap().in_flight().is_none());

    let after = pump(&mut c, 116, 400);
    assert!((after.progress - before).abs() < 1e-6);
    assert!(!c.scroll().is_scrolling());
    assert_eq!(c.scroll().is_scrolling_listener_count(), 0);
}

#[test]
fn new_gesture_interrupts_the_snap_without_forcing_progress() {
    let mut c = sheet(SnapBehavior::Midpoint, ScrollPhysics::Clamping);
    drag_to_progress(&mut c, 0.3);
    c.end_drag(100);
    c.pump_frame(110);
    assert!(c.snap().is_snapping());

    c.drag(5.0);
    assert!(!c.snap().is_snapping());
    assert!(!c.scroll().is_animating());
    assert!(c.scroll().is_scrolling());

    let frame = c.pump_frame(126);
    assert!(frame.progress > 0.0 && frame.progress < 1.0);
    assert!(c.overlay().is_showing());
    assert!(c.snap().in_flight().is_none());
}

#[test]
fn snap_listener_is_registered_once_per_crossing() {
    let mut c = sheet(SnapBehavior::Midpoint, ScrollPhysics::Clamping);
    for _ in 0..3 {
        let frame = drag_to_progress(&mut c, 0.3);
        assert!(frame.progress > 0.0);
        assert!(c.overlay().is_showing());
        assert_eq!(c.scroll().is_scrolling_listener_count(), 1);

        let back = 400.0 - c.scroll().offset();
        c.drag(back);
        let frame = pump(&mut c, 16, 48);
        assert_eq!(frame.progress, 0.0);
        assert!(!c.overlay().is_showing());
        assert_eq!(c.scroll().is_scrolling_listener_count(), 0);
    }
    assert!(!c.is_dismissed());
}

#[test]
fn progress_listeners_see_every_published_value() {
    let mut c = sheet(SnapBehavior::None, ScrollPhysics::Clamping);
    let seen = Rc::new(RefCell::new(Vec::new()));
    c.add_progress_listener({
        let seen = Rc::clone(&seen);
        move |p| seen.borrow_mut().push(*p)
    });

    let frame = drag_to_progress(&mut c, 0.5);
    let seen = seen.borrow();
    assert!(!seen.is_empty());
    assert!(seen.iter().all(|p| (0.0..=1.0).contains(p)));
    assert_eq!(*seen.last().unwrap(), frame.progress);
}

#[test]
fn header_content_fades_out_as_progress_rises() {
    let mut c = SheetController::new(
        options(SnapBehavior::None, ScrollPhysics::Clamping).with_header_content(true),
        HostEnvironment::new(800.0),
    )
    .unwrap();
    c.attach(0);
    assert_eq!(c.pump_frame(0).paint.content_opacity, 1.0);

    let frame = drag_to_progress(&mut c, 0.3);
    assert!((frame.paint.content_opacity - 0.7).abs() < 1e-6);

    let mut plain = sheet(SnapBehavior::None, ScrollPhysics::Clamping);
    assert_eq!(plain.pump_frame(0).paint.content_opacity, 0.0);
}

#[test]
fn swipe_at_rest_dismisses_once_with_clamping_physics() {
    let (count, cb) = counter();
    let mut c = sheet(SnapBehavior::Midpoint, ScrollPhysics::Clamping).with_on_dismiss(cb);

    c.drag(-250.0);
    assert_eq!(c.scroll().offset(), 200.0);
    assert_eq!(c.dismiss_trigger(), Some(DismissTrigger::SwipeDelta));

    c.drag(-10.0);
    c.drag(-10.0);
    c.pump_frame(16);
    assert_eq!(count.get(), 1);
}

#[test]
fn overscroll_past_top_dismisses_once_with_bouncing_physics() {
    let (count, cb) = counter();
    let mut c = sheet(SnapBehavior::Midpoint, ScrollPhysics::Bouncing).with_on_dismiss(cb);

    c.drag(-250.0);
    assert_eq!(c.scroll().offset(), 150.0);
    assert_eq!(c.dismiss_trigger(), Some(DismissTrigger::Overscroll));

    for _ in 0..5 {
        c.drag(-3.0);
    }
    assert_eq!(count.get(), 1);
    assert!(c.pump_frame(16).dismissed);
}

#[test]
fn shrinking_header_never_pulls_a_clamped_sheet_below_its_minimum() {
    let (count, cb) = counter();
    let mut c = short_sheet(ScrollPhysics::Clamping).with_on_dismiss(cb);
    assert_eq!(c.scroll().min_scroll_extent(), 760.0);
    // The initial layout grows the header all the way to the region start.
    assert_eq!(c.scroll().offset(), PRECEDING);
    assert_eq!(c.pump_frame(0).progress, 1.0);

    c.drag(-30.0);
    let frame = c.pump_frame(16);
    assert_eq!(frame.scroll_offset, 760.0);
    assert_eq!(frame.progress, 0.5);
    assert!(!frame.dismissed);

    // The backward snap target (720) is clamped to the minimum, where the sheet already is.
    c.end_drag(20);
    assert!(!c.scroll().is_animating());
    assert!(c.snap().in_flight().is_none());
    let frame = pump(&mut c, 36, 1_000);
    assert_eq!(frame.scroll_offset, 760.0);
    assert!(!frame.dismissed);
    assert_eq!(count.get(), 0);

    // A real pull at the minimum still dismisses.
    c.drag(-10.0);
    assert_eq!(c.dismiss_trigger(), Some(DismissTrigger::SwipeDelta));
    assert_eq!(count.get(), 1);
}

#[test]
fn settling_back_from_a_layout_overscroll_does_not_dismiss() {
    let (count, cb) = counter();
    let mut c = short_sheet(ScrollPhysics::Bouncing).with_on_dismiss(cb);

    c.drag(-30.0);
    c.pump_frame(16);
    assert!(c.scroll().is_out_of_range());

    c.end_drag(20);
    assert!(c.scroll().is_animating());
    let frame = pump(&mut c, 36, 2_000);
    assert!(!frame.dismissed);
    assert_eq!(count.get(), 0);
    assert!(!c.scroll().is_animating());
}

#[test]
fn host_dismissal_fades_a_visible_overlay() {
    let (count, cb) = counter();
    let mut c = sheet(SnapBehavior::Midpoint, ScrollPhysics::Clamping).with_on_dismiss(cb);
    c.drag(400.0);
    assert!(c.pump_frame(16).overlay.unwrap().accepts_input);

    c.dismiss(16);
    c.dismiss(20);
    assert_eq!(count.get(), 1);
    assert_eq!(c.dismiss_trigger(), Some(DismissTrigger::Host));

    let mid = c.pump_frame(116).overlay.unwrap();
    assert!(mid.opacity > 0.0 && mid.opacity < 1.0);
    assert!(!mid.accepts_input);

    let done = c.pump_frame(216).overlay.unwrap();
    assert_eq!(done.opacity, 0.0);
}

#[test]
fn bottom_overscroll_is_masked_by_fill_height() {
    let mut c = sheet(SnapBehavior::Midpoint, ScrollPhysics::Bouncing);
    c.drag(400.0);
    c.pump_frame(16);
    assert_eq!(c.scroll().max_scroll_extent(), 2_120.0);

    c.drag(1_350.0);
    assert_eq!(c.fill_height(), 30.0);
    assert_eq!(c.pump_frame(32).fill_height, 30.0);

    c.end_drag(40);
    assert!(c.scroll().is_animating());
    let frame = pump(&mut c, 56, 260);
    assert_eq!(frame.scroll_offset, 2_120.0);
    assert_eq!(frame.fill_height, 0.0);
    assert!(!c.scroll().is_scrolling());
    assert!(c.snap().in_flight().is_none());
}

#[test]
fn detach_removes_every_listener() {
    let mut c = sheet(SnapBehavior::Midpoint, ScrollPhysics::Clamping);
    c.add_progress_listener(|_| {});
    drag_to_progress(&mut c, 0.3);
    assert_eq!(c.scroll().is_scrolling_listener_count(), 1);

    c.detach();
    assert!(!c.is_attached());
    assert_eq!(c.scroll().is_scrolling_listener_count(), 0);
    assert!(!c.overlay().is_showing());
    assert_eq!(c.progress(), 0.0);
    assert!(!c.snap().is_listening());

    // Input after teardown is ignored.
    let offset = c.scroll().offset();
    c.drag(10.0);
    assert_eq!(c.scroll().offset(), offset);

    // A detached sheet cannot be attached again.
    c.attach(500);
    assert!(!c.is_attached());
    assert_eq!(c.scroll().is_scrolling_listener_count(), 0);
}

#[test]
fn snapshot_captures_scroll_and_transition() {
    let mut c = sheet(SnapBehavior::Midpoint, ScrollPhysics::Clamping);
    drag_to_progress(&mut c, 0.3);
    let s = c.snapshot();
    assert!(s.scroll.is_scrolling);
    assert!(s.transition.overlay_showing);
    assert!(s.transition.snap_listening);
    assert!(!s.transition.snapping);
    assert!(!s.dismissed);
    assert_eq!(s.scroll.offset, c.scroll().offset());
}

#[test]
fn clamping_drag_reports_the_full_gesture_delta() {
    let mut s = ScrollPosition::new(100.0, 0.0, 500.0, 800.0, ScrollPhysics::Clamping);
    let (update, interrupted) = s.drag_by(-150.0);
    assert_eq!(update.offset, 0.0);
    assert_eq!(update.delta, -150.0);
    assert!(interrupted.is_none());
    assert!(s.is_scrolling());

    let mut b = ScrollPosition::new(100.0, 0.0, 500.0, 800.0, ScrollPhysics::Bouncing);
    assert_eq!(b.drag_by(-150.0).0.offset, -50.0);
    assert!(b.is_out_of_range());
}

#[test]
fn animated_scroll_ends_exactly_on_target_and_goes_idle() {
    let mut s = ScrollPosition::new(100.0, 0.0, 500.0, 800.0, ScrollPhysics::Clamping);
    let events = Rc::new(RefCell::new(Vec::new()));
    let id = s.add_is_scrolling_listener({
        let events = Rc::clone(&events);
        move |v| events.borrow_mut().push(*v)
    });

    assert!(s.animate_to(300.0, 250, Easing::EaseOutCubic, 0).is_none());
    let (update, end) = s.tick(100);
    assert!(update.unwrap().delta > 0.0);
    assert!(end.is_none());

    let (_, end) = s.tick(250);
    let end = end.unwrap();
    assert_eq!(end.final_offset, 300.0);
    assert!(!end.interrupted);
    assert_eq!(*events.borrow(), [true, false]);

    assert!(s.remove_is_scrolling_listener(id));
}

#[test]
fn layout_corrections_do_not_notify_listeners() {
    let mut s = ScrollPosition::new(100.0, 0.0, 500.0, 800.0, ScrollPhysics::Clamping);
    let calls = Rc::new(RefCell::new(0usize));
    s.add_is_scrolling_listener({
        let calls = Rc::clone(&calls);
        move |_| *calls.borrow_mut() += 1
    });
    s.correct_by(12.5);
    assert_eq!(s.offset(), 112.5);
    assert_eq!(*calls.borrow(), 0);
    assert!(!s.is_scrolling());
}

#[test]
fn clamping_corrections_stay_within_bounds() {
    let mut s = ScrollPosition::new(100.0, 50.0, 500.0, 800.0, ScrollPhysics::Clamping);
    s.correct_by(-80.0);
    assert_eq!(s.offset(), 50.0);
    s.correct_by(600.0);
    assert_eq!(s.offset(), 500.0);

    let mut b = ScrollPosition::new(100.0, 50.0, 500.0, 800.0, ScrollPhysics::Bouncing);
    b.correct_by(-80.0);
    assert_eq!(b.offset(), 20.0);
}

#[test]
fn starting_an_animation_interrupts_the_previous_one() {
    let mut s = ScrollPosition::new(100.0, 0.0, 500.0, 800.0, ScrollPhysics::Clamping);
    s.animate_to(300.0, 250, Easing::Linear, 0);
    s.tick(125);
    let end = s.animate_to(50.0, 250, Easing::Linear, 125).unwrap();
    assert!(end.interrupted);
    assert_eq!(end.final_offset, 200.0);
}

#[test]
fn scheduler_collapses_consecutive_progress_publications() {
    let mut q = FrameScheduler::new();
    q.schedule(Deferred::PublishProgress(0.1));
    q.schedule(Deferred::PublishProgress(0.2));
    q.schedule(Deferred::ForceProgress(1.0));
    q.schedule(Deferred::PublishProgress(0.3));
    assert_eq!(q.len(), 3);

    let drained: Vec<_> = q.drain().collect();
    assert_eq!(
        drained,
        [
            Deferred::PublishProgress(0.2),
            Deferred::ForceProgress(1.0),
            Deferred::PublishProgress(0.3)
        ]
    );
    assert!(q.is_empty());
}
