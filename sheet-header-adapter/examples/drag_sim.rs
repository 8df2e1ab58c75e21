// Example: drag a sheet's header into its transition, release, and watch it snap.
use sheet_header::{HostEnvironment, ScrollPhysics, SheetOptions, SnapBehavior};
use sheet_header_adapter::SheetController;

fn main() {
    let options = SheetOptions::with_title_bar_height(56.0)
        .with_child_sizes(0.6, 0.3)
        .with_header_height(32.0)
        .with_header_content(true)
        .with_body_extent(1_500.0)
        .with_snap_behavior(SnapBehavior::Midpoint)
        .with_physics(ScrollPhysics::Bouncing);
    let env = HostEnvironment::new(800.0).with_top_inset(24.0);

    let mut sheet = match SheetController::new(options, env) {
        Ok(sheet) => sheet.with_on_dismiss(|| println!("dismissed")),
        Err(err) => {
            eprintln!("invalid sheet: {err}");
            return;
        }
    };
    sheet.attach(0);

    let mut now_ms = 0u64;

    // Simulate a 60fps drag upwards, 6px per frame.
    for _ in 0..45 {
        now_ms += 16;
        sheet.drag(6.0);
        let frame = sheet.pump_frame(now_ms);
        println!(
            "t={now_ms}ms off={:.1} progress={:.3} height={:.1} overlay={:?}",
            frame.scroll_offset,
            frame.progress,
            frame.layout.interpolated_height,
            frame.overlay.map(|o| o.opacity)
        );
    }

    sheet.end_drag(now_ms);
    if let Some(plan) = sheet.snap().in_flight() {
        println!("snapping {:?} to {}", plan.direction, plan.target);
    }

    while sheet.scroll().is_animating() {
        now_ms += 16;
        let frame = sheet.pump_frame(now_ms);
        println!(
            "t={now_ms}ms off={:.1} progress={:.3} corner={:.1}",
            frame.scroll_offset, frame.progress, frame.paint.corner_radius
        );
    }

    sheet.dismiss(now_ms);
    for _ in 0..14 {
        now_ms += 16;
        let frame = sheet.pump_frame(now_ms);
        if let Some(overlay) = frame.overlay {
            println!("t={now_ms}ms overlay opacity={:.2}", overlay.opacity);
        }
    }

    println!("final: {:?}", sheet.snapshot());
    sheet.detach();
}
