use crate::{Easing, Tween};

/// Duration of the overlay fade-out played when the sheet is dismissed.
pub const OVERLAY_FADE_OUT_MS: u64 = 200;

/// The expanded title bar layer inserted above the sheet while progress is above zero.
///
/// It mirrors the published progress and carries its own opacity factor so it can fade out
/// independently on dismissal.
#[derive(Clone, Debug, PartialEq)]
pub struct Overlay {
    progress: f64,
    fade: f64,
    fade_tween: Option<Tween>,
}

impl Overlay {
    fn new(progress: f64) -> Self {
        Self {
            progress,
            fade: 1.0,
            fade_tween: None,
        }
    }

    pub fn progress(&self) -> f64 {
        self.progress
    }

    /// Effective opacity: mirrored progress times the local fade factor.
    pub fn opacity(&self) -> f64 {
        (self.progress * self.fade).clamp(0.0, 1.0)
    }

    /// Pointer and gesture input is only accepted once the overlay is fully opaque.
    pub fn accepts_input(&self) -> bool {
        self.opacity() == 1.0
    }

    pub fn is_fading_out(&self) -> bool {
        self.fade_tween.is_some()
    }

    /// Starts fading the overlay out. A second call while fading is ignored.
    pub fn fade_out(&mut self, now_ms: u64) {
        if self.fade_tween.is_some() {
            return;
        }
        self.fade_tween = Some(Tween::new(
            self.fade,
            0.0,
            now_ms,
            OVERLAY_FADE_OUT_MS,
            Easing::EaseOutCubic,
        ));
    }

    /// Advances the fade animation. Returns `true` while it is still running.
    pub fn tick(&mut self, now_ms: u64) -> bool {
        let Some(tween) = self.fade_tween else {
            return false;
        };
        self.fade = tween.sample(now_ms);
        !tween.is_done(now_ms)
    }
}

/// What [`OverlayCoordinator::on_progress`] did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OverlayChange {
    Inserted,
    Removed,
    Updated,
    Unchanged,
}

/// Keeps exactly one overlay alive while progress is above zero.
#[derive(Clone, Debug, Default)]
pub struct OverlayCoordinator {
    overlay: Option<Overlay>,
}

impl OverlayCoordinator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_showing(&self) -> bool {
        self.overlay.is_some()
    }

    pub fn overlay(&self) -> Option<&Overlay> {
        self.overlay.as_ref()
    }

    pub fn on_progress(&mut self, progress: f64) -> OverlayChange {
        if progress <= 0.0 {
            if self.overlay.take().is_some() {
                shdebug!("overlay removed");
                return OverlayChange::Removed;
            }
            return OverlayChange::Unchanged;
        }

        if let Some(overlay) = self.overlay.as_mut() {
            if overlay.progress == progress {
                return OverlayChange::Unchanged;
            }
            overlay.progress = progress;
            return OverlayChange::Updated;
        }

        shdebug!(progress, "overlay inserted");
        self.overlay = Some(Overlay::new(progress));
        OverlayChange::Inserted
    }

    /// Fades the overlay out if one is showing. Returns `true` when a fade was started.
    pub fn fade_out(&mut self, now_ms: u64) -> bool {
        match &mut self.overlay {
            Some(overlay) if !overlay.is_fading_out() => {
                overlay.fade_out(now_ms);
                true
            }
            _ => false,
        }
    }

    pub fn tick(&mut self, now_ms: u64) -> bool {
        self.overlay
            .as_mut()
            .is_some_and(|overlay| overlay.tick(now_ms))
    }

    /// Drops the overlay unconditionally (sheet teardown).
    pub fn clear(&mut self) {
        self.overlay = None;
    }
}
