use crate::listeners::{ListenerId, Listeners};

/// Holds the normalized transition progress and notifies listeners when it changes.
///
/// Values are clamped into `[0, 1]`; setting the current value again is a no-op.
#[derive(Debug, Default)]
pub struct ProgressNotifier {
    value: f64,
    listeners: Listeners<f64>,
}

impl ProgressNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    /// Publishes a new progress value. Returns `true` when listeners were notified.
    pub fn set(&mut self, value: f64) -> bool {
        let value = if value.is_nan() {
            0.0
        } else {
            value.clamp(0.0, 1.0)
        };
        if value == self.value {
            return false;
        }
        shtrace!(from = self.value, to = value, "ProgressNotifier::set");
        self.value = value;
        self.listeners.notify(&value);
        true
    }

    pub fn add_listener(&mut self, listener: impl FnMut(&f64) + 'static) -> ListenerId {
        self.listeners.add(listener)
    }

    pub fn remove_listener(&mut self, id: ListenerId) -> bool {
        self.listeners.remove(id)
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    pub fn clear_listeners(&mut self) {
        self.listeners.clear();
    }
}
