use alloc::boxed::Box;
use alloc::vec::Vec;

/// Handle returned by [`Listeners::add`], used to remove the listener again.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(u64);

/// A single-threaded listener registry.
///
/// Registration is explicit and symmetric: every `add` hands out a fresh id and must be
/// matched by one `remove`. Listeners are notified in registration order.
pub struct Listeners<T> {
    next_id: u64,
    entries: Vec<(ListenerId, Box<dyn FnMut(&T)>)>,
}

impl<T> Listeners<T> {
    pub fn new() -> Self {
        Self {
            next_id: 0,
            entries: Vec::new(),
        }
    }

    pub fn add(&mut self, listener: impl FnMut(&T) + 'static) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id = self.next_id.wrapping_add(1);
        self.entries.push((id, Box::new(listener)));
        id
    }

    /// Removes a listener. Returns `false` when `id` is not registered.
    pub fn remove(&mut self, id: ListenerId) -> bool {
        let Some(pos) = self.entries.iter().position(|(i, _)| *i == id) else {
            shwarn!(?id, "Listeners: removing an unknown listener");
            debug_assert!(false, "Listeners: removing an unknown listener ({id:?})");
            return false;
        };
        self.entries.remove(pos);
        true
    }

    pub fn contains(&self, id: ListenerId) -> bool {
        self.entries.iter().any(|(i, _)| *i == id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn notify(&mut self, value: &T) {
        for (_, listener) in self.entries.iter_mut() {
            listener(value);
        }
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

impl<T> Default for Listeners<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> core::fmt::Debug for Listeners<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Listeners")
            .field("len", &self.entries.len())
            .finish_non_exhaustive()
    }
}
