use alloc::collections::VecDeque;
use alloc::collections::vec_deque::IntoIter;

/// A state mutation deferred to the next frame boundary.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Deferred {
    /// Publish the progress computed by the latest layout pass.
    PublishProgress(f64),
    /// Force progress to a bound after a snap landed exactly on its target.
    ForceProgress(f64),
}

/// A single-threaded queue of deferred mutations.
///
/// Layout code only ever schedules; the queue is drained once layout is over, so observable
/// state never changes while a layout pass is running.
#[derive(Clone, Debug, Default)]
pub struct FrameScheduler {
    queue: VecDeque<Deferred>,
    in_layout: bool,
}

impl FrameScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn is_in_layout(&self) -> bool {
        self.in_layout
    }

    pub fn begin_layout(&mut self) {
        debug_assert!(!self.in_layout, "FrameScheduler: nested layout");
        self.in_layout = true;
    }

    pub fn end_layout(&mut self) {
        self.in_layout = false;
    }

    /// Queues a task. Consecutive progress publications collapse into the latest one.
    pub fn schedule(&mut self, task: Deferred) {
        if let Deferred::PublishProgress(next) = task {
            if let Some(Deferred::PublishProgress(last)) = self.queue.back_mut() {
                *last = next;
                return;
            }
        }
        self.queue.push_back(task);
    }

    /// Takes the queued tasks in order. Must not be called during layout.
    pub fn drain(&mut self) -> IntoIter<Deferred> {
        if self.in_layout {
            awarn!("FrameScheduler: drain requested during layout");
            debug_assert!(!self.in_layout, "FrameScheduler: drain requested during layout");
            return VecDeque::new().into_iter();
        }
        core::mem::take(&mut self.queue).into_iter()
    }

    pub fn clear(&mut self) {
        self.queue.clear();
    }
}
