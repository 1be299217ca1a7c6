use std::collections::VecDeque;
use std::mem;
use std::sync::{Mutex, MutexGuard, PoisonError};

/// A callback run once on the next frame.
pub type FrameCallback = Box<dyn FnOnce() + Send + 'static>;

/// Schedules callbacks for the next paint frame.
pub trait FrameScheduler: Send + Sync {
    fn request_frame(&self, callback: FrameCallback);
}

/// A frame queue advanced explicitly by its owner.
///
/// Callbacks requested while a frame is running are deferred to the
/// following frame, so a callback that re-schedules itself runs once per
/// frame.
///
/// # Examples
///
/// ```
/// use lantern::frame::{FrameQueue, FrameScheduler};
/// use std::sync::Arc;
/// use std::sync::atomic::{AtomicUsize, Ordering};
///
/// let frames = Arc::new(FrameQueue::new());
/// let ticks = Arc::new(AtomicUsize::new(0));
///
/// let queue = Arc::clone(&frames);
/// let counter = Arc::clone(&ticks);
/// frames.request_frame(Box::new(move || {
///     counter.fetch_add(1, Ordering::SeqCst);
///     queue.request_frame(Box::new(move || {
///         counter.fetch_add(1, Ordering::SeqCst);
///     }));
/// }));
///
/// assert_eq!(frames.run_frame(), 1);
/// assert_eq!(ticks.load(Ordering::SeqCst), 1);
/// assert_eq!(frames.run_frame(), 1);
/// assert_eq!(ticks.load(Ordering::SeqCst), 2);
/// ```
#[derive(Default)]
pub struct FrameQueue {
    pending: Mutex<VecDeque<FrameCallback>>,
}

impl FrameQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run every callback that was queued before this call.
    ///
    /// Returns the number of callbacks run.
    pub fn run_frame(&self) -> usize {
        let batch = mem::take(&mut *self.lock());
        let count = batch.len();
        for callback in batch {
            callback();
        }
        count
    }

    /// Run frames until the queue is empty or `max_frames` have run.
    ///
    /// Returns the number of frames that ran at least one callback.
    pub fn run_until_idle(&self, max_frames: usize) -> usize {
        let mut frames = 0;
        while frames < max_frames && self.run_frame() > 0 {
            frames += 1;
        }
        frames
    }

    /// Number of callbacks waiting for the next frame.
    pub fn pending(&self) -> usize {
        self.lock().len()
    }

    fn lock(&self) -> MutexGuard<'_, VecDeque<FrameCallback>> {
        self.pending.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl FrameScheduler for FrameQueue {
    fn request_frame(&self, callback: FrameCallback) {
        self.lock().push_back(callback);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn callbacks_run_in_request_order() {
        let queue = FrameQueue::new();
        let order = Arc::new(Mutex::new(Vec::new()));

        for i in 0..3 {
            let order = order.clone();
            queue.request_frame(Box::new(move || order.lock().unwrap().push(i)));
        }

        assert_eq!(queue.pending(), 3);
        assert_eq!(queue.run_frame(), 3);
        assert_eq!(*order.lock().unwrap(), vec![0, 1, 2]);
        assert_eq!(queue.pending(), 0);
    }

    #[test]
    fn empty_frame_runs_nothing() {
        let queue = FrameQueue::new();
        assert_eq!(queue.run_frame(), 0);
    }

    #[test]
    fn run_until_idle_follows_chains() {
        let queue = Arc::new(FrameQueue::new());
        let inner = queue.clone();
        queue.request_frame(Box::new(move || {
            let again = inner.clone();
            inner.request_frame(Box::new(move || {
                again.request_frame(Box::new(|| {}));
            }));
        }));

        assert_eq!(queue.run_until_idle(10), 3);
        assert_eq!(queue.pending(), 0);
    }
}
