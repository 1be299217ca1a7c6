use std::collections::VecDeque;
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::thread;

/// Work waiting to be delivered to subscribers.
pub(crate) enum Pending<T> {
    /// A state published at the given version.
    Publish(u64, T),
    /// A one-off callback, such as a watch's initial call.
    Run(Box<dyn FnOnce() + Send>),
}

struct Queue<T> {
    items: VecDeque<Pending<T>>,
    draining: bool,
}

/// FIFO of pending deliveries, drained by one thread at a time.
///
/// Whoever queues into an idle outbox becomes the drainer and keeps
/// delivering until the queue is empty. Everyone else only queues, so
/// subscribers see states in version order.
pub(crate) struct Outbox<T> {
    queue: Mutex<Queue<T>>,
}

impl<T> Outbox<T> {
    pub(crate) fn new() -> Self {
        Self {
            queue: Mutex::new(Queue {
                items: VecDeque::new(),
                draining: false,
            }),
        }
    }

    /// Queue an item. Returns `true` if the caller must now drain.
    pub(crate) fn push(&self, item: Pending<T>) -> bool {
        let mut queue = self.lock();
        queue.items.push_back(item);
        !std::mem::replace(&mut queue.draining, true)
    }

    /// Next item to deliver. `None` ends the drain.
    pub(crate) fn next(&self) -> Option<Pending<T>> {
        let mut queue = self.lock();
        let item = queue.items.pop_front();
        if item.is_none() {
            queue.draining = false;
        }
        item
    }

    pub(crate) fn drain_guard(&self) -> DrainGuard<'_, T> {
        DrainGuard { outbox: self }
    }

    fn lock(&self) -> MutexGuard<'_, Queue<T>> {
        self.queue.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Releases the drainer role if a subscriber panics mid-drain.
pub(crate) struct DrainGuard<'a, T> {
    outbox: &'a Outbox<T>,
}

impl<T> Drop for DrainGuard<'_, T> {
    fn drop(&mut self) {
        if thread::panicking() {
            self.outbox.lock().draining = false;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_push_claims_the_drain() {
        let outbox = Outbox::new();
        assert!(outbox.push(Pending::Publish(1, "a")));
        assert!(!outbox.push(Pending::Publish(2, "b")));

        assert!(matches!(outbox.next(), Some(Pending::Publish(1, "a"))));
        assert!(matches!(outbox.next(), Some(Pending::Publish(2, "b"))));
        assert!(outbox.next().is_none());

        // Drained and idle again.
        assert!(outbox.push(Pending::Publish(3, "c")));
    }
}
