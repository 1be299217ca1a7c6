use std::sync::{Arc, Mutex, PoisonError, Weak};

/// Registry of subscriber callbacks keyed by a monotonically increasing id.
///
/// Each entry remembers the state version it was registered at and only
/// receives states published after it.
pub(crate) struct Subscribers<S> {
    next_id: usize,
    entries: Vec<(usize, u64, S)>,
}

impl<S: Clone> Subscribers<S> {
    pub(crate) fn new() -> Self {
        Self {
            next_id: 0,
            entries: Vec::new(),
        }
    }

    pub(crate) fn insert(&mut self, since: u64, subscriber: S) -> usize {
        let id = self.next_id;
        self.next_id += 1;
        self.entries.push((id, since, subscriber));
        id
    }

    pub(crate) fn remove(&mut self, id: usize) {
        self.entries.retain(|(entry_id, _, _)| *entry_id != id);
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    /// Clone out the callbacks interested in `version` so they can run
    /// without the registry locked.
    pub(crate) fn snapshot(&self, version: u64) -> Vec<S> {
        self.entries
            .iter()
            .filter(|(_, since, _)| *since < version)
            .map(|(_, _, s)| s.clone())
            .collect()
    }
}

trait Unsubscribe: Send + Sync {
    fn unsubscribe(&self, id: usize);
}

impl<S: Clone + Send> Unsubscribe for Mutex<Subscribers<S>> {
    fn unsubscribe(&self, id: usize) {
        self.lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(id);
    }
}

/// RAII guard for a store subscription.
///
/// Dropping the guard unregisters the callback.
#[must_use = "dropping a Subscription unsubscribes immediately"]
pub struct Subscription {
    id: usize,
    registry: Option<Weak<dyn Unsubscribe>>,
}

impl Subscription {
    pub(crate) fn new<S>(id: usize, registry: &Arc<Mutex<Subscribers<S>>>) -> Self
    where
        S: Clone + Send + 'static,
    {
        let registry: Arc<dyn Unsubscribe> = registry.clone();
        Self {
            id,
            registry: Some(Arc::downgrade(&registry)),
        }
    }

    /// Keep the callback registered for the lifetime of the store.
    pub fn detach(mut self) {
        self.registry = None;
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(registry) = self.registry.take().and_then(|weak| weak.upgrade()) {
            registry.unsubscribe(self.id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snapshot_skips_entries_newer_than_version() {
        let mut subscribers = Subscribers::new();
        subscribers.insert(0, "early");
        subscribers.insert(3, "late");

        assert_eq!(subscribers.snapshot(2), vec!["early"]);
        assert_eq!(subscribers.snapshot(4), vec!["early", "late"]);
    }
}
