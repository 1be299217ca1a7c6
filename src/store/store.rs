use super::outbox::{Outbox, Pending};
use super::subscription::{Subscribers, Subscription};
use std::sync::{Arc, Mutex, PoisonError, RwLock};

type Subscriber<T> = Arc<dyn Fn(&T) + Send + Sync>;

struct Slot<T> {
    value: T,
    version: u64,
}

/// A thread-safe, observable container for application state.
///
/// Every `update` or `set` publishes the new state to all subscribers.
/// Publishing happens after the state lock is released, so subscribers
/// may read from or write to the store themselves.
///
/// States are delivered one at a time and in the order they were written.
/// If another thread is already publishing, an update only queues its
/// state and that thread delivers it.
pub struct Store<T> {
    state: Arc<RwLock<Slot<T>>>,
    subscribers: Arc<Mutex<Subscribers<Subscriber<T>>>>,
    outbox: Arc<Outbox<T>>,
}

impl<T: Clone + Send + Sync + 'static> Store<T> {
    /// Create a new store with the given initial state.
    pub fn new(initial: T) -> Self {
        Self {
            state: Arc::new(RwLock::new(Slot {
                value: initial,
                version: 0,
            })),
            subscribers: Arc::new(Mutex::new(Subscribers::new())),
            outbox: Arc::new(Outbox::new()),
        }
    }

    /// Get a clone of the current state.
    pub fn get(&self) -> T {
        self.read(T::clone)
    }

    /// Read state without cloning it.
    pub fn read<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&T) -> R,
    {
        let slot = self.state.read().unwrap_or_else(PoisonError::into_inner);
        f(&slot.value)
    }

    /// Update the state using a function, then notify subscribers.
    pub fn update<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut T) -> R,
    {
        let (result, must_drain) = {
            let mut slot = self.state.write().unwrap_or_else(PoisonError::into_inner);
            let result = f(&mut slot.value);
            (result, self.stage(&mut slot))
        };
        if must_drain {
            self.drain();
        }
        result
    }

    /// Update the state, notifying subscribers only if `f` returns `true`.
    ///
    /// `f` must leave the state untouched when it returns `false`.
    pub fn update_if<F>(&self, f: F) -> bool
    where
        F: FnOnce(&mut T) -> bool,
    {
        let must_drain = {
            let mut slot = self.state.write().unwrap_or_else(PoisonError::into_inner);
            if !f(&mut slot.value) {
                return false;
            }
            self.stage(&mut slot)
        };
        if must_drain {
            self.drain();
        }
        true
    }

    /// Replace the state, then notify subscribers.
    pub fn set(&self, new_state: T) {
        self.update(|state| *state = new_state);
    }

    /// Subscribe to state changes.
    ///
    /// The callback runs after every later update with the new state. It
    /// stays registered until the returned [`Subscription`] is dropped.
    pub fn subscribe<F>(&self, callback: F) -> Subscription
    where
        F: Fn(&T) + Send + Sync + 'static,
    {
        let id = {
            let slot = self.state.read().unwrap_or_else(PoisonError::into_inner);
            self.subscribers
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .insert(slot.version, Arc::new(callback))
        };
        Subscription::new(id, &self.subscribers)
    }

    /// Watch a projection of the state.
    ///
    /// The callback runs with the current selected value and then only when
    /// an update changes it. While another thread is publishing, the first
    /// call is delivered by that thread after the states it already queued.
    ///
    /// # Examples
    ///
    /// ```
    /// use lantern::Store;
    /// use std::sync::{Arc, Mutex};
    ///
    /// let store = Store::new((0, "idle"));
    /// let seen = Arc::new(Mutex::new(Vec::new()));
    /// let sink = Arc::clone(&seen);
    ///
    /// let _watch = store.watch(|s| s.1, move |label| sink.lock().unwrap().push(*label));
    /// store.update(|s| s.0 += 1);
    /// store.update(|s| s.1 = "busy");
    ///
    /// assert_eq!(*seen.lock().unwrap(), vec!["idle", "busy"]);
    /// ```
    pub fn watch<U, S, F>(&self, select: S, callback: F) -> Subscription
    where
        U: PartialEq + Clone + Send + 'static,
        S: Fn(&T) -> U + Send + Sync + 'static,
        F: Fn(&U) + Send + Sync + 'static,
    {
        let callback = Arc::new(callback);
        let on_change = Arc::clone(&callback);

        // Seeding and registering under the read lock leaves no gap for a
        // write to slip between them.
        let (id, must_drain) = {
            let slot = self.state.read().unwrap_or_else(PoisonError::into_inner);
            let initial = select(&slot.value);
            let last = Mutex::new(initial.clone());

            let id = self
                .subscribers
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .insert(
                    slot.version,
                    Arc::new(move |state: &T| {
                        let next = select(state);
                        {
                            let mut last = last.lock().unwrap_or_else(PoisonError::into_inner);
                            if *last == next {
                                return;
                            }
                            *last = next.clone();
                        }
                        on_change(&next);
                    }),
                );
            let must_drain = self
                .outbox
                .push(Pending::Run(Box::new(move || callback(&initial))));
            (id, must_drain)
        };
        if must_drain {
            self.drain();
        }
        Subscription::new(id, &self.subscribers)
    }

    /// Number of live subscriptions.
    pub fn subscriber_count(&self) -> usize {
        self.subscribers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Stamp a new version and queue it. Called with the write lock held.
    fn stage(&self, slot: &mut Slot<T>) -> bool {
        slot.version += 1;
        self.outbox
            .push(Pending::Publish(slot.version, slot.value.clone()))
    }

    fn drain(&self) {
        let _guard = self.outbox.drain_guard();
        while let Some(pending) = self.outbox.next() {
            match pending {
                Pending::Publish(version, state) => {
                    let subscribers = self
                        .subscribers
                        .lock()
                        .unwrap_or_else(PoisonError::into_inner)
                        .snapshot(version);
                    for subscriber in subscribers {
                        subscriber(&state);
                    }
                }
                Pending::Run(job) => job(),
            }
        }
    }
}

impl<T> Clone for Store<T> {
    fn clone(&self) -> Self {
        Self {
            state: Arc::clone(&self.state),
            subscribers: Arc::clone(&self.subscribers),
            outbox: Arc::clone(&self.outbox),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::mpsc;
    use std::thread;

    #[derive(Clone, Debug, PartialEq)]
    struct PanelState {
        open: bool,
        title: String,
    }

    fn panel() -> Store<PanelState> {
        Store::new(PanelState {
            open: false,
            title: "home".to_string(),
        })
    }

    /// Subscribe a callback that parks the publishing thread on `value`
    /// until the returned sender is signalled. The receiver reports when
    /// the publisher has parked.
    fn park_on(
        store: &Store<u32>,
        value: u32,
    ) -> (Subscription, mpsc::Receiver<()>, mpsc::Sender<()>) {
        let (parked_tx, parked_rx) = mpsc::channel();
        let (release_tx, release_rx) = mpsc::channel();
        let parked_tx = Mutex::new(parked_tx);
        let release_rx = Mutex::new(release_rx);

        let sub = store.subscribe(move |current| {
            if *current == value {
                parked_tx.lock().unwrap().send(()).unwrap();
                release_rx.lock().unwrap().recv().unwrap();
            }
        });
        (sub, parked_rx, release_tx)
    }

    #[test]
    fn store_get_set() {
        let store = panel();
        assert!(!store.get().open);

        store.set(PanelState {
            open: true,
            title: "settings".to_string(),
        });

        assert!(store.get().open);
        assert_eq!(store.get().title, "settings");
    }

    #[test]
    fn store_update_returns_closure_result() {
        let store = panel();
        let was_open = store.update(|state| std::mem::replace(&mut state.open, true));
        assert!(!was_open);
        assert!(store.read(|s| s.open));
    }

    #[test]
    fn store_subscribe() {
        let store = panel();
        let call_count = Arc::new(AtomicUsize::new(0));
        let call_count_clone = call_count.clone();

        let _sub = store.subscribe(move |_state| {
            call_count_clone.fetch_add(1, Ordering::SeqCst);
        });

        assert_eq!(call_count.load(Ordering::SeqCst), 0);

        store.update(|state| state.open = true);
        assert_eq!(call_count.load(Ordering::SeqCst), 1);

        store.update(|state| state.open = false);
        assert_eq!(call_count.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn update_if_publishes_only_on_true() {
        let store = panel();
        let calls = Arc::new(AtomicUsize::new(0));
        let calls_clone = calls.clone();
        let _sub = store.subscribe(move |_| {
            calls_clone.fetch_add(1, Ordering::SeqCst);
        });

        assert!(!store.update_if(|_| false));
        assert_eq!(calls.load(Ordering::SeqCst), 0);

        assert!(store.update_if(|s| {
            s.open = true;
            true
        }));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(store.get().open);
    }

    #[test]
    fn dropping_subscription_stops_notifications() {
        let store = panel();
        let calls = Arc::new(AtomicUsize::new(0));
        let calls_clone = calls.clone();

        let sub = store.subscribe(move |_| {
            calls_clone.fetch_add(1, Ordering::SeqCst);
        });
        store.update(|s| s.open = true);
        drop(sub);
        store.update(|s| s.open = false);

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(store.subscriber_count(), 0);
    }

    #[test]
    fn detached_subscription_survives() {
        let store = panel();
        let calls = Arc::new(AtomicUsize::new(0));
        let calls_clone = calls.clone();

        store
            .subscribe(move |_| {
                calls_clone.fetch_add(1, Ordering::SeqCst);
            })
            .detach();
        store.update(|s| s.open = true);

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(store.subscriber_count(), 1);
    }

    #[test]
    fn watch_fires_only_on_change() {
        let store = panel();
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = seen.clone();

        let _watch = store.watch(|s| s.open, move |open| sink.lock().unwrap().push(*open));
        store.update(|s| s.title = "profile".to_string());
        store.update(|s| s.open = true);
        store.update(|s| s.open = true);

        assert_eq!(*seen.lock().unwrap(), vec![false, true]);
    }

    #[test]
    fn subscriber_can_write_back() {
        let store = Store::new(0u32);
        let inner = store.clone();
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = seen.clone();

        let _sub = store.subscribe(move |value| {
            sink.lock().unwrap().push(*value);
            if *value == 1 {
                inner.set(2);
            }
        });
        store.set(1);

        assert_eq!(store.get(), 2);
        assert_eq!(*seen.lock().unwrap(), vec![1, 2]);
    }

    #[test]
    fn concurrent_updates_are_delivered_in_write_order() {
        let store = Store::new(0u32);
        let (_park, parked, release) = park_on(&store, 1);

        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = seen.clone();
        let _watch = store.watch(|v| *v, move |v| sink.lock().unwrap().push(*v));

        let writer = {
            let store = store.clone();
            thread::spawn(move || store.set(1))
        };
        parked.recv().unwrap();

        // The first writer is mid-delivery; this write must queue behind it.
        store.set(2);
        release.send(()).unwrap();
        writer.join().unwrap();

        assert_eq!(*seen.lock().unwrap(), vec![0, 1, 2]);
        assert_eq!(store.get(), 2);
    }

    #[test]
    fn watch_during_delivery_starts_from_current_value() {
        let store = Store::new(0u32);
        let (_park, parked, release) = park_on(&store, 1);

        let writer = {
            let store = store.clone();
            thread::spawn(move || store.set(1))
        };
        parked.recv().unwrap();
        store.set(2);

        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = seen.clone();
        let _watch = store.watch(|v| *v, move |v| sink.lock().unwrap().push(*v));

        release.send(()).unwrap();
        writer.join().unwrap();
        assert_eq!(*seen.lock().unwrap(), vec![2]);

        store.set(3);
        assert_eq!(*seen.lock().unwrap(), vec![2, 3]);
    }
}
