use parking_lot::Mutex;
use std::{
    fmt,
    sync::{Arc, Weak},
};

type Listener = Arc<dyn Fn() + Send + Sync>;

#[derive(Default)]
struct Registry {
    next_id: u64,
    listeners: Vec<(u64, Listener)>,
}

impl Registry {
    fn contains(&self, id: u64) -> bool {
        self.listeners.iter().any(|(i, _)| *i == id)
    }
}

/// Change listeners attached to one store.
#[derive(Default)]
pub(crate) struct Subscribers {
    registry: Arc<Mutex<Registry>>,
}

impl Subscribers {
    pub(crate) fn add(&self, listener: impl Fn() + Send + Sync + 'static) -> Subscription {
        let mut reg = self.registry.lock();
        let id = reg.next_id;
        reg.next_id += 1;
        reg.listeners.push((id, Arc::new(listener)));

        Subscription { id, registry: Arc::downgrade(&self.registry) }
    }

    /// Call every listener once. The registry lock is not held while a
    /// listener runs, so listeners may subscribe or unsubscribe freely.
    pub(crate) fn notify(&self) {
        let snapshot: Vec<(u64, Listener)> = self.registry.lock().listeners.clone();

        for (id, listener) in snapshot {
            // Skip anyone who unsubscribed while earlier listeners were running.
            if self.registry.lock().contains(id) {
                listener();
            }
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.registry.lock().listeners.len()
    }
}

impl fmt::Debug for Subscribers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscribers").field("count", &self.len()).finish()
    }
}

/// Handle returned by `SavedLocationStore::subscribe`.
///
/// Dropping the handle does not unsubscribe; call [`Subscription::unsubscribe`].
#[derive(Debug, Clone)]
pub struct Subscription {
    id: u64,
    registry: Weak<Mutex<Registry>>,
}

impl Subscription {
    /// Stop receiving notifications. Idempotent, and a no-op once the store is gone.
    pub fn unsubscribe(&self) {
        if let Some(registry) = self.registry.upgrade() {
            registry.lock().listeners.retain(|(id, _)| *id != self.id);
        }
    }
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registry")
            .field("next_id", &self.next_id)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn listener_removed_mid_notify_is_skipped() {
        let subs = Arc::new(Subscribers::default());
        let second_calls = Arc::new(AtomicUsize::new(0));

        let victim: Arc<Mutex<Option<Subscription>>> = Arc::default();
        let victim_slot = victim.clone();
        let _first = subs.add(move || {
            if let Some(sub) = victim_slot.lock().as_ref() {
                sub.unsubscribe();
            }
        });

        let counter = second_calls.clone();
        let second = subs.add(move || {
            counter.fetch_add(1, Ordering::SeqCst);
        });
        *victim.lock() = Some(second);

        subs.notify();

        assert_eq!(second_calls.load(Ordering::SeqCst), 0);
        assert_eq!(subs.len(), 1);
    }

    #[test]
    fn listener_may_subscribe_during_notify() {
        let subs = Arc::new(Subscribers::default());
        let inner = subs.clone();

        let _sub = subs.add(move || {
            let _ = inner.add(|| {});
        });

        subs.notify();
        assert_eq!(subs.len(), 2);
    }
}
