//! In-memory synchronous notifier.

use std::sync::{Arc, Mutex, PoisonError, Weak};

use crate::bus::{ChangeNotifier, Listener, Subscription};

struct Registry<M> {
    next_id: u64,
    listeners: Vec<(u64, Listener<M>)>,
}

impl<M> Default for Registry<M> {
    fn default() -> Self {
        Self {
            next_id: 0,
            listeners: Vec::new(),
        }
    }
}

/// In-memory observer list.
///
/// - No IO / no async
/// - Registration-ordered fan-out
/// - Listeners are called outside the registry lock
pub struct InMemoryNotifier<M> {
    registry: Arc<Mutex<Registry<M>>>,
}

impl<M> InMemoryNotifier<M> {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<M> Default for InMemoryNotifier<M> {
    fn default() -> Self {
        Self {
            registry: Arc::new(Mutex::new(Registry::default())),
        }
    }
}

impl<M> core::fmt::Debug for InMemoryNotifier<M> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let count = self
            .registry
            .lock()
            .map(|r| r.listeners.len())
            .unwrap_or_default();
        f.debug_struct("InMemoryNotifier")
            .field("listeners", &count)
            .finish()
    }
}

impl<M> ChangeNotifier<M> for InMemoryNotifier<M>
where
    M: 'static,
{
    fn publish(&self, message: &M) -> usize {
        // Snapshot under the lock, call outside it.
        let listeners: Vec<Listener<M>> = {
            let registry = self.registry.lock().unwrap_or_else(PoisonError::into_inner);
            registry.listeners.iter().map(|(_, l)| l.clone()).collect()
        };

        for listener in &listeners {
            listener(message);
        }

        tracing::trace!(listeners = listeners.len(), "change published");
        listeners.len()
    }

    fn subscribe(&self, listener: Listener<M>) -> Subscription {
        let id = {
            let mut registry = self.registry.lock().unwrap_or_else(PoisonError::into_inner);
            let id = registry.next_id;
            registry.next_id += 1;
            registry.listeners.push((id, listener));
            id
        };

        let weak: Weak<Mutex<Registry<M>>> = Arc::downgrade(&self.registry);
        Subscription::new(move || {
            if let Some(registry) = weak.upgrade() {
                let mut registry = registry.lock().unwrap_or_else(PoisonError::into_inner);
                registry.listeners.retain(|(lid, _)| *lid != id);
            }
        })
    }

    fn listener_count(&self) -> usize {
        self.registry
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .listeners
            .len()
    }
}
