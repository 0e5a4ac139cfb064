//! Change-notification abstraction (mechanics only).
//!
//! A notifier is an in-process publish/subscribe channel. Publishers hand it a
//! message after a successful write; every registered listener receives that
//! message synchronously, in registration order, before `publish` returns.
//!
//! ## Delivery
//!
//! - **Synchronous**: no queue, no background thread. `publish` runs listeners inline.
//! - **Exactly once per publish**: each listener sees each published message once.
//! - **Not cross-process**: durable storage is the only thing other processes see.
//!
//! ## Re-entrancy
//!
//! Listeners run with no notifier lock held, so subscribing or unsubscribing
//! from inside a listener is allowed and takes effect from the next publish.
//! Listeners must not synchronously trigger another write on the publisher that
//! is notifying them.

use std::sync::{Arc, Mutex, PoisonError};

/// Callback invoked with every published message.
pub type Listener<M> = Arc<dyn Fn(&M) + Send + Sync>;

/// Handle returned by [`ChangeNotifier::subscribe`].
///
/// Dropping the handle does **not** unsubscribe; call [`Subscription::unsubscribe`].
/// Unsubscribing is idempotent.
pub struct Subscription {
    cancel: Mutex<Option<Box<dyn FnOnce() + Send>>>,
}

impl Subscription {
    pub fn new(cancel: impl FnOnce() + Send + 'static) -> Self {
        Self {
            cancel: Mutex::new(Some(Box::new(cancel))),
        }
    }

    /// Remove the listener. Safe to call any number of times.
    pub fn unsubscribe(&self) {
        let cancel = self
            .cancel
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        if let Some(cancel) = cancel {
            cancel();
        }
    }

    /// Whether `unsubscribe` has not been called yet.
    pub fn is_active(&self) -> bool {
        self.cancel
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }
}

impl core::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.is_active())
            .finish()
    }
}

/// Domain-agnostic change notifier (observer list).
///
/// The trait requires `Send + Sync` so a store holding a notifier can be
/// shared across threads, even though delivery itself is synchronous.
pub trait ChangeNotifier<M>: Send + Sync {
    /// Deliver `message` to every current listener. Returns how many were called.
    fn publish(&self, message: &M) -> usize;

    fn subscribe(&self, listener: Listener<M>) -> Subscription;

    fn listener_count(&self) -> usize;
}

impl<M, N> ChangeNotifier<M> for Arc<N>
where
    N: ChangeNotifier<M> + ?Sized,
{
    fn publish(&self, message: &M) -> usize {
        (**self).publish(message)
    }

    fn subscribe(&self, listener: Listener<M>) -> Subscription {
        (**self).subscribe(listener)
    }

    fn listener_count(&self) -> usize {
        (**self).listener_count()
    }
}
