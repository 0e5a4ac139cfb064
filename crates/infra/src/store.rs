//! The single authority for reading, writing and broadcasting [`AppState`].
//!
//! ```text
//! update(f)
//!   ↓
//! 1. read() current snapshot (storage, else last good in-memory copy)
//!   ↓
//! 2. f(&snapshot) -> next state | DomainError   (error: no write, no notify)
//!   ↓
//! 3. remember next in memory, mirror to storage (storage failure is logged and ignored)
//!   ↓
//! 4. notify every subscriber with the new snapshot
//! ```
//!
//! Updates are serialized by a write lock, so each one observes every update
//! that completed before it. Subscribers are called after that lock is
//! released, so with concurrent writers the notifications of two updates may
//! arrive in either order. Each notification still carries the snapshot its
//! own update wrote; call [`StateStore::read`] for the latest one.

use std::convert::Infallible;
use std::sync::{Arc, Mutex, PoisonError};

use depot_core::DomainResult;
use depot_events::{ChangeNotifier, InMemoryNotifier, Listener, Subscription};
use depot_inventory::AppState;

use crate::codec;
use crate::config::DEFAULT_STORAGE_KEY;
use crate::storage::{InMemoryStorage, StateStorage};

/// Immutable snapshot handed to readers and subscribers.
pub type Snapshot = Arc<AppState>;

pub struct StateStore<S, N = InMemoryNotifier<Snapshot>> {
    storage: S,
    notifier: N,
    key: String,
    last_good: Mutex<Snapshot>,
    write_lock: Mutex<()>,
}

impl StateStore<InMemoryStorage> {
    /// Store over fresh in-memory storage (tests/dev).
    pub fn in_memory() -> Self {
        Self::new(InMemoryStorage::new(), InMemoryNotifier::new(), DEFAULT_STORAGE_KEY)
    }
}

impl<S, N> StateStore<S, N> {
    /// The in-memory copy starts as the default state and is replaced on
    /// every successful write.
    pub fn new(storage: S, notifier: N, key: impl Into<String>) -> Self {
        Self {
            storage,
            notifier,
            key: key.into(),
            last_good: Mutex::new(Arc::new(AppState::default())),
            write_lock: Mutex::new(()),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    fn fallback(&self) -> Snapshot {
        self.last_good
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl<S, N> StateStore<S, N>
where
    S: StateStorage,
    N: ChangeNotifier<Snapshot>,
{
    /// Current state.
    ///
    /// A missing, unreadable or invalid stored document yields the last good
    /// in-memory snapshot instead. This never fails and never writes.
    pub fn read(&self) -> Snapshot {
        match self.storage.load(&self.key) {
            Ok(Some(raw)) => match codec::decode(&raw) {
                Ok(state) => Arc::new(state),
                Err(err) => {
                    tracing::warn!(
                        key = %self.key,
                        error = %err,
                        "stored state rejected; using in-memory state"
                    );
                    self.fallback()
                }
            },
            Ok(None) => self.fallback(),
            Err(err) => {
                tracing::warn!(
                    key = %self.key,
                    error = %err,
                    "failed to load state; using in-memory state"
                );
                self.fallback()
            }
        }
    }

    /// The only mutation path. All-or-nothing: if `f` fails, nothing is
    /// written and nobody is notified.
    pub fn update<F>(&self, f: F) -> DomainResult<Snapshot>
    where
        F: FnOnce(&AppState) -> DomainResult<AppState>,
    {
        self.update_with(|prev| f(prev).map(|next| (next, ())))
            .map(|(snapshot, ())| snapshot)
    }

    /// Infallible transition; always writes and notifies.
    pub fn apply<F>(&self, f: F) -> Snapshot
    where
        F: FnOnce(&AppState) -> AppState,
    {
        let Ok((snapshot, ())) = self.update_with(|prev| Ok::<_, Infallible>((f(prev), ())));
        snapshot
    }

    /// Like [`update`](Self::update), also returning a value computed inside
    /// the same atomic step (e.g. the created or merged record).
    pub fn update_with<T, E, F>(&self, f: F) -> Result<(Snapshot, T), E>
    where
        F: FnOnce(&AppState) -> Result<(AppState, T), E>,
    {
        let (next, output) = {
            let _guard = self.write_lock.lock().unwrap_or_else(PoisonError::into_inner);
            let prev = self.read();
            let (next, output) = f(&prev)?;
            let next = Arc::new(next);
            self.write(&next);
            (next, output)
        };

        self.notifier.publish(&next);
        Ok((next, output))
    }

    fn write(&self, next: &Snapshot) {
        *self.last_good.lock().unwrap_or_else(PoisonError::into_inner) = next.clone();

        let saved = codec::encode(next)
            .map_err(|e| e.to_string())
            .and_then(|raw| self.storage.save(&self.key, &raw).map_err(|e| e.to_string()));
        if let Err(err) = saved {
            tracing::warn!(
                key = %self.key,
                error = %err,
                "failed to persist state; in-memory copy stays authoritative"
            );
        }
    }

    /// Register a listener called with the new snapshot after every
    /// successful update.
    pub fn subscribe<F>(&self, listener: F) -> Subscription
    where
        F: Fn(&Snapshot) + Send + Sync + 'static,
    {
        let listener: Listener<Snapshot> = Arc::new(listener);
        self.notifier.subscribe(listener)
    }
}

impl<S, N> core::fmt::Debug for StateStore<S, N> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("StateStore").field("key", &self.key).finish()
    }
}
