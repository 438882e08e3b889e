//! # Session Store
//!
//! Storage is the source of truth; notifications only say "re-read". A writer
//! stores a value and then publishes the matching [`Notification`]. Readers
//! subscribe and re-read on every signal, so a missed signal costs nothing
//! beyond staleness until the next read.
//!
//! ```rust
//! use std::sync::atomic::{AtomicUsize, Ordering};
//! use std::sync::Arc;
//! use portal::state::{Notification, SessionStore, StoreKey};
//!
//! let store = SessionStore::in_memory();
//! let seen = Arc::new(AtomicUsize::new(0));
//! let counter = Arc::clone(&seen);
//! let subscription = store.subscribe(Notification::NameUpdated, move || {
//!     counter.fetch_add(1, Ordering::SeqCst);
//! });
//!
//! store.write_and_publish(StoreKey::Name, "Ada", Notification::NameUpdated)?;
//! assert_eq!(seen.load(Ordering::SeqCst), 1);
//!
//! drop(subscription);
//! store.publish(Notification::NameUpdated);
//! assert_eq!(seen.load(Ordering::SeqCst), 1);
//! # Ok::<(), portal::core::ApiError>(())
//! ```

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Weak};

use parking_lot::Mutex;
use serde::de::DeserializeOwned;
use serde::Serialize;

use super::keys::{Notification, StoreKey};
use super::storage::{FileStorage, MemoryStorage, Storage};
use crate::config::PortalConfig;
use crate::core::error::{ApiError, Result};

type Listener = Arc<dyn Fn() + Send + Sync>;

#[derive(Default)]
struct Registry {
    next_id: u64,
    listeners: HashMap<Notification, Vec<(u64, Listener)>>,
}

impl Registry {
    fn contains(&self, notification: Notification, id: u64) -> bool {
        self.listeners
            .get(&notification)
            .is_some_and(|list| list.iter().any(|(other, _)| *other == id))
    }

    fn remove(&mut self, notification: Notification, id: u64) {
        if let Some(list) = self.listeners.get_mut(&notification) {
            list.retain(|(other, _)| *other != id);
            if list.is_empty() {
                self.listeners.remove(&notification);
            }
        }
    }
}

/// Process-wide key-value store with change notifications.
///
/// Clones share storage and listeners.
#[derive(Clone)]
pub struct SessionStore {
    storage: Arc<dyn Storage>,
    registry: Arc<Mutex<Registry>>,
}

impl fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionStore")
            .field("keys", &self.storage.keys())
            .finish_non_exhaustive()
    }
}

impl SessionStore {
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self {
            storage,
            registry: Arc::new(Mutex::new(Registry::default())),
        }
    }

    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryStorage::new()))
    }

    /// File-backed when `config.storage_file` is set, in-memory otherwise.
    pub fn open(config: &PortalConfig) -> Result<Self> {
        match &config.storage_file {
            Some(path) => Ok(Self::new(Arc::new(FileStorage::open(path)?))),
            None => Ok(Self::in_memory()),
        }
    }

    pub fn get(&self, key: StoreKey) -> Option<String> {
        self.storage.get(key.as_str())
    }

    /// Read and deserialize a JSON-encoded value. Unparseable values read as absent.
    pub fn get_json<T: DeserializeOwned>(&self, key: StoreKey) -> Option<T> {
        let raw = self.get(key)?;
        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!(key = %key, error = %e, "Ignoring malformed stored value");
                None
            }
        }
    }

    pub fn set(&self, key: StoreKey, value: &str) -> Result<()> {
        self.storage.set(key.as_str(), value)
    }

    pub fn set_json<T: Serialize + ?Sized>(&self, key: StoreKey, value: &T) -> Result<()> {
        let encoded = serde_json::to_string(value)
            .map_err(|e| ApiError::Storage(format!("failed to encode {key}: {e}")))?;
        self.set(key, &encoded)
    }

    pub fn remove(&self, key: StoreKey) -> Result<()> {
        self.storage.remove(key.as_str())
    }

    /// Store `value` under `key`, then signal `notification`.
    pub fn write_and_publish(&self, key: StoreKey, value: &str, notification: Notification) -> Result<()> {
        self.set(key, value)?;
        self.publish(notification);
        Ok(())
    }

    /// Invoke every listener of `notification`.
    ///
    /// Listeners run on the calling thread, outside the registry lock. A listener
    /// released by an earlier listener during this publish is skipped.
    pub fn publish(&self, notification: Notification) {
        let listeners: Vec<(u64, Listener)> = self
            .registry
            .lock()
            .listeners
            .get(&notification)
            .cloned()
            .unwrap_or_default();

        tracing::debug!(%notification, listeners = listeners.len(), "Publishing");

        for (id, listener) in listeners {
            let live = self.registry.lock().contains(notification, id);
            if live {
                listener();
            }
        }
    }

    /// Register `callback` for `notification` until the returned handle is dropped.
    #[must_use = "dropping the subscription unsubscribes immediately"]
    pub fn subscribe<F>(&self, notification: Notification, callback: F) -> Subscription
    where
        F: Fn() + Send + Sync + 'static,
    {
        let mut registry = self.registry.lock();
        let id = registry.next_id;
        registry.next_id += 1;
        registry
            .listeners
            .entry(notification)
            .or_default()
            .push((id, Arc::new(callback)));

        Subscription {
            id,
            notification,
            registry: Arc::downgrade(&self.registry),
        }
    }

    pub fn listener_count(&self, notification: Notification) -> usize {
        self.registry
            .lock()
            .listeners
            .get(&notification)
            .map_or(0, Vec::len)
    }
}

/// Handle to a registered listener. Dropping it unsubscribes.
pub struct Subscription {
    id: u64,
    notification: Notification,
    registry: Weak<Mutex<Registry>>,
}

impl Subscription {
    pub fn notification(&self) -> Notification {
        self.notification
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("id", &self.id)
            .field("notification", &self.notification)
            .finish()
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(registry) = self.registry.upgrade() {
            registry.lock().remove(self.notification, self.id);
        }
    }
}
