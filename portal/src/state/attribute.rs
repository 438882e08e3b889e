//! # Synchronized Attributes
//!
//! A [`SyncedAttribute`] is what a view holds for a shared session value: it
//! reads the store once when mounted, so the first frame is never blank, then
//! re-reads on each matching notification. Dropping it unmounts.

use std::fmt;
use std::sync::Arc;

use parking_lot::RwLock;
use shared::SessionUser;

use super::keys::{Notification, StoreKey};
use super::store::{SessionStore, Subscription};

type Reader<T> = Arc<dyn Fn(&SessionStore) -> T + Send + Sync>;

pub struct SyncedAttribute<T> {
    value: Arc<RwLock<T>>,
    store: SessionStore,
    read: Reader<T>,
    subscription: Subscription,
}

impl<T> SyncedAttribute<T>
where
    T: Clone + PartialEq + Send + Sync + 'static,
{
    /// Read now, then re-read whenever `notification` fires.
    pub fn mount<R>(store: &SessionStore, notification: Notification, read: R) -> Self
    where
        R: Fn(&SessionStore) -> T + Send + Sync + 'static,
    {
        Self::mount_with(store, notification, read, |_| {})
    }

    /// Like [`SyncedAttribute::mount`], calling `on_change` after each re-read
    /// that produced a different value.
    pub fn mount_with<R, C>(store: &SessionStore, notification: Notification, read: R, on_change: C) -> Self
    where
        R: Fn(&SessionStore) -> T + Send + Sync + 'static,
        C: Fn(&T) + Send + Sync + 'static,
    {
        let read: Reader<T> = Arc::new(read);
        let value = Arc::new(RwLock::new(read(store)));

        // Reads happen under the value lock so the last read always wins.
        let subscription = {
            let store_handle = store.clone();
            let read = Arc::clone(&read);
            let value = Arc::clone(&value);
            store.subscribe(notification, move || {
                let changed = {
                    let mut current = value.write();
                    let fresh = read(&store_handle);
                    if *current == fresh {
                        None
                    } else {
                        *current = fresh.clone();
                        Some(fresh)
                    }
                };
                if let Some(fresh) = changed {
                    on_change(&fresh);
                }
            })
        };

        // A write published before the subscription existed is only visible to a re-read.
        {
            let mut current = value.write();
            *current = read(store);
        }

        Self {
            value,
            store: store.clone(),
            read,
            subscription,
        }
    }

    /// The value as of the last read.
    pub fn get(&self) -> T {
        self.value.read().clone()
    }

    /// Re-read the store without waiting for a notification.
    pub fn refresh(&self) -> T {
        let mut current = self.value.write();
        *current = (self.read)(&self.store);
        current.clone()
    }

    pub fn notification(&self) -> Notification {
        self.subscription.notification()
    }
}

impl<T: fmt::Debug> fmt::Debug for SyncedAttribute<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SyncedAttribute")
            .field("value", &*self.value.read())
            .field("notification", &self.subscription.notification())
            .finish()
    }
}

impl SyncedAttribute<Option<String>> {
    /// Display name, updated on `name-updated`.
    pub fn display_name(store: &SessionStore) -> Self {
        Self::mount(store, Notification::NameUpdated, |store| store.get(StoreKey::Name))
    }

    /// Avatar URL, updated on `avatar-updated`.
    pub fn avatar_url(store: &SessionStore) -> Self {
        Self::mount(store, Notification::AvatarUpdated, |store| {
            store.get(StoreKey::ImageUrl)
        })
    }
}

impl SyncedAttribute<bool> {
    /// Whether a user is stored, updated on `login-success`.
    pub fn login_status(store: &SessionStore) -> Self {
        Self::mount(store, Notification::LoginSuccess, |store| {
            store.get_json::<SessionUser>(StoreKey::User).is_some()
        })
    }
}
