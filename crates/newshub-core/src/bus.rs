//! Change notification bus
//!
//! A payload-free publish/subscribe channel carrying one signal:
//! "the bookmark set changed". Subscribers learn *that* something changed
//! and re-read the repository themselves.
//!
//! ```ignore
//! let bus = NotificationBus::new();
//! let subscription = bus.subscribe(|| println!("bookmarks changed"));
//! bus.publish();
//! subscription.unsubscribe();
//! ```
//!
//! Handlers are invoked in registration order with no lock held, so a
//! handler may read the repository or (un)subscribe while it runs.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};

use tracing::trace;

/// Name of the bookmark change signal
pub const BOOKMARK_CHANGED: &str = "bookmarkChanged";

type Handler = Arc<dyn Fn() + Send + Sync>;

#[derive(Default)]
struct Registry {
    next_id: u64,
    handlers: Vec<(u64, Handler)>,
}

impl Registry {
    fn contains(&self, id: u64) -> bool {
        self.handlers.iter().any(|(hid, _)| *hid == id)
    }
}

/// Shared handle to the bookmark change channel
///
/// Cloning yields another handle to the same channel.
#[derive(Clone, Default)]
pub struct NotificationBus {
    registry: Arc<Mutex<Registry>>,
}

impl NotificationBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a handler, invoked on every `publish` until unsubscribed
    pub fn subscribe<F>(&self, handler: F) -> Subscription
    where
        F: Fn() + Send + Sync + 'static,
    {
        let mut registry = lock(&self.registry);
        let id = registry.next_id;
        registry.next_id += 1;
        registry.handlers.push((id, Arc::new(handler)));
        trace!(signal = BOOKMARK_CHANGED, id, "subscribed");

        Subscription {
            id,
            registry: Arc::downgrade(&self.registry),
        }
    }

    /// Notify every current subscriber
    pub fn publish(&self) {
        let snapshot: Vec<(u64, Handler)> = lock(&self.registry).handlers.clone();
        trace!(
            signal = BOOKMARK_CHANGED,
            subscribers = snapshot.len(),
            "publish"
        );

        for (id, handler) in snapshot {
            // Skip handlers removed by an earlier handler in this cycle
            if !lock(&self.registry).contains(id) {
                continue;
            }
            handler();
        }
    }

    /// Number of live subscriptions
    pub fn subscriber_count(&self) -> usize {
        lock(&self.registry).handlers.len()
    }
}

impl std::fmt::Debug for NotificationBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NotificationBus")
            .field("subscribers", &self.subscriber_count())
            .finish()
    }
}

/// Registration on a `NotificationBus`
///
/// Dropping the subscription unsubscribes.
#[must_use = "dropping a Subscription unsubscribes immediately"]
pub struct Subscription {
    id: u64,
    registry: Weak<Mutex<Registry>>,
}

impl Subscription {
    /// Stop receiving notifications
    pub fn unsubscribe(self) {
        // Drop does the work
    }

    fn detach(&self) {
        if let Some(registry) = self.registry.upgrade() {
            lock(&registry).handlers.retain(|(id, _)| *id != self.id);
            trace!(signal = BOOKMARK_CHANGED, id = self.id, "unsubscribed");
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.detach();
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription").field("id", &self.id).finish()
    }
}

fn lock(registry: &Mutex<Registry>) -> MutexGuard<'_, Registry> {
    registry.lock().unwrap_or_else(PoisonError::into_inner)
}
