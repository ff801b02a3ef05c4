//! Multi-subscriber notification channel.
//!
//! Delivery is synchronous and follows subscription order. Nothing is buffered:
//! a subscriber only sees notifications issued after it subscribed. The
//! subscriber list is snapshotted before delivery, so handlers may subscribe,
//! unsubscribe, or call back into the owning registry while being notified.

use parking_lot::Mutex;
use std::any::Any;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing::error;

/// Shared subscriber callback
pub type Handler<T> = Arc<dyn Fn(&T) + Send + Sync>;

/// Handle returned by [`Channel::subscribe`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

pub struct Channel<T> {
    name: &'static str,
    subscribers: Mutex<Vec<(SubscriptionId, Handler<T>)>>,
    next_id: AtomicU64,
}

impl<T> Channel<T> {
    /// Create an empty channel. `name` only appears in log output.
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            subscribers: Mutex::new(Vec::new()),
            next_id: AtomicU64::new(1),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn subscribe<F>(&self, handler: F) -> SubscriptionId
    where
        F: Fn(&T) + Send + Sync + 'static,
    {
        self.subscribe_handler(Arc::new(handler))
    }

    pub fn subscribe_handler(&self, handler: Handler<T>) -> SubscriptionId {
        let id = SubscriptionId(self.next_id.fetch_add(1, Ordering::Relaxed));
        self.subscribers.lock().push((id, handler));
        id
    }

    /// Remove a subscriber. Returns `false` if the id was not subscribed.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut subscribers = self.subscribers.lock();
        let before = subscribers.len();
        subscribers.retain(|(sub_id, _)| *sub_id != id);
        subscribers.len() != before
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.lock().len()
    }

    /// Deliver `payload` to every current subscriber, in subscription order.
    ///
    /// A panicking subscriber is logged and skipped; later subscribers still
    /// receive the payload. Returns the number of subscribers that completed
    /// without panicking.
    pub fn notify(&self, payload: &T) -> usize {
        let snapshot: Vec<Handler<T>> = self
            .subscribers
            .lock()
            .iter()
            .map(|(_, handler)| Arc::clone(handler))
            .collect();

        let mut delivered = 0;
        for handler in snapshot {
            match catch_unwind(AssertUnwindSafe(|| handler(payload))) {
                Ok(()) => delivered += 1,
                Err(panic) => {
                    error!(
                        channel = self.name,
                        reason = %panic_message(panic.as_ref()),
                        "Subscriber panicked during notification"
                    );
                }
            }
        }
        delivered
    }
}

impl<T> std::fmt::Debug for Channel<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Channel")
            .field("name", &self.name)
            .field("subscribers", &self.subscriber_count())
            .finish()
    }
}

fn panic_message(panic: &(dyn Any + Send)) -> String {
    if let Some(msg) = panic.downcast_ref::<&str>() {
        (*msg).to_string()
    } else if let Some(msg) = panic.downcast_ref::<String>() {
        msg.clone()
    } else {
        "non-string panic payload".to_string()
    }
}
