//! Subscriber-based notifications for signal changes.

use crate::core::SignalChange;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

type Callback = Box<dyn Fn(&SignalChange) + Send + Sync>;

/// Handle for a subscription that can be dropped to unsubscribe.
///
/// When the handle is dropped, the subscription is removed immediately.
pub struct SubscriptionHandle {
    id: usize,
    registry: Arc<RwLock<SubscriberRegistryInner>>,
}

impl Drop for SubscriptionHandle {
    fn drop(&mut self) {
        let id = self.id;
        let mut inner = self.registry.write().unwrap_or_else(|e| e.into_inner());
        inner.subscribers.retain(|(sub_id, _)| *sub_id != id);
    }
}

struct SubscriberRegistryInner {
    subscribers: Vec<(usize, Callback)>,
    next_id: usize,
}

/// Registry of callbacks invoked on every reported signal change.
///
/// The lock is never held across an await point, so the registry works from
/// any executor or from plain threads.
///
/// # Examples
///
/// ```rust
/// use s4_signal_monitor::notify::SubscriberRegistry;
///
/// let registry = SubscriberRegistry::new();
///
/// let handle = registry.subscribe(|change| {
///     println!("now {}", change.current);
/// });
/// assert_eq!(registry.subscriber_count(), 1);
///
/// // Unsubscribe by dropping the handle
/// drop(handle);
/// assert_eq!(registry.subscriber_count(), 0);
/// ```
pub struct SubscriberRegistry {
    inner: Arc<RwLock<SubscriberRegistryInner>>,
}

impl SubscriberRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(SubscriberRegistryInner {
                subscribers: Vec::new(),
                next_id: 0,
            })),
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, SubscriberRegistryInner> {
        self.inner.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, SubscriberRegistryInner> {
        self.inner.write().unwrap_or_else(|e| e.into_inner())
    }

    /// Register a callback. Returns a handle that unsubscribes when dropped.
    pub fn subscribe<F>(&self, callback: F) -> SubscriptionHandle
    where
        F: Fn(&SignalChange) + Send + Sync + 'static,
    {
        let mut inner = self.write();
        let id = inner.next_id;
        inner.next_id += 1;
        inner.subscribers.push((id, Box::new(callback)));

        SubscriptionHandle {
            id,
            registry: Arc::clone(&self.inner),
        }
    }

    /// Call every subscriber with `change`, in subscription order.
    ///
    /// Callbacks run under the read lock and must not subscribe or drop a
    /// handle of this registry.
    pub fn notify_all(&self, change: &SignalChange) {
        let inner = self.read();
        for (_id, callback) in &inner.subscribers {
            callback(change);
        }
    }

    /// Get the number of active subscribers.
    pub fn subscriber_count(&self) -> usize {
        self.read().subscribers.len()
    }
}

impl Default for SubscriberRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for SubscriberRegistry {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Sample;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn change(width: i64, height: i64, fps: i64) -> SignalChange {
        SignalChange {
            previous: None,
            current: Sample::new(width, height, fps).mode().unwrap(),
        }
    }

    #[test]
    fn test_subscribe_and_notify() {
        let registry = SubscriberRegistry::new();
        let seen = Arc::new(Mutex::new(Vec::new()));

        let seen_clone = Arc::clone(&seen);
        let _handle = registry.subscribe(move |change| {
            seen_clone.lock().unwrap().push(change.current.frame_rate);
        });

        registry.notify_all(&change(1920, 1080, 60));
        registry.notify_all(&change(1920, 1080, 30));
        assert_eq!(*seen.lock().unwrap(), vec![60, 30]);
    }

    #[test]
    fn test_subscribers_called_in_order() {
        let registry = SubscriberRegistry::new();
        let order = Arc::new(Mutex::new(Vec::new()));

        let first = Arc::clone(&order);
        let _handle1 = registry.subscribe(move |_| first.lock().unwrap().push("first"));
        let second = Arc::clone(&order);
        let _handle2 = registry.subscribe(move |_| second.lock().unwrap().push("second"));

        registry.notify_all(&change(1280, 720, 60));
        assert_eq!(*order.lock().unwrap(), vec!["first", "second"]);
    }

    #[test]
    fn test_unsubscribe() {
        let registry = SubscriberRegistry::new();
        let counter = Arc::new(AtomicUsize::new(0));

        let counter_clone = Arc::clone(&counter);
        let handle = registry.subscribe(move |_| {
            counter_clone.fetch_add(1, Ordering::SeqCst);
        });

        registry.notify_all(&change(1920, 1080, 60));
        assert_eq!(counter.load(Ordering::SeqCst), 1);

        drop(handle);

        registry.notify_all(&change(1920, 1080, 60));
        assert_eq!(counter.load(Ordering::SeqCst), 1);
        assert_eq!(registry.subscriber_count(), 0);
    }

    #[test]
    fn test_drop_handle_without_runtime() {
        let registry = SubscriberRegistry::new();
        let handle = tokio_test::block_on(async { registry.subscribe(|_| {}) });
        assert_eq!(registry.subscriber_count(), 1);

        // no tokio runtime is running on this thread
        assert!(tokio::runtime::Handle::try_current().is_err());
        drop(handle);
        assert_eq!(registry.subscriber_count(), 0);
    }

    #[test]
    fn test_drop_handle_on_other_thread() {
        let registry = SubscriberRegistry::new();
        let handle = registry.subscribe(|_| {});

        std::thread::spawn(move || drop(handle)).join().unwrap();
        assert_eq!(registry.subscriber_count(), 0);
    }

    #[test]
    fn test_clone_registry() {
        let registry = SubscriberRegistry::new();
        let registry2 = registry.clone();

        let counter = Arc::new(AtomicUsize::new(0));
        let counter_clone = Arc::clone(&counter);

        let _handle = registry.subscribe(move |_| {
            counter_clone.fetch_add(1, Ordering::SeqCst);
        });

        registry2.notify_all(&change(720, 576, 25));
        assert_eq!(counter.load(Ordering::SeqCst), 1);
        assert_eq!(registry2.subscriber_count(), 1);
    }
}
