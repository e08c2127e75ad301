//! Event Hub
//!
//! Single-threaded publish/subscribe for dashboard state changes.
//! Every `subscribe` returns a [`Subscription`] guard; dropping the guard (or
//! calling [`Subscription::unsubscribe`]) removes the listener exactly once,
//! after which it never fires again, even mid-publish.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

type Listener<T> = Rc<dyn Fn(&T)>;

struct Registry<T> {
    next_id: u64,
    listeners: Vec<(u64, Listener<T>)>,
}

impl<T> Registry<T> {
    fn contains(&self, id: u64) -> bool {
        self.listeners.iter().any(|(lid, _)| *lid == id)
    }
}

/// Publishes events of type `T` to registered listeners
pub struct EventHub<T> {
    registry: Rc<RefCell<Registry<T>>>,
}

impl<T: 'static> EventHub<T> {
    pub fn new() -> Self {
        Self {
            registry: Rc::new(RefCell::new(Registry {
                next_id: 0,
                listeners: Vec::new(),
            })),
        }
    }

    /// Register `listener` for every future event
    pub fn subscribe(&self, listener: impl Fn(&T) + 'static) -> Subscription {
        let id = {
            let mut registry = self.registry.borrow_mut();
            let id = registry.next_id;
            registry.next_id += 1;
            registry.listeners.push((id, Rc::new(listener)));
            id
        };

        let weak: Weak<RefCell<Registry<T>>> = Rc::downgrade(&self.registry);
        Subscription {
            teardown: Some(Box::new(move || {
                if let Some(registry) = weak.upgrade() {
                    registry.borrow_mut().listeners.retain(|(lid, _)| *lid != id);
                }
            })),
        }
    }

    /// Deliver `event` to all current listeners, in subscription order
    ///
    /// Listeners may subscribe or unsubscribe while an event is delivered;
    /// one removed during delivery is skipped.
    pub fn publish(&self, event: &T) {
        let snapshot: Vec<(u64, Listener<T>)> = self.registry.borrow().listeners.clone();

        for (id, listener) in snapshot {
            if self.registry.borrow().contains(id) {
                listener(event);
            }
        }
    }

    /// Number of active listeners
    pub fn listener_count(&self) -> usize {
        self.registry.borrow().listeners.len()
    }
}

impl<T: 'static> Default for EventHub<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> std::fmt::Debug for EventHub<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventHub")
            .field("listeners", &self.registry.borrow().listeners.len())
            .finish()
    }
}

/// Registration handle; unregisters its listener when dropped
#[must_use = "dropping a Subscription immediately unsubscribes it"]
pub struct Subscription {
    teardown: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
    /// Unregister now
    pub fn unsubscribe(mut self) {
        self.teardown_once();
    }

    fn teardown_once(&mut self) {
        if let Some(teardown) = self.teardown.take() {
            teardown();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.teardown_once();
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.teardown.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn test_publish_reaches_listeners() {
        let hub = EventHub::<u32>::new();
        let seen = Rc::new(RefCell::new(Vec::new()));

        let seen_clone = seen.clone();
        let _sub = hub.subscribe(move |v| seen_clone.borrow_mut().push(*v));

        hub.publish(&1);
        hub.publish(&2);
        assert_eq!(*seen.borrow(), vec![1, 2]);
    }

    #[test]
    fn test_drop_unsubscribes() {
        let hub = EventHub::<u32>::new();
        let count = Rc::new(Cell::new(0));

        let count_clone = count.clone();
        let sub = hub.subscribe(move |_| count_clone.set(count_clone.get() + 1));
        hub.publish(&1);
        drop(sub);
        hub.publish(&2);

        assert_eq!(count.get(), 1);
        assert_eq!(hub.listener_count(), 0);
    }

    #[test]
    fn test_explicit_unsubscribe() {
        let hub = EventHub::<()>::new();
        let a = hub.subscribe(|_| {});
        let _b = hub.subscribe(|_| {});
        assert_eq!(hub.listener_count(), 2);

        a.unsubscribe();
        assert_eq!(hub.listener_count(), 1);
    }

    #[test]
    fn test_unsubscribe_during_publish_skips_listener() {
        let hub = EventHub::<()>::new();
        let fired = Rc::new(Cell::new(false));
        let victim: Rc<RefCell<Option<Subscription>>> = Rc::new(RefCell::new(None));

        let victim_clone = victim.clone();
        let _killer = hub.subscribe(move |_| {
            victim_clone.borrow_mut().take();
        });

        let fired_clone = fired.clone();
        *victim.borrow_mut() = Some(hub.subscribe(move |_| fired_clone.set(true)));

        hub.publish(&());
        assert!(!fired.get());
    }

    #[test]
    fn test_subscription_outlives_hub() {
        let hub = EventHub::<u8>::new();
        let sub = hub.subscribe(|_| {});
        drop(hub);
        drop(sub);
    }
}
