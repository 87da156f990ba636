//! Push-based value streams for single-threaded observers.
//!
//! A [`Signal`] keeps an ordered list of subscriber callbacks and delivers
//! every emitted value to each of them synchronously, in subscription order.
//!
//! Delivery is never reentrant. If a subscriber causes another emission while
//! a value is being delivered (for example by mutating the model it observes),
//! the new value is queued and delivered once the current pass has finished:
//!
//! ```
//! use reactive_color::Signal;
//! use std::cell::RefCell;
//! use std::rc::Rc;
//!
//! let signal: Rc<Signal<u32>> = Rc::new(Signal::new());
//! let seen = Rc::new(RefCell::new(Vec::new()));
//!
//! let log = Rc::clone(&seen);
//! signal.subscribe(0, move |v: &u32| log.borrow_mut().push(*v));
//!
//! signal.emit(1);
//! signal.emit(2);
//! assert_eq!(*seen.borrow(), vec![0, 1, 2]);
//! ```

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::fmt;
use std::rc::Rc;

/// Handle identifying one subscription on a [`Signal`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Subscriber<T> = Rc<dyn Fn(&T)>;

struct Entry<T> {
    id: SubscriptionId,
    /// Sequence number of the subscriber's initial delivery. Broadcasts queued
    /// before it are history and are not delivered to this subscriber.
    since: u64,
    callback: Subscriber<T>,
}

enum Delivery<T> {
    /// Deliver to every live subscriber
    Broadcast { seq: u64, value: T },
    /// Initial value for a freshly registered subscriber
    Initial { id: SubscriptionId, value: T },
}

/// Ordered observer list with queued delivery.
pub struct Signal<T> {
    subscribers: RefCell<Vec<Entry<T>>>,
    pending: RefCell<VecDeque<Delivery<T>>>,
    delivering: Cell<bool>,
    next_id: Cell<u64>,
    next_seq: Cell<u64>,
}

/// Ends a delivery pass. If a subscriber panicked, values still queued
/// behind the failed one are discarded rather than delivered by a later emit.
struct DeliveryGuard<'a, T>(&'a Signal<T>);

impl<T> Drop for DeliveryGuard<'_, T> {
    fn drop(&mut self) {
        if let Ok(mut pending) = self.0.pending.try_borrow_mut() {
            pending.clear();
        }
        self.0.delivering.set(false);
    }
}

impl<T> Signal<T> {
    /// Create a signal with no subscribers.
    pub fn new() -> Self {
        Self {
            subscribers: RefCell::new(Vec::new()),
            pending: RefCell::new(VecDeque::new()),
            delivering: Cell::new(false),
            next_id: Cell::new(0),
            next_seq: Cell::new(0),
        }
    }

    /// Register a subscriber and immediately deliver `current` to it.
    ///
    /// The subscriber then receives every value emitted after this call. If a
    /// delivery is in progress, the initial value is queued like any other.
    pub fn subscribe<F>(&self, current: T, callback: F) -> SubscriptionId
    where
        F: Fn(&T) + 'static,
    {
        let id = SubscriptionId(self.next_id.get());
        self.next_id.set(id.0 + 1);

        let since = self.bump_seq();
        self.subscribers.borrow_mut().push(Entry {
            id,
            since,
            callback: Rc::new(callback),
        });
        self.pending
            .borrow_mut()
            .push_back(Delivery::Initial { id, value: current });

        self.drain();
        id
    }

    /// Remove a subscriber. Returns false if it was not registered.
    ///
    /// A subscriber removed mid-delivery receives nothing further, including
    /// the value currently being delivered if its turn has not come yet.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut subscribers = self.subscribers.borrow_mut();
        let before = subscribers.len();
        subscribers.retain(|entry| entry.id != id);
        subscribers.len() != before
    }

    /// Publish a value to all subscribers.
    pub fn emit(&self, value: T) {
        let seq = self.bump_seq();
        self.pending
            .borrow_mut()
            .push_back(Delivery::Broadcast { seq, value });
        self.drain();
    }

    /// Number of registered subscribers.
    pub fn subscriber_count(&self) -> usize {
        self.subscribers.borrow().len()
    }

    /// Whether a delivery pass is currently running.
    pub fn is_delivering(&self) -> bool {
        self.delivering.get()
    }

    fn bump_seq(&self) -> u64 {
        let seq = self.next_seq.get();
        self.next_seq.set(seq + 1);
        seq
    }

    fn is_subscribed(&self, id: SubscriptionId) -> bool {
        self.subscribers.borrow().iter().any(|entry| entry.id == id)
    }

    /// Deliver queued values until the queue is empty. Nested calls return
    /// immediately; the outermost call picks up whatever they queued.
    fn drain(&self) {
        if self.delivering.get() {
            return;
        }
        self.delivering.set(true);
        let _guard = DeliveryGuard(self);

        loop {
            let next = self.pending.borrow_mut().pop_front();
            let Some(delivery) = next else {
                break;
            };

            match delivery {
                Delivery::Broadcast { seq, value } => {
                    // Snapshot so callbacks may (un)subscribe while we iterate
                    let targets: Vec<(SubscriptionId, Subscriber<T>)> = self
                        .subscribers
                        .borrow()
                        .iter()
                        .filter(|entry| entry.since < seq)
                        .map(|entry| (entry.id, Rc::clone(&entry.callback)))
                        .collect();

                    for (id, callback) in targets {
                        if self.is_subscribed(id) {
                            callback(&value);
                        }
                    }
                }
                Delivery::Initial { id, value } => {
                    let target = self
                        .subscribers
                        .borrow()
                        .iter()
                        .find(|entry| entry.id == id)
                        .map(|entry| Rc::clone(&entry.callback));

                    if let Some(callback) = target {
                        callback(&value);
                    }
                }
            }
        }
    }
}

impl<T> Default for Signal<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for Signal<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Signal")
            .field("subscribers", &self.subscriber_count())
            .field("pending", &self.pending.borrow().len())
            .field("delivering", &self.delivering.get())
            .finish()
    }
}
