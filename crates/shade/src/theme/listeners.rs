//! Listener registries and cancellable subscription handles.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

/// Handle for a registered listener.
///
/// The listener stays registered for as long as the handle lives. Calling
/// [`cancel`](Subscription::cancel) or dropping the handle releases the
/// registration; the release runs exactly once either way.
#[must_use = "dropping a Subscription immediately unregisters its listener"]
pub struct Subscription {
    release: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
    /// Creates a handle that runs `release` when cancelled or dropped.
    pub fn new(release: impl FnOnce() + 'static) -> Self {
        Self {
            release: Some(Box::new(release)),
        }
    }

    /// Releases the registration now.
    pub fn cancel(mut self) {
        self.release_now();
    }

    fn release_now(&mut self) {
        if let Some(release) = self.release.take() {
            release();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.release_now();
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.release.is_some())
            .finish()
    }
}

type Listener<T> = Rc<dyn Fn(T)>;

struct Registry<T> {
    next_id: u64,
    entries: Vec<(u64, Listener<T>)>,
}

/// A shared, single-threaded set of listeners.
///
/// Dispatch works on a snapshot, so listeners may register or cancel other
/// listeners while being called. A listener cancelled mid-dispatch is not
/// called afterwards.
pub(crate) struct ListenerSet<T> {
    inner: Rc<RefCell<Registry<T>>>,
}

impl<T: Copy + 'static> ListenerSet<T> {
    pub(crate) fn new() -> Self {
        Self {
            inner: Rc::new(RefCell::new(Registry {
                next_id: 0,
                entries: Vec::new(),
            })),
        }
    }

    pub(crate) fn add(&self, listener: impl Fn(T) + 'static) -> Subscription {
        let listener: Listener<T> = Rc::new(listener);
        let id = {
            let mut registry = self.inner.borrow_mut();
            let id = registry.next_id;
            registry.next_id += 1;
            registry.entries.push((id, listener));
            id
        };

        let registry = Rc::downgrade(&self.inner);
        Subscription::new(move || {
            if let Some(registry) = registry.upgrade() {
                registry.borrow_mut().entries.retain(|(entry, _)| *entry != id);
            }
        })
    }

    /// Calls every registered listener with `value`, returning how many ran.
    pub(crate) fn emit(&self, value: T) -> usize {
        let snapshot: Vec<(u64, Listener<T>)> = self
            .inner
            .borrow()
            .entries
            .iter()
            .map(|(id, listener)| (*id, Rc::clone(listener)))
            .collect();

        let mut called = 0;
        for (id, listener) in snapshot {
            let still_registered = self
                .inner
                .borrow()
                .entries
                .iter()
                .any(|(entry, _)| *entry == id);
            if still_registered {
                listener(value);
                called += 1;
            }
        }
        called
    }

    pub(crate) fn len(&self) -> usize {
        self.inner.borrow().entries.len()
    }
}

impl<T> Clone for ListenerSet<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn test_subscription_releases_once() {
        let count = Rc::new(Cell::new(0));
        let counter = Rc::clone(&count);
        let sub = Subscription::new(move || counter.set(counter.get() + 1));
        sub.cancel();
        assert_eq!(count.get(), 1);
    }

    #[test]
    fn test_subscription_releases_on_drop() {
        let count = Rc::new(Cell::new(0));
        {
            let counter = Rc::clone(&count);
            let _sub = Subscription::new(move || counter.set(counter.get() + 1));
        }
        assert_eq!(count.get(), 1);
    }

    #[test]
    fn test_emit_reaches_all_listeners() {
        let set = ListenerSet::<u8>::new();
        let seen = Rc::new(RefCell::new(Vec::new()));

        let a = Rc::clone(&seen);
        let _first = set.add(move |v| a.borrow_mut().push(("a", v)));
        let b = Rc::clone(&seen);
        let _second = set.add(move |v| b.borrow_mut().push(("b", v)));

        assert_eq!(set.emit(7), 2);
        assert_eq!(*seen.borrow(), vec![("a", 7), ("b", 7)]);
    }

    #[test]
    fn test_cancelled_listener_is_not_called() {
        let set = ListenerSet::<u8>::new();
        let hits = Rc::new(Cell::new(0));
        let h = Rc::clone(&hits);
        let sub = set.add(move |_| h.set(h.get() + 1));

        sub.cancel();
        assert_eq!(set.emit(1), 0);
        assert_eq!(hits.get(), 0);
        assert_eq!(set.len(), 0);
    }

    #[test]
    fn test_listener_may_cancel_another_during_dispatch() {
        let set = ListenerSet::<u8>::new();
        let victim_hits = Rc::new(Cell::new(0));
        let slot: Rc<RefCell<Option<Subscription>>> = Rc::new(RefCell::new(None));

        let slot_for_killer = Rc::clone(&slot);
        let _killer = set.add(move |_| {
            slot_for_killer.borrow_mut().take();
        });
        let h = Rc::clone(&victim_hits);
        *slot.borrow_mut() = Some(set.add(move |_| h.set(h.get() + 1)));

        assert_eq!(set.emit(0), 1);
        assert_eq!(victim_hits.get(), 0);
    }

    #[test]
    fn test_subscription_outliving_set_is_harmless() {
        let set = ListenerSet::<u8>::new();
        let sub = set.add(|_| {});
        drop(set);
        sub.cancel();
    }
}
