//! Event dispatch sources consumed by [`from_event`](crate::from_event).
//!
//! `EventTarget` is the listener add/remove contract. `EventEmitter` is an
//! in-process implementation keyed by event name.
use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
};

use crate::{lock, mailbox::Mailbox};

/// Callback registered on an [`EventTarget`].
pub type Listener<E> = Box<dyn FnMut(E) + Send>;

/// Token returned by [`EventTarget::add_event_listener`], used to remove the
/// listener again.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

/// Anything that dispatches named events to registered listeners.
pub trait EventTarget {
    type Event;

    fn add_event_listener(&self, event_name: &str, listener: Listener<Self::Event>) -> ListenerId;

    /// Removes a listener. Unknown ids are ignored.
    fn remove_event_listener(&self, event_name: &str, id: ListenerId);
}

type SharedListener<E> = Arc<Mailbox<Listener<E>, E>>;

struct Listeners<E> {
    next_id: u64,
    by_name: HashMap<String, Vec<(ListenerId, SharedListener<E>)>>,
}

/// Named-event dispatcher.
///
/// Listeners for the same name are called in registration order. Cloning the
/// emitter clones the handle, not the listener table.
pub struct EventEmitter<E> {
    inner: Arc<Mutex<Listeners<E>>>,
}

impl<E> Clone for EventEmitter<E> {
    fn clone(&self) -> Self {
        EventEmitter {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<E> Default for EventEmitter<E> {
    fn default() -> Self {
        EventEmitter {
            inner: Arc::new(Mutex::new(Listeners {
                next_id: 0,
                by_name: HashMap::new(),
            })),
        }
    }
}

impl<E> EventEmitter<E> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of listeners registered for `event_name`.
    #[must_use]
    pub fn listener_count(&self, event_name: &str) -> usize {
        lock(&self.inner)
            .by_name
            .get(event_name)
            .map_or(0, Vec::len)
    }
}

impl<E: Clone> EventEmitter<E> {
    /// Delivers `event` to every listener registered for `event_name` and
    /// returns how many were called.
    ///
    /// The listener list is snapshotted first, so listeners may add or remove
    /// listeners while being called. A listener that dispatches again while it
    /// is running gets the nested event right after the current call returns.
    pub fn dispatch(&self, event_name: &str, event: E) -> usize {
        let snapshot: Vec<SharedListener<E>> = match lock(&self.inner).by_name.get(event_name) {
            Some(listeners) => listeners.iter().map(|(_, l)| Arc::clone(l)).collect(),
            None => return 0,
        };
        for listener in &snapshot {
            listener.deliver(event.clone(), |listener, event| listener(event));
        }
        snapshot.len()
    }
}

impl<E> EventTarget for EventEmitter<E> {
    type Event = E;

    fn add_event_listener(&self, event_name: &str, listener: Listener<E>) -> ListenerId {
        let mut inner = lock(&self.inner);
        let id = ListenerId(inner.next_id);
        inner.next_id += 1;
        inner
            .by_name
            .entry(event_name.to_owned())
            .or_default()
            .push((id, Arc::new(Mailbox::new(listener))));
        id
    }

    fn remove_event_listener(&self, event_name: &str, id: ListenerId) {
        let mut inner = lock(&self.inner);
        if let Some(listeners) = inner.by_name.get_mut(event_name) {
            listeners.retain(|(lid, _)| *lid != id);
            if listeners.is_empty() {
                inner.by_name.remove(event_name);
            }
        }
    }
}

impl<T: EventTarget + ?Sized> EventTarget for Arc<T> {
    type Event = T::Event;

    fn add_event_listener(&self, event_name: &str, listener: Listener<Self::Event>) -> ListenerId {
        (**self).add_event_listener(event_name, listener)
    }

    fn remove_event_listener(&self, event_name: &str, id: ListenerId) {
        (**self).remove_event_listener(event_name, id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dispatch_reaches_listeners_of_that_name_in_order() {
        let emitter = EventEmitter::new();
        let log = Arc::new(Mutex::new(Vec::new()));

        let (a, b, c) = (Arc::clone(&log), Arc::clone(&log), Arc::clone(&log));
        emitter.add_event_listener(
            "click",
            Box::new(move |e: u32| a.lock().unwrap().push(("a", e))),
        );
        emitter.add_event_listener(
            "click",
            Box::new(move |e: u32| b.lock().unwrap().push(("b", e))),
        );
        emitter.add_event_listener(
            "keyup",
            Box::new(move |e: u32| c.lock().unwrap().push(("c", e))),
        );

        assert_eq!(emitter.dispatch("click", 1), 2);
        assert_eq!(emitter.dispatch("scroll", 2), 0);

        assert_eq!(*log.lock().unwrap(), vec![("a", 1), ("b", 1)]);
    }

    #[test]
    fn removed_listener_is_not_called() {
        let emitter = EventEmitter::new();
        let hits = Arc::new(Mutex::new(0));
        let hits_c = Arc::clone(&hits);

        let id = emitter.add_event_listener(
            "click",
            Box::new(move |_: ()| *hits_c.lock().unwrap() += 1),
        );
        emitter.dispatch("click", ());
        emitter.remove_event_listener("click", id);
        emitter.remove_event_listener("click", id);
        emitter.dispatch("click", ());

        assert_eq!(*hits.lock().unwrap(), 1);
        assert_eq!(emitter.listener_count("click"), 0);
    }

    #[test]
    fn listener_dispatching_again_is_not_reentered() {
        let emitter = EventEmitter::new();
        let seen = Arc::new(Mutex::new(Vec::new()));

        let (seen_c, emitter_c) = (Arc::clone(&seen), emitter.clone());
        emitter.add_event_listener(
            "tick",
            Box::new(move |e: u32| {
                seen_c.lock().unwrap().push(e);
                if e < 3 {
                    emitter_c.dispatch("tick", e + 1);
                    // The nested event waits until this call returns.
                    assert_eq!(seen_c.lock().unwrap().last(), Some(&e));
                }
            }),
        );

        emitter.dispatch("tick", 1);

        assert_eq!(*seen.lock().unwrap(), vec![1, 2, 3]);
    }
}
