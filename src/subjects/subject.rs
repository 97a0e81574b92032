use std::sync::{Arc, Mutex};

use crate::{
    lock,
    observer::Observer,
    subscription::subscribe::{
        SharedSubscriber, Subscribeable, Subscriber, Subscription, UnsubscribeLogic,
    },
    Observable, StreamError,
};

/// A `Subject` represents a unique variant of an `Observable` that enables
/// multicasting values to multiple `Observers`.
///
/// Unlike regular `Observables`, which are unicast (each subscribed `Observer`
/// has its independent execution of the `Observable`), `Subjects` are
/// multicast. Cloning a `Subject` clones the handle; every clone broadcasts to
/// the same observers.
///
/// # Examples
///
///```no_run
/// use rxlite::{subscribe::Subscriber, ObservableExt, Subject, Subscribeable};
///
/// let subject = Subject::new();
///
/// subject.subscribe(Subscriber::on_next(|v: i32| println!("first: {}", v)));
/// subject.next(1); // Only the first subscriber sees 1.
///
/// subject
///     .as_observable()
///     .map(|v| v * 10)
///     .subscribe(Subscriber::on_next(|v| println!("second: {}", v)));
/// subject.next(2); // first: 2, second: 20
///
/// subject.complete();
///```
pub struct Subject<T> {
    inner: Arc<Mutex<SubjectInner<T>>>,
}

struct SubjectInner<T> {
    next_key: u64,
    observers: Vec<(u64, SharedSubscriber<T>)>,
}

impl<T> Clone for Subject<T> {
    fn clone(&self) -> Self {
        Subject {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T> Default for Subject<T> {
    fn default() -> Self {
        Subject {
            inner: Arc::new(Mutex::new(SubjectInner {
                next_key: 0,
                observers: Vec::with_capacity(16),
            })),
        }
    }
}

impl<T> Subject<T> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of registered observers.
    #[must_use]
    pub fn len(&self) -> usize {
        lock(&self.inner).observers.len()
    }

    /// Returns `true` if no observers are registered, `false` otherwise.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    // Observers are called without holding the list lock so they can
    // subscribe or unsubscribe while a broadcast is in progress.
    fn snapshot(&self) -> Vec<SharedSubscriber<T>> {
        lock(&self.inner)
            .observers
            .iter()
            .map(|(_, o)| o.clone())
            .collect()
    }

    /// Broadcasts an error to every currently registered observer.
    pub fn error(&self, e: StreamError) {
        for o in self.snapshot() {
            o.error(e.clone());
        }
    }

    /// Broadcasts completion to every currently registered observer.
    pub fn complete(&self) {
        for o in self.snapshot() {
            o.complete();
        }
    }
}

impl<T: Clone> Subject<T> {
    /// Broadcasts `v` to every currently registered observer, in the order
    /// they subscribed.
    pub fn next(&self, v: T) {
        for o in self.snapshot() {
            o.next(v.clone());
        }
    }
}

impl<T: Send + 'static> Subject<T> {
    /// Returns an `Observable` that subscribes straight into this `Subject`,
    /// hiding the emitting side from whoever holds it.
    #[must_use]
    pub fn as_observable(&self) -> Observable<T> {
        Observable::from_source(self.clone())
    }
}

impl<T: Send + 'static> Subscribeable for Subject<T> {
    type ObsType = T;

    fn subscribe(&self, v: Subscriber<Self::ObsType>) -> Subscription {
        let key = {
            let mut inner = lock(&self.inner);
            let key = inner.next_key;
            inner.next_key += 1;
            inner.observers.push((key, v.shared()));
            tracing::debug!(key, observers = inner.observers.len(), "subject observer registered");
            key
        };

        let source_cloned = Arc::clone(&self.inner);

        Subscription::new(UnsubscribeLogic::Logic(Box::new(move || {
            let mut inner = lock(&source_cloned);
            inner.observers.retain(|(k, _)| *k != key);
            tracing::debug!(key, observers = inner.observers.len(), "subject observer removed");
        })))
    }
}

impl<T: Clone> Observer for Subject<T> {
    type NextFnType = T;

    fn next(&mut self, v: Self::NextFnType) {
        Subject::next(self, v);
    }

    fn error(&mut self, e: StreamError) {
        Subject::error(self, e);
    }

    fn complete(&mut self) {
        Subject::complete(self);
    }
}

impl<T: Clone + Send + 'static> From<Subject<T>> for Subscriber<T> {
    fn from(value: Subject<T>) -> Self {
        let vn = value.clone();
        let ve = value.clone();
        Subscriber::new(move |v| vn.next(v), move |e| ve.error(e), move || value.complete())
    }
}

impl<T: Send + 'static> From<Subject<T>> for Observable<T> {
    fn from(value: Subject<T>) -> Self {
        Observable::from_source(value)
    }
}
