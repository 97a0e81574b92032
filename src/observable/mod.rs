//! The `observable` module provides the building blocks for creating and
//! composing observables.

use std::{marker::PhantomData, sync::Arc};

use crate::subscription::subscribe::{Subscribeable, Subscriber, Subscription};

mod creation;
mod operators;

pub use creation::*;
pub use operators::*;

/// The `Observable` struct represents a source of values that can be observed
/// and transformed.
///
/// An `Observable` is a cold factory: it does nothing until subscribed to, and
/// every call to `subscribe` starts an independent execution of the producer.
/// Cloning an `Observable` is cheap and shares the producer definition, not any
/// running execution.
///
/// # Example: synchronous `Observable`
///
/// ```no_run
/// use rxlite::subscribe::{Subscriber, Subscription, UnsubscribeLogic};
/// use rxlite::{Observable, Observer, Subscribeable};
///
/// let emit_10_observable = Observable::new(|mut subscriber| {
///     for i in 1..=10 {
///         subscriber.next(i);
///     }
///     subscriber.complete();
///
///     // Nothing to release.
///     Subscription::new(UnsubscribeLogic::Nil)
/// });
///
/// emit_10_observable.subscribe(Subscriber::new(
///     |v| println!("Emitted {}", v),
///     |e| eprintln!("Error {}", e),
///     || println!("Completed"),
/// ));
/// ```
pub struct Observable<T> {
    source: Arc<dyn Subscribeable<ObsType = T> + Send + Sync>,
}

impl<T> Clone for Observable<T> {
    fn clone(&self) -> Self {
        Observable {
            source: Arc::clone(&self.source),
        }
    }
}

impl<T: 'static> Observable<T> {
    /// Creates a new `Observable` with the provided subscribe function.
    ///
    /// The function is invoked once per subscription with that subscription's
    /// `Subscriber`. It should start delivering values and return a
    /// `Subscription` that releases whatever it acquired.
    pub fn new(sf: impl Fn(Subscriber<T>) -> Subscription + Send + Sync + 'static) -> Self {
        Self::from_source(FnSource {
            subscribe_fn: sf,
            _marker: PhantomData,
        })
    }

    /// Erases the type of any subscribable source.
    pub fn from_source(source: impl Subscribeable<ObsType = T> + Send + Sync + 'static) -> Self {
        Observable {
            source: Arc::new(source),
        }
    }
}

impl<T> Subscribeable for Observable<T> {
    type ObsType = T;

    fn subscribe(&self, s: Subscriber<T>) -> Subscription {
        self.source.subscribe(s)
    }
}

struct FnSource<F, T> {
    subscribe_fn: F,
    _marker: PhantomData<fn(Subscriber<T>)>,
}

impl<F, T> Subscribeable for FnSource<F, T>
where
    F: Fn(Subscriber<T>) -> Subscription,
{
    type ObsType = T;

    fn subscribe(&self, s: Subscriber<T>) -> Subscription {
        (self.subscribe_fn)(s)
    }
}

/// The `ObservableExt` trait provides the operators that can be chained onto
/// any subscribable source.
///
/// Every operator returns a new `Observable` wrapping the source; the source
/// itself is left untouched and can still be subscribed to directly.
pub trait ObservableExt<T: Send + 'static>: Subscribeable<ObsType = T> {
    /// Transforms the items emitted by the observable using a transformation
    /// function.
    ///
    /// Errors and completion pass through unchanged. A panic inside `f` is not
    /// caught and unwinds through whichever call delivered the value.
    fn map<U, F>(self, f: F) -> Observable<U>
    where
        Self: Sized + Send + Sync + 'static,
        F: Fn(T) -> U + Send + Sync + 'static,
        U: Send + 'static,
    {
        Observable::from_source(Map::new(self, f))
    }

    /// Runs side effects for each notification on its way through, then
    /// forwards it unchanged.
    fn tap(self, handlers: TapObserver<T>) -> Observable<T>
    where
        Self: Sized + Send + Sync + 'static,
    {
        Observable::from_source(Tap::new(self, handlers))
    }

    /// Emits at most the first `n` items, then completes and unsubscribes
    /// from the source.
    ///
    /// With `n == 0` no value is forwarded and no completion is issued by the
    /// operator itself; a completion coming from the source still passes.
    fn take(self, n: usize) -> Observable<T>
    where
        Self: Sized + Send + Sync + 'static,
    {
        Observable::from_source(Take::new(self, n))
    }

    /// Maps each item to an inner observable, subscribes to it immediately and
    /// forwards inner emissions in arrival order.
    ///
    /// Completes once the source and every inner observable started so far
    /// have completed.
    fn merge_map<R, F>(self, project: F) -> Observable<R>
    where
        Self: Sized + Send + Sync + 'static,
        F: Fn(T) -> Observable<R> + Send + Sync + 'static,
        R: Send + 'static,
    {
        Observable::from_source(MergeMap::new(self, project))
    }

    /// Collects every item and emits them as one `Vec` when the source
    /// completes.
    fn join(self) -> Observable<Vec<T>>
    where
        Self: Sized + Send + Sync + 'static,
    {
        Observable::from_source(Join::new(self))
    }

    /// Filters the items emitted by the observable based on a predicate
    /// function.
    fn filter<P>(self, predicate: P) -> Observable<T>
    where
        Self: Sized + Send + Sync + 'static,
        P: Fn(&T) -> bool + Send + Sync + 'static,
    {
        Observable::from_source(Filter::new(self, predicate))
    }

    /// Skips the first `n` items emitted by the observable and then emits the
    /// rest.
    fn skip(self, n: usize) -> Observable<T>
    where
        Self: Sized + Send + Sync + 'static,
    {
        Observable::from_source(Skip::new(self, n))
    }

    /// Merges this observable with `sources`; see [`merge`].
    fn merge(self, sources: Vec<Observable<T>>) -> Observable<T>
    where
        Self: Sized + Send + Sync + 'static,
    {
        let mut all = Vec::with_capacity(sources.len() + 1);
        all.push(Observable::from_source(self));
        all.extend(sources);
        merge(all)
    }
}

impl<O, T: Send + 'static> ObservableExt<T> for O where O: Subscribeable<ObsType = T> {}
