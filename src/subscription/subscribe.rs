use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc, Mutex,
};

use crate::{lock, mailbox::Mailbox, observer::Observer, StreamError};

/// A trait for types that can be subscribed to, allowing consumers to receive
/// values emitted by a stream.
///
/// This is the single capability every producer and operator implements:
/// given a sink, start delivering to it and hand back a disposer.
pub trait Subscribeable {
    /// The type of items emitted by the stream.
    type ObsType;

    /// Subscribes to the stream and specifies how to handle emitted values.
    ///
    /// Every call starts an independent execution of the producer. The returned
    /// `Subscription` stops delivery and releases the resources acquired by
    /// this particular execution.
    fn subscribe(&self, s: Subscriber<Self::ObsType>) -> Subscription;
}

/// A trait for types that can be unsubscribed, allowing the clean release of
/// resources associated with a subscription.
pub trait Unsubscribeable {
    /// Runs the teardown logic. Calling it more than once is a no-op.
    fn unsubscribe(&self);
}

type NextFn<T> = Box<dyn FnMut(T) + Send>;
type CompleteFn = Box<dyn FnMut() + Send>;
type ErrorFn = Box<dyn FnMut(StreamError) + Send>;

/// A type that acts as an observer, allowing users to handle emitted values,
/// errors, and completion when subscribing to an `Observable` or `Subject`.
///
/// Each of the three handlers is optional; a missing handler turns the
/// corresponding notification into a no-op.
pub struct Subscriber<NextFnType> {
    next_fn: Option<NextFn<NextFnType>>,
    complete_fn: Option<CompleteFn>,
    error_fn: Option<ErrorFn>,
}

impl<NextFnType> Subscriber<NextFnType> {
    /// Creates a new `Subscriber` instance with custom handling functions for
    /// emitted values, errors, and completion.
    pub fn new(
        next_fn: impl FnMut(NextFnType) + 'static + Send,
        error_fn: impl FnMut(StreamError) + 'static + Send,
        complete_fn: impl FnMut() + 'static + Send,
    ) -> Self {
        Subscriber {
            next_fn: Some(Box::new(next_fn)),
            complete_fn: Some(Box::new(complete_fn)),
            error_fn: Some(Box::new(error_fn)),
        }
    }

    /// Create a new Subscriber with only the provided `next` function.
    pub fn on_next(next_fn: impl FnMut(NextFnType) + 'static + Send) -> Self {
        Subscriber {
            next_fn: Some(Box::new(next_fn)),
            complete_fn: None,
            error_fn: None,
        }
    }

    /// Set the completion function for the Subscriber.
    pub fn on_complete(&mut self, complete_fn: impl FnMut() + 'static + Send) {
        self.complete_fn = Some(Box::new(complete_fn));
    }

    /// Set the error-handling function for the Subscriber.
    pub fn on_error(&mut self, error_fn: impl FnMut(StreamError) + 'static + Send) {
        self.error_fn = Some(Box::new(error_fn));
    }

    pub(crate) fn shared(self) -> SharedSubscriber<NextFnType> {
        SharedSubscriber(Arc::new(Mailbox::new(self)))
    }
}

impl<T> Default for Subscriber<T> {
    fn default() -> Self {
        Subscriber {
            next_fn: None,
            complete_fn: None,
            error_fn: None,
        }
    }
}

impl<T> Observer for Subscriber<T> {
    type NextFnType = T;

    fn next(&mut self, v: Self::NextFnType) {
        if let Some(nfn) = &mut self.next_fn {
            (nfn)(v);
        }
    }

    fn complete(&mut self) {
        if let Some(cfn) = &mut self.complete_fn {
            (cfn)();
        }
    }

    fn error(&mut self, observable_error: StreamError) {
        if let Some(efn) = &mut self.error_fn {
            (efn)(observable_error);
        }
    }
}

/// Downstream sink shared between the handlers an operator installs upstream.
///
/// Notifications sent while the sink is already delivering, for example from
/// inside one of its own handlers, are queued and delivered in order once the
/// current handler returns.
pub(crate) struct SharedSubscriber<T>(Arc<Mailbox<Subscriber<T>, Signal<T>>>);

enum Signal<T> {
    Next(T),
    Error(StreamError),
    Complete,
}

impl<T> Clone for SharedSubscriber<T> {
    fn clone(&self) -> Self {
        SharedSubscriber(Arc::clone(&self.0))
    }
}

impl<T> SharedSubscriber<T> {
    fn deliver(&self, signal: Signal<T>) {
        self.0.deliver(signal, |subscriber, signal| match signal {
            Signal::Next(v) => subscriber.next(v),
            Signal::Error(e) => subscriber.error(e),
            Signal::Complete => subscriber.complete(),
        });
    }

    pub(crate) fn next(&self, v: T) {
        self.deliver(Signal::Next(v));
    }

    pub(crate) fn error(&self, e: StreamError) {
        self.deliver(Signal::Error(e));
    }

    pub(crate) fn complete(&self) {
        self.deliver(Signal::Complete);
    }
}

/// Represents a subscription to an observable or a subject, allowing control
/// over the subscription.
///
/// Clones share the same teardown: whichever clone is unsubscribed first runs
/// it, every later call is a no-op. Dropping a `Subscription` does not
/// unsubscribe.
#[derive(Clone)]
pub struct Subscription {
    inner: Arc<SubscriptionInner>,
}

struct SubscriptionInner {
    closed: AtomicBool,
    unsubscribe_logic: Mutex<UnsubscribeLogic>,
}

impl Subscription {
    /// Creates a new `Subscription` with the specified unsubscribe logic.
    ///
    /// See [`UnsubscribeLogic`] for the available teardown strategies.
    ///
    /// [`UnsubscribeLogic`]: enum.UnsubscribeLogic.html
    #[must_use]
    pub fn new(unsubscribe_logic: UnsubscribeLogic) -> Self {
        Subscription {
            inner: Arc::new(SubscriptionInner {
                closed: AtomicBool::new(false),
                unsubscribe_logic: Mutex::new(unsubscribe_logic),
            }),
        }
    }

    /// Returns `true` once `unsubscribe` has been called on this subscription
    /// or any of its clones.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.inner.closed.load(Ordering::Acquire)
    }
}

impl Unsubscribeable for Subscription {
    fn unsubscribe(&self) {
        if self.inner.closed.swap(true, Ordering::AcqRel) {
            return;
        }
        let logic = std::mem::replace(
            &mut *lock(&self.inner.unsubscribe_logic),
            UnsubscribeLogic::Nil,
        );
        logic.unsubscribe();
    }
}

/// Enumerates various unsubscribe logic options for a subscription.
pub enum UnsubscribeLogic {
    /// No specific unsubscribe logic.
    Nil,

    /// If one subscription depends on another. Wrapped subscription's
    /// unsubscribe will be called upon unsubscribing.
    Wrapped(Subscription),

    /// Unsubscribe logic defined by a function.
    Logic(Box<dyn FnOnce() + Send>),
}

impl UnsubscribeLogic {
    fn unsubscribe(self) {
        match self {
            UnsubscribeLogic::Nil => (),
            UnsubscribeLogic::Logic(fnc) => fnc(),
            UnsubscribeLogic::Wrapped(subscription) => subscription.unsubscribe(),
        }
    }
}
