use std::sync::{Arc, Mutex};

use crate::{
    lock,
    subscription::subscribe::{Subscribeable, Subscriber, Subscription},
    StreamError,
};

type TapNextFn<T> = Box<dyn FnMut(&T) + Send>;
type TapErrorFn = Box<dyn FnMut(&StreamError) + Send>;
type TapCompleteFn = Box<dyn FnMut() + Send>;

/// Side-effect handlers for [`ObservableExt::tap`](crate::ObservableExt::tap).
///
/// Every handler is optional. Handlers only observe; the notification is
/// forwarded unchanged after they run.
///
/// ```no_run
/// use rxlite::{of, subscribe::Subscriber, ObservableExt, Subscribeable, TapObserver};
///
/// of(3)
///     .tap(TapObserver::new().on_next(|v| println!("saw {}", v)))
///     .subscribe(Subscriber::default());
/// ```
pub struct TapObserver<T> {
    next_fn: Option<TapNextFn<T>>,
    error_fn: Option<TapErrorFn>,
    complete_fn: Option<TapCompleteFn>,
}

impl<T> Default for TapObserver<T> {
    fn default() -> Self {
        TapObserver {
            next_fn: None,
            error_fn: None,
            complete_fn: None,
        }
    }
}

impl<T> TapObserver<T> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn on_next(mut self, next_fn: impl FnMut(&T) + Send + 'static) -> Self {
        self.next_fn = Some(Box::new(next_fn));
        self
    }

    #[must_use]
    pub fn on_error(mut self, error_fn: impl FnMut(&StreamError) + Send + 'static) -> Self {
        self.error_fn = Some(Box::new(error_fn));
        self
    }

    #[must_use]
    pub fn on_complete(mut self, complete_fn: impl FnMut() + Send + 'static) -> Self {
        self.complete_fn = Some(Box::new(complete_fn));
        self
    }

    fn next(&mut self, v: &T) {
        if let Some(nfn) = &mut self.next_fn {
            (nfn)(v);
        }
    }

    fn error(&mut self, e: &StreamError) {
        if let Some(efn) = &mut self.error_fn {
            (efn)(e);
        }
    }

    fn complete(&mut self) {
        if let Some(cfn) = &mut self.complete_fn {
            (cfn)();
        }
    }
}

/// Source returned by [`ObservableExt::tap`](crate::ObservableExt::tap).
///
/// The handlers are shared by every subscription made through this source.
pub struct Tap<S, T> {
    source: S,
    handlers: Arc<Mutex<TapObserver<T>>>,
}

impl<S, T> Tap<S, T> {
    pub(crate) fn new(source: S, handlers: TapObserver<T>) -> Self {
        Tap {
            source,
            handlers: Arc::new(Mutex::new(handlers)),
        }
    }
}

impl<S, T> Subscribeable for Tap<S, T>
where
    S: Subscribeable<ObsType = T>,
    T: Send + 'static,
{
    type ObsType = T;

    fn subscribe(&self, o: Subscriber<T>) -> Subscription {
        let o_shared = o.shared();
        let o_cloned_e = o_shared.clone();
        let o_cloned_c = o_shared.clone();

        let h_next = Arc::clone(&self.handlers);
        let h_error = Arc::clone(&self.handlers);
        let h_complete = Arc::clone(&self.handlers);

        let u = Subscriber::new(
            move |v| {
                lock(&h_next).next(&v);
                o_shared.next(v);
            },
            move |observable_error| {
                lock(&h_error).error(&observable_error);
                o_cloned_e.error(observable_error);
            },
            move || {
                lock(&h_complete).complete();
                o_cloned_c.complete();
            },
        );
        self.source.subscribe(u)
    }
}
