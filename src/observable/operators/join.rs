use std::sync::{Arc, Mutex};

use crate::{
    lock,
    subscription::subscribe::{Subscribeable, Subscriber, Subscription},
};

/// Source returned by [`ObservableExt::join`](crate::ObservableExt::join).
///
/// Buffers every item and, once the source completes, emits the whole buffer
/// as a single `Vec` followed by completion. Nothing is emitted before that.
pub struct Join<S> {
    source: S,
}

impl<S> Join<S> {
    pub(crate) fn new(source: S) -> Self {
        Join { source }
    }
}

impl<S, T> Subscribeable for Join<S>
where
    S: Subscribeable<ObsType = T>,
    T: Send + 'static,
{
    type ObsType = Vec<T>;

    fn subscribe(&self, o: Subscriber<Vec<T>>) -> Subscription {
        let o_shared = o.shared();
        let o_cloned_e = o_shared.clone();

        let buffer = Arc::new(Mutex::new(Vec::new()));
        let buffer_c = Arc::clone(&buffer);

        let u = Subscriber::new(
            move |v| lock(&buffer).push(v),
            move |observable_error| o_cloned_e.error(observable_error),
            move || {
                let values = std::mem::take(&mut *lock(&buffer_c));
                o_shared.next(values);
                o_shared.complete();
            },
        );
        self.source.subscribe(u)
    }
}
