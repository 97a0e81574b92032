use std::sync::Arc;

use crate::subscription::subscribe::{Subscribeable, Subscriber, Subscription};

/// Source returned by [`ObservableExt::filter`](crate::ObservableExt::filter).
pub struct Filter<S, P> {
    source: S,
    predicate: Arc<P>,
}

impl<S, P> Filter<S, P> {
    pub(crate) fn new(source: S, predicate: P) -> Self {
        Filter {
            source,
            predicate: Arc::new(predicate),
        }
    }
}

impl<S, P, T> Subscribeable for Filter<S, P>
where
    S: Subscribeable<ObsType = T>,
    P: Fn(&T) -> bool + Send + Sync + 'static,
    T: Send + 'static,
{
    type ObsType = T;

    fn subscribe(&self, o: Subscriber<T>) -> Subscription {
        let o_shared = o.shared();
        let o_cloned_e = o_shared.clone();
        let o_cloned_c = o_shared.clone();
        let predicate = Arc::clone(&self.predicate);

        let u = Subscriber::new(
            move |v| {
                if predicate(&v) {
                    o_shared.next(v);
                }
            },
            move |observable_error| o_cloned_e.error(observable_error),
            move || o_cloned_c.complete(),
        );
        self.source.subscribe(u)
    }
}
