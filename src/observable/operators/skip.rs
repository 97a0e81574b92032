use crate::subscription::subscribe::{Subscribeable, Subscriber, Subscription};

/// Source returned by [`ObservableExt::skip`](crate::ObservableExt::skip).
pub struct Skip<S> {
    source: S,
    count: usize,
}

impl<S> Skip<S> {
    pub(crate) fn new(source: S, count: usize) -> Self {
        Skip { source, count }
    }
}

impl<S, T> Subscribeable for Skip<S>
where
    S: Subscribeable<ObsType = T>,
    T: Send + 'static,
{
    type ObsType = T;

    fn subscribe(&self, o: Subscriber<T>) -> Subscription {
        let o_shared = o.shared();
        let o_cloned_e = o_shared.clone();
        let o_cloned_c = o_shared.clone();

        let mut n = self.count;
        let u = Subscriber::new(
            move |v| {
                if n > 0 {
                    n -= 1;
                    return;
                }
                o_shared.next(v);
            },
            move |observable_error| o_cloned_e.error(observable_error),
            move || o_cloned_c.complete(),
        );
        self.source.subscribe(u)
    }
}
