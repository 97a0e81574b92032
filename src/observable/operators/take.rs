use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc, OnceLock,
};

use crate::subscription::subscribe::{
    Subscribeable, Subscriber, Subscription, UnsubscribeLogic, Unsubscribeable,
};

/// Source returned by [`ObservableExt::take`](crate::ObservableExt::take).
pub struct Take<S> {
    source: S,
    count: usize,
}

impl<S> Take<S> {
    pub(crate) fn new(source: S, count: usize) -> Self {
        Take { source, count }
    }
}

impl<S, T> Subscribeable for Take<S>
where
    S: Subscribeable<ObsType = T>,
    T: Send + 'static,
{
    type ObsType = T;

    fn subscribe(&self, o: Subscriber<T>) -> Subscription {
        let o_shared = o.shared();
        let o_cloned_e = o_shared.clone();
        let o_cloned_c = o_shared.clone();

        let count = self.count;
        let done = Arc::new(AtomicBool::new(false));
        let done_e = Arc::clone(&done);
        let done_c = Arc::clone(&done);
        let done_n = Arc::clone(&done);

        // The source may reach the n-th value before `subscribe` below returns,
        // so the upstream subscription is published through a slot and the
        // `done` flag is checked again once it is known.
        let upstream: Arc<OnceLock<Subscription>> = Arc::new(OnceLock::new());
        let upstream_n = Arc::clone(&upstream);

        let mut taken = 0;
        let u = Subscriber::new(
            move |v| {
                if taken >= count || done_n.load(Ordering::Acquire) {
                    return;
                }
                taken += 1;
                o_shared.next(v);

                if taken == count {
                    done_n.store(true, Ordering::Release);
                    o_shared.complete();
                    if let Some(s) = upstream_n.get() {
                        s.unsubscribe();
                    }
                }
            },
            move |observable_error| {
                if !done_e.load(Ordering::Acquire) {
                    o_cloned_e.error(observable_error);
                }
            },
            move || {
                if !done_c.load(Ordering::Acquire) {
                    o_cloned_c.complete();
                }
            },
        );

        let subscription = self.source.subscribe(u);
        let _ = upstream.set(subscription.clone());
        if done.load(Ordering::Acquire) {
            subscription.unsubscribe();
        }

        Subscription::new(UnsubscribeLogic::Wrapped(subscription))
    }
}
