use std::sync::Arc;

use crate::subscription::subscribe::{Subscribeable, Subscriber, Subscription};

/// Source returned by [`ObservableExt::map`](crate::ObservableExt::map).
pub struct Map<S, F> {
    source: S,
    project: Arc<F>,
}

impl<S, F> Map<S, F> {
    pub(crate) fn new(source: S, project: F) -> Self {
        Map {
            source,
            project: Arc::new(project),
        }
    }
}

impl<S, F, T, U> Subscribeable for Map<S, F>
where
    S: Subscribeable<ObsType = T>,
    F: Fn(T) -> U + Send + Sync + 'static,
    T: 'static,
    U: Send + 'static,
{
    type ObsType = U;

    fn subscribe(&self, o: Subscriber<U>) -> Subscription {
        let o_shared = o.shared();
        let o_cloned_e = o_shared.clone();
        let o_cloned_c = o_shared.clone();
        let project = Arc::clone(&self.project);

        let u = Subscriber::new(
            move |v| {
                let t = project(v);
                o_shared.next(t);
            },
            move |observable_error| {
                o_cloned_e.error(observable_error);
            },
            move || {
                o_cloned_c.complete();
            },
        );
        self.source.subscribe(u)
    }
}
