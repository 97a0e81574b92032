use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
};

use crate::{
    lock,
    observable::Observable,
    subscription::subscribe::{
        Subscribeable, Subscriber, Subscription, UnsubscribeLogic, Unsubscribeable,
    },
};

/// Source returned by [`ObservableExt::merge_map`](crate::ObservableExt::merge_map).
pub struct MergeMap<S, F> {
    source: S,
    project: Arc<F>,
}

impl<S, F> MergeMap<S, F> {
    pub(crate) fn new(source: S, project: F) -> Self {
        MergeMap {
            source,
            project: Arc::new(project),
        }
    }
}

/// Completion bookkeeping for one `merge_map` subscription.
///
/// The outer completion is latched separately from the live inner count, so
/// an inner that completes synchronously while the outer is still emitting
/// can never complete the whole stream early.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MergeState {
    AwaitingOuter { active: usize },
    Draining { active: usize },
    Complete,
}

impl MergeState {
    fn inner_started(&mut self) {
        match self {
            MergeState::AwaitingOuter { active } | MergeState::Draining { active } => {
                *active += 1;
            }
            MergeState::Complete => (),
        }
    }

    /// Returns `true` when this transition completes the stream.
    fn inner_completed(&mut self) -> bool {
        match *self {
            MergeState::AwaitingOuter { active } => {
                *self = MergeState::AwaitingOuter {
                    active: active.saturating_sub(1),
                };
                false
            }
            MergeState::Draining { active } if active <= 1 => {
                *self = MergeState::Complete;
                true
            }
            MergeState::Draining { active } => {
                *self = MergeState::Draining { active: active - 1 };
                false
            }
            MergeState::Complete => false,
        }
    }

    /// Returns `true` when this transition completes the stream.
    fn outer_completed(&mut self) -> bool {
        match *self {
            MergeState::AwaitingOuter { active: 0 } => {
                *self = MergeState::Complete;
                true
            }
            MergeState::AwaitingOuter { active } => {
                *self = MergeState::Draining { active };
                false
            }
            MergeState::Draining { .. } | MergeState::Complete => false,
        }
    }
}

/// Live inner subscriptions, keyed so each can be dropped when its inner
/// observable completes.
#[derive(Default)]
struct InnerSubscriptions {
    disposed: bool,
    next_key: u64,
    // `None` until `subscribe` on the inner observable has returned.
    live: HashMap<u64, Option<Subscription>>,
}

impl InnerSubscriptions {
    fn reserve(inner: &Mutex<Self>) -> u64 {
        let mut guard = lock(inner);
        let key = guard.next_key;
        guard.next_key += 1;
        guard.live.insert(key, None);
        key
    }

    fn add(inner: &Mutex<Self>, key: u64, s: Subscription) {
        let mut guard = lock(inner);
        if guard.disposed {
            drop(guard);
            s.unsubscribe();
            return;
        }
        // An inner that already completed during `subscribe` has no entry.
        if let Some(slot) = guard.live.get_mut(&key) {
            *slot = Some(s);
        }
    }

    fn completed(inner: &Mutex<Self>, key: u64) {
        lock(inner).live.remove(&key);
    }

    fn dispose(inner: &Mutex<Self>) {
        let subscriptions = {
            let mut guard = lock(inner);
            guard.disposed = true;
            std::mem::take(&mut guard.live)
        };
        for s in subscriptions.into_values().flatten() {
            s.unsubscribe();
        }
    }
}

impl<S, F, T, R> Subscribeable for MergeMap<S, F>
where
    S: Subscribeable<ObsType = T>,
    F: Fn(T) -> Observable<R> + Send + Sync + 'static,
    T: 'static,
    R: Send + 'static,
{
    type ObsType = R;

    fn subscribe(&self, o: Subscriber<R>) -> Subscription {
        let o_shared = o.shared();
        let o_cloned_e = o_shared.clone();
        let o_cloned_c = o_shared.clone();

        let project = Arc::clone(&self.project);
        let state = Arc::new(Mutex::new(MergeState::AwaitingOuter { active: 0 }));
        let state_c = Arc::clone(&state);
        let inner = Arc::new(Mutex::new(InnerSubscriptions::default()));
        let inner_n = Arc::clone(&inner);

        let u = Subscriber::new(
            move |v| {
                let inner_observable = project(v);
                lock(&state).inner_started();

                let o_next = o_shared.clone();
                let o_error = o_shared.clone();
                let o_complete = o_shared.clone();
                let state = Arc::clone(&state);
                let key = InnerSubscriptions::reserve(&inner_n);
                let inner_c = Arc::clone(&inner_n);

                let inner_subscriber = Subscriber::new(
                    move |k| o_next.next(k),
                    move |observable_error| o_error.error(observable_error),
                    move || {
                        InnerSubscriptions::completed(&inner_c, key);
                        let finished = lock(&state).inner_completed();
                        if finished {
                            tracing::debug!("merge_map completed after last inner");
                            o_complete.complete();
                        }
                    },
                );
                let s = inner_observable.subscribe(inner_subscriber);
                InnerSubscriptions::add(&inner_n, key, s);
            },
            move |observable_error| o_cloned_e.error(observable_error),
            move || {
                let finished = lock(&state_c).outer_completed();
                if finished {
                    tracing::debug!("merge_map completed with outer");
                    o_cloned_c.complete();
                }
            },
        );

        let outer = self.source.subscribe(u);

        Subscription::new(UnsubscribeLogic::Logic(Box::new(move || {
            outer.unsubscribe();
            InnerSubscriptions::dispose(&inner);
        })))
    }
}
