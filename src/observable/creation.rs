//! Functions that construct primitive observables.
use std::{
    sync::{
        atomic::{AtomicBool, AtomicUsize, Ordering},
        Arc,
    },
    time::Duration,
};

use crate::{
    event::EventTarget,
    observable::Observable,
    observer::Observer,
    scheduler,
    subscription::subscribe::{
        SharedSubscriber, Subscribeable, Subscriber, Subscription, UnsubscribeLogic,
        Unsubscribeable,
    },
};

/// Creates an observable that completes synchronously at subscribe time
/// without emitting.
#[must_use]
pub fn empty<T: 'static>() -> Observable<T> {
    Observable::new(|mut o: Subscriber<T>| {
        o.complete();
        Subscription::new(UnsubscribeLogic::Nil)
    })
}

/// Creates an observable that, on the next turn of the runtime, emits `value`
/// once and completes.
pub fn of<T>(value: T) -> Observable<T>
where
    T: Clone + Send + Sync + 'static,
{
    Observable::new(move |o| emit_deferred("of", o, vec![value.clone()]))
}

/// Creates an observable that, on the next turn of the runtime, emits every
/// item of `values` in order and completes.
///
/// Unsubscribing while the items are being delivered stops the remaining ones
/// and suppresses completion.
pub fn from<T, I>(values: I) -> Observable<T>
where
    I: IntoIterator<Item = T>,
    T: Clone + Send + Sync + 'static,
{
    let values: Vec<T> = values.into_iter().collect();
    Observable::new(move |o| emit_deferred("from", o, values.clone()))
}

/// Emits the integers `min..=max` in ascending order, deferred like [`from`].
///
/// When `min > max` nothing is emitted and the observable just completes.
#[must_use]
pub fn range(min: i64, max: i64) -> Observable<i64> {
    from(min..=max)
}

/// Emits `0, 1, 2, …` every `period`, the first value one period after
/// subscribing. Never completes; unsubscribing cancels the timer.
#[must_use]
pub fn interval(period: Duration) -> Observable<u64> {
    Observable::new(move |o| {
        let o = o.shared();
        let o_tick = o.clone();
        let disposed = Arc::new(AtomicBool::new(false));
        let disposed_tick = Arc::clone(&disposed);

        let mut counter: u64 = 0;
        let ticking = scheduler::repeat("interval", period, move || {
            if disposed_tick.load(Ordering::Acquire) {
                return;
            }
            tracing::trace!(counter, "interval tick");
            o_tick.next(counter);
            counter += 1;
        });

        match ticking {
            Ok(handle) => Subscription::new(UnsubscribeLogic::Logic(Box::new(move || {
                disposed.store(true, Ordering::Release);
                handle.cancel();
            }))),
            Err(e) => {
                tracing::error!(error = %e, "interval could not start its timer");
                o.error(e.into());
                Subscription::new(UnsubscribeLogic::Nil)
            }
        }
    })
}

fn emit_deferred<T: Send + 'static>(
    name: &'static str,
    o: Subscriber<T>,
    values: Vec<T>,
) -> Subscription {
    let o = o.shared();
    let o_task = o.clone();
    let disposed = Arc::new(AtomicBool::new(false));
    let disposed_task = Arc::clone(&disposed);

    let deferred = scheduler::defer(name, move || {
        tracing::trace!(observable = name, count = values.len(), "deferred emission");
        for v in values {
            if disposed_task.load(Ordering::Acquire) {
                return;
            }
            o_task.next(v);
        }
        if !disposed_task.load(Ordering::Acquire) {
            o_task.complete();
        }
    });

    match deferred {
        Ok(handle) => Subscription::new(UnsubscribeLogic::Logic(Box::new(move || {
            disposed.store(true, Ordering::Release);
            handle.cancel();
        }))),
        Err(e) => {
            tracing::error!(error = %e, "deferred emission could not be scheduled");
            o.error(e.into());
            Subscription::new(UnsubscribeLogic::Nil)
        }
    }
}

/// Subscribes to every source at once and forwards all of their values and
/// errors as they arrive.
///
/// Completes once every source has completed; with no sources it completes
/// immediately. Unsubscribing releases every source subscription.
pub fn merge<T: Send + 'static>(sources: impl IntoIterator<Item = Observable<T>>) -> Observable<T> {
    Observable::from_source(Merge {
        sources: sources.into_iter().collect(),
    })
}

struct Merge<T> {
    sources: Vec<Observable<T>>,
}

fn wrap_subscriber<T: Send + 'static>(
    s: &SharedSubscriber<T>,
    completed: &Arc<AtomicUsize>,
    total: usize,
) -> Subscriber<T> {
    let s_next = s.clone();
    let s_error = s.clone();
    let s_complete = s.clone();
    let completed = Arc::clone(completed);

    Subscriber::new(
        move |v| s_next.next(v),
        move |e| s_error.error(e),
        move || {
            if completed.fetch_add(1, Ordering::AcqRel) + 1 == total {
                tracing::debug!(sources = total, "merge completed");
                s_complete.complete();
            }
        },
    )
}

impl<T: Send + 'static> Subscribeable for Merge<T> {
    type ObsType = T;

    fn subscribe(&self, o: Subscriber<T>) -> Subscription {
        let total = self.sources.len();
        let o = o.shared();
        if total == 0 {
            o.complete();
            return Subscription::new(UnsubscribeLogic::Nil);
        }

        let completed = Arc::new(AtomicUsize::new(0));
        let subscriptions: Vec<Subscription> = self
            .sources
            .iter()
            .map(|source| source.subscribe(wrap_subscriber(&o, &completed, total)))
            .collect();

        Subscription::new(UnsubscribeLogic::Logic(Box::new(move || {
            for subscription in subscriptions {
                subscription.unsubscribe();
            }
        })))
    }
}

/// Emits every `event_name` event dispatched by `target`. Never completes;
/// unsubscribing removes the listener.
pub fn from_event<E>(target: E, event_name: impl Into<String>) -> Observable<E::Event>
where
    E: EventTarget + Send + Sync + 'static,
    E::Event: 'static,
{
    let target = Arc::new(target);
    let event_name: Arc<str> = Arc::from(event_name.into());

    Observable::new(move |mut o| {
        let id = target.add_event_listener(
            &event_name,
            Box::new(move |event: E::Event| o.next(event)),
        );
        tracing::debug!(event = %event_name, "event listener attached");

        let target = Arc::clone(&target);
        let event_name = Arc::clone(&event_name);
        Subscription::new(UnsubscribeLogic::Logic(Box::new(move || {
            target.remove_event_listener(&event_name, id);
            tracing::debug!(event = %event_name, "event listener removed");
        })))
    })
}
