#![allow(dead_code)]

use std::time::Duration;

use rxlite::{
    subscribe::{Subscriber, Subscription, UnsubscribeLogic},
    Observable, Observer, StreamError,
};

/// Emits `values` synchronously inside `subscribe`, then completes.
pub fn generate_sync_observable(values: Vec<i32>) -> Observable<i32> {
    Observable::new(move |mut o: Subscriber<_>| {
        for v in values.iter().copied() {
            o.next(v);
        }
        o.complete();
        Subscription::new(UnsubscribeLogic::Nil)
    })
}

/// Emits each `(at_ms, value)` pair at `at_ms` milliseconds after subscribing,
/// then completes right after the last one. Unsubscribing stops the task.
pub fn generate_delayed_observable(emissions: Vec<(u64, i32)>) -> Observable<i32> {
    Observable::new(move |mut o: Subscriber<_>| {
        let emissions = emissions.clone();
        let start = tokio::time::Instant::now();
        let jh = tokio::task::spawn(async move {
            for (at_ms, v) in emissions {
                tokio::time::sleep_until(start + Duration::from_millis(at_ms)).await;
                o.next(v);
            }
            o.complete();
        });

        Subscription::new(UnsubscribeLogic::Logic(Box::new(move || jh.abort())))
    })
}

/// Signals `message` as a stream error synchronously inside `subscribe`.
pub fn generate_error_observable(message: &'static str) -> Observable<i32> {
    Observable::new(move |mut o: Subscriber<_>| {
        o.error(StreamError::from(message));
        Subscription::new(UnsubscribeLogic::Nil)
    })
}

/// Lets deferred producers run. Tests using it run with a paused clock, so
/// this only advances virtual time.
pub async fn settle() {
    tokio::time::sleep(Duration::from_millis(1)).await;
}
