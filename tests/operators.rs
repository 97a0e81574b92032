mod generate_observable;
mod register_emissions;

use std::sync::{Arc, Mutex};

use generate_observable::{generate_error_observable, generate_sync_observable, settle};
use register_emissions::{
    completes, errors, nexts, register_emissions_subscriber, Notification,
};
use rxlite::{from, ObservableExt, Subject, Subscribeable, TapObserver};

#[tokio::test(start_paused = true)]
async fn map_observable() {
    let (subscriber, log) = register_emissions_subscriber();
    from(vec![1, 2, 3])
        .map(|x| format!("emit to str {}", x + 1000))
        .subscribe(subscriber);
    settle().await;

    assert_eq!(
        nexts(&log),
        vec!["emit to str 1001", "emit to str 1002", "emit to str 1003"]
    );
    assert_eq!(completes(&log), 1);
}

#[tokio::test(start_paused = true)]
async fn map_twice_equals_composed_map() {
    let f = |v: i32| v * 3;
    let g = |v: i32| v - 7;
    let source = from(vec![-2, 0, 5, 11]);

    let (chained, chained_log) = register_emissions_subscriber();
    let (composed, composed_log) = register_emissions_subscriber();
    source.clone().map(f).map(g).subscribe(chained);
    source.map(move |v| g(f(v))).subscribe(composed);
    settle().await;

    assert_eq!(*chained_log.lock().unwrap(), *composed_log.lock().unwrap());
    assert_eq!(nexts(&chained_log), vec![-13, -7, 8, 26]);
}

#[test]
fn map_passes_errors_through() {
    let (subscriber, log) = register_emissions_subscriber();
    generate_error_observable("upstream failed")
        .map(|v| v * 2)
        .subscribe(subscriber);

    assert_eq!(
        *log.lock().unwrap(),
        vec![Notification::Error("upstream failed".to_owned())]
    );
}

#[tokio::test(start_paused = true)]
async fn take_yields_min_of_n_and_length() {
    let values = vec![10, 20, 30, 40, 50];

    for n in 0..=7 {
        let (subscriber, log) = register_emissions_subscriber();
        from(values.clone()).take(n).subscribe(subscriber);
        settle().await;

        let expected: Vec<i32> = values.iter().copied().take(n).collect();
        assert_eq!(nexts(&log), expected, "take({})", n);
        assert_eq!(completes(&log), 1, "take({})", n);
        assert_eq!(
            log.lock().unwrap().last(),
            Some(&Notification::Complete),
            "take({}) emitted after completion",
            n
        );
    }
}

#[test]
fn take_unsubscribes_from_subject() {
    let subject = Subject::new();
    let (subscriber, log) = register_emissions_subscriber();
    subject.clone().take(2).subscribe(subscriber);
    assert_eq!(subject.len(), 1);

    subject.next(1);
    subject.next(2);
    assert_eq!(subject.len(), 0);

    subject.next(3);
    subject.complete();

    assert_eq!(
        *log.lock().unwrap(),
        vec![
            Notification::Next(1),
            Notification::Next(2),
            Notification::Complete
        ]
    );
}

#[test]
fn take_zero_emits_nothing_and_keeps_listening() {
    let subject = Subject::new();
    let (subscriber, log) = register_emissions_subscriber();
    subject.clone().take(0).subscribe(subscriber);

    subject.next(1);
    subject.next(2);
    assert!(log.lock().unwrap().is_empty());
    assert_eq!(subject.len(), 1);

    // Completion from upstream still passes through.
    subject.complete();
    assert_eq!(*log.lock().unwrap(), vec![Notification::Complete]);
}

#[test]
fn take_propagates_early_completion() {
    let (subscriber, log) = register_emissions_subscriber();
    generate_sync_observable(vec![1, 2]).take(5).subscribe(subscriber);

    assert_eq!(nexts(&log), vec![1, 2]);
    assert_eq!(completes(&log), 1);
}

#[test]
fn tap_observes_without_changing_the_stream() {
    let side = Arc::new(Mutex::new(Vec::new()));
    let (s_next, s_complete) = (Arc::clone(&side), Arc::clone(&side));

    let (subscriber, log) = register_emissions_subscriber();
    generate_sync_observable(vec![1, 2, 3])
        .tap(
            TapObserver::new()
                .on_next(move |v: &i32| s_next.lock().unwrap().push(format!("next {}", v)))
                .on_complete(move || s_complete.lock().unwrap().push("complete".to_owned())),
        )
        .subscribe(subscriber);

    assert_eq!(
        *side.lock().unwrap(),
        vec!["next 1", "next 2", "next 3", "complete"]
    );
    assert_eq!(nexts(&log), vec![1, 2, 3]);
    assert_eq!(completes(&log), 1);
}

#[test]
fn tap_sees_errors_and_runs_before_downstream() {
    let order = Arc::new(Mutex::new(Vec::new()));
    let order_tap = Arc::clone(&order);
    let order_sub = Arc::clone(&order);

    let subject = Subject::new();
    subject
        .as_observable()
        .tap(TapObserver::new().on_error(move |e| {
            order_tap.lock().unwrap().push(format!("tap {}", e));
        }))
        .subscribe(rxlite::subscribe::Subscriber::new(
            |_: i32| {},
            move |e| order_sub.lock().unwrap().push(format!("subscriber {}", e)),
            || {},
        ));

    subject.error("broken pipe".into());

    assert_eq!(
        *order.lock().unwrap(),
        vec!["tap broken pipe", "subscriber broken pipe"]
    );
}

#[tokio::test(start_paused = true)]
async fn join_emits_everything_on_completion() {
    let (subscriber, log) = register_emissions_subscriber();
    from(vec![0, 1, 2, 3]).join().subscribe(subscriber);
    settle().await;

    assert_eq!(
        *log.lock().unwrap(),
        vec![Notification::Next(vec![0, 1, 2, 3]), Notification::Complete]
    );
}

#[test]
fn join_waits_for_upstream_completion() {
    let subject = Subject::new();
    let (subscriber, log) = register_emissions_subscriber();
    subject.as_observable().join().subscribe(subscriber);

    subject.next("a");
    subject.next("b");
    assert!(log.lock().unwrap().is_empty());

    subject.complete();
    assert_eq!(nexts(&log), vec![vec!["a", "b"]]);
    assert_eq!(completes(&log), 1);
}

#[test]
fn join_passes_errors_through() {
    let (subscriber, log) = register_emissions_subscriber();
    generate_error_observable("no data").join().subscribe(subscriber);

    assert_eq!(errors(&log), vec!["no data"]);
    assert!(nexts(&log).is_empty());
}

#[test]
fn filter_and_skip() {
    let (subscriber, log) = register_emissions_subscriber();
    generate_sync_observable((1..=10).collect())
        .filter(|v| v % 2 == 0)
        .skip(2)
        .subscribe(subscriber);

    assert_eq!(nexts(&log), vec![6, 8, 10]);
    assert_eq!(completes(&log), 1);
}

#[test]
fn operators_leave_the_source_untouched() {
    let source = generate_sync_observable(vec![1, 2, 3]);
    let _doubled = source.clone().map(|v| v * 2);

    let (subscriber, log) = register_emissions_subscriber();
    source.subscribe(subscriber);

    assert_eq!(nexts(&log), vec![1, 2, 3]);
}
