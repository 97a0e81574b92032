#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use rxlite::subscribe::Subscriber;

#[derive(Debug, Clone, PartialEq)]
pub enum Notification<T> {
    Next(T),
    Error(String),
    Complete,
}

pub type Emissions<T> = Arc<Mutex<Vec<Notification<T>>>>;

/// Subscriber that records every notification, in order, into the returned log.
pub fn register_emissions_subscriber<T: Send + 'static>() -> (Subscriber<T>, Emissions<T>) {
    let log: Emissions<T> = Arc::new(Mutex::new(Vec::with_capacity(16)));
    let log_n = Arc::clone(&log);
    let log_e = Arc::clone(&log);
    let log_c = Arc::clone(&log);

    let subscriber = Subscriber::new(
        move |v| {
            // Track next() calls.
            log_n.lock().unwrap().push(Notification::Next(v));
        },
        move |e| {
            // Track error() calls.
            log_e.lock().unwrap().push(Notification::Error(e.to_string()));
        },
        move || {
            // Track complete() calls.
            log_c.lock().unwrap().push(Notification::Complete);
        },
    );
    (subscriber, log)
}

pub fn nexts<T: Clone>(log: &Emissions<T>) -> Vec<T> {
    log.lock()
        .unwrap()
        .iter()
        .filter_map(|n| match n {
            Notification::Next(v) => Some(v.clone()),
            _ => None,
        })
        .collect()
}

pub fn completes<T>(log: &Emissions<T>) -> usize {
    log.lock()
        .unwrap()
        .iter()
        .filter(|n| matches!(n, Notification::Complete))
        .count()
}

pub fn errors<T>(log: &Emissions<T>) -> Vec<String> {
    log.lock()
        .unwrap()
        .iter()
        .filter_map(|n| match n {
            Notification::Error(e) => Some(e.clone()),
            _ => None,
        })
        .collect()
}
