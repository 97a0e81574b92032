//! `rxlite` is a small reactive-streams library built around cold observables.
//!
//! An [`Observable`] wraps a subscribe function. Nothing runs until it is
//! subscribed to, and every subscription re-runs the producer from scratch.
//! Operators ([`ObservableExt`]) wrap an upstream source and return a new
//! `Observable`; they never mutate the source. A [`Subject`] is the one
//! multicast building block: a list of observers that all receive whatever
//! is pushed into it.
//!
//! Deferred and periodic producers ([`of`], [`from`], [`range`], [`interval`])
//! schedule their work on the Tokio runtime that is current when they are
//! subscribed to. A current-thread runtime matches the single-threaded,
//! event-loop execution model the operators are written for.
//!
//! ```no_run
//! use rxlite::{from, subscribe::Subscriber, ObservableExt, Subscribeable};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() {
//!     let _subscription = from(vec![1, 2, 3, 4])
//!         .map(|v| v * 10)
//!         .take(3)
//!         .subscribe(Subscriber::new(
//!             |v| println!("next {}", v),
//!             |e| eprintln!("error {}", e),
//!             || println!("complete"),
//!         ));
//!
//!     // Emission happens once the current task yields.
//!     tokio::task::yield_now().await;
//! }
//! ```
use std::sync::{Mutex, MutexGuard, PoisonError};

mod errors;
pub mod event;
mod mailbox;
mod observable;
pub mod observer;
pub mod scheduler;
pub mod subjects;
mod subscription;

pub use errors::*;
pub use observable::*;
pub use observer::Observer;
pub use subjects::Subject;
pub use subscription::subscribe;
pub use subscription::subscribe::{Subscribeable, Unsubscribeable};

/// Locks `m`, recovering the guard if a panicking callback poisoned it.
pub(crate) fn lock<T: ?Sized>(m: &Mutex<T>) -> MutexGuard<'_, T> {
    m.lock().unwrap_or_else(PoisonError::into_inner)
}
