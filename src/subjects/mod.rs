//! The `subjects` module provides the multicast side of the library.
//!
//! A `Subject` is both an `Observer` and a subscribable source: values pushed
//! into it with `next` are broadcast to every observer registered at that
//! moment. Unlike an `Observable`, a `Subject` does not re-run anything per
//! subscriber, and it does not replay past values to late subscribers.
mod subject;

pub use subject::*;
