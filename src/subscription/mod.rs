//! Provides structures and traits related to subscription management.
//!
//! This module includes `Subscriber`, the sink that handles observed values,
//! errors and completions, and `Subscription`, the handle that releases
//! whatever a subscribe function acquired (timers, listeners, nested
//! subscriptions).
pub mod subscribe;
