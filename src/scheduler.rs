//! Timer capabilities used by the deferred and periodic producers.
//!
//! Work is scheduled on the Tokio runtime current at subscribe time. A
//! current-thread runtime gives the single-threaded, event-loop ordering the
//! producers are written for: deferred work runs on a later turn, after the
//! subscribing code has yielded.
use std::{future::Future, time::Duration};

use tokio::{
    runtime::Handle,
    task::JoinHandle,
    time::{self, MissedTickBehavior},
};

use crate::SchedulerError;

/// Shortest period accepted by [`repeat`]. Zero periods are clamped to it.
pub const MIN_PERIOD: Duration = Duration::from_millis(1);

/// Cancelable handle to scheduled work.
#[derive(Debug)]
pub struct TaskHandle(JoinHandle<()>);

impl TaskHandle {
    /// Stops the task. Work that has not started yet never runs.
    pub fn cancel(&self) {
        self.0.abort();
    }
}

fn spawn(
    name: &'static str,
    handle: &Handle,
    fut: impl Future<Output = ()> + Send + 'static,
) -> TaskHandle {
    tracing::trace!(observable = name, "scheduling task");
    TaskHandle(handle.spawn(fut))
}

fn current(name: &'static str) -> Result<Handle, SchedulerError> {
    Handle::try_current().map_err(|source| SchedulerError::NoRuntime { name, source })
}

/// Runs `task` once, with zero delay, on a later turn of the runtime.
///
/// # Errors
///
/// Returns [`SchedulerError::NoRuntime`] when called outside a Tokio runtime.
pub fn defer(
    name: &'static str,
    task: impl FnOnce() + Send + 'static,
) -> Result<TaskHandle, SchedulerError> {
    let handle = current(name)?;
    Ok(spawn(name, &handle, async move { task() }))
}

/// Runs `tick` every `period`, starting one period from now, until canceled.
///
/// # Errors
///
/// Returns [`SchedulerError::NoRuntime`] when called outside a Tokio runtime.
pub fn repeat(
    name: &'static str,
    period: Duration,
    mut tick: impl FnMut() + Send + 'static,
) -> Result<TaskHandle, SchedulerError> {
    let handle = current(name)?;
    let period = period.max(MIN_PERIOD);
    let start = time::Instant::now() + period;

    Ok(spawn(name, &handle, async move {
        let mut ticker = time::interval_at(start, period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        loop {
            ticker.tick().await;
            tick();
        }
    }))
}
