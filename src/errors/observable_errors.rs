use std::error::Error;
use std::fmt;
use std::sync::Arc;

use tokio::runtime::TryCurrentError;

/// Message delivered through an observer's `error` channel.
///
/// Stream errors are a plain human-readable message. They are only ever
/// produced when a producer explicitly decides to signal one; panics raised by
/// user callbacks are never turned into a `StreamError`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct StreamError {
    message: Arc<str>,
}

impl StreamError {
    pub fn new(message: impl Into<Arc<str>>) -> Self {
        StreamError {
            message: message.into(),
        }
    }

    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for StreamError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl Error for StreamError {}

impl From<&str> for StreamError {
    fn from(message: &str) -> Self {
        StreamError::new(message)
    }
}

impl From<String> for StreamError {
    fn from(message: String) -> Self {
        StreamError::new(message)
    }
}

impl From<SchedulerError> for StreamError {
    fn from(e: SchedulerError) -> Self {
        StreamError::new(e.to_string())
    }
}

/// Failures of the timer collaborator used by deferred and periodic producers.
#[derive(Debug, thiserror::Error)]
pub enum SchedulerError {
    #[error("{name} observable must be subscribed from within a Tokio runtime")]
    NoRuntime {
        name: &'static str,
        #[source]
        source: TryCurrentError,
    },
}
