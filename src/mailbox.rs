//! Serialized, reentrancy-safe delivery to a mutable callback.
//!
//! A `Mailbox` owns a callback target and a queue. The first caller to
//! deliver becomes the drainer and applies queued messages in arrival order.
//! Messages delivered while a drain is in progress, including ones sent from
//! inside the callback itself, are queued and picked up by that drainer, so
//! no lock is ever re-entered on the same thread.
use std::{collections::VecDeque, sync::Mutex};

use crate::lock;

pub(crate) struct Mailbox<S, M> {
    target: Mutex<S>,
    state: Mutex<Pending<M>>,
}

struct Pending<M> {
    draining: bool,
    queue: VecDeque<M>,
}

// Releases the drainer role if a callback unwinds, so the mailbox keeps
// accepting deliveries afterwards.
struct DrainGuard<'a, M>(&'a Mutex<Pending<M>>);

impl<M> Drop for DrainGuard<'_, M> {
    fn drop(&mut self) {
        if std::thread::panicking() {
            let mut state = lock(self.0);
            state.draining = false;
            state.queue.clear();
        }
    }
}

impl<S, M> Mailbox<S, M> {
    pub(crate) fn new(target: S) -> Self {
        Mailbox {
            target: Mutex::new(target),
            state: Mutex::new(Pending {
                draining: false,
                queue: VecDeque::new(),
            }),
        }
    }

    /// Queues `message` and, unless another call is already draining,
    /// applies every queued message to the target with `apply`.
    pub(crate) fn deliver(&self, message: M, apply: impl Fn(&mut S, M)) {
        {
            let mut state = lock(&self.state);
            state.queue.push_back(message);
            if state.draining {
                return;
            }
            state.draining = true;
        }

        let _guard = DrainGuard(&self.state);
        loop {
            let message = {
                let mut state = lock(&self.state);
                match state.queue.pop_front() {
                    Some(m) => m,
                    None => {
                        state.draining = false;
                        return;
                    }
                }
            };
            // Only the drainer locks the target, so this never contends with
            // a nested delivery.
            let mut target = lock(&self.target);
            apply(&mut target, message);
        }
    }
}
