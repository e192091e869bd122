//! Completion queue: hands resolve outcomes back to the thread that owns the UI.
//!
//! Callbacks are registered on the owning thread and stay there; workers only
//! send `(RequestId, ImageOutcome)` pairs through a channel. A callback runs
//! when, and only when, the owning thread pumps the queue.

use std::collections::HashMap;
use std::fmt;
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::time::{Duration, Instant};

use super::ImageOutcome;

/// Identifies one asynchronous resolve request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RequestId(u64);

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

type Callback = Box<dyn FnOnce(ImageOutcome)>;

/// Worker-side handle for posting outcomes. Cheap to clone; `Send`.
#[derive(Clone)]
pub struct CompletionSender {
    tx: Sender<(RequestId, ImageOutcome)>,
}

impl CompletionSender {
    /// Posts an outcome. Silently dropped if the queue no longer exists.
    pub fn post(&self, id: RequestId, outcome: ImageOutcome) {
        if self.tx.send((id, outcome)).is_err() {
            tracing::debug!(request = %id, "completion queue gone, outcome dropped");
        }
    }
}

/// UI-thread inbox of resolve completions. Not `Send`: it holds the callbacks.
pub struct CompletionQueue {
    tx: Sender<(RequestId, ImageOutcome)>,
    rx: Receiver<(RequestId, ImageOutcome)>,
    callbacks: HashMap<RequestId, Callback>,
    next_id: u64,
}

impl Default for CompletionQueue {
    fn default() -> Self {
        Self::new()
    }
}

impl CompletionQueue {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel();
        Self {
            tx,
            rx,
            callbacks: HashMap::new(),
            next_id: 1,
        }
    }

    /// Registers a callback and returns the id workers must post under.
    pub fn register<F>(&mut self, callback: F) -> RequestId
    where
        F: FnOnce(ImageOutcome) + 'static,
    {
        let id = RequestId(self.next_id);
        self.next_id += 1;
        self.callbacks.insert(id, Box::new(callback));
        id
    }

    pub fn sender(&self) -> CompletionSender {
        CompletionSender {
            tx: self.tx.clone(),
        }
    }

    /// Requests registered whose callback has not run yet.
    pub fn pending(&self) -> usize {
        self.callbacks.len()
    }

    /// Runs every completion that has already arrived. Never blocks.
    /// Returns the number of callbacks run.
    pub fn pump(&mut self) -> usize {
        let mut ran = 0;
        while let Ok((id, outcome)) = self.rx.try_recv() {
            ran += self.dispatch(id, outcome);
        }
        ran
    }

    /// Waits up to `timeout` for at least one completion, then pumps.
    /// Returns immediately with 0 if nothing is pending.
    pub fn pump_timeout(&mut self, timeout: Duration) -> usize {
        if self.pending() == 0 {
            return 0;
        }
        match self.rx.recv_timeout(timeout) {
            Ok((id, outcome)) => self.dispatch(id, outcome) + self.pump(),
            Err(RecvTimeoutError::Timeout) | Err(RecvTimeoutError::Disconnected) => 0,
        }
    }

    /// Pumps until nothing is pending or `timeout` elapses. Returns callbacks run.
    pub fn drain(&mut self, timeout: Duration) -> usize {
        let deadline = Instant::now() + timeout;
        let mut ran = self.pump();
        while self.pending() > 0 {
            let now = Instant::now();
            if now >= deadline {
                break;
            }
            ran += self.pump_timeout(deadline - now);
        }
        ran
    }

    fn dispatch(&mut self, id: RequestId, outcome: ImageOutcome) -> usize {
        match self.callbacks.remove(&id) {
            Some(cb) => {
                cb(outcome);
                1
            }
            None => {
                tracing::debug!(request = %id, "completion for unknown request");
                0
            }
        }
    }
}
