//! Real-time timers on the tokio runtime.
//!
//! Each timer is a spawned task that sleeps and then posts its handle on a
//! channel. Cancelling aborts the task; a handle that was posted before the
//! abort still arrives, so the receiving side must check liveness.

use std::collections::HashMap;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::Instant;

use super::{TimerFacility, TimerHandle};

/// Must be created and used from within a tokio runtime.
#[derive(Debug)]
pub struct TokioTimers {
    started: Instant,
    next_id: u64,
    fired_tx: mpsc::UnboundedSender<TimerHandle>,
    tasks: HashMap<TimerHandle, JoinHandle<()>>,
}

impl TokioTimers {
    /// Returns the facility and the receiver its firings arrive on.
    pub fn new() -> (Self, mpsc::UnboundedReceiver<TimerHandle>) {
        let (fired_tx, fired_rx) = mpsc::unbounded_channel();
        let timers = Self {
            started: Instant::now(),
            next_id: 0,
            fired_tx,
            tasks: HashMap::new(),
        };
        (timers, fired_rx)
    }

    pub fn pending_count(&self) -> usize {
        self.tasks.len()
    }
}

impl TimerFacility for TokioTimers {
    fn after(&mut self, delay: Duration) -> TimerHandle {
        self.next_id += 1;
        let handle = TimerHandle(self.next_id);
        let tx = self.fired_tx.clone();
        let task = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            // Receiver gone means the owner was torn down.
            let _ = tx.send(handle);
        });
        self.tasks.insert(handle, task);
        handle
    }

    fn cancel(&mut self, handle: TimerHandle) {
        if let Some(task) = self.tasks.remove(&handle) {
            task.abort();
        }
    }

    fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }

    fn fired(&mut self, handle: TimerHandle) {
        self.tasks.remove(&handle);
    }
}

impl Drop for TokioTimers {
    fn drop(&mut self) {
        for (_, task) in self.tasks.drain() {
            task.abort();
        }
    }
}
