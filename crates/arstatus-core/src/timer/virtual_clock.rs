//! Manually advanced clock.
//!
//! Nothing happens until the owner asks for due timers with
//! [`VirtualTimers::pop_due`], so runs are fully reproducible.

use std::collections::{BTreeSet, HashMap};
use std::time::Duration;

use super::{TimerFacility, TimerHandle};

#[derive(Debug, Default)]
pub struct VirtualTimers {
    now: Duration,
    next_id: u64,
    /// Ordered by deadline, then creation order.
    queue: BTreeSet<(Duration, TimerHandle)>,
    deadlines: HashMap<TimerHandle, Duration>,
}

impl VirtualTimers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn now(&self) -> Duration {
        self.now
    }

    /// Remove and return the earliest timer due at or before `until`,
    /// moving the clock to its deadline.
    pub fn pop_due(&mut self, until: Duration) -> Option<TimerHandle> {
        let &(deadline, handle) = self.queue.first()?;
        if deadline > until {
            return None;
        }
        self.queue.remove(&(deadline, handle));
        self.deadlines.remove(&handle);
        self.now = self.now.max(deadline);
        Some(handle)
    }

    /// Move the clock forward. The clock never runs backwards.
    pub fn set_now(&mut self, now: Duration) {
        self.now = self.now.max(now);
    }

    pub fn pending_count(&self) -> usize {
        self.queue.len()
    }

    pub fn next_deadline(&self) -> Option<Duration> {
        self.queue.first().map(|(deadline, _)| *deadline)
    }
}

impl TimerFacility for VirtualTimers {
    fn after(&mut self, delay: Duration) -> TimerHandle {
        self.next_id += 1;
        let handle = TimerHandle(self.next_id);
        let deadline = self.now.saturating_add(delay);
        self.queue.insert((deadline, handle));
        self.deadlines.insert(handle, deadline);
        handle
    }

    fn cancel(&mut self, handle: TimerHandle) {
        if let Some(deadline) = self.deadlines.remove(&handle) {
            self.queue.remove(&(deadline, handle));
        }
    }

    fn elapsed(&self) -> Duration {
        self.now
    }
}
