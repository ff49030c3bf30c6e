//! Per-category delayed messages.

use std::collections::BTreeMap;
use std::time::Duration;

use crate::category::MessageCategory;
use crate::timer::{TimerFacility, TimerHandle};
use crate::tracking::TrackingState;

/// What happens when a pending message fires.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScheduledAction {
    /// Show the text with auto-hide.
    Show(String),
    /// Show the escalated description of a tracking state, persistently.
    Escalate(TrackingState),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingMessage {
    pub handle: TimerHandle,
    pub action: ScheduledAction,
}

/// At most one pending timer per category. Replacing or removing an entry
/// always cancels the timer it held.
#[derive(Debug, Default)]
pub struct CategoryScheduler {
    pending: BTreeMap<MessageCategory, PendingMessage>,
}

impl CategoryScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `action` to run after `delay`, superseding whatever was
    /// pending for `category`. Returns whether something was superseded.
    pub fn schedule<T: TimerFacility>(
        &mut self,
        timers: &mut T,
        category: MessageCategory,
        delay: Duration,
        action: ScheduledAction,
    ) -> bool {
        let superseded = self.cancel(timers, category);
        let handle = timers.after(delay);
        self.pending.insert(category, PendingMessage { handle, action });
        superseded
    }

    /// Cancel the pending message for `category`. Returns whether one was
    /// pending.
    pub fn cancel<T: TimerFacility>(&mut self, timers: &mut T, category: MessageCategory) -> bool {
        match self.pending.remove(&category) {
            Some(pending) => {
                timers.cancel(pending.handle);
                true
            }
            None => false,
        }
    }

    /// Claim the entry owning `handle`, removing it from the map. `None` when
    /// no category holds that handle any more.
    pub fn take_fired(&mut self, handle: TimerHandle) -> Option<(MessageCategory, ScheduledAction)> {
        let category = self
            .pending
            .iter()
            .find(|(_, pending)| pending.handle == handle)
            .map(|(category, _)| *category)?;
        let pending = self.pending.remove(&category)?;
        Some((category, pending.action))
    }

    pub fn get(&self, category: MessageCategory) -> Option<&PendingMessage> {
        self.pending.get(&category)
    }

    pub fn is_pending(&self, category: MessageCategory) -> bool {
        self.pending.contains_key(&category)
    }

    /// Categories with a pending message, in declaration order.
    pub fn pending_categories(&self) -> Vec<MessageCategory> {
        self.pending.keys().copied().collect()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}
