use serde::{Deserialize, Serialize};

use crate::category::MessageCategory;
use crate::timer::TimerHandle;
use crate::tracking::TrackingState;

/// Every state change of the status controller produces an Event.
///
/// `at_ms` is the timer facility's elapsed time when the change happened.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    MessageShown {
        text: String,
        auto_hide: bool,
        at_ms: u64,
    },
    /// The panel was hidden, either by its auto-hide timer or a dismissal.
    MessageHidden {
        at_ms: u64,
    },
    MessageScheduled {
        category: MessageCategory,
        delay_ms: u64,
        at_ms: u64,
    },
    /// A pending message was cancelled or superseded before it fired.
    ScheduledMessageCancelled {
        category: MessageCategory,
        at_ms: u64,
    },
    ScheduledMessageFired {
        category: MessageCategory,
        at_ms: u64,
    },
    /// Tracking feedback escalated to a persistent message.
    FeedbackEscalated {
        state: TrackingState,
        at_ms: u64,
    },
    /// A timer fired after it was superseded; nothing happened.
    StaleTimerIgnored {
        handle: TimerHandle,
        at_ms: u64,
    },
}

impl Event {
    pub fn at_ms(&self) -> u64 {
        match self {
            Event::MessageShown { at_ms, .. }
            | Event::MessageHidden { at_ms }
            | Event::MessageScheduled { at_ms, .. }
            | Event::ScheduledMessageCancelled { at_ms, .. }
            | Event::ScheduledMessageFired { at_ms, .. }
            | Event::FeedbackEscalated { at_ms, .. }
            | Event::StaleTimerIgnored { at_ms, .. } => *at_ms,
        }
    }
}
