//! Tracking-quality feedback policy.
//!
//! A change in tracking quality first produces a brief hint. If the degraded
//! condition is still the latest one after the escalation delay, the hint is
//! replaced by a persistent message with guidance. Returning to normal
//! tracking withdraws the pending escalation.

use std::time::Duration;

use crate::category::MessageCategory;
use crate::sink::MessageSink;
use crate::status::StatusController;
use crate::storage::Config;
use crate::timer::TimerFacility;
use crate::tracking::TrackingState;

/// Shown when the session is restarted.
pub const RESTART_MESSAGE: &str = "STARTING A NEW SESSION";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrackingFeedbackPolicy {
    /// How long a degraded state must persist before escalating.
    pub escalation_delay: Duration,
    /// Whether the immediate hint hides itself.
    pub hint_auto_hide: bool,
}

impl Default for TrackingFeedbackPolicy {
    fn default() -> Self {
        Self {
            escalation_delay: Duration::from_secs(3),
            hint_auto_hide: true,
        }
    }
}

impl TrackingFeedbackPolicy {
    pub fn from_config(config: &Config) -> Self {
        Self {
            escalation_delay: config.escalation_delay(),
            hint_auto_hide: config.tracking.hint_auto_hide,
        }
    }

    pub fn on_tracking_state_changed<S, T>(&self, status: &mut StatusController<S, T>, state: TrackingState)
    where
        S: MessageSink,
        T: TimerFacility,
    {
        status.show_tracking_quality_info(state, self.hint_auto_hide);

        if state.is_degraded() {
            status.escalate_feedback(state, self.escalation_delay);
        } else {
            status.cancel_scheduled_message(MessageCategory::TrackingStateEscalation);
        }
    }
}

/// Drop every pending message and announce the fresh session.
pub fn restart_session<S, T>(status: &mut StatusController<S, T>)
where
    S: MessageSink,
    T: TimerFacility,
{
    status.cancel_all_scheduled_messages();
    status.show_message(RESTART_MESSAGE, true);
}
