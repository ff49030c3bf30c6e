//! The status controller.
//!
//! Owns the display slot, the category scheduler and the timer facility they
//! share. Firings come back through [`StatusController::on_timer_fired`];
//! a handle that is neither the registered hide timer nor a pending category
//! timer has been superseded and is dropped without effect.
//!
//! ## Usage
//!
//! ```ignore
//! let mut status = StatusController::new(sink, VirtualTimers::new(), Duration::from_secs(6));
//! status.schedule_message("Plane found", Duration::from_secs(2), MessageCategory::PlaneEstimation);
//! status.advance_by(Duration::from_secs(2)); // "Plane found" is now visible
//! ```

use std::time::Duration;

use tracing::{debug, trace};

use super::display::{DisplayController, VisibleMessage};
use super::scheduler::{CategoryScheduler, ScheduledAction};
use crate::category::MessageCategory;
use crate::events::Event;
use crate::sink::MessageSink;
use crate::storage::Config;
use crate::timer::{TimerFacility, TimerHandle, VirtualTimers};
use crate::tracking::TrackingState;

#[derive(Debug)]
pub struct StatusController<S, T> {
    display: DisplayController<S>,
    scheduler: CategoryScheduler,
    timers: T,
    journal: Vec<Event>,
}

impl<S: MessageSink, T: TimerFacility> StatusController<S, T> {
    pub fn new(sink: S, timers: T, display_duration: Duration) -> Self {
        Self {
            display: DisplayController::new(sink, display_duration),
            scheduler: CategoryScheduler::new(),
            timers,
            journal: Vec::new(),
        }
    }

    pub fn from_config(sink: S, timers: T, config: &Config) -> Self {
        Self::new(sink, timers, config.display_duration())
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn message(&self) -> &VisibleMessage {
        self.display.message()
    }

    pub fn is_pending(&self, category: MessageCategory) -> bool {
        self.scheduler.is_pending(category)
    }

    pub fn pending_categories(&self) -> Vec<MessageCategory> {
        self.scheduler.pending_categories()
    }

    pub fn timers(&self) -> &T {
        &self.timers
    }

    /// Events recorded since the last drain.
    pub fn events(&self) -> &[Event] {
        &self.journal
    }

    pub fn drain_events(&mut self) -> Vec<Event> {
        std::mem::take(&mut self.journal)
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Show `text` immediately, replacing whatever is visible.
    pub fn show_message(&mut self, text: &str, auto_hide: bool) {
        self.display.show_message(&mut self.timers, text, auto_hide);
        debug!(text, auto_hide, "status message shown");
        let at_ms = self.now_ms();
        self.journal.push(Event::MessageShown {
            text: text.to_string(),
            auto_hide,
            at_ms,
        });
    }

    /// Show `text` (with auto-hide) after `delay`, replacing anything already
    /// pending for `category`.
    pub fn schedule_message(&mut self, text: impl Into<String>, delay: Duration, category: MessageCategory) {
        self.schedule(category, delay, ScheduledAction::Show(text.into()));
    }

    pub fn cancel_scheduled_message(&mut self, category: MessageCategory) {
        if self.scheduler.cancel(&mut self.timers, category) {
            debug!(%category, "scheduled message cancelled");
            let at_ms = self.now_ms();
            self.journal
                .push(Event::ScheduledMessageCancelled { category, at_ms });
        }
    }

    pub fn cancel_all_scheduled_messages(&mut self) {
        for category in MessageCategory::ALL {
            self.cancel_scheduled_message(category);
        }
    }

    /// Describe `state` right away, bypassing the scheduler.
    pub fn show_tracking_quality_info(&mut self, state: TrackingState, auto_hide: bool) {
        self.show_message(state.presentation_string(), auto_hide);
    }

    /// Show a persistent description of `state` after `delay`, unless another
    /// escalation or a cancellation comes first.
    pub fn escalate_feedback(&mut self, state: TrackingState, delay: Duration) {
        self.schedule(
            MessageCategory::TrackingStateEscalation,
            delay,
            ScheduledAction::Escalate(state),
        );
    }

    /// Hide the panel now, cancelling its hide timer.
    pub fn dismiss_message(&mut self) {
        if self.display.dismiss(&mut self.timers) {
            debug!("status message dismissed");
            let at_ms = self.now_ms();
            self.journal.push(Event::MessageHidden { at_ms });
        }
    }

    /// Route a fired timer to its owner.
    pub fn on_timer_fired(&mut self, handle: TimerHandle) {
        self.timers.fired(handle);
        let at_ms = self.now_ms();

        if self.display.hide_timer_fired(handle) {
            debug!("status message auto-hidden");
            self.journal.push(Event::MessageHidden { at_ms });
            return;
        }

        let Some((category, action)) = self.scheduler.take_fired(handle) else {
            trace!(%handle, "ignoring superseded timer");
            self.journal.push(Event::StaleTimerIgnored { handle, at_ms });
            return;
        };

        self.journal
            .push(Event::ScheduledMessageFired { category, at_ms });
        match action {
            ScheduledAction::Show(text) => self.show_message(&text, true),
            ScheduledAction::Escalate(state) => {
                debug!(?state, "tracking feedback escalated");
                self.journal.push(Event::FeedbackEscalated { state, at_ms });
                self.show_message(&state.escalation_message(), false);
            }
        }
    }

    // ── Internal ─────────────────────────────────────────────────────

    fn schedule(&mut self, category: MessageCategory, delay: Duration, action: ScheduledAction) {
        self.cancel_scheduled_message(category);
        self.scheduler
            .schedule(&mut self.timers, category, delay, action);
        let delay_ms = duration_ms(delay);
        debug!(%category, delay_ms, "message scheduled");
        let at_ms = self.now_ms();
        self.journal.push(Event::MessageScheduled {
            category,
            delay_ms,
            at_ms,
        });
    }

    fn now_ms(&self) -> u64 {
        duration_ms(self.timers.elapsed())
    }
}

impl<S: MessageSink> StatusController<S, VirtualTimers> {
    pub fn now(&self) -> Duration {
        self.timers.now()
    }

    /// Run every timer due within the next `duration`, in deadline order.
    pub fn advance_by(&mut self, duration: Duration) {
        let target = self.timers.now().saturating_add(duration);
        self.advance_to(target);
    }

    /// Run every timer due at or before `target`, then move the clock there.
    ///
    /// Timers created by a firing run in the same call when they fall due
    /// before `target`.
    pub fn advance_to(&mut self, target: Duration) {
        while let Some(handle) = self.timers.pop_due(target) {
            self.on_timer_fired(handle);
        }
        self.timers.set_now(target);
    }
}

fn duration_ms(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sink::RecordingSink;
    use crate::status::DEFAULT_DISPLAY_DURATION;
    use crate::tracking::LimitedReason;

    fn controller() -> (StatusController<RecordingSink, VirtualTimers>, RecordingSink) {
        let sink = RecordingSink::new();
        let status = StatusController::new(sink.clone(), VirtualTimers::new(), DEFAULT_DISPLAY_DURATION);
        (status, sink)
    }

    fn secs(s: f64) -> Duration {
        Duration::from_millis((s * 1000.0).round() as u64)
    }

    #[test]
    fn scheduled_message_shows_then_hides() {
        let (mut status, _sink) = controller();
        status.schedule_message("Plane found", secs(2.0), MessageCategory::PlaneEstimation);

        status.advance_to(secs(1.9));
        assert!(!status.message().visible);

        status.advance_to(secs(2.0));
        assert_eq!(status.message().text, "Plane found");
        assert!(status.message().visible);
        assert!(!status.is_pending(MessageCategory::PlaneEstimation));

        status.advance_to(secs(7.9));
        assert!(status.message().visible);
        status.advance_to(secs(8.0));
        assert!(!status.message().visible);
    }

    #[test]
    fn second_schedule_wins() {
        let (mut status, sink) = controller();
        status.schedule_message("t1", secs(1.0), MessageCategory::FocusSquare);
        status.schedule_message("t2", secs(1.0), MessageCategory::FocusSquare);

        status.advance_by(secs(30.0));
        assert_eq!(sink.texts(), vec!["t2".to_string()]);
    }

    #[test]
    fn cancelled_message_never_shows() {
        let (mut status, sink) = controller();
        status.schedule_message("never", secs(1.0), MessageCategory::ContentPlacement);
        status.cancel_scheduled_message(MessageCategory::ContentPlacement);
        status.cancel_scheduled_message(MessageCategory::ContentPlacement);

        status.advance_by(secs(30.0));
        assert!(sink.calls().is_empty());
    }

    #[test]
    fn cancel_all_clears_every_category() {
        let (mut status, sink) = controller();
        for (i, category) in MessageCategory::ALL.into_iter().enumerate() {
            status.schedule_message(format!("m{i}"), secs(1.0 + i as f64), category);
        }
        status.cancel_all_scheduled_messages();

        assert!(status.pending_categories().is_empty());
        status.advance_by(secs(60.0));
        assert!(sink.calls().is_empty());
    }

    #[test]
    fn persistent_message_is_not_hidden_by_stale_timer() {
        let (mut status, _sink) = controller();
        status.show_message("A", true);
        status.advance_by(secs(3.0));
        status.show_message("B", false);

        status.advance_by(secs(60.0));
        assert_eq!(status.message().text, "B");
        assert!(status.message().visible);
    }

    #[test]
    fn re_enabling_auto_hide_starts_a_fresh_timer() {
        let (mut status, _sink) = controller();
        status.show_message("A", false);
        status.advance_by(secs(10.0));
        status.show_message("B", true);

        status.advance_by(secs(5.9));
        assert!(status.message().visible);
        status.advance_by(secs(0.1));
        assert!(!status.message().visible);
    }

    #[test]
    fn escalation_uses_latest_state_and_persists() {
        let (mut status, sink) = controller();
        status.escalate_feedback(TrackingState::NotAvailable, secs(3.0));
        status.escalate_feedback(
            TrackingState::Limited(LimitedReason::ExcessiveMotion),
            secs(3.0),
        );

        status.advance_by(secs(60.0));
        assert_eq!(
            sink.texts(),
            vec![TrackingState::Limited(LimitedReason::ExcessiveMotion).escalation_message()]
        );
        assert!(status.message().visible);
        assert!(!status.is_pending(MessageCategory::TrackingStateEscalation));
    }

    #[test]
    fn tracking_info_cancels_running_hide_timer() {
        let (mut status, _sink) = controller();
        status.show_message("unrelated", true);
        status.show_tracking_quality_info(
            TrackingState::Limited(LimitedReason::ExcessiveMotion),
            false,
        );

        assert_eq!(status.timers().pending_count(), 0);
        status.advance_by(secs(60.0));
        assert!(status.message().visible);
        assert_eq!(
            status.message().text,
            "TRACKING LIMITED\nExcessive motion"
        );
    }

    #[test]
    fn stale_handle_is_ignored() {
        let (mut status, _sink) = controller();
        status.schedule_message("later", secs(5.0), MessageCategory::FocusSquare);
        status.show_message("A", false);
        status.drain_events();

        // A handle the controller never registered, as if delivered late.
        let mut other = VirtualTimers::new();
        other.after(Duration::ZERO);
        let foreign = other.after(Duration::ZERO);
        status.on_timer_fired(foreign);

        assert!(status.message().visible);
        assert!(status.is_pending(MessageCategory::FocusSquare));
        assert!(matches!(
            status.drain_events().as_slice(),
            [Event::StaleTimerIgnored { .. }]
        ));
    }

    #[test]
    fn queued_firing_after_reschedule_is_ignored() {
        let (mut status, sink) = controller();
        status.schedule_message("old", secs(1.0), MessageCategory::PlaneEstimation);

        // The facility has already queued the firing...
        let queued = status.timers.pop_due(secs(1.0)).unwrap();
        // ...but the category is rescheduled before it is delivered.
        status.schedule_message("new", secs(1.0), MessageCategory::PlaneEstimation);
        status.on_timer_fired(queued);
        assert!(sink.texts().is_empty());

        status.advance_by(secs(1.0));
        assert_eq!(sink.texts(), vec!["new".to_string()]);
    }

    #[test]
    fn dismiss_hides_immediately() {
        let (mut status, _sink) = controller();
        status.show_message("A", true);
        status.dismiss_message();
        assert!(!status.message().visible);
        assert_eq!(status.timers().pending_count(), 0);
    }

    #[test]
    fn zero_delay_timer_created_while_firing_runs_in_same_advance() {
        let (mut status, _sink) = controller();
        status.schedule_message("now", Duration::ZERO, MessageCategory::FocusSquare);
        status.advance_by(Duration::ZERO);
        assert_eq!(status.message().text, "now");
    }

    #[test]
    fn journal_records_transitions() {
        let (mut status, _sink) = controller();
        status.schedule_message("x", secs(1.0), MessageCategory::PlaneEstimation);
        status.schedule_message("y", secs(1.0), MessageCategory::PlaneEstimation);
        status.advance_by(secs(7.0));

        let events = status.drain_events();
        assert_eq!(
            events,
            vec![
                Event::MessageScheduled {
                    category: MessageCategory::PlaneEstimation,
                    delay_ms: 1000,
                    at_ms: 0,
                },
                Event::ScheduledMessageCancelled {
                    category: MessageCategory::PlaneEstimation,
                    at_ms: 0,
                },
                Event::MessageScheduled {
                    category: MessageCategory::PlaneEstimation,
                    delay_ms: 1000,
                    at_ms: 0,
                },
                Event::ScheduledMessageFired {
                    category: MessageCategory::PlaneEstimation,
                    at_ms: 1000,
                },
                Event::MessageShown {
                    text: "y".into(),
                    auto_hide: true,
                    at_ms: 1000,
                },
                Event::MessageHidden { at_ms: 7000 },
            ]
        );
        assert!(status.events().is_empty());
    }
}
