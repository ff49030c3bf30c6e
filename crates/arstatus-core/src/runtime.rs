//! Real-time status service on tokio.
//!
//! One task owns a [`StatusController`] driven by [`TokioTimers`] and handles
//! commands and timer firings through a single `select!` loop, so every
//! state change happens on one logical thread.
//!
//! The task ends when every [`StatusHandle`] is dropped or
//! [`StatusHandle::shutdown`] is called. The controller and its pending timer
//! tasks are dropped with it; a firing still in flight finds its channel
//! closed and does nothing.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tokio::sync::{broadcast, mpsc, oneshot};
use tokio::task::JoinHandle;
use tracing::debug;

use crate::category::MessageCategory;
use crate::events::Event;
use crate::feedback::TrackingFeedbackPolicy;
use crate::simulation::{apply_action, ScenarioAction};
use crate::sink::MessageSink;
use crate::status::StatusController;
use crate::storage::Config;
use crate::timer::TokioTimers;
use crate::tracking::TrackingState;

const EVENT_CAPACITY: usize = 256;

/// Point-in-time view of the service state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusSnapshot {
    pub text: String,
    pub visible: bool,
    pub pending: Vec<MessageCategory>,
}

#[derive(Debug)]
enum Command {
    Apply(ScenarioAction),
    Snapshot(oneshot::Sender<StatusSnapshot>),
    Shutdown,
}

/// Cloneable handle to a running status service.
///
/// Every method returns immediately. Commands sent after the service has
/// stopped are dropped. Delays are carried in whole milliseconds.
#[derive(Debug, Clone)]
pub struct StatusHandle {
    commands: mpsc::UnboundedSender<Command>,
    events: broadcast::Sender<Event>,
}

impl StatusHandle {
    /// Run one scenario action on the service.
    pub fn apply(&self, action: ScenarioAction) {
        self.send(Command::Apply(action));
    }

    pub fn show_message(&self, text: impl Into<String>, auto_hide: bool) {
        self.apply(ScenarioAction::Show {
            text: text.into(),
            auto_hide,
        });
    }

    pub fn schedule_message(&self, text: impl Into<String>, delay: Duration, category: MessageCategory) {
        self.apply(ScenarioAction::Schedule {
            text: text.into(),
            delay_ms: duration_ms(delay),
            category,
        });
    }

    pub fn cancel_scheduled_message(&self, category: MessageCategory) {
        self.apply(ScenarioAction::Cancel { category });
    }

    pub fn cancel_all_scheduled_messages(&self) {
        self.apply(ScenarioAction::CancelAll);
    }

    pub fn show_tracking_quality_info(&self, state: TrackingState, auto_hide: bool) {
        self.apply(ScenarioAction::TrackingInfo { state, auto_hide });
    }

    pub fn escalate_feedback(&self, state: TrackingState, delay: Duration) {
        self.apply(ScenarioAction::Escalate {
            state,
            delay_ms: duration_ms(delay),
        });
    }

    /// Apply the tracking feedback policy to a new tracking state.
    pub fn tracking_state_changed(&self, state: TrackingState) {
        self.apply(ScenarioAction::TrackingChanged { state });
    }

    pub fn restart_session(&self) {
        self.apply(ScenarioAction::Restart);
    }

    pub fn dismiss_message(&self) {
        self.apply(ScenarioAction::Dismiss);
    }

    /// Current state, or `None` once the service has stopped.
    pub async fn snapshot(&self) -> Option<StatusSnapshot> {
        let (tx, rx) = oneshot::channel();
        self.send(Command::Snapshot(tx));
        rx.await.ok()
    }

    /// Events emitted from now on.
    pub fn subscribe(&self) -> broadcast::Receiver<Event> {
        self.events.subscribe()
    }

    /// Stop the service, cancelling everything pending.
    pub fn shutdown(&self) {
        self.send(Command::Shutdown);
    }

    pub fn is_closed(&self) -> bool {
        self.commands.is_closed()
    }

    fn send(&self, command: Command) {
        // A closed channel means the service is gone; nothing to act on.
        let _ = self.commands.send(command);
    }
}

fn duration_ms(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}

/// Start the service on the current tokio runtime.
pub fn spawn_service<S>(sink: S, config: &Config) -> (StatusHandle, JoinHandle<()>)
where
    S: MessageSink + Send + 'static,
{
    let (commands_tx, commands_rx) = mpsc::unbounded_channel();
    let (events_tx, _) = broadcast::channel(EVENT_CAPACITY);
    let handle = StatusHandle {
        commands: commands_tx,
        events: events_tx.clone(),
    };

    let config = config.clone();
    let task = tokio::spawn(async move {
        run(sink, config, commands_rx, events_tx).await;
    });
    (handle, task)
}

async fn run<S: MessageSink>(
    sink: S,
    config: Config,
    mut commands: mpsc::UnboundedReceiver<Command>,
    events: broadcast::Sender<Event>,
) {
    let (timers, mut fired) = TokioTimers::new();
    let mut status = StatusController::from_config(sink, timers, &config);
    let policy = TrackingFeedbackPolicy::from_config(&config);

    loop {
        tokio::select! {
            command = commands.recv() => match command {
                Some(Command::Apply(action)) => apply_action(&mut status, &policy, &action),
                Some(Command::Snapshot(reply)) => {
                    let message = status.message();
                    let _ = reply.send(StatusSnapshot {
                        text: message.text.clone(),
                        visible: message.visible,
                        pending: status.pending_categories(),
                    });
                }
                Some(Command::Shutdown) | None => break,
            },
            Some(handle) = fired.recv() => status.on_timer_fired(handle),
        }

        for event in status.drain_events() {
            // No subscribers is fine.
            let _ = events.send(event);
        }
    }

    debug!("status service stopped");
}
