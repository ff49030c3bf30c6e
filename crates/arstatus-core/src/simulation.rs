//! Deterministic scenario replay.
//!
//! A scenario is a list of timed calls against the status controller. Runs use
//! [`VirtualTimers`], so the same scenario always yields the same transcript.
//!
//! ```toml
//! name = "plane found"
//! until_ms = 9000
//!
//! [[steps]]
//! at_ms = 0
//! action = "schedule"
//! text = "Plane found"
//! delay_ms = 2000
//! category = "plane_estimation"
//! ```

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::category::MessageCategory;
use crate::error::{Result, ScenarioError};
use crate::events::Event;
use crate::feedback::{self, TrackingFeedbackPolicy};
use crate::sink::{RecordingSink, SinkCall};
use crate::status::{StatusController, VisibleMessage};
use crate::storage::Config;
use crate::timer::VirtualTimers;
use crate::tracking::TrackingState;

fn default_true() -> bool {
    true
}

/// One call against the controller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum ScenarioAction {
    Show {
        text: String,
        #[serde(default = "default_true")]
        auto_hide: bool,
    },
    Schedule {
        text: String,
        delay_ms: u64,
        category: MessageCategory,
    },
    Cancel {
        category: MessageCategory,
    },
    CancelAll,
    TrackingInfo {
        state: TrackingState,
        #[serde(default = "default_true")]
        auto_hide: bool,
    },
    Escalate {
        state: TrackingState,
        delay_ms: u64,
    },
    /// Run the tracking feedback policy.
    TrackingChanged {
        state: TrackingState,
    },
    Restart,
    Dismiss,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioStep {
    pub at_ms: u64,
    #[serde(flatten)]
    pub action: ScenarioAction,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    #[serde(default)]
    pub name: String,
    /// Clock time the run ends at. Defaults to the last step.
    #[serde(default)]
    pub until_ms: Option<u64>,
    #[serde(default)]
    pub steps: Vec<ScenarioStep>,
}

/// Outcome of a run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transcript {
    pub name: String,
    pub until_ms: u64,
    pub events: Vec<Event>,
    pub sink_calls: Vec<SinkCall>,
    pub final_message: VisibleMessage,
    pub pending: Vec<MessageCategory>,
}

impl Scenario {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            until_ms: None,
            steps: Vec::new(),
        }
    }

    /// Add a step (builder style).
    pub fn step(mut self, at_ms: u64, action: ScenarioAction) -> Self {
        self.steps.push(ScenarioStep { at_ms, action });
        self
    }

    pub fn until(mut self, until_ms: u64) -> Self {
        self.until_ms = Some(until_ms);
        self
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    fn last_step_ms(&self) -> u64 {
        self.steps.iter().map(|s| s.at_ms).max().unwrap_or(0)
    }

    /// The time the run ends at.
    ///
    /// # Errors
    ///
    /// Returns an error if `until_ms` is earlier than the last step.
    pub fn end_ms(&self) -> Result<u64> {
        let last_step_ms = self.last_step_ms();
        match self.until_ms {
            Some(until_ms) if until_ms < last_step_ms => Err(ScenarioError::EndsBeforeLastStep {
                until_ms,
                last_step_ms,
            }
            .into()),
            Some(until_ms) => Ok(until_ms),
            None => Ok(last_step_ms),
        }
    }
}

/// Apply one action. Both [`run_scenario`] and the tokio service dispatch
/// through here.
pub(crate) fn apply_action<S, T>(
    status: &mut StatusController<S, T>,
    policy: &TrackingFeedbackPolicy,
    action: &ScenarioAction,
) where
    S: crate::sink::MessageSink,
    T: crate::timer::TimerFacility,
{
    match action {
        ScenarioAction::Show { text, auto_hide } => status.show_message(text, *auto_hide),
        ScenarioAction::Schedule {
            text,
            delay_ms,
            category,
        } => status.schedule_message(text.clone(), Duration::from_millis(*delay_ms), *category),
        ScenarioAction::Cancel { category } => status.cancel_scheduled_message(*category),
        ScenarioAction::CancelAll => status.cancel_all_scheduled_messages(),
        ScenarioAction::TrackingInfo { state, auto_hide } => {
            status.show_tracking_quality_info(*state, *auto_hide)
        }
        ScenarioAction::Escalate { state, delay_ms } => {
            status.escalate_feedback(*state, Duration::from_millis(*delay_ms))
        }
        ScenarioAction::TrackingChanged { state } => policy.on_tracking_state_changed(status, *state),
        ScenarioAction::Restart => feedback::restart_session(status),
        ScenarioAction::Dismiss => status.dismiss_message(),
    }
}

/// Replay `scenario` on a virtual clock.
///
/// Steps run in `at_ms` order (steps sharing a time keep their file order).
/// Timers due at a step's time fire before the step runs.
pub fn run_scenario(scenario: &Scenario, config: &Config) -> Result<Transcript> {
    let until_ms = scenario.end_ms()?;

    let mut steps: Vec<&ScenarioStep> = scenario.steps.iter().collect();
    steps.sort_by_key(|step| step.at_ms);

    let sink = RecordingSink::new();
    let mut status = StatusController::from_config(sink.clone(), VirtualTimers::new(), config);
    let policy = TrackingFeedbackPolicy::from_config(config);

    for step in steps {
        status.advance_to(Duration::from_millis(step.at_ms));
        apply_action(&mut status, &policy, &step.action);
    }
    status.advance_to(Duration::from_millis(until_ms));

    Ok(Transcript {
        name: scenario.name.clone(),
        until_ms,
        events: status.drain_events(),
        sink_calls: sink.calls(),
        final_message: status.message().clone(),
        pending: status.pending_categories(),
    })
}
