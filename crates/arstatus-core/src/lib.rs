//! # arstatus Core Library
//!
//! Scheduling engine for a single-slot status message panel, as used for
//! transient AR session feedback ("TRACKING LIMITED", "Plane found", ...).
//!
//! ## Architecture
//!
//! - **Status controller**: one visible message with an auto-hide timer, plus
//!   one independently cancellable delayed message per category
//! - **Timers**: a facility trait with a manual virtual clock (deterministic
//!   runs and tests) and a tokio implementation (real time)
//! - **Tracking feedback**: a quick hint that escalates to persistent guidance
//!   when degraded tracking persists
//! - **Runtime**: a tokio service task that owns the controller
//!
//! ## Key Components
//!
//! - [`StatusController`]: the scheduling state machine
//! - [`TimerFacility`]: delayed-callback primitive
//! - [`MessageSink`]: presentation capabilities the controller drives
//! - [`StatusHandle`]: handle to the running service
//! - [`Config`]: configuration management

pub mod category;
pub mod error;
pub mod events;
pub mod feedback;
pub mod runtime;
pub mod simulation;
pub mod sink;
pub mod status;
pub mod storage;
pub mod timer;
pub mod tracking;

pub use category::MessageCategory;
pub use error::{ConfigError, CoreError, ScenarioError};
pub use events::Event;
pub use feedback::{restart_session, TrackingFeedbackPolicy, RESTART_MESSAGE};
pub use runtime::{spawn_service, StatusHandle, StatusSnapshot};
pub use simulation::{run_scenario, Scenario, ScenarioAction, ScenarioStep, Transcript};
pub use sink::{MessageSink, RecordingSink, SinkCall};
pub use status::{StatusController, VisibleMessage, DEFAULT_DISPLAY_DURATION};
pub use storage::Config;
pub use timer::{TimerFacility, TimerHandle, TokioTimers, VirtualTimers};
pub use tracking::{LimitedReason, TrackingState};
