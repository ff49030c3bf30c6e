//! Delayed-callback primitives.
//!
//! A [`TimerFacility`] hands out [`TimerHandle`]s and later reports them back
//! to its owner when they fire. It never runs user code itself: the owner maps
//! a fired handle to whatever action it registered, and drops handles it no
//! longer recognises. That keeps cancellation synchronous even when the
//! facility has already queued a firing.

mod tokio_timers;
mod virtual_clock;

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

pub use tokio_timers::TokioTimers;
pub use virtual_clock::VirtualTimers;

/// Opaque identifier for one pending delayed action. Never reused by the
/// facility that issued it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TimerHandle(u64);

impl fmt::Display for TimerHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

pub trait TimerFacility {
    /// Start a one-shot timer that fires once `delay` has elapsed.
    fn after(&mut self, delay: Duration) -> TimerHandle;

    /// Stop a pending timer. Unknown or already-fired handles are ignored.
    fn cancel(&mut self, handle: TimerHandle);

    /// Time since the facility was created.
    fn elapsed(&self) -> Duration;

    /// Called by the owner once a fired handle has been consumed.
    fn fired(&mut self, _handle: TimerHandle) {}
}
