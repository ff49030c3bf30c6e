//! Single-slot status message scheduling.
//!
//! ## Components
//!
//! - [`DisplayController`]: the one visible message and its auto-hide timer
//! - [`CategoryScheduler`]: one pending delayed message per [`MessageCategory`]
//! - [`StatusController`]: both of the above sharing one timer facility
//!
//! ## Visible slot
//!
//! ```text
//! Hidden -> Shown (show)
//! Shown  -> Shown (show: text replaced, hide timer reset)
//! Shown  -> Hidden (registered hide timer fires, or dismiss)
//! ```
//!
//! ## Per category
//!
//! ```text
//! Idle -> Pending (schedule) -> Idle (fires, or cancel)
//! ```
//!
//! [`MessageCategory`]: crate::category::MessageCategory

mod controller;
mod display;
mod scheduler;

pub use controller::StatusController;
pub use display::{DisplayController, VisibleMessage, DEFAULT_DISPLAY_DURATION};
pub use scheduler::{CategoryScheduler, PendingMessage, ScheduledAction};
