//! The visible message slot.
//!
//! Last write wins: every `show_message` replaces the text and cancels the
//! previous hide timer before (maybe) starting a new one. Only the registered
//! hide timer may hide the panel.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::sink::MessageSink;
use crate::timer::{TimerFacility, TimerHandle};

/// Auto-hide delay used when none is configured.
pub const DEFAULT_DISPLAY_DURATION: Duration = Duration::from_secs(6);

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VisibleMessage {
    pub text: String,
    pub visible: bool,
}

#[derive(Debug)]
pub struct DisplayController<S> {
    sink: S,
    message: VisibleMessage,
    hide_timer: Option<TimerHandle>,
    display_duration: Duration,
}

impl<S: MessageSink> DisplayController<S> {
    pub fn new(sink: S, display_duration: Duration) -> Self {
        Self {
            sink,
            message: VisibleMessage::default(),
            hide_timer: None,
            display_duration,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn message(&self) -> &VisibleMessage {
        &self.message
    }

    pub fn hide_timer(&self) -> Option<TimerHandle> {
        self.hide_timer
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Show `text` now. With `auto_hide`, the panel hides after the display
    /// duration unless another message replaces it first.
    pub fn show_message<T: TimerFacility>(&mut self, timers: &mut T, text: &str, auto_hide: bool) {
        self.cancel_hide_timer(timers);

        self.message.text = text.to_string();
        self.sink.set_message_text(text);

        self.message.visible = true;
        self.sink.set_visible(true);

        if auto_hide {
            self.hide_timer = Some(timers.after(self.display_duration));
        }
    }

    /// Hide the panel now. Returns whether it was visible.
    pub fn dismiss<T: TimerFacility>(&mut self, timers: &mut T) -> bool {
        self.cancel_hide_timer(timers);
        let was_visible = self.message.visible;
        self.hide();
        was_visible
    }

    /// Handle a fired timer. Returns `true` when `handle` was the registered
    /// hide timer (and the panel was hidden).
    pub fn hide_timer_fired(&mut self, handle: TimerHandle) -> bool {
        if self.hide_timer != Some(handle) {
            return false;
        }
        self.hide_timer = None;
        self.hide();
        true
    }

    // ── Internal ─────────────────────────────────────────────────────

    fn hide(&mut self) {
        self.message.visible = false;
        self.sink.set_visible(false);
    }

    fn cancel_hide_timer<T: TimerFacility>(&mut self, timers: &mut T) {
        if let Some(handle) = self.hide_timer.take() {
            timers.cancel(handle);
        }
    }
}
