//! Presentation capabilities consumed by the status controller.
//!
//! The controller only decides *what* the panel should show and *whether* it
//! should be visible. Animating the transition is the sink's business.

use std::sync::{Arc, Mutex};

use serde::{Deserialize, Serialize};

pub trait MessageSink {
    fn set_message_text(&mut self, text: &str);
    fn set_visible(&mut self, visible: bool);
}

impl<S: MessageSink + ?Sized> MessageSink for Box<S> {
    fn set_message_text(&mut self, text: &str) {
        (**self).set_message_text(text);
    }

    fn set_visible(&mut self, visible: bool) {
        (**self).set_visible(visible);
    }
}

/// A single call made on a sink.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "call", rename_all = "snake_case")]
pub enum SinkCall {
    SetText { text: String },
    SetVisible { visible: bool },
}

/// Sink that remembers every call. Clones share the same log, so a test can
/// keep one clone after moving the other into a controller or service.
#[derive(Debug, Clone, Default)]
pub struct RecordingSink {
    calls: Arc<Mutex<Vec<SinkCall>>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> Vec<SinkCall> {
        self.lock().clone()
    }

    /// Every text that was set, in order.
    pub fn texts(&self) -> Vec<String> {
        self.lock()
            .iter()
            .filter_map(|call| match call {
                SinkCall::SetText { text } => Some(text.clone()),
                SinkCall::SetVisible { .. } => None,
            })
            .collect()
    }

    /// The visibility from the most recent `set_visible`, if any.
    pub fn last_visible(&self) -> Option<bool> {
        self.lock().iter().rev().find_map(|call| match call {
            SinkCall::SetVisible { visible } => Some(*visible),
            SinkCall::SetText { .. } => None,
        })
    }

    pub fn clear(&self) {
        self.lock().clear();
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<SinkCall>> {
        // A panic while holding the lock only happens in a failing test; the
        // log itself is still consistent.
        self.calls.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl MessageSink for RecordingSink {
    fn set_message_text(&mut self, text: &str) {
        self.lock().push(SinkCall::SetText {
            text: text.to_string(),
        });
    }

    fn set_visible(&mut self, visible: bool) {
        self.lock().push(SinkCall::SetVisible { visible });
    }
}
