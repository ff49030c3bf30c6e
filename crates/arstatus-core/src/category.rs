//! Message categories.
//!
//! A category names the reason a message was (or will be) shown. Each category
//! owns at most one pending delayed message in the scheduler.

use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageCategory {
    TrackingStateEscalation,
    PlaneEstimation,
    ContentPlacement,
    FocusSquare,
}

impl MessageCategory {
    /// Every category, in declaration order.
    pub const ALL: [MessageCategory; 4] = [
        MessageCategory::TrackingStateEscalation,
        MessageCategory::PlaneEstimation,
        MessageCategory::ContentPlacement,
        MessageCategory::FocusSquare,
    ];

    /// Position in [`MessageCategory::ALL`].
    ///
    /// The match is exhaustive, so a new variant fails to compile here until
    /// it is given a slot in `ALL`.
    pub const fn index(self) -> usize {
        match self {
            MessageCategory::TrackingStateEscalation => 0,
            MessageCategory::PlaneEstimation => 1,
            MessageCategory::ContentPlacement => 2,
            MessageCategory::FocusSquare => 3,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            MessageCategory::TrackingStateEscalation => "tracking_state_escalation",
            MessageCategory::PlaneEstimation => "plane_estimation",
            MessageCategory::ContentPlacement => "content_placement",
            MessageCategory::FocusSquare => "focus_square",
        }
    }
}

impl fmt::Display for MessageCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_is_in_declaration_order() {
        for (i, category) in MessageCategory::ALL.iter().enumerate() {
            assert_eq!(category.index(), i);
        }
    }

    #[test]
    fn serde_uses_snake_case() {
        let json = serde_json::to_string(&MessageCategory::PlaneEstimation).unwrap();
        assert_eq!(json, "\"plane_estimation\"");

        let parsed: MessageCategory = serde_json::from_str("\"focus_square\"").unwrap();
        assert_eq!(parsed, MessageCategory::FocusSquare);
    }

    #[test]
    fn display_matches_serde_name() {
        for category in MessageCategory::ALL {
            let json = serde_json::to_string(&category).unwrap();
            assert_eq!(json.trim_matches('"'), category.to_string());
        }
    }
}
