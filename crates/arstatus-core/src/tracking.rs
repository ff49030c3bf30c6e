//! Camera tracking quality and how it is described to the user.

use serde::{Deserialize, Serialize};

/// Why tracking is limited.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LimitedReason {
    ExcessiveMotion,
    InsufficientFeatures,
    Initializing,
    Relocalizing,
}

/// Tracking quality reported by the upstream tracking source.
///
/// In TOML: `state = "normal"` or `state = { limited = "excessive_motion" }`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrackingState {
    NotAvailable,
    Normal,
    Limited(LimitedReason),
}

impl TrackingState {
    /// Short headline for the status panel.
    pub fn presentation_string(&self) -> &'static str {
        match self {
            TrackingState::NotAvailable => "TRACKING UNAVAILABLE",
            TrackingState::Normal => "TRACKING NORMAL",
            TrackingState::Limited(LimitedReason::ExcessiveMotion) => {
                "TRACKING LIMITED\nExcessive motion"
            }
            TrackingState::Limited(LimitedReason::InsufficientFeatures) => {
                "TRACKING LIMITED\nLow detail"
            }
            TrackingState::Limited(LimitedReason::Initializing) => "Initializing",
            TrackingState::Limited(LimitedReason::Relocalizing) => "Recovering from interruption",
        }
    }

    /// Guidance for the user, when there is something they can do.
    pub fn recommendation(&self) -> Option<&'static str> {
        match self {
            TrackingState::Limited(LimitedReason::ExcessiveMotion) => {
                Some("Try slowing down your movement, or reset the session.")
            }
            TrackingState::Limited(LimitedReason::InsufficientFeatures) => {
                Some("Try pointing at a flat surface, or reset the session.")
            }
            TrackingState::Limited(LimitedReason::Relocalizing) => {
                Some("Return to the location where you left off or try resetting the session.")
            }
            _ => None,
        }
    }

    /// Whether the state warrants escalating to a persistent message.
    pub fn is_degraded(&self) -> bool {
        !matches!(self, TrackingState::Normal)
    }

    /// Headline plus recommendation, used for escalated feedback.
    pub fn escalation_message(&self) -> String {
        let mut message = self.presentation_string().to_string();
        if let Some(recommendation) = self.recommendation() {
            message.push_str(": ");
            message.push_str(recommendation);
        }
        message
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escalation_message_appends_recommendation() {
        let state = TrackingState::Limited(LimitedReason::ExcessiveMotion);
        assert_eq!(
            state.escalation_message(),
            "TRACKING LIMITED\nExcessive motion: Try slowing down your movement, or reset the session."
        );
    }

    #[test]
    fn escalation_message_without_recommendation() {
        assert_eq!(
            TrackingState::NotAvailable.escalation_message(),
            "TRACKING UNAVAILABLE"
        );
        assert_eq!(
            TrackingState::Limited(LimitedReason::Initializing).escalation_message(),
            "Initializing"
        );
    }

    #[test]
    fn only_normal_is_not_degraded() {
        assert!(!TrackingState::Normal.is_degraded());
        assert!(TrackingState::NotAvailable.is_degraded());
        assert!(TrackingState::Limited(LimitedReason::Relocalizing).is_degraded());
    }

    #[test]
    fn toml_forms() {
        #[derive(Deserialize)]
        struct Wrapper {
            state: TrackingState,
        }

        let plain: Wrapper = toml::from_str("state = \"not_available\"").unwrap();
        assert_eq!(plain.state, TrackingState::NotAvailable);

        let limited: Wrapper = toml::from_str("state = { limited = \"insufficient_features\" }").unwrap();
        assert_eq!(
            limited.state,
            TrackingState::Limited(LimitedReason::InsufficientFeatures)
        );
    }
}
