//! Integration tests for loading and replaying scenario files.

use std::io::Write;

use arstatus_core::{run_scenario, Config, Event, Scenario, TrackingState};

const ESCALATION: &str = r#"
name = "escalation"
until_ms = 20000

[[steps]]
at_ms = 0
action = "show"
text = "Move your device"

[[steps]]
at_ms = 1000
action = "tracking_changed"
state = { limited = "excessive_motion" }

[[steps]]
at_ms = 2000
action = "tracking_changed"
state = "not_available"
"#;

#[test]
fn loads_and_replays_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(ESCALATION.as_bytes()).unwrap();

    let scenario = Scenario::load(file.path()).unwrap();
    assert_eq!(scenario.steps.len(), 3);

    let transcript = run_scenario(&scenario, &Config::default()).unwrap();
    // Second change supersedes the first escalation; it fires at 2000 + 3000.
    assert!(transcript.events.contains(&Event::FeedbackEscalated {
        state: TrackingState::NotAvailable,
        at_ms: 5000,
    }));
    assert_eq!(
        transcript
            .events
            .iter()
            .filter(|e| matches!(e, Event::FeedbackEscalated { .. }))
            .count(),
        1
    );
    assert_eq!(transcript.final_message.text, "TRACKING UNAVAILABLE");
    assert!(transcript.final_message.visible);
}

#[test]
fn transcript_serializes_to_json() {
    let scenario = Scenario::from_toml(ESCALATION).unwrap();
    let transcript = run_scenario(&scenario, &Config::default()).unwrap();

    let json = serde_json::to_value(&transcript).unwrap();
    assert_eq!(json["name"], "escalation");
    assert_eq!(json["events"][0]["type"], "MessageShown");
}

#[test]
fn missing_file_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    assert!(Scenario::load(&dir.path().join("missing.toml")).is_err());
}

#[test]
fn malformed_action_is_an_error() {
    let bad = "[[steps]]\nat_ms = 0\naction = \"explode\"\n";
    assert!(Scenario::from_toml(bad).is_err());
}
