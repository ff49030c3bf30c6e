use std::path::PathBuf;

use arstatus_core::{run_scenario, Event, Scenario};
use clap::Args;

#[derive(Args)]
pub struct SimulateArgs {
    /// Scenario file (TOML)
    scenario: PathBuf,
    /// Config file to use instead of the user's config
    #[arg(long)]
    config: Option<PathBuf>,
    /// Print the full transcript as JSON
    #[arg(long)]
    json: bool,
}

pub fn run(args: SimulateArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = super::load_config(args.config.as_deref())?;
    let scenario = Scenario::load(&args.scenario)?;
    let transcript = run_scenario(&scenario, &config)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&transcript)?);
        return Ok(());
    }

    for event in &transcript.events {
        println!("{:>8} ms  {}", event.at_ms(), describe(event));
    }
    let message = &transcript.final_message;
    println!(
        "final: {} ({})",
        message.text.replace('\n', " / "),
        if message.visible { "visible" } else { "hidden" }
    );
    Ok(())
}

fn describe(event: &Event) -> String {
    match event {
        Event::MessageShown {
            text, auto_hide, ..
        } => {
            let text = text.replace('\n', " / ");
            if *auto_hide {
                format!("show \"{text}\"")
            } else {
                format!("show \"{text}\" (persistent)")
            }
        }
        Event::MessageHidden { .. } => "hide".to_string(),
        Event::MessageScheduled {
            category, delay_ms, ..
        } => format!("schedule {category} in {delay_ms} ms"),
        Event::ScheduledMessageCancelled { category, .. } => format!("cancel {category}"),
        Event::ScheduledMessageFired { category, .. } => format!("fire {category}"),
        Event::FeedbackEscalated { state, .. } => format!("escalate {state:?}"),
        Event::StaleTimerIgnored { handle, .. } => format!("ignore stale timer {handle}"),
    }
}
