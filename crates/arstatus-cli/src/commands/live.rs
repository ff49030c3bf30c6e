use std::path::PathBuf;
use std::time::Duration;

use arstatus_core::{spawn_service, MessageSink, Scenario};
use chrono::Local;
use clap::Args;
use tokio::time::Instant;
use tracing::debug;

#[derive(Args)]
pub struct LiveArgs {
    /// Scenario file (TOML)
    scenario: PathBuf,
    /// Config file to use instead of the user's config
    #[arg(long)]
    config: Option<PathBuf>,
}

/// Prints what a status panel would do, stamped with wall-clock time.
struct ConsoleSink;

impl MessageSink for ConsoleSink {
    fn set_message_text(&mut self, text: &str) {
        println!("[{}] text: {}", stamp(), text.replace('\n', " / "));
    }

    fn set_visible(&mut self, visible: bool) {
        println!("[{}] {}", stamp(), if visible { "shown" } else { "hidden" });
    }
}

fn stamp() -> String {
    Local::now().format("%H:%M:%S%.3f").to_string()
}

pub fn run(args: LiveArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = super::load_config(args.config.as_deref())?;
    let scenario = Scenario::load(&args.scenario)?;
    let until_ms = scenario.end_ms()?;

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()?;

    runtime.block_on(async move {
        let (status, task) = spawn_service(ConsoleSink, &config);
        let start = Instant::now();

        let mut steps = scenario.steps.clone();
        steps.sort_by_key(|step| step.at_ms);
        for step in steps {
            tokio::time::sleep_until(start + Duration::from_millis(step.at_ms)).await;
            debug!(at_ms = step.at_ms, "dispatching scenario step");
            status.apply(step.action);
        }
        tokio::time::sleep_until(start + Duration::from_millis(until_ms)).await;

        if let Some(snapshot) = status.snapshot().await {
            println!("{}", serde_json::to_string_pretty(&snapshot)?);
        }
        status.shutdown();
        task.await?;
        Ok::<(), Box<dyn std::error::Error>>(())
    })
}
