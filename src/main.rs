/// The orchestrator behind every command.
mod agent;
/// All available discord commands.
mod commands;
/// Discord setup.
mod discord;
/// Player-ranking directory and fuzzy name matching.
mod directory;
/// Draft bookkeeping.
mod draft;
/// Completion-endpoint client and prompt templates.
mod llm;
mod logger;
/// Bot settings.
mod settings;
mod utils;

use anyhow::{Context, Result};
use settings::Settings;

#[tokio::main]
async fn main() -> Result<()> {
    logger::init()?;

    let settings = match Settings::new() {
        Ok(settings) => settings,
        Err(_) => {
            Settings::default()
                .save()
                .await
                .context("Failed to save default config.")?;
            println!("Created default settings. Please fill out. Exiting...");
            std::process::exit(0);
        }
    };

    discord::run(settings).await.context("Failed to start discord.")
}
