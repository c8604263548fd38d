use anyhow::{Context, Result};
use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

const FILENAME: &str = "settings.yaml";

/// Default player-ranking table (fantasy points leaders).
const DEFAULT_RANKINGS_URL: &str = "https://basketball.realgm.com/nba/stats";
/// Default NBA news page used for the `news` command.
const DEFAULT_NEWS_URL: &str = "https://basketball.realgm.com/nba/news";
/// Mistral's OpenAI-compatible completion endpoint, as the original bot used.
const DEFAULT_ORACLE_URL: &str = "https://api.mistral.ai/v1/chat/completions";
const DEFAULT_ORACLE_MODEL: &str = "mistral-large-latest";

#[derive(Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Discord's bot token
    pub token: String,
    /// Discord account id which owns the bot
    pub owner: u64,
    /// Command prefix
    pub prefix: String,
    /// Completion endpoint URL.
    pub oracle_url: String,
    /// API key for the completion endpoint.
    pub oracle_api_key: String,
    /// Model identifier sent with each completion request.
    pub oracle_model: String,
    /// Page carrying the player-ranking table.
    pub rankings_url: String,
    /// Page scraped for player news headlines.
    pub news_url: String,
    /// Seconds before the cached player directory goes stale.
    pub directory_ttl_secs: u64,
    /// Reject picks whose name cannot be resolved against the pool instead
    /// of recording the name verbatim.
    pub strict_picks: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            token: String::from("DISCORD_BOT_TOKEN_HERE"),
            owner: 999999999,
            prefix: String::from("!"),
            oracle_url: String::from(DEFAULT_ORACLE_URL),
            oracle_api_key: String::from("ORACLE_API_KEY_HERE"),
            oracle_model: String::from(DEFAULT_ORACLE_MODEL),
            rankings_url: String::from(DEFAULT_RANKINGS_URL),
            news_url: String::from(DEFAULT_NEWS_URL),
            directory_ttl_secs: 3600,
            strict_picks: false,
        }
    }
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        let settings_path = std::env::var("BOT_SETTINGS").unwrap_or_else(|_| FILENAME.to_string());

        Config::builder()
            // Start off with the configuration file
            .add_source(File::with_name(&settings_path))
            // Add in settings from the environment (with a prefix of BOT)
            // Eg. `BOT_PREFIX=~` would set the `prefix` key
            .add_source(Environment::with_prefix("BOT"))
            .build()?
            .try_deserialize()
    }

    pub async fn save(&self) -> Result<()> {
        use tokio::io::AsyncWriteExt;

        let settings_path = std::env::var("BOT_SETTINGS").unwrap_or_else(|_| FILENAME.to_string());

        if let Some(parent) = PathBuf::from(&settings_path).parent() {
            let _ = tokio::fs::create_dir_all(parent).await;
        }
        let mut file = tokio::fs::File::create(&settings_path).await?;
        file.write_all(
            serde_yaml::to_string(&self)
                .context("Failed to serialize settings")?
                .as_bytes(),
        )
        .await?;
        file.sync_all().await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_round_trip_through_yaml() {
        let settings = Settings::default();
        let yaml = serde_yaml::to_string(&settings).unwrap();
        let back: Settings = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(back.prefix, settings.prefix);
        assert_eq!(back.oracle_model, settings.oracle_model);
        assert_eq!(back.directory_ttl_secs, 3600);
        assert!(!back.strict_picks);
    }

    #[test]
    fn partial_yaml_fills_in_defaults() {
        let partial = "token: abc\nstrict_picks: true\n";
        let settings: Settings = serde_yaml::from_str(partial).unwrap();
        assert_eq!(settings.token, "abc");
        assert!(settings.strict_picks);
        assert_eq!(settings.prefix, "!");
        assert_eq!(settings.oracle_url, DEFAULT_ORACLE_URL);
    }
}
