use super::utils::{respond_chunks, respond_text};
use crate::agent::AgentError;
use crate::discord::{Context, Error};

/// Compare NBA players for fantasy basketball.
///
/// Usage: `compare <player1> <player2> [player3 ...]`
/// Quote multi-word names: `compare "LeBron James" "Stephen Curry"`.
#[poise::command(prefix_command)]
pub async fn compare(
    ctx: Context<'_>,
    #[description = "Names of the players to compare"] players: Vec<String>,
) -> Result<(), Error> {
    if players.len() < 2 {
        ctx.say(AgentError::InsufficientPlayers.to_string()).await?;
        return Ok(());
    }

    log::info!("Comparing players: {}", players.join(", "));
    // Comparisons make several completion calls; show a typing indicator
    // instead of silence.
    let _typing = ctx.defer_or_broadcast().await;
    let result = ctx.data().agent.compare_players(&players).await;
    respond_text(ctx, result).await
}

/// Get the latest news about an NBA player.
///
/// Usage: `news <player_name>`
#[poise::command(prefix_command)]
pub async fn news(
    ctx: Context<'_>,
    #[rest]
    #[description = "Player name"]
    player_name: String,
) -> Result<(), Error> {
    log::info!("Fetching news for player: {}", player_name);
    let result = ctx.data().agent.player_news(&player_name).await;
    respond_chunks(ctx, result).await
}
