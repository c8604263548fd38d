use super::utils::{respond_chunks, respond_text};
use crate::discord::{Context, Error};

/// Start a fantasy basketball draft in this channel.
///
/// Usage: `draft <rounds> <pick_position> <total_players>`
/// Example: `draft 13 3 12` for 13 rounds, picking third in a 12-team league.
#[poise::command(prefix_command)]
pub async fn draft(
    ctx: Context<'_>,
    #[description = "Number of rounds"] rounds: u32,
    #[description = "Your slot in the draft order"] pick_position: u32,
    #[description = "Number of drafting teams"] total_players: u32,
) -> Result<(), Error> {
    if rounds < 1 || total_players < 2 || pick_position < 1 || pick_position > total_players {
        ctx.say(
            "Invalid draft parameters! Please ensure:\n\
             - Rounds is at least 1\n\
             - Pick position is between 1 and the number of teams\n\
             - There are at least 2 teams",
        )
        .await?;
        return Ok(());
    }

    let result = ctx
        .data()
        .agent
        .start_draft(ctx.channel_id().get(), rounds, pick_position, total_players)
        .await;
    respond_text(ctx, result).await
}

/// Record a draft pick.
///
/// Usage: `pick <pick_number> <player_name> [position]`
/// The position (PG/SG/SF/PF/C/UTIL) is required on your own picks.
#[poise::command(prefix_command)]
pub async fn pick(
    ctx: Context<'_>,
    #[description = "Overall pick number"] pick_number: u32,
    #[rest]
    #[description = "Player name, optionally followed by a position"]
    entry: String,
) -> Result<(), Error> {
    let result = ctx
        .data()
        .agent
        .record_pick(ctx.channel_id().get(), pick_number, &entry)
        .await;
    respond_text(ctx, result).await
}

/// Get a draft recommendation for your next pick.
///
/// Considers your roster so far, remaining needs, and the best available
/// players. Works between your turns too.
#[poise::command(prefix_command)]
pub async fn getrec(ctx: Context<'_>) -> Result<(), Error> {
    let result = ctx.data().agent.recommendation(ctx.channel_id().get()).await;
    respond_chunks(ctx, result).await
}

/// Show the ranked player list.
///
/// During a draft only undrafted players are shown; outside one, the full
/// rankings with stats.
#[poise::command(prefix_command)]
pub async fn players(ctx: Context<'_>) -> Result<(), Error> {
    let result = ctx.data().agent.show_players(ctx.channel_id().get()).await;
    respond_chunks(ctx, result).await
}

/// Show your drafted team, grouped by position with live stats.
#[poise::command(prefix_command)]
pub async fn myteam(ctx: Context<'_>) -> Result<(), Error> {
    let result = ctx.data().agent.show_my_team(ctx.channel_id().get()).await;
    respond_chunks(ctx, result).await
}
