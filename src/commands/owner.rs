use crate::discord::{Context, Error};

/// Shutdown the bot.
#[poise::command(prefix_command, owners_only, hide_in_help)]
pub async fn quit(ctx: Context<'_>) -> Result<(), Error> {
    ctx.say("Shutting down!").await?;
    log::info!("Shutdown requested by {}", ctx.author().tag());
    ctx.framework().shard_manager.shutdown_all().await;
    Ok(())
}
