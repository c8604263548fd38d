use crate::discord::{Context, Error};

/// Show help for all commands, or one specific command.
#[poise::command(prefix_command, track_edits)]
pub async fn help(
    ctx: Context<'_>,
    #[rest]
    #[description = "Specific command to show help about"]
    command: Option<String>,
) -> Result<(), Error> {
    poise::builtins::help(
        ctx,
        command.as_deref(),
        poise::builtins::HelpConfiguration {
            extra_text_at_bottom:
                "Any message that isn't a command is answered by the fantasy basketball assistant.",
            ..Default::default()
        },
    )
    .await?;
    Ok(())
}
