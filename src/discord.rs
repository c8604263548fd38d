use std::collections::HashSet;

use anyhow::Result;
use poise::serenity_prelude as serenity;

use crate::agent::Agent;
use crate::commands;
use crate::settings::Settings;
use crate::utils::{chunk_message, MESSAGE_CHUNK_LIMIT};

/// Shared state handed to every command.
pub struct Data {
    pub agent: Agent,
    pub prefix: String,
}

pub type Error = anyhow::Error;
pub type Context<'a> = poise::Context<'a, Data, Error>;

pub async fn run(settings: Settings) -> Result<()> {
    let data = Data {
        agent: Agent::new(&settings),
        prefix: settings.prefix.clone(),
    };
    let activity = format!("fantasy basketball | {}help", settings.prefix);

    let mut owners = HashSet::new();
    owners.insert(serenity::UserId::new(settings.owner));

    let options = poise::FrameworkOptions {
        commands: commands::list(),
        prefix_options: poise::PrefixFrameworkOptions {
            prefix: Some(settings.prefix.clone()),
            case_insensitive_commands: true,
            ..Default::default()
        },
        owners,
        on_error: |error| Box::pin(on_error(error)),
        pre_command: |ctx| {
            Box::pin(async move {
                log::info!(
                    "Got command '{}' by user '{}'",
                    ctx.command().qualified_name,
                    ctx.author().tag()
                );
            })
        },
        event_handler: |ctx, event, framework, data| {
            Box::pin(event_handler(ctx, event, framework, data))
        },
        ..Default::default()
    };

    let framework = poise::Framework::builder()
        .options(options)
        .setup(move |ctx, ready, _framework| {
            Box::pin(async move {
                log::info!("Connected as {}", ready.user.name);
                ctx.set_activity(Some(serenity::ActivityData::playing(activity)));
                Ok(data)
            })
        })
        .build();

    let intents =
        serenity::GatewayIntents::non_privileged() | serenity::GatewayIntents::MESSAGE_CONTENT;

    let mut client = serenity::ClientBuilder::new(&settings.token, intents)
        .framework(framework)
        .await?;
    Ok(client.start().await?)
}

async fn on_error(error: poise::FrameworkError<'_, Data, Error>) {
    match error {
        poise::FrameworkError::ArgumentParse {
            error, input, ctx, ..
        } => {
            let detail = match input {
                Some(input) => format!(" (couldn't parse '{input}': {error})"),
                None => format!(" ({error})"),
            };
            let text = format!(
                "Bad arguments{detail}. Check `{}help {}`.",
                ctx.data().prefix,
                ctx.command().name
            );
            if let Err(err) = ctx.say(text).await {
                log::warn!("Failed to report an argument error: {err}");
            }
        }
        poise::FrameworkError::Command { error, ctx, .. } => {
            log::warn!("Command '{}' failed: {:#}", ctx.command().name, error);
            let _ = ctx.say("Something went wrong handling that command.").await;
        }
        error => {
            if let Err(err) = poise::builtins::on_error(error).await {
                log::warn!("Error while handling error: {err}");
            }
        }
    }
}

/// Relay non-command messages to the assistant, keeping per-channel history.
async fn event_handler(
    ctx: &serenity::Context,
    event: &serenity::FullEvent,
    _framework: poise::FrameworkContext<'_, Data, Error>,
    data: &Data,
) -> Result<(), Error> {
    match event {
        serenity::FullEvent::Resume { .. } => {
            log::info!("Connection to discord resumed.");
        }
        serenity::FullEvent::Message { new_message } => {
            // Ignore bots (including ourselves) and command invocations.
            if new_message.author.bot
                || new_message.content.starts_with(&data.prefix)
                || new_message.content.trim().is_empty()
            {
                return Ok(());
            }

            log::info!(
                "Processing message from {}: {}",
                new_message.author.tag(),
                new_message.content
            );
            match data
                .agent
                .chat(new_message.channel_id.get(), &new_message.content)
                .await
            {
                Ok(reply) => {
                    for chunk in chunk_message(&reply, MESSAGE_CHUNK_LIMIT) {
                        new_message.reply(ctx, chunk).await?;
                    }
                }
                Err(err) => {
                    new_message.reply(ctx, err.to_string()).await?;
                }
            }
        }
        _ => {}
    }
    Ok(())
}
