use crate::agent::AgentError;
use crate::discord::{Context, Error};

/// Send a single-message result, or the error rendered as text.
pub async fn respond_text(ctx: Context<'_>, result: Result<String, AgentError>) -> Result<(), Error> {
    let text = match result {
        Ok(text) => text,
        Err(err) => err.to_string(),
    };
    ctx.say(text).await?;
    Ok(())
}

/// Send a multi-chunk result, or the error rendered as text.
pub async fn respond_chunks(
    ctx: Context<'_>,
    result: Result<Vec<String>, AgentError>,
) -> Result<(), Error> {
    match result {
        Ok(chunks) => {
            for chunk in chunks {
                ctx.say(chunk).await?;
            }
        }
        Err(err) => {
            ctx.say(err.to_string()).await?;
        }
    }
    Ok(())
}
