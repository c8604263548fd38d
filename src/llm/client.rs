// Chat-completions client for the hosted language model.
//
// Speaks the OpenAI-compatible `/v1/chat/completions` JSON shape that the
// Mistral hosted API exposes. One request per call, no streaming, no
// retries: a failed call surfaces as an error message for the channel.

use anyhow::{Context as _, Result};
use serde::{Deserialize, Serialize};

/// One turn of a conversation, in wire format.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        ChatMessage {
            role: "system".to_string(),
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        ChatMessage {
            role: "user".to_string(),
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        ChatMessage {
            role: "assistant".to_string(),
            content: content.into(),
        }
    }
}

#[derive(Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
}

#[derive(Deserialize)]
struct CompletionResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChatMessage,
}

/// Client for the completion endpoint.
pub struct Oracle {
    http: reqwest::Client,
    api_url: String,
    api_key: String,
    model: String,
}

impl Oracle {
    pub fn new(http: reqwest::Client, api_url: String, api_key: String, model: String) -> Self {
        Oracle {
            http,
            api_url,
            api_key,
            model,
        }
    }

    /// Send one completion request: system prompt, prior history, then the
    /// user prompt. Returns the first choice's text.
    pub async fn complete(
        &self,
        system: &str,
        user: &str,
        history: &[ChatMessage],
    ) -> Result<String> {
        if self.api_key.is_empty() {
            anyhow::bail!("no completion API key configured");
        }

        let mut messages = Vec::with_capacity(history.len() + 2);
        messages.push(ChatMessage::system(system));
        messages.extend_from_slice(history);
        messages.push(ChatMessage::user(user));

        let request = CompletionRequest {
            model: &self.model,
            messages: &messages,
            temperature: None,
        };

        log::debug!(
            "Requesting completion from {} ({} messages)",
            self.api_url,
            messages.len()
        );

        let response = self
            .http
            .post(&self.api_url)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .context("completion request failed")?
            .error_for_status()
            .context("completion endpoint returned an error status")?
            .json::<CompletionResponse>()
            .await
            .context("could not parse completion response")?;

        response
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .context("completion response contained no choices")
    }
}
