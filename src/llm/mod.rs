/// Chat-completions client.
pub mod client;
/// Prompt templates.
pub mod prompt;

pub use client::{ChatMessage, Oracle};
