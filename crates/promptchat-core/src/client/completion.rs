//! Completion backend trait and result types.

use crate::error::Result;
use promptchat_pm::{Conversation, Message};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Token accounting reported by the provider.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenUsage {
    /// Tokens in the request messages.
    pub prompt_tokens: u32,
    /// Tokens in the reply.
    pub completion_tokens: u32,
    /// Sum of both.
    pub total_tokens: u32,
}

/// The single reply to a conversation.
///
/// Keeps the assistant message together with whatever metadata the provider
/// returned. `Display` shows only the reply text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Completion {
    /// The assistant message.
    pub message: Message,

    /// Model that produced the reply, as reported by the provider.
    pub model: Option<String>,

    /// Why generation stopped (e.g. `stop`, `length`).
    pub finish_reason: Option<String>,

    /// Token usage, if reported.
    pub usage: Option<TokenUsage>,
}

impl Completion {
    /// Creates a completion holding only an assistant reply.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            message: Message::assistant(text),
            model: None,
            finish_reason: None,
            usage: None,
        }
    }

    /// The reply text.
    pub fn text(&self) -> &str {
        self.message.content()
    }
}

impl fmt::Display for Completion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.text())
    }
}

/// A provider able to answer a conversation with one completion.
///
/// Each call is a single request: no retries, no caching, and identical
/// conversations may yield different replies.
pub trait CompletionBackend: Send + Sync {
    /// Sends the conversation and blocks until the reply or a failure.
    ///
    /// # Errors
    ///
    /// Returns [`ChatError::Auth`](crate::ChatError::Auth) if the credential
    /// is rejected, [`ChatError::Transport`](crate::ChatError::Transport) if
    /// no response arrives and
    /// [`ChatError::Provider`](crate::ChatError::Provider) for any other
    /// provider failure.
    fn complete(&self, conversation: &Conversation) -> Result<Completion>;

    /// Model the backend requests.
    fn model(&self) -> &str;
}
