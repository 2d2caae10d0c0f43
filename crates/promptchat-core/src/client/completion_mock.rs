//! Mock completion backend for testing.
//!
//! Replies are served from a queue, then from an optional default. Every
//! conversation passed to [`CompletionBackend::complete`] is recorded.

use crate::client::completion::{Completion, CompletionBackend};
use crate::error::{ChatError, Result};
use promptchat_pm::Conversation;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

/// Mock completion backend.
///
/// # Examples
///
/// ```
/// use promptchat_core::{CompletionBackend, MockCompletionBackend};
/// use promptchat_pm::{Conversation, Message};
///
/// let backend = MockCompletionBackend::with_reply("Hola");
/// let conversation = Conversation::new(vec![Message::user("Saluda")]);
///
/// let completion = backend.complete(&conversation).unwrap();
/// assert_eq!(completion.text(), "Hola");
/// assert_eq!(backend.call_count(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct MockCompletionBackend {
    /// Replies served in order before falling back to the default.
    queued: Arc<Mutex<VecDeque<Result<Completion>>>>,
    /// Reply used once the queue is empty.
    default_reply: Arc<Mutex<Option<Completion>>>,
    /// Conversations received, in call order.
    history: Arc<Mutex<Vec<Conversation>>>,
}

impl MockCompletionBackend {
    /// Creates a mock with no replies configured.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a mock that answers every call with `text`.
    pub fn with_reply(text: impl Into<String>) -> Self {
        let backend = Self::new();
        backend.set_default_reply(Completion::new(text));
        backend
    }

    /// Queues a reply for the next unanswered call.
    pub fn push_reply(&self, completion: Completion) {
        self.queued.lock().unwrap().push_back(Ok(completion));
    }

    /// Queues an error for the next unanswered call.
    pub fn push_error(&self, error: ChatError) {
        self.queued.lock().unwrap().push_back(Err(error));
    }

    /// Sets the reply used once the queue is exhausted.
    pub fn set_default_reply(&self, completion: Completion) {
        *self.default_reply.lock().unwrap() = Some(completion);
    }

    /// Conversations received so far.
    pub fn history(&self) -> Vec<Conversation> {
        self.history.lock().unwrap().clone()
    }

    /// Number of calls made.
    pub fn call_count(&self) -> usize {
        self.history.lock().unwrap().len()
    }
}

impl CompletionBackend for MockCompletionBackend {
    fn complete(&self, conversation: &Conversation) -> Result<Completion> {
        self.history.lock().unwrap().push(conversation.clone());

        if let Some(reply) = self.queued.lock().unwrap().pop_front() {
            return reply;
        }

        self.default_reply
            .lock()
            .unwrap()
            .clone()
            .ok_or_else(|| ChatError::Provider {
                status: None,
                message: "no mock reply configured".to_string(),
            })
    }

    fn model(&self) -> &str {
        "mock"
    }
}
