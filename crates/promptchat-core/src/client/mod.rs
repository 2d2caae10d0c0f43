//! Completion client and backends.
//!
//! [`CompletionBackend`] is the seam between the runtime and the provider.
//! [`OpenAiClient`] talks to an OpenAI compatible HTTP API; the mock in
//! [`completion_mock`] records conversations for tests.

pub mod completion;
pub mod completion_mock;
pub mod openai_impl;

pub use completion::{Completion, CompletionBackend, TokenUsage};
pub use completion_mock::MockCompletionBackend;
pub use openai_impl::OpenAiClient;

use crate::config::{DEFAULT_BASE_URL, DEFAULT_MODEL};
use std::time::Duration;

/// Request options for a completion call.
#[derive(Debug, Clone, PartialEq)]
pub struct ClientOptions {
    /// Model identifier.
    pub model: String,

    /// API base URL; `/chat/completions` is appended.
    pub base_url: String,

    /// Sampling temperature, omitted from the request when unset.
    pub temperature: Option<f32>,

    /// Reply token limit, omitted from the request when unset.
    pub max_tokens: Option<u32>,

    /// Whole-request timeout; the request waits indefinitely when unset.
    pub timeout: Option<Duration>,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            temperature: None,
            max_tokens: None,
            timeout: None,
        }
    }
}

impl ClientOptions {
    /// Sets the base URL, returning `self` for chaining.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}
