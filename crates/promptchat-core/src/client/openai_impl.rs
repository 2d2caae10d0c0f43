//! OpenAI compatible chat completion client.
//!
//! Uses the blocking `reqwest` client: one `POST {base_url}/chat/completions`
//! per call, bearer authentication, JSON in and out.

use crate::client::ClientOptions;
use crate::client::completion::{Completion, CompletionBackend, TokenUsage};
use crate::credential::Credential;
use crate::error::{ChatError, Result};
use promptchat_pm::{Conversation, Message, Role};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: &'a Conversation,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    model: Option<String>,
    choices: Vec<ChatChoice>,
    usage: Option<TokenUsage>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChoiceMessage,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    role: Option<Role>,
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorResponse {
    error: ErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ErrorDetail {
    message: String,
}

/// Chat completion client for OpenAI compatible endpoints.
///
/// The credential is handed over at construction and never leaves the client
/// except as the `Authorization` header.
///
/// # Examples
///
/// ```no_run
/// use promptchat_core::{ClientOptions, CompletionBackend, Credential, OpenAiClient};
/// use promptchat_pm::{Conversation, Message};
///
/// let credential = Credential::parse("sk-...")?;
/// let client = OpenAiClient::new(credential, ClientOptions::default())?;
///
/// let conversation = Conversation::new(vec![Message::user("Hola")]);
/// let completion = client.complete(&conversation)?;
/// println!("{completion}");
/// # Ok::<(), promptchat_core::ChatError>(())
/// ```
#[derive(Debug)]
pub struct OpenAiClient {
    credential: Credential,
    options: ClientOptions,
    http: reqwest::blocking::Client,
}

impl OpenAiClient {
    /// Creates a client for the given credential and options.
    ///
    /// # Errors
    ///
    /// Returns [`ChatError::Transport`] if the HTTP client cannot be built
    /// (e.g. TLS backend initialisation failure).
    pub fn new(credential: Credential, options: ClientOptions) -> Result<Self> {
        // `None` clears reqwest's 30 s blocking default.
        let http = reqwest::blocking::Client::builder()
            .timeout(options.timeout)
            .build()
            .map_err(|e| ChatError::Transport(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            credential,
            options,
            http,
        })
    }

    /// Full URL of the chat completion endpoint.
    pub fn endpoint(&self) -> String {
        format!(
            "{}/chat/completions",
            self.options.base_url.trim_end_matches('/')
        )
    }
}

impl CompletionBackend for OpenAiClient {
    fn complete(&self, conversation: &Conversation) -> Result<Completion> {
        let url = self.endpoint();
        let request = ChatRequest {
            model: &self.options.model,
            messages: conversation,
            temperature: self.options.temperature,
            max_tokens: self.options.max_tokens,
        };

        info!(
            url = %url,
            model = %self.options.model,
            messages = conversation.len(),
            "sending chat completion request"
        );

        let response = self
            .http
            .post(&url)
            .bearer_auth(self.credential.expose())
            .json(&request)
            .send()
            .map_err(|e| ChatError::Transport(error_chain(&e)))?;

        let status = response.status();
        let body = response
            .text()
            .map_err(|e| ChatError::Transport(format!("failed to read response: {}", error_chain(&e))))?;

        if !status.is_success() {
            return Err(status_error(status.as_u16(), &body));
        }

        let completion = parse_completion(&body)?;
        debug!(
            model = ?completion.model,
            finish_reason = ?completion.finish_reason,
            usage = ?completion.usage,
            "received chat completion"
        );
        Ok(completion)
    }

    fn model(&self) -> &str {
        &self.options.model
    }
}

/// Maps a non-success HTTP status and body to an error.
fn status_error(status: u16, body: &str) -> ChatError {
    let message = serde_json::from_str::<ErrorResponse>(body)
        .map(|e| e.error.message)
        .unwrap_or_else(|_| {
            let trimmed = body.trim();
            if trimmed.is_empty() {
                "no error details".to_string()
            } else {
                trimmed.to_string()
            }
        });

    match status {
        401 | 403 => ChatError::Auth { status, message },
        _ => ChatError::Provider {
            status: Some(status),
            message,
        },
    }
}

/// Extracts the first choice of a successful response body.
fn parse_completion(body: &str) -> Result<Completion> {
    let response: ChatResponse = serde_json::from_str(body).map_err(|e| ChatError::Provider {
        status: None,
        message: format!("malformed response: {e}"),
    })?;

    let choice = response
        .choices
        .into_iter()
        .next()
        .ok_or_else(|| ChatError::Provider {
            status: None,
            message: "no choices in response".to_string(),
        })?;

    let content = choice.message.content.ok_or_else(|| ChatError::Provider {
        status: None,
        message: format!(
            "response has no content (finish_reason: {})",
            choice.finish_reason.as_deref().unwrap_or("unknown")
        ),
    })?;

    Ok(Completion {
        message: Message::new(choice.message.role.unwrap_or(Role::Assistant), content),
        model: response.model,
        finish_reason: choice.finish_reason,
        usage: response.usage,
    })
}

fn error_chain(err: &dyn std::error::Error) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}
