//! Runtime wiring the prompt, the credential and the completion client.
//!
//! The pipeline is strictly linear: compose the conversation, send it once,
//! return the reply. The first failing step aborts the run.

use crate::client::{Completion, CompletionBackend, OpenAiClient};
use crate::config::ChatConfig;
use crate::credential::Credential;
use crate::error::Result;
use promptchat_pm::{ChatPrompt, Conversation, PromptEngine, PromptValues};
use tracing::{debug, info};

/// Runtime for one chat prompt.
///
/// # Examples
///
/// ```no_run
/// use promptchat_core::{ChatConfig, ChatRuntime};
/// use promptchat_pm::builtin;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let runtime = ChatRuntime::new(ChatConfig::default(), builtin::car_article_prompt()?);
/// let completion = runtime.run(&builtin::default_values())?;
/// println!("{completion}");
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct ChatRuntime {
    /// Runtime configuration.
    pub config: ChatConfig,

    /// The prompt every run formats.
    pub prompt: ChatPrompt,
}

impl ChatRuntime {
    /// Creates a runtime for `prompt` using `config`.
    pub fn new(config: ChatConfig, prompt: ChatPrompt) -> Self {
        Self { config, prompt }
    }

    /// Placeholder names the prompt requires.
    pub fn input_variables(&self) -> &[String] {
        self.prompt.input_variables()
    }

    /// Formats the prompt into a conversation. Performs no IO.
    ///
    /// # Errors
    ///
    /// Returns [`ChatError::Prompt`](crate::ChatError::Prompt) if a placeholder
    /// has no value.
    pub fn compose(&self, values: &PromptValues) -> Result<Conversation> {
        let conversation = self.prompt.format_messages(values)?;
        debug!(messages = conversation.len(), "composed conversation");
        Ok(conversation)
    }

    /// Composes the conversation and sends it through `backend`.
    ///
    /// # Errors
    ///
    /// Returns the composition error, or the backend's error unmodified.
    pub fn complete_with(
        &self,
        backend: &dyn CompletionBackend,
        values: &PromptValues,
    ) -> Result<Completion> {
        let conversation = self.compose(values)?;
        info!(model = backend.model(), "requesting completion");
        backend.complete(&conversation)
    }

    /// Loads the credential, then composes and sends through [`OpenAiClient`].
    ///
    /// The credential is read before anything else, so a missing or blank
    /// credential file fails without touching the network.
    ///
    /// # Errors
    ///
    /// Returns a configuration error for the credential, a prompt error for
    /// missing values, or the completion error.
    pub fn run(&self, values: &PromptValues) -> Result<Completion> {
        let credential = Credential::from_file(&self.config.credential_path)?;
        let client = OpenAiClient::new(credential, self.config.client_options())?;
        self.complete_with(&client, values)
    }
}
