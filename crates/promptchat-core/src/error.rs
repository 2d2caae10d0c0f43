//! Error types for promptchat operations.
//!
//! Every variant is fatal for a run: nothing here is retried or recovered.
//! Variants fall into four families:
//!
//! - configuration: credential and config file problems, raised before any
//!   network traffic;
//! - prompt: template declaration and formatting, wrapped from
//!   [`promptchat_pm::PromptError`];
//! - auth / transport / provider: failures of the completion call.

use std::path::PathBuf;
use thiserror::Error;

/// Error taxonomy for promptchat operations.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum ChatError {
    // Config errors
    /// Credential file could not be read.
    #[error("credential file not readable: {path}")]
    CredentialNotFound {
        /// Path of the credential file.
        path: PathBuf,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// Credential file is not valid UTF-8 text.
    #[error("credential file is not valid UTF-8: {path}")]
    MalformedCredential {
        /// Path of the credential file.
        path: PathBuf,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// Credential file exists but holds no token.
    #[error("credential is empty{}", .0.as_ref().map(|p| format!(": {}", p.display())).unwrap_or_default())]
    EmptyCredential(Option<PathBuf>),

    /// Configuration file could not be read.
    #[error("config file not readable: {path}")]
    ConfigRead {
        /// Path of the config file.
        path: PathBuf,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// Configuration file is not valid TOML or has unexpected fields.
    #[error("config parse error: {0}")]
    ConfigParse(String),

    /// Configuration values are out of range.
    #[error("invalid config: {0}")]
    InvalidConfig(String),

    // Prompt errors
    /// Template declaration or formatting failed.
    #[error(transparent)]
    Prompt(#[from] promptchat_pm::PromptError),

    // Completion errors
    /// The provider rejected the credential.
    #[error("authentication failed ({status}): {message}")]
    Auth {
        /// HTTP status returned by the provider.
        status: u16,
        /// Provider supplied message.
        message: String,
    },

    /// The request never produced an HTTP response.
    #[error("transport error: {0}")]
    Transport(String),

    /// The provider answered with an error or an unusable body.
    #[error("provider error{}: {message}", .status.map(|s| format!(" ({s})")).unwrap_or_default())]
    Provider {
        /// HTTP status, absent when the body of a success response was unusable.
        status: Option<u16>,
        /// Provider supplied or decoding message.
        message: String,
    },
}

impl ChatError {
    /// Whether the error was raised while loading credentials or config.
    pub fn is_config(&self) -> bool {
        matches!(
            self,
            ChatError::CredentialNotFound { .. }
                | ChatError::MalformedCredential { .. }
                | ChatError::EmptyCredential(_)
                | ChatError::ConfigRead { .. }
                | ChatError::ConfigParse(_)
                | ChatError::InvalidConfig(_)
        )
    }

    /// Whether the error came from the completion call.
    pub fn is_completion(&self) -> bool {
        matches!(
            self,
            ChatError::Auth { .. } | ChatError::Transport(_) | ChatError::Provider { .. }
        )
    }
}

/// Result type alias for promptchat operations.
pub type Result<T> = std::result::Result<T, ChatError>;
