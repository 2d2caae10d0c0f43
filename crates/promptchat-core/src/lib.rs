//! promptchat core - completion client and runtime.
//!
//! This crate turns a composed conversation into a single chat completion:
//! it owns the credential handling, runtime configuration, the error
//! taxonomy and the HTTP client for OpenAI compatible endpoints.
//!
//! # Architecture
//!
//! - [`error`]: Error types and result type alias
//! - [`config`]: Configuration loaded from an optional TOML file
//! - [`credential`]: The API token and its single construction point
//! - [`client`]: Completion backend trait, HTTP client and mock
//! - [`runtime`]: The linear compose-then-complete pipeline
//!
//! # Example
//!
//! ```
//! use promptchat_core::{ChatConfig, ChatRuntime, MockCompletionBackend};
//! use promptchat_pm::builtin;
//!
//! let runtime = ChatRuntime::new(ChatConfig::default(), builtin::car_article_prompt()?);
//! let backend = MockCompletionBackend::with_reply("Aqui tienes un articulo...");
//!
//! let completion = runtime.complete_with(&backend, &builtin::default_values())?;
//! assert_eq!(completion.text(), "Aqui tienes un articulo...");
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod client;
pub mod config;
pub mod credential;
pub mod error;
pub mod runtime;

// Re-export core types for convenience
pub use client::{
    ClientOptions, Completion, CompletionBackend, MockCompletionBackend, OpenAiClient, TokenUsage,
};
pub use config::ChatConfig;
pub use credential::Credential;
pub use error::{ChatError, Result};
pub use runtime::ChatRuntime;
