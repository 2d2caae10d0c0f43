//! Prompt manager crate for promptchat.
//!
//! Declares role-tagged prompt templates, validates their placeholder syntax
//! up front and composes them into ordered conversations.
//!
//! # Examples
//!
//! ```
//! use promptchat_pm::{builtin, PromptEngine, PromptValues};
//!
//! let prompt = builtin::car_article_prompt()?;
//! let values = PromptValues::new()
//!     .with("tipo_coches", "japoneses")
//!     .with("tiempo_lectura", "10 min")
//!     .with("peticion_tipo_motor", "Hibrido enchufable");
//!
//! let conversation = prompt.format_messages(&values)?;
//! println!("{conversation}");
//! # Ok::<(), promptchat_pm::PromptError>(())
//! ```

pub mod builtin;
pub mod chat;
pub mod compose;
pub mod engine;
pub mod error;
pub mod message;
pub mod template;
pub mod values;

// Re-export public types for convenience
pub use chat::ChatPrompt;
pub use compose::compose;
pub use engine::PromptEngine;
pub use error::{PromptError, Result};
pub use message::{Conversation, Message, Role};
pub use template::{PromptTemplate, TemplateFormat};
pub use values::PromptValues;
