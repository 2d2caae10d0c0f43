//! Error types for the prompt manager crate.

use crate::message::Role;

/// Errors that can occur while declaring or formatting prompt templates.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PromptError {
    /// Template source was empty.
    #[error("template for {0} role is empty")]
    EmptyTemplate(Role),

    /// Template source has malformed placeholder syntax.
    #[error("malformed template at byte {position}: {reason}")]
    MalformedTemplate {
        /// Byte offset of the offending delimiter in the template source.
        position: usize,
        /// Human readable description of the problem.
        reason: String,
    },

    /// A placeholder required by a template has no supplied value.
    #[error("missing value for placeholder '{name}' in {role} template")]
    MissingValue {
        /// Name of the unresolved placeholder.
        name: String,
        /// Role of the template that references it.
        role: Role,
    },

    /// A `name=value` pair could not be parsed.
    #[error("invalid placeholder value '{0}' (expected name=value)")]
    InvalidValue(String),

    /// Error reported by the template engine while rendering.
    #[error("template render error: {0}")]
    TemplateRenderError(String),
}

impl PromptError {
    pub(crate) fn malformed(position: usize, reason: impl Into<String>) -> Self {
        Self::MalformedTemplate {
            position,
            reason: reason.into(),
        }
    }
}

/// Result type alias for prompt manager operations.
pub type Result<T> = std::result::Result<T, PromptError>;
