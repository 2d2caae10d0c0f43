//! Core prompt engine trait definition.

use crate::{error::Result, message::Conversation, values::PromptValues};

/// Trait for anything that turns placeholder values into messages.
///
/// Implemented by single templates (one message) and by
/// [`ChatPrompt`](crate::ChatPrompt) (one message per template, in order).
///
/// # Examples
///
/// ```
/// use promptchat_pm::{ChatPrompt, PromptEngine, PromptTemplate, PromptValues, Role};
///
/// fn describe(engine: &impl PromptEngine) -> String {
///     engine.input_variables().join(", ")
/// }
///
/// let prompt = ChatPrompt::from_messages(vec![
///     PromptTemplate::declare(Role::System, "Tema: {tema}")?,
///     PromptTemplate::declare(Role::User, "Largo: {largo}")?,
/// ]);
/// assert_eq!(describe(&prompt), "tema, largo");
/// # Ok::<(), promptchat_pm::PromptError>(())
/// ```
pub trait PromptEngine {
    /// Names of every placeholder that must be supplied.
    fn input_variables(&self) -> &[String];

    /// Substitutes placeholders and returns the resulting messages.
    ///
    /// # Errors
    ///
    /// Returns [`PromptError::MissingValue`](crate::PromptError::MissingValue)
    /// if any required placeholder has no value, or a render error from the
    /// template engine.
    fn format_messages(&self, values: &PromptValues) -> Result<Conversation>;
}
