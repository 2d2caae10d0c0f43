//! Chat prompt combining several role-tagged templates.

use crate::{
    compose::compose,
    engine::PromptEngine,
    error::Result,
    message::{Conversation, Role},
    template::PromptTemplate,
    values::PromptValues,
};

/// An ordered list of role-tagged templates formatted as one conversation.
///
/// # Examples
///
/// ```
/// use promptchat_pm::{ChatPrompt, PromptEngine, PromptTemplate, PromptValues, Role};
///
/// let prompt = ChatPrompt::new()
///     .push(PromptTemplate::declare(Role::System, "Coches de tipo {tipo}")?)
///     .push(PromptTemplate::declare(Role::User, "Motor {motor}")?);
/// assert_eq!(prompt.input_variables(), ["tipo", "motor"]);
///
/// let values = PromptValues::new().with("tipo", "japoneses").with("motor", "diesel");
/// let conversation = prompt.format_messages(&values)?;
/// assert_eq!(conversation.messages()[0].role(), Role::System);
/// # Ok::<(), promptchat_pm::PromptError>(())
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChatPrompt {
    templates: Vec<PromptTemplate>,
    variables: Vec<String>,
}

impl ChatPrompt {
    /// Creates an empty chat prompt.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a chat prompt from templates in conversation order.
    #[must_use]
    pub fn from_messages(templates: Vec<PromptTemplate>) -> Self {
        templates.into_iter().fold(Self::new(), Self::push)
    }

    /// Appends a template, returning `self` for chaining.
    #[must_use]
    pub fn push(mut self, template: PromptTemplate) -> Self {
        for name in template.input_variables() {
            if !self.variables.contains(name) {
                self.variables.push(name.clone());
            }
        }
        self.templates.push(template);
        self
    }

    /// Templates in conversation order.
    pub fn templates(&self) -> &[PromptTemplate] {
        &self.templates
    }

    /// The first template with the given role, if any.
    pub fn template_for(&self, role: Role) -> Option<&PromptTemplate> {
        self.templates.iter().find(|t| t.role() == role)
    }

    /// Number of templates.
    pub fn len(&self) -> usize {
        self.templates.len()
    }

    /// Whether the prompt holds no templates.
    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }
}

impl PromptEngine for ChatPrompt {
    /// Union of every template's variables, in order of first appearance.
    fn input_variables(&self) -> &[String] {
        &self.variables
    }

    fn format_messages(&self, values: &PromptValues) -> Result<Conversation> {
        compose(&self.templates, values)
    }
}
