//! Composition of role-tagged templates into a conversation.

use crate::{
    error::Result, message::Conversation, template::PromptTemplate, values::PromptValues,
};

/// Formats each template in order and collects the messages.
///
/// Produces exactly one message per template, preserving input order. Values
/// not referenced by any template are ignored. The function is pure: equal
/// inputs always yield equal conversations.
///
/// # Errors
///
/// Fails with [`PromptError::MissingValue`](crate::PromptError::MissingValue)
/// for the first unresolved placeholder, scanning templates in order.
///
/// # Examples
///
/// ```
/// use promptchat_pm::{compose, PromptTemplate, PromptValues, Role};
///
/// let templates = [
///     PromptTemplate::declare(Role::System, "Coches de tipo {tipo}")?,
///     PromptTemplate::declare(Role::User, "Motor {motor}")?,
/// ];
/// let values = PromptValues::new().with("tipo", "japoneses").with("motor", "diesel");
///
/// let conversation = compose(&templates, &values)?;
/// assert_eq!(conversation.len(), 2);
/// assert_eq!(conversation.messages()[1].content(), "Motor diesel");
/// # Ok::<(), promptchat_pm::PromptError>(())
/// ```
pub fn compose(templates: &[PromptTemplate], values: &PromptValues) -> Result<Conversation> {
    templates
        .iter()
        .map(|template| template.format(values))
        .collect::<Result<Vec<_>>>()
        .map(Conversation::new)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{PromptError, Role};

    fn templates() -> Vec<PromptTemplate> {
        vec![
            PromptTemplate::declare(Role::System, "s {a}").unwrap(),
            PromptTemplate::declare(Role::User, "u {b}").unwrap(),
            PromptTemplate::declare(Role::Assistant, "a {a} {c}").unwrap(),
        ]
    }

    #[test]
    fn test_compose_preserves_order() {
        let values = PromptValues::new().with("a", "1").with("b", "2").with("c", "3");
        let conv = compose(&templates(), &values).unwrap();
        let roles: Vec<_> = conv.iter().map(|m| m.role()).collect();
        assert_eq!(roles, vec![Role::System, Role::User, Role::Assistant]);
        let contents: Vec<_> = conv.iter().map(|m| m.content()).collect();
        assert_eq!(contents, vec!["s 1", "u 2", "a 1 3"]);
    }

    #[test]
    fn test_compose_ignores_extra_values() {
        let values = PromptValues::new()
            .with("a", "1")
            .with("b", "2")
            .with("c", "3")
            .with("unused", "x");
        assert!(compose(&templates(), &values).is_ok());
    }

    #[test]
    fn test_compose_reports_first_missing_value() {
        let values = PromptValues::new().with("a", "1");
        let err = compose(&templates(), &values).unwrap_err();
        assert_eq!(
            err,
            PromptError::MissingValue {
                name: "b".to_string(),
                role: Role::User,
            }
        );
    }

    #[test]
    fn test_compose_is_deterministic() {
        let values = PromptValues::new().with("a", "1").with("b", "2").with("c", "3");
        let first = compose(&templates(), &values).unwrap();
        let second = compose(&templates(), &values).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_compose_empty_list() {
        let conv = compose(&[], &PromptValues::new()).unwrap();
        assert!(conv.is_empty());
    }
}
