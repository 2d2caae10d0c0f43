//! Role-tagged messages and the conversations built from them.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Conversational position of a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Establishes the assistant's persona and constraints.
    System,
    /// The request being made.
    User,
    /// A reply produced by the model.
    Assistant,
}

impl Role {
    /// Returns the wire name of the role.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::System => "system",
            Role::User => "user",
            Role::Assistant => "assistant",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single role-tagged message with fully substituted content.
///
/// # Examples
///
/// ```
/// use promptchat_pm::{Message, Role};
///
/// let msg = Message::system("You write about cars.");
/// assert_eq!(msg.role(), Role::System);
/// assert_eq!(msg.content(), "You write about cars.");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    role: Role,
    content: String,
}

impl Message {
    /// Creates a message with the given role and content.
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }

    /// Creates a system message.
    pub fn system(content: impl Into<String>) -> Self {
        Self::new(Role::System, content)
    }

    /// Creates a user message.
    pub fn user(content: impl Into<String>) -> Self {
        Self::new(Role::User, content)
    }

    /// Creates an assistant message.
    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(Role::Assistant, content)
    }

    /// Role of the message.
    pub fn role(&self) -> Role {
        self.role
    }

    /// Text content of the message.
    pub fn content(&self) -> &str {
        &self.content
    }
}

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.role, self.content)
    }
}

/// Ordered sequence of messages sent as one request.
///
/// Serializes as a plain list of `{role, content}` objects.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Conversation {
    messages: Vec<Message>,
}

impl Conversation {
    /// Creates a conversation from an ordered list of messages.
    pub fn new(messages: Vec<Message>) -> Self {
        Self { messages }
    }

    /// Returns the messages in order.
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// Number of messages in the conversation.
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// Whether the conversation holds no messages.
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Iterates over the messages in order.
    pub fn iter(&self) -> std::slice::Iter<'_, Message> {
        self.messages.iter()
    }
}

impl From<Vec<Message>> for Conversation {
    fn from(messages: Vec<Message>) -> Self {
        Self::new(messages)
    }
}

impl<'a> IntoIterator for &'a Conversation {
    type Item = &'a Message;
    type IntoIter = std::slice::Iter<'a, Message>;

    fn into_iter(self) -> Self::IntoIter {
        self.messages.iter()
    }
}

impl fmt::Display for Conversation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, msg) in self.messages.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{msg}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_serializes_lowercase() {
        let json = serde_json::to_string(&Role::Assistant).unwrap();
        assert_eq!(json, "\"assistant\"");
    }

    #[test]
    fn test_conversation_serializes_as_list() {
        let conv = Conversation::new(vec![Message::system("a"), Message::user("b")]);
        let json = serde_json::to_value(&conv).unwrap();
        assert_eq!(
            json,
            serde_json::json!([
                {"role": "system", "content": "a"},
                {"role": "user", "content": "b"}
            ])
        );
    }

    #[test]
    fn test_message_deserializes_through_private_fields() {
        let msg: Message =
            serde_json::from_str(r#"{"role": "assistant", "content": "hola"}"#).unwrap();
        assert_eq!(msg.role(), Role::Assistant);
        assert_eq!(msg.content(), "hola");
        assert_eq!(msg, Message::assistant("hola"));
    }

    #[test]
    fn test_conversation_display() {
        let conv = Conversation::new(vec![Message::system("a"), Message::user("b")]);
        assert_eq!(conv.to_string(), "[system] a\n[user] b");
    }
}
