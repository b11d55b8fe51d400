//! Conversation-related types.

use std::fmt::{self, Display};
use std::str::FromStr;

use ai_chatbot_model::ModelMessage;
use serde::{Deserialize, Serialize};

use crate::Error;

/// Who authored a message.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Instructions for the model.
    System,
    /// The person chatting.
    User,
    /// The model.
    Assistant,
}

impl Role {
    /// Returns the wire name of the role.
    #[inline]
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::System => "system",
            Role::User => "user",
            Role::Assistant => "assistant",
        }
    }
}

impl Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "system" => Ok(Role::System),
            "user" => Ok(Role::User),
            "assistant" => Ok(Role::Assistant),
            _ => Err(Error::invalid_role().with_reason(format!(
                "`{s}` is not one of system, user, assistant"
            ))),
        }
    }
}

/// A role-tagged message. Messages are never changed once created.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Message {
    /// The author of the message.
    pub role: Role,
    /// The text of the message.
    pub content: String,
}

impl Message {
    /// Creates a message.
    #[inline]
    pub fn new<S: Into<String>>(role: Role, content: S) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }

    pub(crate) fn to_model_message(&self) -> ModelMessage {
        let content = self.content.clone();
        match self.role {
            Role::System => ModelMessage::System(content),
            Role::User => ModelMessage::User(content),
            Role::Assistant => ModelMessage::Assistant(content),
        }
    }
}

/// The ordered history of one conversation.
///
/// Messages can only be appended, the order is chronological.
#[derive(Clone, Default, Debug, PartialEq, Eq)]
pub struct Transcript {
    messages: Vec<Message>,
}

impl Transcript {
    /// Appends a message.
    #[inline]
    pub fn push(&mut self, message: Message) {
        self.messages.push(message);
    }

    /// Returns all messages, oldest first.
    #[inline]
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// Returns the number of messages.
    #[inline]
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// Returns `true` if nothing has been said yet.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Returns the most recent message.
    #[inline]
    pub fn last(&self) -> Option<&Message> {
        self.messages.last()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorKind;

    #[test]
    fn test_parse_role() {
        assert_eq!("user".parse::<Role>().unwrap(), Role::User);
        assert_eq!("assistant".parse::<Role>().unwrap(), Role::Assistant);
        assert_eq!("system".parse::<Role>().unwrap(), Role::System);

        let err = "moderator".parse::<Role>().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidRole);
        let err = "User".parse::<Role>().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidRole);
    }

    #[test]
    fn test_message_json_shape() {
        let message = Message::new(Role::Assistant, "Salam");
        let json = serde_json::to_value(&message).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "role": "assistant", "content": "Salam" })
        );

        let err = serde_json::from_str::<Message>(
            r#"{ "role": "moderator", "content": "hi" }"#,
        );
        assert!(err.is_err());
    }

    #[test]
    fn test_transcript_keeps_order() {
        let mut transcript = Transcript::default();
        assert!(transcript.is_empty());
        transcript.push(Message::new(Role::User, "first"));
        transcript.push(Message::new(Role::Assistant, ""));
        transcript.push(Message::new(Role::User, "third"));

        let contents: Vec<_> = transcript
            .messages()
            .iter()
            .map(|m| m.content.as_str())
            .collect();
        assert_eq!(contents, ["first", "", "third"]);
        assert_eq!(transcript.last().unwrap().role, Role::User);
    }
}
