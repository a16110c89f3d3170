// src/services/conversation.rs
use crate::message::{Message, Role};

pub const DEFAULT_SYSTEM_PROMPT: &str = "You are Dachikou, a warm, patient elderly companion.";

/// In-memory transcript for the terminal chat. Lives as long as the process.
#[derive(Clone, Debug)]
pub struct Conversation {
    messages: Vec<Message>,
}

impl Conversation {
    /// Start a transcript seeded with one system message.
    pub fn new(system_prompt: impl Into<String>) -> Self {
        Self { messages: vec![Message::system(system_prompt)] }
    }

    // Append a turn and return the new length.
    pub fn push(&mut self, role: Role, content: impl Into<String>) -> usize {
        self.messages.push(Message::new(role, content));
        self.messages.len()
    }

    pub fn push_user(&mut self, content: impl Into<String>) -> usize {
        self.push(Role::User, content)
    }

    pub fn push_assistant(&mut self, content: impl Into<String>) -> usize {
        self.push(Role::Assistant, content)
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// Never true: the system message is always there.
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

impl Default for Conversation {
    fn default() -> Self {
        Self::new(DEFAULT_SYSTEM_PROMPT)
    }
}

/// `exit` or `quit`, any case, surrounding whitespace ignored.
pub fn is_exit_command(input: &str) -> bool {
    let word = input.trim();
    word.eq_ignore_ascii_case("exit") || word.eq_ignore_ascii_case("quit")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn basic_conversation_flow() {
        let mut convo = Conversation::default();
        assert_eq!(convo.len(), 1);
        assert_eq!(convo.messages()[0], Message::system(DEFAULT_SYSTEM_PROMPT));

        assert_eq!(convo.push_user("hello"), 2);
        assert_eq!(convo.push_assistant("hi there"), 3);
        assert_eq!(convo.messages()[2].role, Role::Assistant);
        assert!(!convo.is_empty());
    }

    #[test]
    fn exit_words() {
        assert!(is_exit_command("exit"));
        assert!(is_exit_command("  QUIT \n"));
        assert!(!is_exit_command("exit now"));
        assert!(!is_exit_command(""));
    }
}
