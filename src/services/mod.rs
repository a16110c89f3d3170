pub mod chatbot;
pub mod completion;
pub mod conversation;
pub mod speech;
