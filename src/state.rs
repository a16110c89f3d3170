// src/state.rs
use std::sync::Arc;

use crate::services::completion::CompletionProvider;
use crate::services::speech::SpeechSynthesizer;

pub type SharedState = Arc<AppState>;

/// Built once at startup and never mutated.
pub struct AppState {
    pub completion: Arc<dyn CompletionProvider>,
    /// `None` switches the speech step off entirely.
    pub speech: Option<Arc<dyn SpeechSynthesizer>>,
    pub default_model: String,
}

impl AppState {
    pub fn new(completion: Arc<dyn CompletionProvider>, default_model: impl Into<String>) -> Self {
        Self {
            completion,
            speech: None,
            default_model: default_model.into(),
        }
    }

    pub fn with_speech(mut self, speech: Arc<dyn SpeechSynthesizer>) -> Self {
        self.speech = Some(speech);
        self
    }
}
