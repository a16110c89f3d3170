#![allow(dead_code)]

use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use chat_relay::message::Message;
use chat_relay::services::completion::{CompletionError, CompletionProvider};
use chat_relay::services::speech::SpeechSynthesizer;
use reqwest::StatusCode;

/// Language model double that records every call.
pub struct StubCompletion {
    reply: String,
    failure: Option<(StatusCode, String)>,
    calls: AtomicUsize,
    models: Mutex<Vec<String>>,
    inputs: Mutex<Vec<Vec<Message>>>,
}

impl StubCompletion {
    pub fn replying(reply: &str) -> Self {
        Self {
            reply: reply.to_string(),
            failure: None,
            calls: AtomicUsize::new(0),
            models: Mutex::new(Vec::new()),
            inputs: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(status: StatusCode, message: &str) -> Self {
        Self {
            failure: Some((status, message.to_string())),
            ..Self::replying("")
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_model(&self) -> Option<String> {
        self.models.lock().unwrap().last().cloned()
    }

    pub fn last_input(&self) -> Option<Vec<Message>> {
        self.inputs.lock().unwrap().last().cloned()
    }
}

#[async_trait]
impl CompletionProvider for StubCompletion {
    async fn complete(&self, model: &str, messages: &[Message]) -> Result<String, CompletionError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.models.lock().unwrap().push(model.to_string());
        self.inputs.lock().unwrap().push(messages.to_vec());

        match &self.failure {
            Some((status, message)) => Err(CompletionError::Api {
                status: *status,
                message: message.clone(),
            }),
            None => Ok(self.reply.clone()),
        }
    }
}

/// Speech double returning a fixed outcome.
pub struct StubSpeech {
    audio: Option<String>,
    calls: AtomicUsize,
    texts: Mutex<Vec<String>>,
}

impl StubSpeech {
    pub fn returning(audio: Option<&str>) -> Self {
        Self {
            audio: audio.map(String::from),
            calls: AtomicUsize::new(0),
            texts: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_text(&self) -> Option<String> {
        self.texts.lock().unwrap().last().cloned()
    }
}

#[async_trait]
impl SpeechSynthesizer for StubSpeech {
    async fn synthesize(&self, text: &str) -> Option<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.texts.lock().unwrap().push(text.to_string());
        self.audio.clone()
    }
}

/// Serve `app` on an ephemeral local port and return its base URL.
pub async fn spawn_server(app: axum::Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}
