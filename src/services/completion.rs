//! Language model client: OpenAI Responses API.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::OpenAiConfig;
use crate::message::Message;

#[derive(Debug, Error)]
pub enum CompletionError {
    #[error("language model request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("language model returned {status}: {message}")]
    Api { status: StatusCode, message: String },

    #[error("malformed language model response: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Anything that can turn a conversation into a single reply.
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    /// Returns the provider's raw output text, or an empty string when it
    /// produced none.
    async fn complete(&self, model: &str, messages: &[Message]) -> Result<String, CompletionError>;
}

#[derive(Debug, Clone)]
pub struct OpenAiClient {
    http: Client,
    api_key: String,
    base_url: String,
}

#[derive(Serialize)]
struct ResponsesRequest<'a> {
    model: &'a str,
    input: &'a [Message],
}

#[derive(Debug, Default, Deserialize)]
struct ResponsesBody {
    #[serde(default)]
    output_text: Option<String>,
    #[serde(default)]
    output: Vec<OutputItem>,
}

#[derive(Debug, Deserialize)]
struct OutputItem {
    #[serde(default)]
    content: Vec<ContentPart>,
}

#[derive(Debug, Deserialize)]
struct ContentPart {
    #[serde(rename = "type", default)]
    kind: String,
    #[serde(default)]
    text: Option<String>,
}

impl ResponsesBody {
    fn into_text(self) -> String {
        if let Some(text) = self.output_text {
            return text;
        }
        self.output
            .into_iter()
            .flat_map(|item| item.content)
            .filter(|part| part.kind == "output_text")
            .filter_map(|part| part.text)
            .collect()
    }
}

impl OpenAiClient {
    pub fn new(config: &OpenAiConfig) -> Result<Self, CompletionError> {
        let http = Client::builder().timeout(config.timeout).build()?;
        Ok(Self {
            http,
            api_key: config.api_key.clone(),
            base_url: config.base_url.trim_end_matches('/').to_owned(),
        })
    }
}

#[async_trait]
impl CompletionProvider for OpenAiClient {
    async fn complete(&self, model: &str, messages: &[Message]) -> Result<String, CompletionError> {
        let url = format!("{}/responses", self.base_url);
        tracing::debug!(%model, turns = messages.len(), "requesting completion");

        let resp = self
            .http
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&ResponsesRequest { model, input: messages })
            .send()
            .await?;

        let status = resp.status();
        let body = resp.text().await?;

        if !status.is_success() {
            return Err(CompletionError::Api {
                status,
                message: api_error_message(&body),
            });
        }

        let parsed: ResponsesBody = serde_json::from_str(&body)?;
        Ok(parsed.into_text())
    }
}

/// Pull `error.message` out of an error body, falling back to the raw text.
fn api_error_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v["error"]["message"].as_str().map(String::from))
        .unwrap_or_else(|| body.trim().to_owned())
}
