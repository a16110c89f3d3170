//! ElevenLabs text-to-speech.
//!
//! Speech is best-effort: [`SpeechSynthesizer::synthesize`] hands back
//! base64 audio or nothing, and every failure stays inside this module.

use async_trait::async_trait;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use reqwest::{Client, StatusCode};
use serde::Serialize;
use thiserror::Error;

use crate::config::SpeechConfig;

pub const VOICE_STABILITY: f32 = 0.4;
pub const VOICE_SIMILARITY_BOOST: f32 = 0.75;

#[async_trait]
pub trait SpeechSynthesizer: Send + Sync {
    /// Base64-encoded audio for `text`, or `None` when speech is disabled
    /// or the provider could not deliver.
    async fn synthesize(&self, text: &str) -> Option<String>;
}

#[derive(Debug, Error)]
enum SpeechError {
    #[error("text-to-speech request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("text-to-speech returned {0}")]
    Status(StatusCode),
}

#[derive(Serialize)]
struct SpeechRequest<'a> {
    text: &'a str,
    model_id: &'a str,
    voice_settings: VoiceSettings,
}

#[derive(Serialize)]
struct VoiceSettings {
    stability: f32,
    similarity_boost: f32,
}

#[derive(Debug, Clone)]
pub struct ElevenLabsClient {
    http: Client,
    api_key: Option<String>,
    voice_id: Option<String>,
    model_id: String,
    base_url: String,
}

impl ElevenLabsClient {
    pub fn new(config: &SpeechConfig) -> Result<Self, reqwest::Error> {
        let http = Client::builder().timeout(config.timeout).build()?;
        Ok(Self {
            http,
            api_key: config.api_key.clone(),
            voice_id: config.voice_id.clone(),
            model_id: config.model_id.clone(),
            base_url: config.base_url.trim_end_matches('/').to_owned(),
        })
    }

    /// Both the key and the voice are present.
    pub fn is_configured(&self) -> bool {
        self.api_key.is_some() && self.voice_id.is_some()
    }

    async fn fetch_audio(&self, api_key: &str, voice_id: &str, text: &str) -> Result<Vec<u8>, SpeechError> {
        let url = format!("{}/v1/text-to-speech/{}", self.base_url, voice_id);
        let payload = SpeechRequest {
            text,
            model_id: &self.model_id,
            voice_settings: VoiceSettings {
                stability: VOICE_STABILITY,
                similarity_boost: VOICE_SIMILARITY_BOOST,
            },
        };

        let resp = self
            .http
            .post(&url)
            .header("xi-api-key", api_key)
            .header("accept", "audio/mpeg")
            .json(&payload)
            .send()
            .await?;

        if !resp.status().is_success() {
            return Err(SpeechError::Status(resp.status()));
        }

        Ok(resp.bytes().await?.to_vec())
    }
}

#[async_trait]
impl SpeechSynthesizer for ElevenLabsClient {
    async fn synthesize(&self, text: &str) -> Option<String> {
        let (Some(api_key), Some(voice_id)) = (self.api_key.as_deref(), self.voice_id.as_deref()) else {
            return None;
        };
        if text.is_empty() {
            return None;
        }

        match self.fetch_audio(api_key, voice_id, text).await {
            Ok(audio) => {
                tracing::debug!(bytes = audio.len(), "synthesized reply audio");
                Some(STANDARD.encode(&audio))
            }
            Err(e) => {
                tracing::warn!(error = %e, "speech synthesis skipped");
                None
            }
        }
    }
}
