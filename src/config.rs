//! Process configuration, read from the environment once at startup.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

pub const DEFAULT_MODEL: &str = "gpt-5-nano";
pub const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_OPENAI_TIMEOUT: Duration = Duration::from_secs(60);

pub const DEFAULT_SPEECH_MODEL: &str = "eleven_turbo_v2";
pub const DEFAULT_ELEVENLABS_BASE_URL: &str = "https://api.elevenlabs.io";
/// Upper bound on a single text-to-speech call. Not configurable.
pub const SPEECH_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} is not set. Add it to your environment or .env file.")]
    Missing(&'static str),

    #[error("{var} has an invalid value: {value:?}")]
    Invalid { var: &'static str, value: String },
}

#[derive(Debug, Clone)]
pub struct Config {
    pub bind_addr: SocketAddr,
    /// Frontend directory served at `/` when it exists.
    pub static_dir: PathBuf,
    pub openai: OpenAiConfig,
    pub speech: SpeechConfig,
    /// Turns the text-to-speech step on or off for the whole service.
    pub tts_enabled: bool,
}

#[derive(Debug, Clone)]
pub struct OpenAiConfig {
    pub api_key: String,
    pub base_url: String,
    pub default_model: String,
    pub timeout: Duration,
}

/// ElevenLabs settings. Key and voice are optional; without both the
/// synthesizer never makes a call.
#[derive(Debug, Clone)]
pub struct SpeechConfig {
    pub api_key: Option<String>,
    pub voice_id: Option<String>,
    pub model_id: String,
    pub base_url: String,
    pub timeout: Duration,
}

impl Default for SpeechConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            voice_id: None,
            model_id: DEFAULT_SPEECH_MODEL.to_owned(),
            base_url: DEFAULT_ELEVENLABS_BASE_URL.to_owned(),
            timeout: SPEECH_TIMEOUT,
        }
    }
}

impl OpenAiConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_OPENAI_BASE_URL.to_owned(),
            default_model: DEFAULT_MODEL.to_owned(),
            timeout: DEFAULT_OPENAI_TIMEOUT,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a [`Config`] from an arbitrary variable source. Empty values
    /// count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_owned())
                .filter(|v| !v.is_empty())
        };

        let api_key = get("OPENAI_API_KEY").ok_or(ConfigError::Missing("OPENAI_API_KEY"))?;

        let openai = OpenAiConfig {
            api_key,
            base_url: get("OPENAI_BASE_URL")
                .unwrap_or_else(|| DEFAULT_OPENAI_BASE_URL.to_owned()),
            default_model: get("OPENAI_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_owned()),
            timeout: match get("OPENAI_TIMEOUT_SECS") {
                Some(v) => Duration::from_secs(parse("OPENAI_TIMEOUT_SECS", v)?),
                None => DEFAULT_OPENAI_TIMEOUT,
            },
        };

        let speech = SpeechConfig {
            api_key: get("ELEVENLABS_API_KEY"),
            voice_id: get("ELEVENLABS_VOICE_ID"),
            model_id: get("ELEVENLABS_MODEL_ID")
                .unwrap_or_else(|| DEFAULT_SPEECH_MODEL.to_owned()),
            base_url: get("ELEVENLABS_BASE_URL")
                .unwrap_or_else(|| DEFAULT_ELEVENLABS_BASE_URL.to_owned()),
            timeout: SPEECH_TIMEOUT,
        };

        let tts_enabled = match get("TTS_ENABLED") {
            Some(v) => parse_bool("TTS_ENABLED", v)?,
            None => true,
        };

        let host: IpAddr = match get("HOST") {
            Some(v) => parse("HOST", v)?,
            None => IpAddr::V4(Ipv4Addr::UNSPECIFIED),
        };
        let port: u16 = match get("PORT") {
            Some(v) => parse("PORT", v)?,
            None => 8000,
        };

        Ok(Self {
            bind_addr: SocketAddr::new(host, port),
            static_dir: get("STATIC_DIR").unwrap_or_else(|| "web".to_owned()).into(),
            openai,
            speech,
            tts_enabled,
        })
    }
}

fn parse<T: std::str::FromStr>(var: &'static str, value: String) -> Result<T, ConfigError> {
    value.parse().map_err(|_| ConfigError::Invalid { var, value })
}

fn parse_bool(var: &'static str, value: String) -> Result<bool, ConfigError> {
    match value.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::Invalid { var, value }),
    }
}
