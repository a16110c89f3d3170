use std::sync::Arc;

use anyhow::Context;
use tower_http::cors::CorsLayer;
use tracing_subscriber::EnvFilter;

use chat_relay::{
    config::Config,
    routes,
    services::{completion::OpenAiClient, speech::ElevenLabsClient},
    state::AppState,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,tower_http=debug")),
        )
        .init();

    let config = Config::from_env()?;

    let completion = OpenAiClient::new(&config.openai).context("building language model client")?;
    let mut state = AppState::new(Arc::new(completion), config.openai.default_model.clone());

    if config.tts_enabled {
        let speech = ElevenLabsClient::new(&config.speech).context("building speech client")?;
        if !speech.is_configured() {
            tracing::info!("ELEVENLABS_API_KEY or ELEVENLABS_VOICE_ID unset, replies will have no audio");
        }
        state = state.with_speech(Arc::new(speech));
    } else {
        tracing::info!("speech disabled by TTS_ENABLED");
    }

    let static_dir = config.static_dir.is_dir().then_some(config.static_dir.as_path());
    if let Some(dir) = static_dir {
        tracing::info!(dir = %dir.display(), "serving frontend");
    }

    let app = routes::create_router(static_dir)
        .with_state(Arc::new(state))
        .layer(CorsLayer::very_permissive());

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("binding {}", config.bind_addr))?;

    tracing::info!("chat relay listening on http://{}", config.bind_addr);
    axum::serve(listener, app).await?;
    Ok(())
}
