use crate::{
    error::AppError,
    message::{ChatRequest, ChatResponse, Message},
    services::{completion::CompletionProvider, speech::SpeechSynthesizer},
};

pub const EMPTY_CONVERSATION: &str = "messages must not be empty";

/// Use the caller's model when it names one, otherwise `default`.
pub fn select_model<'a>(requested: Option<&'a str>, default: &'a str) -> &'a str {
    match requested.map(str::trim) {
        Some(m) if !m.is_empty() => m,
        _ => default,
    }
}

/// Ask the language model for the next turn. The reply comes back trimmed.
pub async fn primary_reply(
    provider: &dyn CompletionProvider,
    model: &str,
    messages: &[Message],
) -> Result<String, AppError> {
    if messages.is_empty() {
        return Err(AppError::BadRequest(EMPTY_CONVERSATION.to_string()));
    }

    let raw = provider.complete(model, messages).await?;
    Ok(raw.trim().to_string())
}

/// Validate, call the language model once, then try speech once.
///
/// Only the language model can fail the request.
pub async fn respond(
    provider: &dyn CompletionProvider,
    speech: Option<&dyn SpeechSynthesizer>,
    default_model: &str,
    request: ChatRequest,
) -> Result<ChatResponse, AppError> {
    let model = select_model(request.model.as_deref(), default_model);
    let reply = primary_reply(provider, model, &request.messages).await?;

    let audio_base64 = match speech {
        Some(tts) => tts.synthesize(&reply).await,
        None => None,
    };

    tracing::info!(
        %model,
        turns = request.messages.len(),
        reply_chars = reply.chars().count(),
        audio = audio_base64.is_some(),
        "chat reply ready"
    );

    Ok(ChatResponse { reply, audio_base64 })
}
