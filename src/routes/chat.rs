use axum::{
    extract::State,
    Json,
};
use crate::{
    message::{ChatRequest, ChatResponse},
    state::SharedState,
    services::chatbot::respond,
    error::AppError,
};

pub async fn chat_handler(
    State(state): State<SharedState>,
    Json(payload): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, AppError> {
    let response = respond(
        state.completion.as_ref(),
        state.speech.as_deref(),
        &state.default_model,
        payload,
    )
    .await?;

    Ok(Json(response))
}
