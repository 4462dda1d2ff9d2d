//! Medical chatbot endpoints

use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};
use mindease_common::ChatMessage;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::services::chatbot::DISCLAIMER;
use crate::{ApiResult, AppState};

/// Request body for one chat turn
#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub message: String,
}

/// Assistant reply for one chat turn
#[derive(Debug, Serialize)]
pub struct ChatReply {
    pub reply: String,
}

/// Conversation so far
#[derive(Debug, Serialize)]
pub struct ChatHistoryResponse {
    pub messages: Vec<ChatMessage>,
    pub disclaimer: &'static str,
}

/// GET /api/sessions/:id/chat
pub async fn get_history(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<ChatHistoryResponse>> {
    let session = state.session(id).await?;
    let session = session.lock().await;

    Ok(Json(ChatHistoryResponse {
        messages: session.chat.messages().to_vec(),
        disclaimer: DISCLAIMER,
    }))
}

/// POST /api/sessions/:id/chat
///
/// **Request:** `{"message": "..."}`
/// **Response:** `{"reply": "..."}`
pub async fn send_message(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<ChatRequest>,
) -> ApiResult<Json<ChatReply>> {
    let session = state.session(id).await?;
    let mut session = session.lock().await;

    let result = state.chatbot.reply(&mut session.chat, &request.message).await;
    state
        .finish(result)
        .await
        .map(|reply| Json(ChatReply { reply }))
}

/// Build chatbot routes
pub fn chat_routes() -> Router<AppState> {
    Router::new().route("/api/sessions/:id/chat", get(get_history).post(send_message))
}
