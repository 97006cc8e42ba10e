use axum::{Json, extract::State};
use pawguide_shared::{AppError, ChatRequest, ChatResponse, ErrorBody};

use crate::utils::AppState;

/// Answer the latest user message of a conversation
#[utoipa::path(
  post,
  path = "/api/chat",
  request_body = ChatRequest,
  responses(
    (status = 200, description = "Assistant reply, or a refusal for off-topic questions", body = ChatResponse),
    (status = 400, description = "No user message found", body = ErrorBody),
    (status = 500, description = "The model call failed", body = ErrorBody)
  )
)]
#[axum::debug_handler]
pub async fn chat(
  State(state): State<AppState>,
  Json(payload): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, AppError> {
  state.chat.respond(&payload).await.map(Json)
}
