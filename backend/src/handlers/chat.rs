use std::sync::Arc;

use axum::{Json, extract::State};
use validator::Validate;

use crate::AppState;
use crate::models::{ChatRequest, ChatResponse};
use crate::utils::{ApiError, ApiResult};

/// Route one chat message and return the assistant's reply
#[utoipa::path(
    post,
    path = "/api/chat",
    request_body = ChatRequest,
    responses(
        (status = 200, description = "Assistant reply", body = ChatResponse),
        (status = 400, description = "Validation error"),
        (status = 502, description = "Completion provider error"),
        (status = 504, description = "Completion provider timeout"),
    ),
    tag = "Chat"
)]
pub async fn chat(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<ChatRequest>,
) -> ApiResult<Json<ChatResponse>> {
    payload
        .validate()
        .map_err(|e| ApiError::validation_error(e.to_string()))?;

    let mode = payload.mode();
    tracing::info!("[{}] {} -> dispatching", payload.session_id, mode.as_str());

    let response = state
        .chat_service
        .respond(&payload.session_id, &payload.prompt, mode)
        .await?;

    tracing::info!("[{}] {} -> {} chars", payload.session_id, mode.as_str(), response.len());
    Ok(Json(ChatResponse { response }))
}
