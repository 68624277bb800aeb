use axum::{extract::State, response::Json};
use serde_json::json;

use crate::{
    errors::{AppError, Result},
    handlers::AppState,
    middleware::auth::AuthenticatedUser,
    models::SendMessageRequest,
};

#[utoipa::path(
    post,
    path = "/api/v1/chat/send",
    request_body = SendMessageRequest,
    responses(
        (status = 200, description = "Message appended to the shared store"),
        (status = 400, description = "Missing chatId or content"),
        (status = 401, description = "No valid bearer token"),
    ),
    tag = "chat"
)]
pub async fn send_message(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Json(body): Json<serde_json::Value>,
) -> Result<Json<serde_json::Value>> {
    let chat_id = body
        .get("chatId")
        .and_then(|v| v.as_str())
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| AppError::Validation("chatId is required".to_string()))?;
    let content = body
        .get("content")
        .and_then(|v| v.as_str())
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| AppError::Validation("content is required".to_string()))?;

    state
        .chat
        .send(chat_id, &user.uid, user.display_name.clone(), content)
        .await?;
    state.metrics.record_chat_message();

    Ok(Json(json!({ "success": true })))
}
