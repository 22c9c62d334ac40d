use axum::{extract::State, Json};
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::models::message::{CreateMessageRequest, Message};
use crate::AppState;

/// Oldest first, so the newest message renders at the bottom of the chat.
pub async fn list_messages(State(state): State<AppState>) -> AppResult<Json<Vec<Message>>> {
    let messages = state.store.list_messages().await?;
    Ok(Json(messages))
}

pub async fn create_message(
    State(state): State<AppState>,
    Json(body): Json<CreateMessageRequest>,
) -> AppResult<Json<Message>> {
    body.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let content = body.content.trim();
    if content.is_empty() {
        return Err(AppError::Validation("Message content is required".into()));
    }

    let message = state
        .store
        .insert_message(body.role, content.to_string())
        .await?;

    Ok(Json(message))
}
