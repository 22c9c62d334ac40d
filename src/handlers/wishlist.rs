use axum::{
    extract::{Path, Query, State},
    Json,
};
use uuid::Uuid;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::models::wish::{
    wishes_with_status, CreateWishRequest, ToggleWishResponse, WishlistItem, WishlistQuery,
};
use crate::AppState;

pub async fn list_wishlist(
    State(state): State<AppState>,
    Query(query): Query<WishlistQuery>,
) -> AppResult<Json<Vec<WishlistItem>>> {
    let wishes = state.store.list_wishes().await?;

    let wishes = match query.status {
        Some(status) => wishes_with_status(&wishes, status),
        None => wishes,
    };

    Ok(Json(wishes))
}

pub async fn create_wish(
    State(state): State<AppState>,
    Json(body): Json<CreateWishRequest>,
) -> AppResult<Json<WishlistItem>> {
    body.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let item = body.item.trim();
    if item.is_empty() {
        return Err(AppError::Validation("Wish text is required".into()));
    }

    let wish = state.store.insert_wish(item.to_string()).await?;

    Ok(Json(wish))
}

/// Flip a wish between active and fulfilled. The response says whether this
/// toggle newly fulfilled it, so the client knows when to celebrate.
pub async fn toggle_wish(
    State(state): State<AppState>,
    Path(wish_id): Path<Uuid>,
) -> AppResult<Json<ToggleWishResponse>> {
    let wish = state
        .store
        .toggle_wish(wish_id)
        .await?
        .ok_or(AppError::NotFound("Wish not found".into()))?;

    let just_fulfilled = wish.is_fulfilled;
    if just_fulfilled {
        tracing::info!(wish = %wish.item, "Wish fulfilled");
    }

    Ok(Json(ToggleWishResponse {
        wish,
        just_fulfilled,
    }))
}

/// Idempotent: deleting a wish that is already gone still succeeds.
pub async fn delete_wish(
    State(state): State<AppState>,
    Path(wish_id): Path<Uuid>,
) -> AppResult<Json<serde_json::Value>> {
    state.store.delete_wish(wish_id).await?;

    Ok(Json(serde_json::json!({ "deleted": true, "id": wish_id })))
}
