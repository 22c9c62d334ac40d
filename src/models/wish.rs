use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

/// A free-text wish. Only `is_fulfilled` is mutable in place; everything else
/// is fixed at insert time.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct WishlistItem {
    pub id: Uuid,
    pub item: String,
    pub is_fulfilled: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateWishRequest {
    #[validate(length(max = 280, message = "Wish too long"))]
    pub item: String,
}

#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum WishStatus {
    Active,
    Fulfilled,
}

#[derive(Debug, Deserialize)]
pub struct WishlistQuery {
    pub status: Option<WishStatus>,
}

#[derive(Debug, Serialize)]
pub struct ToggleWishResponse {
    #[serde(flatten)]
    pub wish: WishlistItem,
    /// True only when this toggle moved the wish from active to fulfilled,
    /// so the client knows when to celebrate.
    pub just_fulfilled: bool,
}

/// Wishes matching a status, order preserved.
pub fn wishes_with_status(items: &[WishlistItem], status: WishStatus) -> Vec<WishlistItem> {
    items
        .iter()
        .filter(|w| match status {
            WishStatus::Active => !w.is_fulfilled,
            WishStatus::Fulfilled => w.is_fulfilled,
        })
        .cloned()
        .collect()
}
