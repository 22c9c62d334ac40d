use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

use crate::models::role::Role;

/// A chat message between the two partners. Append-only; listed in ascending
/// creation order so the newest message renders last.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Message {
    pub id: Uuid,
    pub role: Role,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateMessageRequest {
    pub role: Role,
    #[validate(length(max = 2000, message = "Message too long"))]
    pub content: String,
}
