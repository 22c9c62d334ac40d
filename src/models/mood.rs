use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

use crate::models::role::Role;

/// The fixed set of (emoji, label) pairs a mood submission may use.
pub const MOOD_PALETTE: [(&str, &str); 8] = [
    ("😊", "Happy"),
    ("😍", "In Love"),
    ("😌", "Peaceful"),
    ("😴", "Tired"),
    ("😢", "Sad"),
    ("😤", "Frustrated"),
    ("🥰", "Grateful"),
    ("😎", "Confident"),
];

/// True when the pair matches a palette entry exactly.
pub fn is_palette_mood(emoji: &str, label: &str) -> bool {
    MOOD_PALETTE
        .iter()
        .any(|(e, l)| *e == emoji && *l == label)
}

/// A logged mood. Immutable once created: the API only inserts and lists.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct MoodEntry {
    pub id: Uuid,
    pub emoji: String,
    pub mood_label: String,
    pub notes: Option<String>,
    pub role: Role,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateMoodRequest {
    #[validate(length(max = 16, message = "Emoji too long"))]
    pub emoji: String,
    #[validate(length(max = 32, message = "Mood label too long"))]
    pub mood_label: String,
    #[validate(length(max = 2000, message = "Notes too long"))]
    pub notes: Option<String>,
    pub role: Role,
}

#[derive(Debug, Deserialize)]
pub struct MoodListQuery {
    pub role: Option<Role>,
}

#[derive(Debug, Serialize)]
pub struct PaletteEntry {
    pub emoji: &'static str,
    pub label: &'static str,
}

/// Moods logged by one partner, order preserved.
pub fn moods_for_role(moods: &[MoodEntry], role: Role) -> Vec<MoodEntry> {
    moods.iter().filter(|m| m.role == role).cloned().collect()
}
