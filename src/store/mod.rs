//! Persistence boundary for the three shared tables.
//!
//! Handlers never touch the database directly; they go through [`CoupleStore`]
//! so tests can swap in [`memory::MemStore`]. The trait also owns the
//! change-notification primitive: every successful mutation publishes one
//! [`ChangeEvent`] naming the table that changed, and `/ws` subscribers
//! refetch the full list on each event. Events carry no row data.

pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use serde::Serialize;
use tokio::sync::broadcast;
use uuid::Uuid;

use crate::models::message::Message;
use crate::models::mood::MoodEntry;
use crate::models::role::Role;
use crate::models::wish::WishlistItem;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Table {
    Moods,
    Messages,
    Wishlist,
}

/// A row somewhere in `table` was inserted, updated, or deleted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ChangeEvent {
    pub table: Table,
}

#[derive(Debug, Clone)]
pub struct NewMood {
    pub emoji: String,
    pub mood_label: String,
    pub notes: Option<String>,
    pub role: Role,
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

pub type StoreResult<T> = Result<T, StoreError>;

#[async_trait]
pub trait CoupleStore: Send + Sync {
    /// All moods, newest first.
    async fn list_moods(&self) -> StoreResult<Vec<MoodEntry>>;
    async fn insert_mood(&self, mood: NewMood) -> StoreResult<MoodEntry>;

    /// All messages, oldest first.
    async fn list_messages(&self) -> StoreResult<Vec<Message>>;
    async fn insert_message(&self, role: Role, content: String) -> StoreResult<Message>;

    /// All wishes, newest first.
    async fn list_wishes(&self) -> StoreResult<Vec<WishlistItem>>;
    async fn insert_wish(&self, item: String) -> StoreResult<WishlistItem>;
    /// Flip `is_fulfilled`; `None` if the wish does not exist.
    async fn toggle_wish(&self, id: Uuid) -> StoreResult<Option<WishlistItem>>;
    /// Returns whether a row was actually removed. Absent ids are not an error.
    async fn delete_wish(&self, id: Uuid) -> StoreResult<bool>;

    /// Cheap connectivity check for the readiness probe.
    async fn ping(&self) -> StoreResult<()>;

    /// Open a change-notification subscription. Dropping the receiver ends it.
    fn subscribe(&self) -> broadcast::Receiver<ChangeEvent>;
}
