use async_trait::async_trait;
use sqlx::PgPool;
use tokio::sync::broadcast;
use uuid::Uuid;

use crate::models::message::Message;
use crate::models::mood::MoodEntry;
use crate::models::role::Role;
use crate::models::wish::WishlistItem;
use crate::store::{ChangeEvent, CoupleStore, NewMood, StoreResult, Table};

const CHANGE_CHANNEL_CAPACITY: usize = 256;

pub struct PgStore {
    pool: PgPool,
    change_tx: broadcast::Sender<ChangeEvent>,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        let (change_tx, _) = broadcast::channel(CHANGE_CHANNEL_CAPACITY);
        Self { pool, change_tx }
    }

    fn notify(&self, table: Table) {
        // No subscribers is fine; send only fails when nobody listens.
        let _ = self.change_tx.send(ChangeEvent { table });
    }
}

#[async_trait]
impl CoupleStore for PgStore {
    async fn list_moods(&self) -> StoreResult<Vec<MoodEntry>> {
        let moods = sqlx::query_as::<_, MoodEntry>(
            "SELECT * FROM moods ORDER BY created_at DESC",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(moods)
    }

    async fn insert_mood(&self, mood: NewMood) -> StoreResult<MoodEntry> {
        let inserted = sqlx::query_as::<_, MoodEntry>(
            r#"
            INSERT INTO moods (id, emoji, mood_label, notes, role)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&mood.emoji)
        .bind(&mood.mood_label)
        .bind(&mood.notes)
        .bind(mood.role)
        .fetch_one(&self.pool)
        .await?;

        self.notify(Table::Moods);
        Ok(inserted)
    }

    async fn list_messages(&self) -> StoreResult<Vec<Message>> {
        let messages = sqlx::query_as::<_, Message>(
            "SELECT * FROM messages ORDER BY created_at ASC",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(messages)
    }

    async fn insert_message(&self, role: Role, content: String) -> StoreResult<Message> {
        let inserted = sqlx::query_as::<_, Message>(
            r#"
            INSERT INTO messages (id, role, content)
            VALUES ($1, $2, $3)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(role)
        .bind(&content)
        .fetch_one(&self.pool)
        .await?;

        self.notify(Table::Messages);
        Ok(inserted)
    }

    async fn list_wishes(&self) -> StoreResult<Vec<WishlistItem>> {
        let wishes = sqlx::query_as::<_, WishlistItem>(
            "SELECT * FROM wishlist ORDER BY created_at DESC",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(wishes)
    }

    async fn insert_wish(&self, item: String) -> StoreResult<WishlistItem> {
        let inserted = sqlx::query_as::<_, WishlistItem>(
            r#"
            INSERT INTO wishlist (id, item)
            VALUES ($1, $2)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&item)
        .fetch_one(&self.pool)
        .await?;

        self.notify(Table::Wishlist);
        Ok(inserted)
    }

    async fn toggle_wish(&self, id: Uuid) -> StoreResult<Option<WishlistItem>> {
        let updated = sqlx::query_as::<_, WishlistItem>(
            r#"
            UPDATE wishlist SET is_fulfilled = NOT is_fulfilled
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        if updated.is_some() {
            self.notify(Table::Wishlist);
        }
        Ok(updated)
    }

    async fn delete_wish(&self, id: Uuid) -> StoreResult<bool> {
        let result = sqlx::query("DELETE FROM wishlist WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        let deleted = result.rows_affected() > 0;
        if deleted {
            self.notify(Table::Wishlist);
        }
        Ok(deleted)
    }

    async fn ping(&self) -> StoreResult<()> {
        sqlx::query_scalar::<_, i32>("SELECT 1")
            .fetch_one(&self.pool)
            .await?;
        Ok(())
    }

    fn subscribe(&self) -> broadcast::Receiver<ChangeEvent> {
        self.change_tx.subscribe()
    }
}
