//! In-memory store used by handler tests.
//!
//! Rows keep insertion order; `list_moods` and `list_wishes` return them
//! reversed (newest first) and `list_messages` returns them as inserted
//! (oldest first), matching the Postgres ordering.

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::{broadcast, Mutex};
use uuid::Uuid;

use crate::models::message::Message;
use crate::models::mood::MoodEntry;
use crate::models::role::Role;
use crate::models::wish::WishlistItem;
use crate::store::{ChangeEvent, CoupleStore, NewMood, StoreResult, Table};

#[derive(Default)]
struct Inner {
    moods: Vec<MoodEntry>,
    messages: Vec<Message>,
    wishes: Vec<WishlistItem>,
}

pub struct MemStore {
    inner: Mutex<Inner>,
    change_tx: broadcast::Sender<ChangeEvent>,
}

impl MemStore {
    pub fn new() -> Self {
        let (change_tx, _) = broadcast::channel(256);
        Self {
            inner: Mutex::new(Inner::default()),
            change_tx,
        }
    }

    fn notify(&self, table: Table) {
        let _ = self.change_tx.send(ChangeEvent { table });
    }
}

impl Default for MemStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CoupleStore for MemStore {
    async fn list_moods(&self) -> StoreResult<Vec<MoodEntry>> {
        let inner = self.inner.lock().await;
        Ok(inner.moods.iter().rev().cloned().collect())
    }

    async fn insert_mood(&self, mood: NewMood) -> StoreResult<MoodEntry> {
        let entry = MoodEntry {
            id: Uuid::new_v4(),
            emoji: mood.emoji,
            mood_label: mood.mood_label,
            notes: mood.notes,
            role: mood.role,
            created_at: Utc::now(),
        };
        self.inner.lock().await.moods.push(entry.clone());
        self.notify(Table::Moods);
        Ok(entry)
    }

    async fn list_messages(&self) -> StoreResult<Vec<Message>> {
        Ok(self.inner.lock().await.messages.clone())
    }

    async fn insert_message(&self, role: Role, content: String) -> StoreResult<Message> {
        let message = Message {
            id: Uuid::new_v4(),
            role,
            content,
            created_at: Utc::now(),
        };
        self.inner.lock().await.messages.push(message.clone());
        self.notify(Table::Messages);
        Ok(message)
    }

    async fn list_wishes(&self) -> StoreResult<Vec<WishlistItem>> {
        let inner = self.inner.lock().await;
        Ok(inner.wishes.iter().rev().cloned().collect())
    }

    async fn insert_wish(&self, item: String) -> StoreResult<WishlistItem> {
        let wish = WishlistItem {
            id: Uuid::new_v4(),
            item,
            is_fulfilled: false,
            created_at: Utc::now(),
        };
        self.inner.lock().await.wishes.push(wish.clone());
        self.notify(Table::Wishlist);
        Ok(wish)
    }

    async fn toggle_wish(&self, id: Uuid) -> StoreResult<Option<WishlistItem>> {
        let mut inner = self.inner.lock().await;
        let toggled = inner.wishes.iter_mut().find(|w| w.id == id).map(|w| {
            w.is_fulfilled = !w.is_fulfilled;
            w.clone()
        });
        drop(inner);

        if toggled.is_some() {
            self.notify(Table::Wishlist);
        }
        Ok(toggled)
    }

    async fn delete_wish(&self, id: Uuid) -> StoreResult<bool> {
        let mut inner = self.inner.lock().await;
        let before = inner.wishes.len();
        inner.wishes.retain(|w| w.id != id);
        let deleted = inner.wishes.len() < before;
        drop(inner);

        if deleted {
            self.notify(Table::Wishlist);
        }
        Ok(deleted)
    }

    async fn ping(&self) -> StoreResult<()> {
        Ok(())
    }

    fn subscribe(&self) -> broadcast::Receiver<ChangeEvent> {
        self.change_tx.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::broadcast::error::TryRecvError;

    #[tokio::test]
    async fn test_moods_listed_newest_first() {
        let store = MemStore::new();
        for label in ["Happy", "Tired", "Sad"] {
            store
                .insert_mood(NewMood {
                    emoji: "😊".into(),
                    mood_label: label.into(),
                    notes: None,
                    role: Role::Girl,
                })
                .await
                .unwrap();
        }

        let moods = store.list_moods().await.unwrap();
        assert_eq!(moods[0].mood_label, "Sad");
        assert_eq!(moods[2].mood_label, "Happy");
    }

    #[tokio::test]
    async fn test_messages_listed_oldest_first() {
        let store = MemStore::new();
        store
            .insert_message(Role::Girl, "hi".into())
            .await
            .unwrap();
        store
            .insert_message(Role::Boy, "hey".into())
            .await
            .unwrap();

        let messages = store.list_messages().await.unwrap();
        assert_eq!(messages[0].content, "hi");
        assert_eq!(messages[1].content, "hey");
    }

    #[tokio::test]
    async fn test_each_mutation_publishes_one_event() {
        let store = MemStore::new();
        let mut rx = store.subscribe();

        let wish = store.insert_wish("picnic".into()).await.unwrap();
        assert_eq!(rx.try_recv().unwrap(), ChangeEvent { table: Table::Wishlist });
        assert_eq!(rx.try_recv().unwrap_err(), TryRecvError::Empty);

        store.toggle_wish(wish.id).await.unwrap();
        assert_eq!(rx.try_recv().unwrap(), ChangeEvent { table: Table::Wishlist });

        store.delete_wish(wish.id).await.unwrap();
        assert_eq!(rx.try_recv().unwrap(), ChangeEvent { table: Table::Wishlist });
        assert_eq!(rx.try_recv().unwrap_err(), TryRecvError::Empty);
    }

    #[tokio::test]
    async fn test_mood_and_message_inserts_publish_their_own_table() {
        let store = MemStore::new();
        let mut rx = store.subscribe();

        store
            .insert_mood(NewMood {
                emoji: "😊".into(),
                mood_label: "Happy".into(),
                notes: None,
                role: Role::Girl,
            })
            .await
            .unwrap();
        assert_eq!(rx.try_recv().unwrap(), ChangeEvent { table: Table::Moods });
        assert_eq!(rx.try_recv().unwrap_err(), TryRecvError::Empty);

        store
            .insert_message(Role::Boy, "miss you".into())
            .await
            .unwrap();
        assert_eq!(rx.try_recv().unwrap(), ChangeEvent { table: Table::Messages });
        assert_eq!(rx.try_recv().unwrap_err(), TryRecvError::Empty);
    }

    #[tokio::test]
    async fn test_absent_wish_mutations_publish_nothing() {
        let store = MemStore::new();
        let mut rx = store.subscribe();

        assert!(store.toggle_wish(Uuid::new_v4()).await.unwrap().is_none());
        assert!(!store.delete_wish(Uuid::new_v4()).await.unwrap());
        assert_eq!(rx.try_recv().unwrap_err(), TryRecvError::Empty);
    }

    #[test]
    fn test_table_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Table::Moods).unwrap(), "\"moods\"");
        assert_eq!(
            serde_json::to_string(&Table::Wishlist).unwrap(),
            "\"wishlist\""
        );
    }
}
