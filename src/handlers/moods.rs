use axum::{
    extract::{Query, State},
    Json,
};
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::models::mood::{
    is_palette_mood, moods_for_role, CreateMoodRequest, MoodEntry, MoodListQuery, PaletteEntry,
    MOOD_PALETTE,
};
use crate::store::NewMood;
use crate::AppState;

/// The fixed mood palette, so the client picker and the create-time check
/// can't drift apart.
pub async fn get_palette() -> Json<Vec<PaletteEntry>> {
    Json(
        MOOD_PALETTE
            .iter()
            .map(|&(emoji, label)| PaletteEntry { emoji, label })
            .collect(),
    )
}

pub async fn list_moods(
    State(state): State<AppState>,
    Query(query): Query<MoodListQuery>,
) -> AppResult<Json<Vec<MoodEntry>>> {
    let moods = state.store.list_moods().await?;

    let moods = match query.role {
        Some(role) => moods_for_role(&moods, role),
        None => moods,
    };

    Ok(Json(moods))
}

pub async fn create_mood(
    State(state): State<AppState>,
    Json(body): Json<CreateMoodRequest>,
) -> AppResult<Json<MoodEntry>> {
    body.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    if body.emoji.is_empty() || body.mood_label.is_empty() {
        return Err(AppError::Validation("Please select a mood".into()));
    }
    if !is_palette_mood(&body.emoji, &body.mood_label) {
        return Err(AppError::Validation(format!(
            "Unknown mood: {} {}",
            body.emoji, body.mood_label
        )));
    }

    // Blank notes are stored as absent, not as an empty string.
    let notes = body.notes.filter(|n| !n.trim().is_empty());

    let mood = state
        .store
        .insert_mood(NewMood {
            emoji: body.emoji,
            mood_label: body.mood_label,
            notes,
            role: body.role,
        })
        .await?;

    tracing::info!(mood = %mood.mood_label, role = ?mood.role, "Mood logged");

    Ok(Json(mood))
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use serde_json::json;

    use crate::handlers::testing::{get, post, test_app};
    use crate::store::{ChangeEvent, CoupleStore, Table};

    #[tokio::test]
    async fn test_create_mood_without_selection_is_rejected_before_store() {
        let (app, store) = test_app();

        let (status, body) = post(
            app,
            "/api/moods",
            json!({ "emoji": "", "mood_label": "", "role": "girl" }),
        )
        .await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert!(body["error"]["message"].as_str().unwrap().contains("select a mood"));
        assert!(store.list_moods().await.unwrap().is_empty(), "no insert may happen");
    }

    #[tokio::test]
    async fn test_create_mood_rejects_pair_outside_palette() {
        let (app, store) = test_app();

        let (status, _) = post(
            app,
            "/api/moods",
            json!({ "emoji": "😊", "mood_label": "Ecstatic", "role": "boy" }),
        )
        .await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert!(store.list_moods().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_created_mood_is_first_in_descending_list() {
        let (app, _store) = test_app();

        let (status, _) = post(
            app.clone(),
            "/api/moods",
            json!({ "emoji": "😴", "mood_label": "Tired", "role": "boy" }),
        )
        .await;
        assert_eq!(status, StatusCode::OK);

        let (status, created) = post(
            app.clone(),
            "/api/moods",
            json!({ "emoji": "😊", "mood_label": "Happy", "notes": null, "role": "girl" }),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(created["mood_label"], "Happy");
        assert_eq!(created["notes"], serde_json::Value::Null);

        let (status, listed) = get(app, "/api/moods").await;
        assert_eq!(status, StatusCode::OK);
        let listed = listed.as_array().unwrap();
        assert_eq!(listed.len(), 2);
        assert_eq!(listed[0]["mood_label"], "Happy", "newest mood must come first");
        assert_eq!(listed[1]["mood_label"], "Tired");
    }

    #[tokio::test]
    async fn test_create_mood_publishes_one_moods_event() {
        let (app, store) = test_app();
        let mut rx = store.subscribe();

        let (status, _) = post(
            app,
            "/api/moods",
            json!({ "emoji": "😊", "mood_label": "Happy", "role": "girl" }),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(rx.try_recv().unwrap(), ChangeEvent { table: Table::Moods });
        assert!(rx.try_recv().is_err(), "exactly one event per insert");
    }

    #[tokio::test]
    async fn test_blank_notes_are_stored_as_absent() {
        let (app, store) = test_app();

        let (status, _) = post(
            app,
            "/api/moods",
            json!({ "emoji": "🥰", "mood_label": "Grateful", "notes": "   ", "role": "girl" }),
        )
        .await;
        assert_eq!(status, StatusCode::OK);

        let moods = store.list_moods().await.unwrap();
        assert!(moods[0].notes.is_none());
    }

    #[tokio::test]
    async fn test_list_moods_filters_by_role() {
        let (app, _store) = test_app();

        post(
            app.clone(),
            "/api/moods",
            json!({ "emoji": "😊", "mood_label": "Happy", "role": "girl" }),
        )
        .await;
        post(
            app.clone(),
            "/api/moods",
            json!({ "emoji": "😎", "mood_label": "Confident", "role": "boy" }),
        )
        .await;

        let (status, listed) = get(app, "/api/moods?role=boy").await;
        assert_eq!(status, StatusCode::OK);
        let listed = listed.as_array().unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0]["role"], "boy");
    }

    #[tokio::test]
    async fn test_palette_lists_all_eight_moods() {
        let (app, _store) = test_app();

        let (status, palette) = get(app, "/api/moods/palette").await;
        assert_eq!(status, StatusCode::OK);
        let palette = palette.as_array().unwrap();
        assert_eq!(palette.len(), 8);
        assert_eq!(palette[0]["emoji"], "😊");
        assert_eq!(palette[0]["label"], "Happy");
    }
}
