use axum::{
    routing::{delete, get, post},
    Router,
};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

mod config;
mod db;
mod error;
mod handlers;
mod models;
mod store;

use config::Config;
use store::postgres::PgStore;
use store::CoupleStore;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn CoupleStore>,
}

/// All routes. Kept separate from `main` so handler tests can build the same
/// router over an in-memory store.
///
/// Note: there is no authentication anywhere. The `role` a caller writes as
/// is self-asserted; the service trusts its two users. A multi-tenant
/// deployment would need a real identity layer in front.
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health::health_check))
        .route("/readyz", get(handlers::health::readyz))
        .route("/ws", get(handlers::ws::ws_handler))
        // Moods
        .route("/api/moods", get(handlers::moods::list_moods))
        .route("/api/moods", post(handlers::moods::create_mood))
        .route("/api/moods/palette", get(handlers::moods::get_palette))
        // Messages
        .route("/api/messages", get(handlers::messages::list_messages))
        .route("/api/messages", post(handlers::messages::create_message))
        // Wishlist
        .route("/api/wishlist", get(handlers::wishlist::list_wishlist))
        .route("/api/wishlist", post(handlers::wishlist::create_wish))
        .route(
            "/api/wishlist/:id/toggle",
            post(handlers::wishlist::toggle_wish),
        )
        .route("/api/wishlist/:id", delete(handlers::wishlist::delete_wish))
        .with_state(state)
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "ourspace_api=debug,tower_http=debug".into()),
        )
        .json()
        .init();

    let config = Config::from_env();

    // Database
    let pool = db::create_pool(&config.database_url).await;

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("Failed to run database migrations");

    tracing::info!("Database migrations applied");

    let store: Arc<dyn CoupleStore> = Arc::new(PgStore::new(pool));
    let state = AppState { store };

    let allowed_origins: Vec<axum::http::HeaderValue> = {
        let mut origins = vec![config
            .frontend_url
            .parse::<axum::http::HeaderValue>()
            .unwrap()];
        for o in &config.cors_extra_origins {
            if let Ok(hv) = o.parse::<axum::http::HeaderValue>() {
                origins.push(hv);
            }
        }
        origins
    };
    let cors = CorsLayer::new()
        .allow_origin(allowed_origins)
        .allow_methods([
            axum::http::Method::GET,
            axum::http::Method::POST,
            axum::http::Method::DELETE,
            axum::http::Method::OPTIONS,
        ])
        .allow_headers([
            axum::http::header::CONTENT_TYPE,
            axum::http::header::ACCEPT,
        ]);

    let app = app(state).layer(cors).layer(TraceLayer::new_for_http());

    let addr = config.listen_addr();
    tracing::info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await.unwrap();
    axum::serve(listener, app).await.unwrap();
}
