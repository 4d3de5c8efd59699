//! Shelf Server
//!
//! HTTP service exposing the in-memory item catalogue and the SQLite-backed
//! user and course directory.

pub mod error;
pub mod handlers;
pub mod services;
pub mod settings;
pub mod storage;

use anyhow::{Context, Result};
use axum::{
    http::HeaderValue,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use services::ItemService;
use settings::Settings;
use storage::Database;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<Database>,
    pub items: Arc<ItemService>,
    pub settings: Arc<Settings>,
}

impl AppState {
    pub fn new(db: Database, settings: Settings) -> Self {
        Self {
            db: Arc::new(db),
            items: Arc::new(ItemService::new()),
            settings: Arc::new(settings),
        }
    }
}

/// Build the full router with CORS and request tracing
pub fn app(state: AppState) -> Result<Router> {
    let cors = cors_layer(&state.settings)?;

    Ok(Router::new()
        .route("/", get(handlers::root))
        .route("/health", get(handlers::health))
        .route(
            "/items",
            get(handlers::items::list).post(handlers::items::create),
        )
        .route(
            "/items/:id",
            get(handlers::items::get)
                .put(handlers::items::update)
                .patch(handlers::items::update)
                .delete(handlers::items::delete),
        )
        .route(
            "/users",
            get(handlers::users::list).post(handlers::users::create),
        )
        .route("/users/:id", get(handlers::users::get))
        .route("/users/:id/courses", get(handlers::users::courses))
        .route("/courses", post(handlers::courses::create))
        .route("/courses/:id", get(handlers::courses::get))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state))
}

fn cors_layer(settings: &Settings) -> Result<CorsLayer> {
    let origins = settings
        .all_cors_origins()
        .into_iter()
        .map(|origin| {
            HeaderValue::from_str(&origin)
                .with_context(|| format!("Invalid CORS origin: {}", origin))
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(CorsLayer::new()
        .allow_origin(origins)
        .allow_methods(Any)
        .allow_headers(Any))
}
