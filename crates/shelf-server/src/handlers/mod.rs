//! HTTP handlers

pub mod courses;
pub mod items;
pub mod users;

use crate::AppState;
use axum::{extract::State, Json};
use serde_json::{json, Value};

pub async fn root() -> Json<Value> {
    Json(json!({ "Hello": "World" }))
}

pub async fn health(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "project": state.settings.project_name,
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
