//! User handlers

use crate::error::ApiResult;
use crate::AppState;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use shelf_core::ports::{CourseStore, UserStore};
use shelf_core::{Course, ShelfError, User, UserCreate};
use tracing::info;

#[derive(Debug, Deserialize)]
pub struct Pagination {
    #[serde(default)]
    skip: i64,
    #[serde(default = "default_limit")]
    limit: i64,
}

fn default_limit() -> i64 {
    100
}

pub async fn list(
    State(state): State<AppState>,
    Query(page): Query<Pagination>,
) -> ApiResult<Json<Vec<User>>> {
    let users = state.db.list_users(page.skip, page.limit).await?;
    Ok(Json(users))
}

pub async fn create(
    State(state): State<AppState>,
    Json(req): Json<UserCreate>,
) -> ApiResult<(StatusCode, Json<User>)> {
    info!("Registration attempt for: {}", req.email);
    let user = state.db.create_user(&req).await?;
    info!("Registered user {} ({})", user.id, user.email);
    Ok((StatusCode::CREATED, Json(user)))
}

pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<Json<User>> {
    let user = state
        .db
        .get_user(id)
        .await?
        .ok_or_else(|| ShelfError::not_found("User", id))?;
    Ok(Json(user))
}

pub async fn courses(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<Json<Vec<Course>>> {
    let courses = state.db.list_courses_by_user(id).await?;
    Ok(Json(courses))
}
