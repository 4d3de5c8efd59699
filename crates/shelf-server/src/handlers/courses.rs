//! Course handlers

use crate::error::ApiResult;
use crate::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use shelf_core::ports::CourseStore;
use shelf_core::{Course, CourseCreate, ShelfError};

pub async fn create(
    State(state): State<AppState>,
    Json(req): Json<CourseCreate>,
) -> ApiResult<(StatusCode, Json<Course>)> {
    let course = state.db.create_course(&req).await?;
    Ok((StatusCode::CREATED, Json(course)))
}

pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<Json<Course>> {
    let course = state
        .db
        .get_course(id)
        .await?
        .ok_or_else(|| ShelfError::not_found("Course", id))?;
    Ok(Json(course))
}
