//! Director API endpoints.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use super::ApiResult;
use crate::errors::AppError;
use crate::models::{Director, DirectorPayload};
use crate::AppState;

/// GET /directors - List all directors.
pub async fn list_directors(State(state): State<AppState>) -> ApiResult<Json<Vec<Director>>> {
    let directors = state.repo.list_directors().await?;
    Ok(Json(directors))
}

/// GET /directors/:id - Get a single director.
pub async fn get_director(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<Json<Director>> {
    let director = state
        .repo
        .get_director(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Director {} not found", id)))?;
    Ok(Json(director))
}

/// POST /directors - Create a new director.
pub async fn create_director(
    State(state): State<AppState>,
    Json(payload): Json<DirectorPayload>,
) -> ApiResult<(StatusCode, Json<Director>)> {
    let director = state.repo.create_director(&payload).await?;
    Ok((StatusCode::CREATED, Json(director)))
}

/// PUT /directors/:id - Replace every field of a director.
pub async fn update_director(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<DirectorPayload>,
) -> ApiResult<Json<Director>> {
    let director = state.repo.replace_director(id, &payload).await?;
    Ok(Json(director))
}

/// DELETE /directors/:id - Delete a director.
pub async fn delete_director(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<StatusCode> {
    state.repo.delete_director(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
