//! Series API endpoints.
//!
//! Every read embeds the owning director, resolved by join in the repository.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use super::ApiResult;
use crate::errors::AppError;
use crate::models::{Series, SeriesPayload};
use crate::AppState;

/// GET /series - List all series with directors embedded.
pub async fn list_series(State(state): State<AppState>) -> ApiResult<Json<Vec<Series>>> {
    let series = state.repo.list_series().await?;
    Ok(Json(series))
}

/// GET /series/:id - Get a single series with its director embedded.
pub async fn get_series(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<Json<Series>> {
    let series = state
        .repo
        .get_series(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Series {} not found", id)))?;
    Ok(Json(series))
}

/// POST /series - Create a new series.
///
/// The director reference is not validated; a dangling id is accepted.
pub async fn create_series(
    State(state): State<AppState>,
    Json(payload): Json<SeriesPayload>,
) -> ApiResult<(StatusCode, Json<Series>)> {
    let series = state.repo.create_series(&payload).await?;
    Ok((StatusCode::CREATED, Json(series)))
}

/// PUT /series/:id - Replace every field of a series.
pub async fn update_series(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<SeriesPayload>,
) -> ApiResult<Json<Series>> {
    let series = state.repo.replace_series(id, &payload).await?;
    Ok(Json(series))
}

/// DELETE /series/:id - Delete a series.
pub async fn delete_series(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<StatusCode> {
    state.repo.delete_series(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
