//! Artisan CRUD handlers: list, read, create, update, delete.

use crate::error::{AppError, Operation};
use crate::extractors::JsonObject;
use crate::service::{artisan_patch, new_artisan, parse_id};
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

/// Parsed id that may address a row; numeric ids no row can carry become NotFound.
fn row_id(raw: &str) -> Result<i64, AppError> {
    parse_id(raw)?.ok_or(AppError::NotFound)
}

pub async fn list(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let rows = state.store.list().await.map_err(AppError::storage(Operation::List))?;
    Ok((StatusCode::OK, Json(rows)))
}

pub async fn read(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let id = row_id(&id_str)?;
    let row = state
        .store
        .find(id)
        .await
        .map_err(AppError::storage(Operation::Fetch))?
        .ok_or(AppError::NotFound)?;
    Ok((StatusCode::OK, Json(row)))
}

pub async fn create(
    State(state): State<AppState>,
    JsonObject(body): JsonObject,
) -> Result<impl IntoResponse, AppError> {
    let new = new_artisan(&body)?;
    let row = state
        .store
        .insert(&new)
        .await
        .map_err(AppError::storage(Operation::Create))?;
    tracing::info!(id = row.id, "artisan created");
    Ok((StatusCode::CREATED, Json(row)))
}

/// Existence check, then a separate UPDATE touching only the fields present in the body.
pub async fn update(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
    JsonObject(body): JsonObject,
) -> Result<Response, AppError> {
    let id = row_id(&id_str)?;
    if state
        .store
        .find(id)
        .await
        .map_err(AppError::storage(Operation::Update))?
        .is_none()
    {
        return Err(AppError::NotFound);
    }
    let patch = artisan_patch(&body);
    if patch.is_empty() {
        return Err(AppError::NoFieldsToUpdate);
    }
    let row = state
        .store
        .update(id, &patch)
        .await
        .map_err(AppError::storage(Operation::Update))?;
    match row {
        Some(row) => Ok((StatusCode::OK, Json(row)).into_response()),
        None => {
            // Deleted between the check and the UPDATE.
            tracing::warn!(id, "artisan vanished before update");
            Ok(StatusCode::OK.into_response())
        }
    }
}

pub async fn delete(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
) -> Result<StatusCode, AppError> {
    let id = row_id(&id_str)?;
    if state
        .store
        .find(id)
        .await
        .map_err(AppError::storage(Operation::Delete))?
        .is_none()
    {
        return Err(AppError::NotFound);
    }
    let affected = state
        .store
        .delete(id)
        .await
        .map_err(AppError::storage(Operation::Delete))?;
    tracing::info!(id, affected, "artisan deleted");
    Ok(StatusCode::NO_CONTENT)
}
