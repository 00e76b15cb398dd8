//! Journal routes over [`journal::Store`].

use std::sync::Arc;

use axum::{
    extract::rejection::{JsonRejection, QueryRejection},
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use journal::{
    JournalEntry, JournalEntryUpdate, JournalFilter, JournalStats, NewJournalEntry, StoreError,
};
use serde::Deserialize;

use crate::app::AppState;
use crate::error::ApiError;

pub async fn list_entries(
    State(state): State<Arc<AppState>>,
    query: Result<Query<JournalFilter>, QueryRejection>,
) -> Result<Json<Vec<JournalEntry>>, ApiError> {
    let Query(filter) = query?;
    Ok(Json(state.journal.list_entries(&filter).await?))
}

pub async fn add_entry(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<NewJournalEntry>, JsonRejection>,
) -> Result<(StatusCode, Json<JournalEntry>), ApiError> {
    let Json(new) = payload?;
    let entry = state.journal.add_entry(new).await?;
    Ok((StatusCode::CREATED, Json(entry)))
}

pub async fn stats(State(state): State<Arc<AppState>>) -> Result<Json<JournalStats>, ApiError> {
    Ok(Json(state.journal.stats(chrono::Utc::now()).await?))
}

pub async fn get_entry(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<JournalEntry>, ApiError> {
    Ok(Json(state.journal.get_entry(&id).await?))
}

pub async fn update_entry(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    payload: Result<Json<JournalEntryUpdate>, JsonRejection>,
) -> Result<Json<JournalEntry>, ApiError> {
    let Json(update) = payload?;
    Ok(Json(state.journal.update_entry(&id, update).await?))
}

pub async fn delete_entry(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    if state.journal.delete_entry(&id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(StoreError::NotFound(id).into())
    }
}

pub async fn toggle_favorite(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<JournalEntry>, ApiError> {
    Ok(Json(state.journal.toggle_favorite(&id).await?))
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct VisualizeEntryRequest {
    pub style: Option<String>,
}

/// Renders the entry's description and stores the image as its `visualizationUrl`.
/// A missing body means the default style.
pub async fn visualize_entry(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    payload: Option<Json<VisualizeEntryRequest>>,
) -> Result<Json<JournalEntry>, ApiError> {
    let style = payload.and_then(|Json(body)| body.style);
    let entry = state.journal.get_entry(&id).await?;
    let visualization = state
        .analyzer
        .visualize(&entry.description, style.as_deref())
        .await?;
    let updated = state
        .journal
        .update_entry(
            &id,
            JournalEntryUpdate {
                visualization: Some(visualization.description),
                visualization_url: Some(visualization.image_url),
                ..JournalEntryUpdate::default()
            },
        )
        .await?;
    tracing::info!(id = %id, visualization = %visualization.id, "journal entry visualized");
    Ok(Json(updated))
}
