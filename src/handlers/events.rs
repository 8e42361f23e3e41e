use axum::{
    extract::{Path, Query, State},
    response::{IntoResponse, Response},
    Json,
};
use tracing::info;

use crate::models::{Event, EventFilter, NewEvent, RenameEvent};
use crate::state::AppState;
use crate::utils::error::{AppError, AppResult};
use crate::utils::response::{created, message};

pub async fn list_events(
    State(state): State<AppState>,
    Query(filter): Query<EventFilter>,
) -> AppResult<Json<Vec<Event>>> {
    let filter = filter.normalized();
    let events = state.store.list(&filter).await?;
    Ok(Json(events))
}

pub async fn create_event(
    State(state): State<AppState>,
    Json(payload): Json<NewEvent>,
) -> AppResult<Response> {
    let event = state.store.create(&payload).await?;
    info!(id = event.id, topluluk = ?event.topluluk, "Event created");
    Ok(created(event.id, event, "Event created successfully").into_response())
}

pub async fn update_event(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<RenameEvent>,
) -> AppResult<Response> {
    if !state.store.rename(id, payload.title.as_deref()).await? {
        return Err(AppError::NotFound(format!("Event {} not found", id)));
    }
    info!(id, "Event renamed");
    Ok(message("Event updated successfully").into_response())
}

/// Deleting an id that is already gone still succeeds.
pub async fn delete_event(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<Response> {
    let removed = state.store.delete(id).await?;
    if removed == 0 {
        tracing::debug!(id, "Delete matched no event");
    } else {
        info!(id, "Event deleted");
    }
    Ok(message("Event deleted successfully").into_response())
}
