use axum::{extract::State, response::IntoResponse, response::Response, Json};
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::state::AppState;
use crate::utils::error::AppResult;
use crate::utils::response::message;

pub mod events;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DbTimePayload {
    pub db_time: DateTime<Utc>,
}

pub async fn health_check() -> Response {
    message("Web GIS Backend is running").into_response()
}

/// Round-trips to the store and reports its clock.
pub async fn db_test(State(state): State<AppState>) -> AppResult<Json<DbTimePayload>> {
    let db_time = state.store.now().await?;
    Ok(Json(DbTimePayload { db_time }))
}
