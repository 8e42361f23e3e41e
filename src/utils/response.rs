use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

/// Plain acknowledgment body: `{ "message": ... }`.
#[derive(Serialize)]
pub struct MessageResponse {
    pub message: String,
}

/// Body returned after a successful insert.
#[derive(Serialize)]
pub struct CreatedResponse<T>
where
    T: Serialize,
{
    pub message: String,
    pub id: i64,
    pub event: T,
}

#[derive(Serialize)]
pub struct ApiErrorResponse {
    pub error: String,
}

pub fn message(message: impl Into<String>) -> impl IntoResponse {
    let body = MessageResponse {
        message: message.into(),
    };
    (StatusCode::OK, Json(body))
}

pub fn created<T>(id: i64, event: T, message: impl Into<String>) -> impl IntoResponse
where
    T: Serialize,
{
    let body = CreatedResponse {
        message: message.into(),
        id,
        event,
    };
    (StatusCode::CREATED, Json(body))
}

pub fn error(message: impl Into<String>, status: StatusCode) -> Response {
    let body = ApiErrorResponse {
        error: message.into(),
    };

    (status, Json(body)).into_response()
}
