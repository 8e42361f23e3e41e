use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;
use tracing::{error, warn};

use crate::utils::response::error as error_response;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    DatabaseError(#[from] sqlx::Error),
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::DatabaseError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            AppError::NotFound(_) => "NOT_FOUND",
            AppError::DatabaseError(_) => "DATABASE_ERROR",
        }
    }

    fn log(&self) {
        match self {
            AppError::NotFound(msg) => {
                warn!(code = self.code(), message = %msg, "Resource not found");
            }
            AppError::DatabaseError(e) => {
                error!(code = self.code(), error = ?e, "Database error");
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        self.log();

        // The store's own message is handed back to the caller as-is.
        let public_message = match &self {
            AppError::DatabaseError(e) => match e {
                sqlx::Error::Database(db) => db.message().to_string(),
                other => other.to_string(),
            },
            other => other.to_string(),
        };

        error_response(public_message, status)
    }
}

pub type AppResult<T> = Result<T, AppError>;
