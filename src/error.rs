use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use reltime_shared::ApiResponse;
use thiserror::Error;

use crate::relative_time::FormatterError;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Formatter error: {0}")]
    FormatterError(#[from] FormatterError),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Too many timestamps: {count} exceeds the limit of {limit}")]
    BatchTooLarge { count: usize, limit: usize },
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::ValidationError(_) | AppError::BatchTooLarge { .. } => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            AppError::FormatterError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::ValidationError(rejection.body_text())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status_code = self.status_code();

        let message = if status_code.is_server_error() {
            tracing::error!("{}", self);
            "An unexpected error occurred. Please try again later.".to_string()
        } else {
            self.to_string()
        };

        let body = ApiResponse::<()>::error(i32::from(status_code.as_u16()), message);

        (status_code, Json(body)).into_response()
    }
}
