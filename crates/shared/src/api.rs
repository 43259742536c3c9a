use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const SUCCESS_CODE: i32 = 0;

#[derive(Debug, Error, PartialEq)]
pub enum ApiError {
    #[error("{message} (code {code})")]
    Failed { code: i32, message: String },

    #[error("Response succeeded without data")]
    MissingData,
}

/// Envelope wrapped around every API payload.
///
/// `code` is 0 on success; any other value carries a human readable `message`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub code: i32,
    pub message: String,
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            code: SUCCESS_CODE,
            message: "ok".to_owned(),
            data: Some(data),
        }
    }

    pub fn error(code: i32, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            data: None,
        }
    }

    pub fn is_success(&self) -> bool {
        self.code == SUCCESS_CODE
    }

    pub fn into_result(self) -> Result<T, ApiError> {
        if !self.is_success() {
            return Err(ApiError::Failed {
                code: self.code,
                message: self.message,
            });
        }

        self.data.ok_or(ApiError::MissingData)
    }
}
