use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::services::storage::StorageError;

pub type Result<T> = std::result::Result<T, AppError>;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Persistence error: {0}")]
    Persistence(#[from] StorageError),

    #[error("Authentication error: {0}")]
    Authentication(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Validation error: {0}")]
    ValidatorError(#[from] validator::ValidationErrors),
}

impl AppError {
    /// 错误码，用于响应体和日志
    pub fn code(&self) -> &'static str {
        match self {
            AppError::Persistence(_) => "PERSISTENCE_ERROR",
            AppError::Authentication(_) => "AUTHENTICATION_ERROR",
            AppError::Validation(_) | AppError::ValidatorError(_) => "VALIDATION_ERROR",
            AppError::BadRequest(_) => "BAD_REQUEST",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Persistence(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Authentication(_) => StatusCode::UNAUTHORIZED,
            AppError::Validation(_) | AppError::ValidatorError(_) | AppError::BadRequest(_) => {
                StatusCode::BAD_REQUEST
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let error_code = self.code();

        let error_message = match &self {
            AppError::Persistence(e) => {
                tracing::error!(error = ?e, "Persistence error: {}", e);
                "Storage unavailable".to_string()
            }
            AppError::ValidatorError(e) => {
                let validation_errors = e
                    .field_errors()
                    .iter()
                    .map(|(field, errors)| {
                        (
                            field.to_string(),
                            errors
                                .iter()
                                .map(|e| {
                                    e.message
                                        .as_ref()
                                        .map(|m| m.to_string())
                                        .unwrap_or_else(|| "Invalid value".to_string())
                                })
                                .collect::<Vec<_>>(),
                        )
                    })
                    .collect::<std::collections::HashMap<String, Vec<String>>>();

                return (
                    status,
                    Json(json!({
                        "error": {
                            "code": error_code,
                            "message": "Validation failed",
                            "details": validation_errors
                        }
                    })),
                )
                    .into_response();
            }
            AppError::Authentication(msg) | AppError::Validation(msg) | AppError::BadRequest(msg) => {
                msg.clone()
            }
        };

        let body = Json(json!({
            "error": {
                "code": error_code,
                "message": error_message
            }
        }));

        (status, body).into_response()
    }
}

// 便利函数，用于创建常见错误
impl AppError {
    pub fn unauthorized(msg: &str) -> Self {
        Self::Authentication(msg.to_string())
    }

    pub fn bad_request(msg: &str) -> Self {
        Self::BadRequest(msg.to_string())
    }
}

/// 请求体无法解析：字段类型或取值不对属于校验错误，其余属于请求格式错误
impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        match rejection {
            JsonRejection::JsonDataError(_) | JsonRejection::JsonSyntaxError(_) => {
                AppError::Validation(rejection.body_text())
            }
            _ => AppError::BadRequest(rejection.body_text()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(AppError::Validation("bad delta".into()).status(), StatusCode::BAD_REQUEST);
        assert_eq!(AppError::unauthorized("no user").status(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            AppError::from(StorageError::Unavailable("down".into())).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_persistence_error_keeps_cause() {
        let err = AppError::from(StorageError::Unavailable("connection reset".into()));
        assert_eq!(err.code(), "PERSISTENCE_ERROR");
        assert!(err.to_string().contains("connection reset"));
        assert!(std::error::Error::source(&err).is_some());
    }
}
