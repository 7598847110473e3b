use ntex::http::StatusCode;
use ntex::web::{HttpResponse, WebResponseError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Storage error: {0}")]
    Storage(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Bad request: {0}")]
    BadRequest(String),
    #[error("Missing fields: {}", .0.join(", "))]
    MissingFields(Vec<String>),
    #[error("Internal error: {0}")]
    Internal(String),
}

impl WebResponseError for AppError {
    fn error_response(&self, _: &ntex::web::HttpRequest) -> HttpResponse {
        let (status, body) = match self {
            AppError::Storage(_) | AppError::Serialization(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                serde_json::json!({ "error": "storage error" }),
            ),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, serde_json::json!({ "error": msg })),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, serde_json::json!({ "error": msg })),
            AppError::MissingFields(fields) => (
                StatusCode::BAD_REQUEST,
                serde_json::json!({ "error": "missing fields", "fields": fields }),
            ),
            AppError::Internal(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                serde_json::json!({ "error": "internal error" }),
            ),
        };
        if status.is_server_error() {
            log::error!("{}", self);
        }
        HttpResponse::build(status).json(&body)
    }
}
