pub mod benchmark;
pub mod timeline;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

// ─── Unified error type ──────────────────────────────────────────

#[derive(Debug)]
pub enum AppError {
    BadRequest(String),
    Internal(String),
    AlreadyRunning,
}

impl From<crate::Error> for AppError {
    fn from(err: crate::Error) -> Self {
        match err {
            crate::Error::InvalidCapacity | crate::Error::InvalidBinCount => {
                Self::BadRequest(err.to_string())
            }
            other => Self::Internal(other.to_string()),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            Self::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            Self::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
            Self::AlreadyRunning => {
                (StatusCode::CONFLICT, "Benchmark already running".into())
            }
        };

        let body = serde_json::json!({
            "error":  message,
            "status": status.as_u16(),
        });

        (status, Json(body)).into_response()
    }
}
