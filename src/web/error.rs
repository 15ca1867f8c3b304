//! Error type for the web surface.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::web::render;

#[derive(Debug, thiserror::Error)]
pub enum WebError {
    /// Resumption token unknown, already consumed, or evicted.
    #[error("session expired or invalid")]
    SessionExpired,

    /// Bad client input, e.g. a malformed quiz import.
    #[error("bad request: {0}")]
    BadRequest(String),

    /// Internal server error.
    #[error("internal error: {0}")]
    Internal(String),
}

impl IntoResponse for WebError {
    fn into_response(self) -> Response {
        let (status, title, detail) = match &self {
            WebError::SessionExpired => (
                StatusCode::GONE,
                "Session expired",
                "This step was already taken or has expired. Start over from the beginning."
                    .to_string(),
            ),
            WebError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "Bad request", msg.clone()),
            WebError::Internal(msg) => {
                tracing::error!("internal server error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal error",
                    "Something went wrong on our side.".to_string(),
                )
            }
        };

        (status, render::notice(title, &detail)).into_response()
    }
}
