use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    BadRequest(String),
    #[error("{0}")]
    NotFound(String),
    #[error("Internal server error")]
    Internal,
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
}

impl From<spisovka_core::Error> for AppError {
    fn from(error: spisovka_core::Error) -> Self {
        use spisovka_core::Error as CoreError;

        match error {
            CoreError::IncompleteUrl | CoreError::AlreadyTracked(_) => {
                Self::BadRequest(error.to_string())
            }
            CoreError::NotFound(_) => Self::NotFound(error.to_string()),
            // The unhandled class: fetch, file IO, malformed documents. The
            // client sees a generic failure; the detail goes to the log.
            CoreError::Fetch { .. } | CoreError::Io(_) | CoreError::Serialization(_) => {
                tracing::error!(%error, "Unhandled service failure");
                Self::Internal
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        };
        let body = ErrorBody {
            error: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}
