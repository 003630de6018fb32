use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use common::storage::StorageError;
use serde::Serialize;

use crate::repository::StoreError;
use crate::service::PictureError;

/// Structured error response returned by all endpoints on failure.
#[derive(Serialize, utoipa::ToSchema)]
pub struct ErrorBody {
    /// Machine-readable error code. One of: `VALIDATION_ERROR`, `NOT_FOUND`,
    /// `CONFLICT`, `UPSTREAM_ERROR`, `TIMEOUT`, `INTERNAL_ERROR`.
    #[schema(example = "VALIDATION_ERROR")]
    pub code: &'static str,
    /// Human-readable error description.
    #[schema(example = "either date or start_date and end_date are required")]
    pub message: String,
}

/// Application-level error type.
#[derive(Debug)]
pub enum AppError {
    Validation(String),
    NotFound(String),
    Conflict(String),
    /// The picture-of-the-day service failed or answered garbage.
    Upstream(String),
    Timeout(String),
    Internal(String),
}

impl AppError {
    fn status_and_body(self) -> (StatusCode, ErrorBody) {
        match self {
            AppError::Validation(msg) => (
                StatusCode::BAD_REQUEST,
                ErrorBody {
                    code: "VALIDATION_ERROR",
                    message: msg,
                },
            ),
            AppError::NotFound(msg) => (
                StatusCode::NOT_FOUND,
                ErrorBody {
                    code: "NOT_FOUND",
                    message: msg,
                },
            ),
            AppError::Conflict(msg) => (
                StatusCode::CONFLICT,
                ErrorBody {
                    code: "CONFLICT",
                    message: msg,
                },
            ),
            AppError::Upstream(detail) => {
                tracing::error!("Upstream error: {}", detail);
                (
                    StatusCode::BAD_GATEWAY,
                    ErrorBody {
                        code: "UPSTREAM_ERROR",
                        message: detail,
                    },
                )
            }
            AppError::Timeout(detail) => {
                tracing::error!("Timeout: {}", detail);
                (
                    StatusCode::GATEWAY_TIMEOUT,
                    ErrorBody {
                        code: "TIMEOUT",
                        message: detail,
                    },
                )
            }
            AppError::Internal(detail) => {
                tracing::error!("Internal error: {}", detail);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorBody {
                        code: "INTERNAL_ERROR",
                        message: "An unexpected error occurred".into(),
                    },
                )
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = self.status_and_body();
        (status, Json(body)).into_response()
    }
}

impl From<PictureError> for AppError {
    fn from(err: PictureError) -> Self {
        match err {
            PictureError::InvalidParams(msg) | PictureError::InvalidName(msg) => {
                AppError::Validation(msg)
            }
            PictureError::NotFound(msg) => AppError::NotFound(msg),
            PictureError::File(StorageError::NotFound(name)) => {
                AppError::NotFound(format!("File '{name}' not found"))
            }
            PictureError::File(StorageError::InvalidName(name)) => {
                AppError::Validation(format!("Invalid file name '{name}'"))
            }
            PictureError::Store(StoreError::Duplicate(date)) => {
                tracing::warn!(%date, "Picture inserted concurrently");
                AppError::Conflict(format!("Picture for {date} is already stored"))
            }
            PictureError::Fetch(e) => AppError::Upstream(e.to_string()),
            PictureError::Timeout(step) => {
                AppError::Timeout(format!("Deadline exceeded while {step}"))
            }
            other => AppError::Internal(other.to_string()),
        }
    }
}
