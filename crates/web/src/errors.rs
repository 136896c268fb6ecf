use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// Expected rejection (conflict, not found, validation), rendered as
/// `{"error": ..., "detail": ...}` with its own status code.
#[derive(Serialize, Debug)]
pub struct ApiError {
    pub error: String,
    pub detail: String,
    #[serde(skip_serializing)]
    pub status_code: StatusCode,
}

impl ApiError {
    pub fn new(detail: &str, status_code: StatusCode) -> Self {
        ApiError {
            error: status_code
                .canonical_reason()
                .unwrap_or("Error")
                .to_string(),
            detail: String::from(detail),
            status_code,
        }
    }

    pub fn not_found(detail: &str) -> Self {
        Self::new(detail, StatusCode::NOT_FOUND)
    }

    pub fn conflict(detail: &str) -> Self {
        Self::new(detail, StatusCode::CONFLICT)
    }

    pub fn unprocessable(detail: &str) -> Self {
        Self::new(detail, StatusCode::UNPROCESSABLE_ENTITY)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status_code, Json(self)).into_response()
    }
}

/// Unexpected failure inside a handler (store down, query error). The cause is
/// logged; the client only sees a generic 500.
pub struct AppError(anyhow::Error);

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        log::error!("Error from route, {:#?}", self.0);
        ApiError::new("Internal server error", StatusCode::INTERNAL_SERVER_ERROR).into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}
