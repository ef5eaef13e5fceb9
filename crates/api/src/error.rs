//! HTTP error mapping

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use paceledger_domain::PaceLedgerError;
use tracing::error;

/// Wraps the domain error so it can carry an HTTP status
#[derive(Debug)]
pub struct ApiError(pub PaceLedgerError);

pub type ApiResult<T> = std::result::Result<T, ApiError>;

impl From<PaceLedgerError> for ApiError {
    fn from(err: PaceLedgerError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            PaceLedgerError::Validation { .. } => StatusCode::BAD_REQUEST,
            PaceLedgerError::Overlap(_) => StatusCode::CONFLICT,
            PaceLedgerError::NotFound(_) => StatusCode::NOT_FOUND,
            PaceLedgerError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            PaceLedgerError::Forbidden(_) => StatusCode::FORBIDDEN,
            PaceLedgerError::Database(_)
            | PaceLedgerError::Config(_)
            | PaceLedgerError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        // Caller errors go back as-is; server-side detail stays in the logs
        let body = if status == StatusCode::INTERNAL_SERVER_ERROR {
            error!(error = %self.0, "request failed");
            PaceLedgerError::Internal("internal error".into())
        } else {
            self.0
        };

        (status, Json(body)).into_response()
    }
}
