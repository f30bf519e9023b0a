use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use neighborly_core::AppError;
use serde::Serialize;
use tracing::error;
use ts_rs::TS;

use crate::state::AppState;

/// Message returned in place of internal error details in production.
pub const GENERIC_INTERNAL_MESSAGE: &str = "internal server error";

/// API error payload.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/error-response.ts"
)]
pub struct ErrorResponse {
    message: String,
}

/// HTTP API error wrapper around core application errors.
#[derive(Debug)]
pub struct ApiError(pub AppError);

impl From<AppError> for ApiError {
    fn from(value: AppError) -> Self {
        Self(value)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match self.0 {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        if status == StatusCode::INTERNAL_SERVER_ERROR {
            error!(error = %self.0, "request failed with internal error");
        }

        let payload = Json(ErrorResponse {
            message: self.0.to_string(),
        });

        (status, payload).into_response()
    }
}

/// Replaces internal error bodies with a generic message in production.
pub async fn mask_internal_errors(State(state): State<AppState>, response: Response) -> Response {
    if !state.production || response.status() != StatusCode::INTERNAL_SERVER_ERROR {
        return response;
    }

    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorResponse {
            message: GENERIC_INTERNAL_MESSAGE.to_owned(),
        }),
    )
        .into_response()
}

/// Standard API result type.
pub type ApiResult<T> = Result<T, ApiError>;
