use axum::extract::Request;
use axum::http::HeaderMap;
use axum::middleware::Next;
use axum::response::Response;
use neighborly_core::{AppError, AppResult, NonEmptyString, UserIdentity};

use crate::error::ApiResult;

/// Header carrying the authenticated subject, set by the upstream auth gateway.
pub const USER_SUBJECT_HEADER: &str = "x-user-subject";

/// Optional header carrying the display name of the authenticated user.
pub const USER_NAME_HEADER: &str = "x-user-name";

pub async fn require_identity(mut request: Request, next: Next) -> ApiResult<Response> {
    let identity = identity_from_headers(request.headers())?;

    request.extensions_mut().insert(identity);
    Ok(next.run(request).await)
}

pub fn identity_from_headers(headers: &HeaderMap) -> AppResult<UserIdentity> {
    let header_value = |name: &str| {
        NonEmptyString::from_optional(headers.get(name).and_then(|value| value.to_str().ok()))
    };

    let subject = header_value(USER_SUBJECT_HEADER)
        .ok_or_else(|| AppError::Unauthorized("authentication required".to_owned()))?;
    let display_name = header_value(USER_NAME_HEADER).unwrap_or_else(|| subject.clone());

    Ok(UserIdentity::new(subject, display_name))
}
