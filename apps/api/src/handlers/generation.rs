use axum::Json;
use axum::extract::{Extension, State};
use neighborly_core::UserIdentity;

use crate::dto::{
    ReviewSubmissionRequest, ReviewSubmissionResponse, SuggestEventRequest, SuggestEventResponse,
};
use crate::error::ApiResult;
use crate::state::AppState;

pub async fn suggest_event_handler(
    State(state): State<AppState>,
    Extension(user): Extension<UserIdentity>,
    Json(payload): Json<SuggestEventRequest>,
) -> ApiResult<Json<SuggestEventResponse>> {
    let suggested = state
        .community_ai_service
        .suggest_event(&user, payload.into())
        .await?;

    Ok(Json(SuggestEventResponse::from(suggested)))
}

pub async fn review_submission_handler(
    State(state): State<AppState>,
    Extension(user): Extension<UserIdentity>,
    Json(payload): Json<ReviewSubmissionRequest>,
) -> ApiResult<Json<ReviewSubmissionResponse>> {
    let review = state
        .community_ai_service
        .review_submission(&user, payload.into())
        .await?;

    Ok(Json(ReviewSubmissionResponse::from(review)))
}

#[cfg(test)]
mod tests;
