use std::sync::Arc;

use axum::Json;
use axum::extract::{Extension, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;

use neighborly_application::{
    AuditWriteMode, CommunityAiService, GenerationService, ProviderClient,
};
use neighborly_core::{AppError, UserIdentity};
use neighborly_domain::{Goal, GoalId};
use neighborly_infrastructure::{InMemoryGenerationAuditRepository, InMemoryGoalRepository};

use crate::dto::{ReviewSubmissionRequest, SuggestEventRequest};
use crate::error::{ApiError, GENERIC_INTERNAL_MESSAGE, mask_internal_errors};
use crate::state::AppState;

use super::{review_submission_handler, suggest_event_handler};

struct Fixture {
    state: AppState,
    audit: Arc<InMemoryGenerationAuditRepository>,
    goal_id: GoalId,
}

async fn fixture(production: bool) -> Fixture {
    let goals = Arc::new(InMemoryGoalRepository::new());
    let goal_id = GoalId::new();
    let Ok(goal) = Goal::new(goal_id, "resident-1", "Rooftop garden") else {
        panic!("goal fixture should be valid");
    };
    goals.insert_goal(goal).await;

    let audit = Arc::new(InMemoryGenerationAuditRepository::new());
    let state = AppState {
        community_ai_service: CommunityAiService::new(
            GenerationService::new(ProviderClient::disabled()),
            goals,
            audit.clone(),
        )
        .with_audit_write_mode(AuditWriteMode::Inline),
        production,
    };

    Fixture {
        state,
        audit,
        goal_id,
    }
}

fn resident() -> Extension<UserIdentity> {
    Extension(UserIdentity::new("resident-1", "Resident One"))
}

#[tokio::test]
async fn suggest_event_returns_template_suggestion() {
    let fixture = fixture(false).await;

    let response = suggest_event_handler(
        State(fixture.state.clone()),
        resident(),
        Json(SuggestEventRequest {
            goal_id: Some(fixture.goal_id.to_string()),
            occasion: Some("christmas".to_owned()),
            ..SuggestEventRequest::default()
        }),
    )
    .await;

    let Ok(Json(response)) = response else {
        panic!("suggestion should succeed");
    };
    assert_eq!(response.provider, "template");
    assert_eq!(response.occasion.as_deref(), Some("Christmas"));
    assert_eq!(response.goal_id, Some(fixture.goal_id.to_string()));
    assert_eq!(response.focus.as_deref(), Some("Rooftop garden"));
    assert!(response.description.len() > 30);
    assert_eq!(fixture.audit.records().await.len(), 1);
}

#[tokio::test]
async fn suggest_event_with_unknown_goal_is_not_found() {
    let fixture = fixture(false).await;

    let response = suggest_event_handler(
        State(fixture.state),
        resident(),
        Json(SuggestEventRequest {
            goal_id: Some(GoalId::new().to_string()),
            ..SuggestEventRequest::default()
        }),
    )
    .await
    .into_response();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn review_submission_requires_content() {
    let fixture = fixture(false).await;

    let response = review_submission_handler(
        State(fixture.state),
        resident(),
        Json(ReviewSubmissionRequest::default()),
    )
    .await
    .into_response();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn review_submission_returns_submission_details() {
    let fixture = fixture(false).await;

    let response = review_submission_handler(
        State(fixture.state),
        resident(),
        Json(ReviewSubmissionRequest {
            content: Some("Draft of newsletter about upcoming events.".to_owned()),
            file_name: Some("newsletter.md".to_owned()),
            ..ReviewSubmissionRequest::default()
        }),
    )
    .await;

    let Ok(Json(response)) = response else {
        panic!("review should succeed");
    };
    assert_eq!(response.provider, "template");
    assert_eq!(response.file_name, "newsletter.md");
    assert!(response.goal_id.is_none());
    assert!(!response.submission_id.is_empty());
    assert!(response.feedback.len() > 20);

    let records = fixture.audit.records().await;
    assert_eq!(
        records[0].submission_id.as_deref(),
        Some(response.submission_id.as_str())
    );
    assert_eq!(
        records[0].content.as_deref(),
        Some("Draft of newsletter about upcoming events.")
    );
}

#[tokio::test]
async fn production_masks_internal_error_details() {
    let production = fixture(true).await;
    let development = fixture(false).await;
    let internal = || ApiError(AppError::Internal("database password leaked".to_owned()));

    let masked = mask_internal_errors(State(production.state), internal().into_response()).await;
    let unmasked =
        mask_internal_errors(State(development.state), internal().into_response()).await;

    assert_eq!(masked.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let masked_body = axum::body::to_bytes(masked.into_body(), usize::MAX).await;
    let unmasked_body = axum::body::to_bytes(unmasked.into_body(), usize::MAX).await;

    let (Ok(masked_body), Ok(unmasked_body)) = (masked_body, unmasked_body) else {
        panic!("bodies should be readable");
    };
    let masked_text = String::from_utf8_lossy(&masked_body);
    assert!(masked_text.contains(GENERIC_INTERNAL_MESSAGE));
    assert!(!masked_text.contains("password"));
    assert!(String::from_utf8_lossy(&unmasked_body).contains("password"));
}

#[tokio::test]
async fn validation_errors_are_not_masked() {
    let production = fixture(true).await;
    let response = ApiError(AppError::Validation("content is required".to_owned())).into_response();

    let response = mask_internal_errors(State(production.state), response).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
