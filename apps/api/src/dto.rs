use neighborly_application::{
    ReviewSubmissionInput, SubmissionReview, SuggestEventInput, SuggestedEvent,
};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Health response payload.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/health-response.ts"
)]
pub struct HealthResponse {
    pub status: &'static str,
}

/// Incoming payload for community event suggestions.
#[derive(Debug, Default, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/suggest-event-request.ts"
)]
pub struct SuggestEventRequest {
    #[serde(default)]
    pub goal_id: Option<String>,
    #[serde(default)]
    pub subject: Option<String>,
    #[serde(default)]
    pub focus: Option<String>,
    #[serde(default)]
    pub occasion: Option<String>,
}

impl From<SuggestEventRequest> for SuggestEventInput {
    fn from(value: SuggestEventRequest) -> Self {
        Self {
            goal_id: value.goal_id,
            subject: value.subject,
            focus: value.focus,
            occasion: value.occasion,
        }
    }
}

/// API representation of a suggested community event.
#[derive(Debug, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/suggest-event-response.ts"
)]
pub struct SuggestEventResponse {
    pub title: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub occasion: Option<String>,
    pub goal_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub focus: Option<String>,
    pub provider: String,
}

impl From<SuggestedEvent> for SuggestEventResponse {
    fn from(value: SuggestedEvent) -> Self {
        Self {
            title: value.suggestion.title,
            description: value.suggestion.description,
            occasion: value.suggestion.occasion,
            goal_id: value.goal_id.map(|goal_id| goal_id.to_string()),
            focus: value.focus,
            provider: value.provider.to_string(),
        }
    }
}

/// Incoming payload for submission feedback. `summary` is accepted as an alias of `content`.
#[derive(Debug, Default, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/review-submission-request.ts"
)]
pub struct ReviewSubmissionRequest {
    #[serde(default)]
    pub goal_id: Option<String>,
    #[serde(default)]
    pub subject: Option<String>,
    #[serde(default, alias = "summary")]
    pub content: Option<String>,
    #[serde(default)]
    pub file_name: Option<String>,
}

impl From<ReviewSubmissionRequest> for ReviewSubmissionInput {
    fn from(value: ReviewSubmissionRequest) -> Self {
        Self {
            goal_id: value.goal_id,
            subject: value.subject,
            content: value.content,
            file_name: value.file_name,
        }
    }
}

/// API representation of submission feedback.
#[derive(Debug, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/review-submission-response.ts"
)]
pub struct ReviewSubmissionResponse {
    pub feedback: String,
    pub provider: String,
    pub goal_id: Option<String>,
    pub file_name: String,
    pub submission_id: String,
}

impl From<SubmissionReview> for ReviewSubmissionResponse {
    fn from(value: SubmissionReview) -> Self {
        Self {
            feedback: value.feedback,
            provider: value.provider.to_string(),
            goal_id: value.goal_id.map(|goal_id| goal_id.to_string()),
            file_name: value.file_name,
            submission_id: value.submission_id,
        }
    }
}
