use std::sync::Arc;

use neighborly_core::{AppError, AppResult, NonEmptyString, UserIdentity};
use neighborly_domain::{
    EventRequest, FeedbackRequest, GenerationKind, GenerationOutcome, Goal, GoalId, Occasion,
};
use tracing::warn;
use uuid::Uuid;

use crate::generation_ports::{
    AuditWriteMode, GenerationAuditRecord, GenerationAuditRepository, GoalRepository,
    ReviewSubmissionInput, SubmissionReview, SuggestEventInput, SuggestedEvent,
};
use crate::generation_service::GenerationService;

/// Subject used for event suggestions when the caller supplies nothing usable.
pub const COMMUNITY_EVENT_SUBJECT: &str = "community connection";

/// Request-level use cases behind the community AI endpoints.
#[derive(Clone)]
pub struct CommunityAiService {
    generation_service: GenerationService,
    goal_repository: Arc<dyn GoalRepository>,
    audit_repository: Arc<dyn GenerationAuditRepository>,
    audit_write_mode: AuditWriteMode,
}

impl CommunityAiService {
    /// Creates a new service whose audit writes never hold up the response.
    #[must_use]
    pub fn new(
        generation_service: GenerationService,
        goal_repository: Arc<dyn GoalRepository>,
        audit_repository: Arc<dyn GenerationAuditRepository>,
    ) -> Self {
        Self {
            generation_service,
            goal_repository,
            audit_repository,
            audit_write_mode: AuditWriteMode::Detached,
        }
    }

    /// Configures how audit records are written.
    #[must_use]
    pub fn with_audit_write_mode(mut self, audit_write_mode: AuditWriteMode) -> Self {
        self.audit_write_mode = audit_write_mode;
        self
    }

    /// Suggests a community event for the actor, optionally seeded by one of their goals.
    pub async fn suggest_event(
        &self,
        actor: &UserIdentity,
        input: SuggestEventInput,
    ) -> AppResult<SuggestedEvent> {
        let occasion = Occasion::parse(input.occasion.as_deref())?;
        let goal = self.resolve_goal(actor, input.goal_id.as_deref()).await?;

        let subject = goal
            .as_ref()
            .map(|goal| goal.title().to_owned())
            .or_else(|| NonEmptyString::from_optional(input.subject.as_deref()).map(String::from))
            .or_else(|| NonEmptyString::from_optional(input.focus.as_deref()).map(String::from))
            .unwrap_or_else(|| COMMUNITY_EVENT_SUBJECT.to_owned());
        let focus = NonEmptyString::from_optional(input.focus.as_deref())
            .map(String::from)
            .or_else(|| goal.as_ref().map(|goal| goal.title().to_owned()));

        let request = EventRequest::with_occasion(Some(&subject), focus.as_deref(), occasion);
        let outcome = self.generation_service.generate_event(&request).await;

        let response = serde_json::to_string(outcome.result())
            .map_err(|error| AppError::Internal(format!("failed to encode suggestion: {error}")))?;
        let goal_id = goal.as_ref().map(Goal::id);
        self.record_audit(audit_record(
            actor,
            goal_id,
            GenerationKind::Event,
            &outcome,
            response,
        ))
        .await;

        let provider = outcome.provider();
        Ok(SuggestedEvent {
            suggestion: outcome.into_result(),
            goal_id,
            focus,
            provider,
        })
    }

    /// Reviews one submission and returns constructive feedback.
    pub async fn review_submission(
        &self,
        actor: &UserIdentity,
        input: ReviewSubmissionInput,
    ) -> AppResult<SubmissionReview> {
        let content = NonEmptyString::from_optional(input.content.as_deref())
            .ok_or_else(|| AppError::Validation("content is required".to_owned()))?;
        let goal = self.resolve_goal(actor, input.goal_id.as_deref()).await?;

        let subject = goal
            .as_ref()
            .map(|goal| goal.title().to_owned())
            .or_else(|| NonEmptyString::from_optional(input.subject.as_deref()).map(String::from));
        let request = FeedbackRequest::new(subject.as_deref(), Some(content.as_str()));
        let outcome = self.generation_service.generate_feedback(&request).await;

        let submission_id = Uuid::new_v4().to_string();
        let file_name = NonEmptyString::from_optional(input.file_name.as_deref())
            .map(String::from)
            .unwrap_or_default();
        let goal_id = goal.as_ref().map(Goal::id);

        self.record_audit(GenerationAuditRecord {
            submission_id: Some(submission_id.clone()),
            file_name: (!file_name.is_empty()).then(|| file_name.clone()),
            content: Some(String::from(content)),
            ..audit_record(
                actor,
                goal_id,
                GenerationKind::Feedback,
                &outcome,
                outcome.result().feedback.clone(),
            )
        })
        .await;

        let provider = outcome.provider();
        Ok(SubmissionReview {
            feedback: outcome.into_result().feedback,
            provider,
            goal_id,
            file_name,
            submission_id,
        })
    }

    async fn resolve_goal(
        &self,
        actor: &UserIdentity,
        goal_id: Option<&str>,
    ) -> AppResult<Option<Goal>> {
        let Some(goal_id) = NonEmptyString::from_optional(goal_id) else {
            return Ok(None);
        };

        let goal_id = GoalId::parse(goal_id.as_str())?;
        self.goal_repository
            .find_goal(actor.subject(), goal_id)
            .await?
            .map(Some)
            .ok_or_else(|| AppError::NotFound(format!("goal '{goal_id}' does not exist")))
    }

    async fn record_audit(&self, record: GenerationAuditRecord) {
        match self.audit_write_mode {
            AuditWriteMode::Inline => {
                append_or_warn(self.audit_repository.as_ref(), record).await;
            }
            AuditWriteMode::Detached => {
                let audit_repository = self.audit_repository.clone();
                tokio::spawn(async move {
                    append_or_warn(audit_repository.as_ref(), record).await;
                });
            }
        }
    }
}

fn audit_record<T>(
    actor: &UserIdentity,
    goal_id: Option<GoalId>,
    kind: GenerationKind,
    outcome: &GenerationOutcome<T>,
    response: String,
) -> GenerationAuditRecord {
    GenerationAuditRecord {
        subject: actor.subject().to_owned(),
        goal_id,
        kind,
        provider: outcome.provider(),
        prompt: outcome.prompt().to_owned(),
        response,
        status: outcome.audit_status(),
        error: outcome.failure().map(ToOwned::to_owned),
        submission_id: None,
        file_name: None,
        content: None,
    }
}

async fn append_or_warn(repository: &dyn GenerationAuditRepository, record: GenerationAuditRecord) {
    let kind = record.kind;
    if let Err(error) = repository.append_record(record).await {
        warn!(kind = kind.as_str(), %error, "failed to persist generation audit record");
    }
}
