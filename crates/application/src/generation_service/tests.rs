use std::sync::Arc;

use async_trait::async_trait;
use neighborly_domain::content_rules::NEIGHBOR_INVITATION;
use neighborly_domain::{EventRequest, FeedbackRequest, ProviderKind, ProviderTag};
use tokio::sync::Mutex;

use crate::generation_ports::{GenerationProvider, ProviderError, ProviderRequest};
use crate::provider_client::ProviderClient;

use super::GenerationService;

struct ScriptedProvider {
    kind: ProviderKind,
    answer: Result<String, ProviderError>,
    requests: Mutex<Vec<ProviderRequest>>,
}

impl ScriptedProvider {
    fn answering(kind: ProviderKind, answer: Result<&str, ProviderError>) -> Arc<Self> {
        Arc::new(Self {
            kind,
            answer: answer.map(ToOwned::to_owned),
            requests: Mutex::new(Vec::new()),
        })
    }
}

#[async_trait]
impl GenerationProvider for ScriptedProvider {
    fn kind(&self) -> ProviderKind {
        self.kind
    }

    async fn generate(&self, request: &ProviderRequest) -> Result<String, ProviderError> {
        self.requests.lock().await.push(request.clone());
        self.answer.clone()
    }
}

fn template_service() -> GenerationService {
    GenerationService::new(ProviderClient::disabled())
}

fn service_with(provider: Arc<ScriptedProvider>) -> GenerationService {
    GenerationService::new(ProviderClient::new(Some(provider)))
}

#[tokio::test]
async fn missing_provider_uses_template() {
    let outcome = template_service()
        .generate_event(&EventRequest::new(Some("Launch the app"), None, None))
        .await;

    assert_eq!(outcome.provider(), ProviderTag::Template);
    assert_eq!(outcome.provider().as_str(), "template");
    assert!(!outcome.result().title.is_empty());
    assert!(!outcome.result().description.is_empty());
    assert!(outcome.failure().is_none());
}

#[tokio::test]
async fn template_path_is_deterministic() {
    let service = template_service();
    let request = EventRequest::new(Some("Consistent Test"), Some("Test Focus"), Some("halloween"));

    let first = service.generate_event(&request).await;
    let second = service.generate_event(&request).await;

    assert_eq!(first, second);
    assert_eq!(first.provider(), ProviderTag::Template);
}

#[tokio::test]
async fn blank_subject_with_focus_is_stable() {
    let service = template_service();
    let request = EventRequest::new(Some(""), Some("neighborhood gardening"), Some(""));

    let first = service.generate_event(&request).await;
    let second = service.generate_event(&request).await;

    assert_eq!(first.result().title, second.result().title);
    assert_eq!(first.result().description, second.result().description);
    assert_eq!(first.provider(), ProviderTag::Template);
    assert_eq!(second.provider(), ProviderTag::Template);
    assert!(first.result().description.len() > 30);
}

#[tokio::test]
async fn occasion_is_normalized_in_prompt_and_result() {
    let outcome = template_service()
        .generate_event(&EventRequest::new(
            Some("Holiday Event"),
            Some("Community gathering"),
            Some("christmas"),
        ))
        .await;

    assert_eq!(outcome.result().occasion.as_deref(), Some("Christmas"));
    assert!(outcome.prompt().contains("Christmas"));
}

#[tokio::test]
async fn absent_inputs_still_produce_a_result() {
    let outcome = template_service()
        .generate_event(&EventRequest::new(None, None, None))
        .await;

    assert!(!outcome.result().title.is_empty());
    assert!(outcome.result().description.len() > 30);
    assert!(outcome.result().occasion.is_none());
}

#[tokio::test]
async fn titles_avoid_banned_words_across_subjects() {
    let service = template_service();

    for index in 0..12 {
        let subject = format!("Goal {index} task habit journal challenge");
        let outcome = service
            .generate_event(&EventRequest::new(Some(subject.as_str()), None, None))
            .await;
        let title = outcome.result().title.to_lowercase();

        for word in ["challenge", "task", "habit", "journal"] {
            assert!(!title.contains(word), "title '{title}' contains '{word}'");
        }
        assert!(outcome.result().title.len() < 100);
    }
}

#[tokio::test]
async fn accepted_candidate_keeps_provider_tag() {
    let provider = ScriptedProvider::answering(
        ProviderKind::OpenAi,
        Ok(r#"{"title":"Courtyard plant swap","description":"Neighbors bring cuttings to the courtyard and trade them over tea."}"#),
    );
    let outcome = service_with(provider.clone())
        .generate_event(&EventRequest::new(Some("Gardening"), None, Some("spring")))
        .await;

    assert_eq!(outcome.provider().as_str(), "openai");
    assert_eq!(outcome.result().title, "Courtyard plant swap");
    assert_eq!(outcome.result().occasion.as_deref(), Some("Spring"));
    assert!(outcome.failure().is_none());

    let requests = provider.requests.lock().await;
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].prompt, outcome.prompt());
    assert!((requests[0].temperature - 0.7).abs() < f32::EPSILON);
}

#[tokio::test]
async fn banned_candidate_falls_back_with_provider_tag() {
    let provider = ScriptedProvider::answering(
        ProviderKind::Gemini,
        Ok(r#"{"title":"30-day reading challenge","description":"Read one chapter every evening and log it in your notebook."}"#),
    );
    let outcome = service_with(provider)
        .generate_event(&EventRequest::new(Some("Reading"), None, None))
        .await;

    assert_eq!(outcome.provider().as_str(), "gemini:fallback");
    assert!(!outcome.result().title.to_lowercase().contains("challenge"));
    assert!(
        outcome
            .failure()
            .is_some_and(|failure| failure.contains("challenge"))
    );
}

#[tokio::test]
async fn cueless_candidate_is_patched_not_replaced() {
    let provider = ScriptedProvider::answering(
        ProviderKind::OpenAi,
        Ok("```json\n{\"title\":\"Saturday seed swap\",\"description\":\"Bring spare seeds to the lobby table and trade with others.\"}\n```"),
    );
    let outcome = service_with(provider)
        .generate_event(&EventRequest::new(Some("Seeds"), None, None))
        .await;

    assert_eq!(outcome.provider(), ProviderTag::Provider(ProviderKind::OpenAi));
    assert_eq!(outcome.result().title, "Saturday seed swap");
    assert!(outcome.result().description.ends_with(NEIGHBOR_INVITATION));
}

#[tokio::test]
async fn provider_errors_fall_back_with_provider_tag() {
    for error in [
        ProviderError::Transport("connection reset".to_owned()),
        ProviderError::Auth("invalid key".to_owned()),
        ProviderError::RateLimit("slow down".to_owned()),
        ProviderError::Parse("no JSON".to_owned()),
    ] {
        let provider = ScriptedProvider::answering(ProviderKind::OpenAi, Err(error.clone()));
        let outcome = service_with(provider)
            .generate_event(&EventRequest::new(Some("Launch the app"), None, None))
            .await;
        let template = template_service()
            .generate_event(&EventRequest::new(Some("Launch the app"), None, None))
            .await;

        assert_eq!(outcome.provider().as_str(), "openai:fallback");
        assert_eq!(outcome.result(), template.result());
        assert_eq!(outcome.failure(), Some(error.to_string().as_str()));
    }
}

#[tokio::test]
async fn missing_fields_fall_back() {
    let provider =
        ScriptedProvider::answering(ProviderKind::OpenAi, Ok(r#"{"title":"Only a title"}"#));
    let outcome = service_with(provider)
        .generate_event(&EventRequest::new(Some("Launch the app"), None, None))
        .await;

    assert_eq!(outcome.provider().as_str(), "openai:fallback");
    assert!(
        outcome
            .failure()
            .is_some_and(|failure| failure.contains("description"))
    );
}

#[tokio::test]
async fn feedback_template_path_is_deterministic() {
    let service = template_service();
    let request = FeedbackRequest::new(
        Some("Consistent Test Goal"),
        Some("Testing feedback consistency"),
    );

    let first = service.generate_feedback(&request).await;
    let second = service.generate_feedback(&request).await;

    assert_eq!(first, second);
    assert_eq!(first.provider(), ProviderTag::Template);
    assert!(first.result().feedback.len() > 20);
}

#[tokio::test]
async fn feedback_from_provider_is_accepted() {
    let provider = ScriptedProvider::answering(
        ProviderKind::Gemini,
        Ok(r#"{"feedback":"Good structure. Consider adding dates and one photo before sharing."}"#),
    );
    let outcome = service_with(provider.clone())
        .generate_feedback(&FeedbackRequest::new(
            Some("Community Newsletter"),
            Some("Draft of newsletter about upcoming events."),
        ))
        .await;

    assert_eq!(outcome.provider().as_str(), "gemini");
    assert!(outcome.result().feedback.starts_with("Good structure."));

    let requests = provider.requests.lock().await;
    assert!((requests[0].temperature - 0.55).abs() < f32::EPSILON);
    assert!(requests[0].prompt.contains("Community Newsletter"));
}

#[tokio::test]
async fn terse_feedback_from_provider_falls_back() {
    let provider = ScriptedProvider::answering(ProviderKind::OpenAi, Ok(r#"{"feedback":"Nice."}"#));
    let outcome = service_with(provider)
        .generate_feedback(&FeedbackRequest::new(None, Some("Short")))
        .await;

    assert_eq!(outcome.provider().as_str(), "openai:fallback");
    assert!(outcome.result().feedback.contains("\"Short\""));
}
