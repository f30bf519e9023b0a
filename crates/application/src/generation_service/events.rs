use neighborly_domain::content_rules::{finalize_event, validate_event};
use neighborly_domain::fallback::fallback_event;
use neighborly_domain::prompt::{
    EVENT_SYSTEM_INSTRUCTION, EVENT_TEMPERATURE, MAX_OUTPUT_TOKENS, event_prompt,
};
use neighborly_domain::{EventRequest, EventSuggestion, GenerationOutcome, ProviderTag};
use tracing::warn;

use super::{Attempt, GenerationService};
use crate::generation_ports::ProviderRequest;

impl GenerationService {
    /// Generates a community event suggestion; never fails.
    pub async fn generate_event(&self, request: &EventRequest) -> GenerationOutcome<EventSuggestion> {
        let prompt = event_prompt(request);
        let provider_request = ProviderRequest {
            system_instruction: EVENT_SYSTEM_INSTRUCTION.to_owned(),
            prompt: prompt.clone(),
            temperature: EVENT_TEMPERATURE,
            max_output_tokens: MAX_OUTPUT_TOKENS,
        };
        let kind = self.provider_kind();

        let attempt = self
            .attempt(&provider_request, "'title' or 'description'", |candidate| {
                candidate.event_candidate()
            })
            .await;

        match attempt {
            Attempt::Candidate(candidate) => {
                let (suggestion, rejection) =
                    validate_event(candidate, request.subject(), request.occasion()).into_parts();

                match rejection {
                    Some(rejection) => {
                        warn!(
                            provider = kind.map(|kind| kind.as_str()),
                            %rejection,
                            "event candidate rejected, using fallback"
                        );
                        GenerationOutcome::new(
                            prompt,
                            ProviderTag::fallback_for(kind),
                            suggestion,
                            Some(rejection.to_string()),
                        )
                    }
                    None => GenerationOutcome::new(
                        prompt,
                        kind.map_or(ProviderTag::Template, ProviderTag::Provider),
                        suggestion,
                        None,
                    ),
                }
            }
            Attempt::Fallback(failure) => {
                let suggestion = finalize_event(fallback_event(request.subject(), request.occasion()));
                GenerationOutcome::new(prompt, ProviderTag::fallback_for(kind), suggestion, failure)
            }
        }
    }
}
