use neighborly_domain::content_rules::{finalize_feedback, validate_feedback};
use neighborly_domain::fallback::fallback_feedback;
use neighborly_domain::prompt::{
    FEEDBACK_SYSTEM_INSTRUCTION, FEEDBACK_TEMPERATURE, MAX_OUTPUT_TOKENS, feedback_prompt,
};
use neighborly_domain::{FeedbackRequest, FeedbackReview, GenerationOutcome, ProviderTag};
use tracing::warn;

use super::{Attempt, GenerationService};
use crate::generation_ports::ProviderRequest;

impl GenerationService {
    /// Generates feedback on a submission; never fails.
    pub async fn generate_feedback(
        &self,
        request: &FeedbackRequest,
    ) -> GenerationOutcome<FeedbackReview> {
        let prompt = feedback_prompt(request);
        let provider_request = ProviderRequest {
            system_instruction: FEEDBACK_SYSTEM_INSTRUCTION.to_owned(),
            prompt: prompt.clone(),
            temperature: FEEDBACK_TEMPERATURE,
            max_output_tokens: MAX_OUTPUT_TOKENS,
        };
        let kind = self.provider_kind();

        let attempt = self
            .attempt(&provider_request, "'feedback'", |candidate| {
                candidate.feedback_candidate()
            })
            .await;

        match attempt {
            Attempt::Candidate(candidate) => {
                let (review, rejection) =
                    validate_feedback(candidate, request.summary()).into_parts();

                match rejection {
                    Some(rejection) => {
                        warn!(
                            provider = kind.map(|kind| kind.as_str()),
                            %rejection,
                            "feedback candidate rejected, using fallback"
                        );
                        GenerationOutcome::new(
                            prompt,
                            ProviderTag::fallback_for(kind),
                            review,
                            Some(rejection.to_string()),
                        )
                    }
                    None => GenerationOutcome::new(
                        prompt,
                        kind.map_or(ProviderTag::Template, ProviderTag::Provider),
                        review,
                        None,
                    ),
                }
            }
            Attempt::Fallback(failure) => {
                let review = finalize_feedback(fallback_feedback(request.summary()));
                GenerationOutcome::new(prompt, ProviderTag::fallback_for(kind), review, failure)
            }
        }
    }
}
