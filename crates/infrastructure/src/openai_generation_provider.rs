use async_trait::async_trait;
use neighborly_application::{GenerationProvider, ProviderError, ProviderRequest};
use neighborly_domain::ProviderKind;
use serde::Deserialize;
use serde_json::json;

use crate::provider_http::{endpoint, post_json};

/// Default OpenAI API base URL.
pub const OPENAI_DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// Default OpenAI chat model.
pub const OPENAI_DEFAULT_MODEL: &str = "gpt-4o-mini";

/// Chat-completions adapter for the generation provider port.
#[derive(Clone)]
pub struct OpenAiGenerationProvider {
    http_client: reqwest::Client,
    base_url: String,
    api_key: String,
    model: String,
}

impl OpenAiGenerationProvider {
    /// Creates a provider calling `{base_url}/chat/completions`.
    #[must_use]
    pub fn new(
        http_client: reqwest::Client,
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        model: impl Into<String>,
    ) -> Self {
        Self {
            http_client,
            base_url: base_url.into(),
            api_key: api_key.into(),
            model: model.into(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Debug, Deserialize)]
struct ChatMessage {
    content: Option<String>,
}

#[async_trait]
impl GenerationProvider for OpenAiGenerationProvider {
    fn kind(&self) -> ProviderKind {
        ProviderKind::OpenAi
    }

    async fn generate(&self, request: &ProviderRequest) -> Result<String, ProviderError> {
        let body = json!({
            "model": self.model,
            "messages": [
                { "role": "system", "content": request.system_instruction },
                { "role": "user", "content": request.prompt },
            ],
            "temperature": request.temperature,
            "max_tokens": request.max_output_tokens,
            "response_format": { "type": "json_object" },
        });

        let response: ChatCompletionResponse = post_json(
            self.http_client
                .post(endpoint(&self.base_url, "chat/completions"))
                .bearer_auth(&self.api_key),
            &body,
        )
        .await?;

        response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .filter(|content| !content.trim().is_empty())
            .ok_or_else(|| ProviderError::Parse("response has no message content".to_owned()))
    }
}
