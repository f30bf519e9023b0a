use async_trait::async_trait;
use neighborly_application::{GenerationProvider, ProviderError, ProviderRequest};
use neighborly_domain::ProviderKind;
use serde::Deserialize;
use serde_json::json;

use crate::provider_http::{endpoint, post_json};

/// Default Gemini API base URL.
pub const GEMINI_DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Default Gemini model.
pub const GEMINI_DEFAULT_MODEL: &str = "gemini-1.5-flash";

/// `generateContent` adapter for the generation provider port.
#[derive(Clone)]
pub struct GeminiGenerationProvider {
    http_client: reqwest::Client,
    base_url: String,
    api_key: String,
    model: String,
}

impl GeminiGenerationProvider {
    /// Creates a provider calling `{base_url}/models/{model}:generateContent`.
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
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<ContentCandidate>,
}

#[derive(Debug, Deserialize)]
struct ContentCandidate {
    content: Option<Content>,
}

#[derive(Debug, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<ContentPart>,
}

#[derive(Debug, Deserialize)]
struct ContentPart {
    text: Option<String>,
}

#[async_trait]
impl GenerationProvider for GeminiGenerationProvider {
    fn kind(&self) -> ProviderKind {
        ProviderKind::Gemini
    }

    async fn generate(&self, request: &ProviderRequest) -> Result<String, ProviderError> {
        let body = json!({
            "systemInstruction": { "parts": [{ "text": request.system_instruction }] },
            "contents": [{ "role": "user", "parts": [{ "text": request.prompt }] }],
            "generationConfig": {
                "temperature": request.temperature,
                "maxOutputTokens": request.max_output_tokens,
                "responseMimeType": "application/json",
            },
        });

        let response: GenerateContentResponse = post_json(
            self.http_client
                .post(endpoint(
                    &self.base_url,
                    &format!("models/{}:generateContent", self.model),
                ))
                .header("x-goog-api-key", &self.api_key),
            &body,
        )
        .await?;

        let text: String = response
            .candidates
            .into_iter()
            .next()
            .and_then(|candidate| candidate.content)
            .map(|content| {
                content
                    .parts
                    .into_iter()
                    .filter_map(|part| part.text)
                    .collect()
            })
            .unwrap_or_default();

        if text.trim().is_empty() {
            return Err(ProviderError::Parse(
                "response has no candidate text".to_owned(),
            ));
        }

        Ok(text)
    }
}

#[cfg(test)]
mod tests;
