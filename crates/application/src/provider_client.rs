//! Provider selection and JSON extraction from free-text model answers.

use std::sync::Arc;

use neighborly_domain::{EventCandidate, FeedbackCandidate, ProviderKind};
use serde_json::{Map, Value};

use crate::generation_ports::{GenerationProvider, ProviderError, ProviderRequest};

/// Wraps the provider selected at startup, if any.
#[derive(Clone, Default)]
pub struct ProviderClient {
    provider: Option<Arc<dyn GenerationProvider>>,
}

impl ProviderClient {
    /// Creates a client around an optional provider.
    #[must_use]
    pub fn new(provider: Option<Arc<dyn GenerationProvider>>) -> Self {
        Self { provider }
    }

    /// Creates a client with no provider; every call yields [`ProviderError::NoProvider`].
    #[must_use]
    pub fn disabled() -> Self {
        Self::default()
    }

    /// Returns the configured provider family.
    #[must_use]
    pub fn kind(&self) -> Option<ProviderKind> {
        self.provider.as_ref().map(|provider| provider.kind())
    }

    /// Sends one prompt and parses the first JSON object in the answer.
    pub async fn call(&self, request: &ProviderRequest) -> Result<RawCandidate, ProviderError> {
        let provider = self.provider.as_ref().ok_or(ProviderError::NoProvider)?;
        let text = provider.generate(request).await?;
        RawCandidate::from_text(&text)
    }
}

/// JSON object parsed out of a provider answer, not yet validated.
#[derive(Debug, Clone, PartialEq)]
pub struct RawCandidate(Map<String, Value>);

impl RawCandidate {
    /// Extracts the first decodable JSON object from free text.
    ///
    /// Prose and Markdown code fences around the object are ignored.
    pub fn from_text(text: &str) -> Result<Self, ProviderError> {
        let mut last_error = None;

        for (start, _) in text.match_indices('{') {
            let Some(object) = balanced_object(&text[start..]) else {
                continue;
            };

            match serde_json::from_str::<Map<String, Value>>(object) {
                Ok(map) => return Ok(Self(map)),
                Err(error) => {
                    last_error.get_or_insert(error.to_string());
                }
            }
        }

        Err(ProviderError::Parse(last_error.unwrap_or_else(|| {
            "response contains no JSON object".to_owned()
        })))
    }

    /// Returns a trimmed, non-empty string field.
    #[must_use]
    pub fn text_field(&self, name: &str) -> Option<&str> {
        self.0
            .get(name)
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|value| !value.is_empty())
    }

    /// Returns the event fields when both `title` and `description` are present.
    #[must_use]
    pub fn event_candidate(&self) -> Option<EventCandidate> {
        Some(EventCandidate {
            title: self.text_field("title")?.to_owned(),
            description: self.text_field("description")?.to_owned(),
        })
    }

    /// Returns the feedback field when present.
    #[must_use]
    pub fn feedback_candidate(&self) -> Option<FeedbackCandidate> {
        Some(FeedbackCandidate {
            feedback: self.text_field("feedback")?.to_owned(),
        })
    }
}

/// Returns the `{...}` prefix of `text` with balanced braces outside strings.
fn balanced_object(text: &str) -> Option<&str> {
    let mut depth = 0_usize;
    let mut in_string = false;
    let mut escaped = false;

    for (index, character) in text.char_indices() {
        if in_string {
            match character {
                _ if escaped => escaped = false,
                '\\' => escaped = true,
                '"' => in_string = false,
                _ => {}
            }
            continue;
        }

        match character {
            '"' => in_string = true,
            '{' => depth += 1,
            '}' => {
                depth = depth.checked_sub(1)?;
                if depth == 0 {
                    return Some(&text[..=index]);
                }
            }
            _ => {}
        }
    }

    None
}
