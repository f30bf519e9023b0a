use async_trait::async_trait;
use neighborly_domain::ProviderKind;
use thiserror::Error;

/// One prompt submission to an external language-model provider.
#[derive(Debug, Clone, PartialEq)]
pub struct ProviderRequest {
    /// Instruction steering the model toward compact JSON output.
    pub system_instruction: String,
    /// Rendered user prompt.
    pub prompt: String,
    /// Sampling temperature, fixed per call type.
    pub temperature: f32,
    /// Upper bound on output tokens.
    pub max_output_tokens: u32,
}

/// Failure conditions surfaced by provider calls.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProviderError {
    /// No provider is configured; callers go straight to the fallback.
    #[error("no generation provider is configured")]
    NoProvider,

    /// Network failure or an unexpected non-success HTTP status.
    #[error("provider transport failed: {0}")]
    Transport(String),

    /// Provider rejected the configured credentials (HTTP 401).
    #[error("provider rejected credentials: {0}")]
    Auth(String),

    /// Provider throttled the request (HTTP 429).
    #[error("provider rate limit reached: {0}")]
    RateLimit(String),

    /// Provider answered without a decodable JSON object.
    #[error("provider response could not be parsed: {0}")]
    Parse(String),
}

/// Port for a single external text generation API.
#[async_trait]
pub trait GenerationProvider: Send + Sync {
    /// Returns the provider family, used for provenance tags.
    fn kind(&self) -> ProviderKind;

    /// Submits one prompt and returns the raw response text.
    async fn generate(&self, request: &ProviderRequest) -> Result<String, ProviderError>;
}
