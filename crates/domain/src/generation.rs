//! Requests, results, and provider provenance for AI-assisted generation.

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use neighborly_core::AppError;
use serde::{Deserialize, Serialize, Serializer};

use crate::occasion::Occasion;
use crate::text::clean;

/// Subject used when a request names neither a subject nor a focus.
pub const DEFAULT_EVENT_SUBJECT: &str = "a connected community";

/// Subject used when a feedback request is not linked to any goal.
pub const DEFAULT_FEEDBACK_SUBJECT: &str = "a personal goal";

/// External language-model provider families.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProviderKind {
    /// OpenAI chat-completions shaped API.
    #[serde(rename = "openai")]
    OpenAi,
    /// Gemini generateContent shaped API.
    Gemini,
}

impl ProviderKind {
    /// Returns a stable storage value for this provider.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::OpenAi => "openai",
            Self::Gemini => "gemini",
        }
    }
}

impl Display for ProviderKind {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        formatter.write_str(self.as_str())
    }
}

impl FromStr for ProviderKind {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "openai" => Ok(Self::OpenAi),
            "gemini" => Ok(Self::Gemini),
            other => Err(AppError::Validation(format!(
                "unknown provider '{other}'; expected 'openai' or 'gemini'"
            ))),
        }
    }
}

/// Records which path produced a generation result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProviderTag {
    /// The provider answered and its candidate was accepted.
    Provider(ProviderKind),
    /// A provider is configured but its output was unusable.
    ProviderFallback(ProviderKind),
    /// No provider is configured; templates only.
    Template,
}

impl ProviderTag {
    /// Returns the fallback tag for an optionally configured provider.
    #[must_use]
    pub fn fallback_for(kind: Option<ProviderKind>) -> Self {
        kind.map_or(Self::Template, Self::ProviderFallback)
    }

    /// Returns a stable storage value for this tag.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Provider(ProviderKind::OpenAi) => "openai",
            Self::Provider(ProviderKind::Gemini) => "gemini",
            Self::ProviderFallback(ProviderKind::OpenAi) => "openai:fallback",
            Self::ProviderFallback(ProviderKind::Gemini) => "gemini:fallback",
            Self::Template => "template",
        }
    }
}

impl Display for ProviderTag {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        formatter.write_str(self.as_str())
    }
}

impl FromStr for ProviderTag {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        if value == "template" {
            return Ok(Self::Template);
        }

        match value.split_once(':') {
            Some((kind, "fallback")) => kind.parse().map(Self::ProviderFallback),
            Some(_) => Err(AppError::Validation(format!(
                "unknown provider tag '{value}'"
            ))),
            None => value.parse().map(Self::Provider),
        }
    }
}

impl Serialize for ProviderTag {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Generation flavours recorded in the audit log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GenerationKind {
    /// Community event suggestion.
    Event,
    /// Feedback on a free-text submission.
    Feedback,
}

impl GenerationKind {
    /// Returns a stable storage value for this kind.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Event => "event",
            Self::Feedback => "feedback",
        }
    }
}

/// Outcome label persisted with every audit record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AuditStatus {
    /// The request completed without a provider or content failure.
    Success,
    /// A configured provider failed or returned unusable content.
    Error,
}

impl AuditStatus {
    /// Returns a stable storage value for this status.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Error => "error",
        }
    }
}

/// Normalized input for community event generation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventRequest {
    subject: String,
    focus: String,
    occasion: Option<Occasion>,
}

impl EventRequest {
    /// Builds a request from raw, possibly absent caller values.
    ///
    /// The subject falls back to the focus and then to
    /// [`DEFAULT_EVENT_SUBJECT`]; the focus falls back to the subject.
    #[must_use]
    pub fn new(subject: Option<&str>, focus: Option<&str>, occasion: Option<&str>) -> Self {
        Self::with_occasion(subject, focus, Occasion::normalize(occasion))
    }

    /// Builds a request around an already validated occasion.
    #[must_use]
    pub fn with_occasion(
        subject: Option<&str>,
        focus: Option<&str>,
        occasion: Option<Occasion>,
    ) -> Self {
        let subject = clean(subject)
            .or_else(|| clean(focus))
            .unwrap_or(DEFAULT_EVENT_SUBJECT)
            .to_owned();
        let focus = clean(focus).unwrap_or(subject.as_str()).to_owned();

        Self {
            subject,
            focus,
            occasion,
        }
    }

    /// Returns the event subject.
    #[must_use]
    pub fn subject(&self) -> &str {
        self.subject.as_str()
    }

    /// Returns the free-text focus.
    #[must_use]
    pub fn focus(&self) -> &str {
        self.focus.as_str()
    }

    /// Returns the normalized occasion, if any.
    #[must_use]
    pub fn occasion(&self) -> Option<&Occasion> {
        self.occasion.as_ref()
    }
}

/// Normalized input for submission feedback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedbackRequest {
    subject: String,
    summary: Option<String>,
}

impl FeedbackRequest {
    /// Builds a request from raw, possibly absent caller values.
    #[must_use]
    pub fn new(subject: Option<&str>, summary: Option<&str>) -> Self {
        Self {
            subject: clean(subject)
                .unwrap_or(DEFAULT_FEEDBACK_SUBJECT)
                .to_owned(),
            summary: clean(summary).map(ToOwned::to_owned),
        }
    }

    /// Returns the goal the submission relates to.
    #[must_use]
    pub fn subject(&self) -> &str {
        self.subject.as_str()
    }

    /// Returns the submission summary, if one was supplied.
    #[must_use]
    pub fn summary(&self) -> Option<&str> {
        self.summary.as_deref()
    }
}

/// Validated community event suggestion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EventSuggestion {
    /// Short event title.
    pub title: String,
    /// Two or three sentences describing the shared event.
    pub description: String,
    /// Normalized occasion the event is planned around.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub occasion: Option<String>,
}

/// Validated review of a free-text submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FeedbackReview {
    /// Supportive, actionable feedback text.
    pub feedback: String,
}

/// Result of one generation request together with its provenance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationOutcome<T> {
    prompt: String,
    provider: ProviderTag,
    result: T,
    failure: Option<String>,
}

impl<T> GenerationOutcome<T> {
    /// Creates an outcome from its parts.
    #[must_use]
    pub fn new(prompt: String, provider: ProviderTag, result: T, failure: Option<String>) -> Self {
        Self {
            prompt,
            provider,
            result,
            failure,
        }
    }

    /// Returns the rendered prompt.
    #[must_use]
    pub fn prompt(&self) -> &str {
        self.prompt.as_str()
    }

    /// Returns the provider tag.
    #[must_use]
    pub fn provider(&self) -> ProviderTag {
        self.provider
    }

    /// Returns the generated result.
    #[must_use]
    pub fn result(&self) -> &T {
        &self.result
    }

    /// Returns the provider or content failure that forced a fallback, if any.
    #[must_use]
    pub fn failure(&self) -> Option<&str> {
        self.failure.as_deref()
    }

    /// Returns the audit status implied by this outcome.
    #[must_use]
    pub fn audit_status(&self) -> AuditStatus {
        if self.failure.is_some() {
            AuditStatus::Error
        } else {
            AuditStatus::Success
        }
    }

    /// Consumes the outcome and returns the generated result.
    #[must_use]
    pub fn into_result(self) -> T {
        self.result
    }
}
