use async_trait::async_trait;
use neighborly_core::AppResult;
use neighborly_domain::{AuditStatus, GenerationKind, GoalId, ProviderTag};

/// Append-only record of one generation request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationAuditRecord {
    /// Subject that requested the generation.
    pub subject: String,
    /// Goal the request was linked to.
    pub goal_id: Option<GoalId>,
    /// Generation flavour.
    pub kind: GenerationKind,
    /// Path that produced the result.
    pub provider: ProviderTag,
    /// Rendered prompt.
    pub prompt: String,
    /// Serialized result returned to the caller.
    pub response: String,
    /// Outcome label.
    pub status: AuditStatus,
    /// Provider or content failure that forced a fallback.
    pub error: Option<String>,
    /// Submission identifier for feedback requests.
    pub submission_id: Option<String>,
    /// Submitted file name for feedback requests.
    pub file_name: Option<String>,
    /// Submitted content for feedback requests.
    pub content: Option<String>,
}

/// Port for persisting generation audit records.
#[async_trait]
pub trait GenerationAuditRepository: Send + Sync {
    /// Persists one audit record.
    async fn append_record(&self, record: GenerationAuditRecord) -> AppResult<()>;
}

/// How audit records are written relative to the response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuditWriteMode {
    /// Await the write inside the request flow.
    Inline,
    /// Spawn the write on the runtime and return immediately.
    Detached,
}
