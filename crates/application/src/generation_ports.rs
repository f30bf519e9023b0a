mod audit;
mod goals;
mod inputs;
mod provider;

pub use audit::{AuditWriteMode, GenerationAuditRecord, GenerationAuditRepository};
pub use goals::GoalRepository;
pub use inputs::{ReviewSubmissionInput, SubmissionReview, SuggestEventInput, SuggestedEvent};
pub use provider::{GenerationProvider, ProviderError, ProviderRequest};
