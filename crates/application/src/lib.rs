//! Application services and ports.

#![forbid(unsafe_code)]

mod community_ai_service;
mod generation_ports;
mod generation_service;
mod provider_client;

pub use community_ai_service::{COMMUNITY_EVENT_SUBJECT, CommunityAiService};
pub use generation_ports::{
    AuditWriteMode, GenerationAuditRecord, GenerationAuditRepository, GenerationProvider,
    GoalRepository, ProviderError, ProviderRequest, ReviewSubmissionInput, SubmissionReview,
    SuggestEventInput, SuggestedEvent,
};
pub use generation_service::GenerationService;
pub use provider_client::{ProviderClient, RawCandidate};
