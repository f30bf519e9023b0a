//! Domain entities and generation rules.

#![forbid(unsafe_code)]

pub mod content_rules;
pub mod fallback;
mod generation;
mod goal;
mod occasion;
pub mod prompt;
mod text;

pub use content_rules::{EventCandidate, FeedbackCandidate, Rejection, Validated};
pub use generation::{
    AuditStatus, DEFAULT_EVENT_SUBJECT, DEFAULT_FEEDBACK_SUBJECT, EventRequest, EventSuggestion,
    FeedbackRequest, FeedbackReview, GenerationKind, GenerationOutcome, ProviderKind, ProviderTag,
};
pub use goal::{Goal, GoalId};
pub use occasion::{NO_OCCASION_LABEL, OCCASION_MAX_LENGTH, Occasion};
