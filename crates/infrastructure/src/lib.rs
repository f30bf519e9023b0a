//! Infrastructure adapters for application ports.

#![forbid(unsafe_code)]

mod gemini_generation_provider;
mod in_memory_generation_audit_repository;
mod in_memory_goal_repository;
mod openai_generation_provider;
mod postgres_generation_audit_repository;
mod postgres_goal_repository;
mod provider_http;

pub use gemini_generation_provider::{
    GEMINI_DEFAULT_BASE_URL, GEMINI_DEFAULT_MODEL, GeminiGenerationProvider,
};
pub use in_memory_generation_audit_repository::InMemoryGenerationAuditRepository;
pub use in_memory_goal_repository::InMemoryGoalRepository;
pub use openai_generation_provider::{
    OPENAI_DEFAULT_BASE_URL, OPENAI_DEFAULT_MODEL, OpenAiGenerationProvider,
};
pub use postgres_generation_audit_repository::PostgresGenerationAuditRepository;
pub use postgres_goal_repository::PostgresGoalRepository;
