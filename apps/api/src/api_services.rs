use std::sync::Arc;
use std::time::Duration;

use neighborly_application::{
    CommunityAiService, GenerationAuditRepository, GenerationProvider, GenerationService,
    GoalRepository, ProviderClient,
};
use neighborly_core::AppError;
use neighborly_infrastructure::{
    GeminiGenerationProvider, InMemoryGenerationAuditRepository, InMemoryGoalRepository,
    OpenAiGenerationProvider, PostgresGenerationAuditRepository, PostgresGoalRepository,
};
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use tracing::{info, warn};

use crate::api_config::{ApiConfig, GenerationProviderConfig};
use crate::state::AppState;

pub async fn connect_and_migrate(database_url: &str) -> Result<PgPool, AppError> {
    let pool = PgPoolOptions::new()
        .max_connections(10)
        .connect(database_url)
        .await
        .map_err(|error| AppError::Internal(format!("failed to connect to database: {error}")))?;

    sqlx::migrate!("../../crates/infrastructure/migrations")
        .run(&pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to run migrations: {error}")))?;

    Ok(pool)
}

pub fn build_app_state(config: &ApiConfig, pool: Option<PgPool>) -> Result<AppState, AppError> {
    let (goal_repository, audit_repository): (
        Arc<dyn GoalRepository>,
        Arc<dyn GenerationAuditRepository>,
    ) = match pool {
        Some(pool) => (
            Arc::new(PostgresGoalRepository::new(pool.clone())),
            Arc::new(PostgresGenerationAuditRepository::new(pool)),
        ),
        None => {
            warn!("DATABASE_URL is not set; goals and audit records are kept in memory");
            (
                Arc::new(InMemoryGoalRepository::new()),
                Arc::new(InMemoryGenerationAuditRepository::new()),
            )
        }
    };

    let provider = build_generation_provider(&config.generation_provider, config.request_timeout)?;
    let generation_service = GenerationService::new(ProviderClient::new(provider));

    Ok(AppState {
        community_ai_service: CommunityAiService::new(
            generation_service,
            goal_repository,
            audit_repository,
        ),
        production: config.production,
    })
}

pub fn build_generation_provider(
    config: &GenerationProviderConfig,
    request_timeout: Duration,
) -> Result<Option<Arc<dyn GenerationProvider>>, AppError> {
    let Some(kind) = config.kind() else {
        info!("no generation provider configured; using deterministic templates");
        return Ok(None);
    };

    let provider: Arc<dyn GenerationProvider> = match config {
        GenerationProviderConfig::Disabled => return Ok(None),
        GenerationProviderConfig::OpenAi(provider) => {
            Arc::new(OpenAiGenerationProvider::new(
                http_client(request_timeout)?,
                provider.base_url.as_str(),
                provider.api_key.as_str(),
                provider.model.as_str(),
            ))
        }
        GenerationProviderConfig::Gemini(provider) => {
            Arc::new(GeminiGenerationProvider::new(
                http_client(request_timeout)?,
                provider.base_url.as_str(),
                provider.api_key.as_str(),
                provider.model.as_str(),
            ))
        }
    };

    info!(
        provider = kind.as_str(),
        timeout_secs = request_timeout.as_secs(),
        "generation provider configured"
    );
    Ok(Some(provider))
}

fn http_client(request_timeout: Duration) -> Result<reqwest::Client, AppError> {
    reqwest::Client::builder()
        .timeout(request_timeout)
        .build()
        .map_err(|error| AppError::Internal(format!("failed to build HTTP client: {error}")))
}
