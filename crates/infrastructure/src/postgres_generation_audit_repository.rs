use async_trait::async_trait;
use sqlx::PgPool;

use neighborly_application::{GenerationAuditRecord, GenerationAuditRepository};
use neighborly_core::{AppError, AppResult};

/// PostgreSQL-backed append-only generation audit log.
#[derive(Clone)]
pub struct PostgresGenerationAuditRepository {
    pool: PgPool,
}

impl PostgresGenerationAuditRepository {
    /// Creates a repository with the provided connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl GenerationAuditRepository for PostgresGenerationAuditRepository {
    async fn append_record(&self, record: GenerationAuditRecord) -> AppResult<()> {
        sqlx::query(
            r#"
            INSERT INTO generation_audit_log (
                subject,
                goal_id,
                kind,
                provider,
                prompt,
                response,
                status,
                error,
                submission_id,
                file_name,
                content
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            "#,
        )
        .bind(record.subject)
        .bind(record.goal_id.map(|goal_id| goal_id.as_uuid()))
        .bind(record.kind.as_str())
        .bind(record.provider.as_str())
        .bind(record.prompt)
        .bind(record.response)
        .bind(record.status.as_str())
        .bind(record.error)
        .bind(record.submission_id)
        .bind(record.file_name)
        .bind(record.content)
        .execute(&self.pool)
        .await
        .map_err(|error| {
            AppError::Internal(format!("failed to append generation audit record: {error}"))
        })?;

        Ok(())
    }
}

#[cfg(test)]
mod tests;
