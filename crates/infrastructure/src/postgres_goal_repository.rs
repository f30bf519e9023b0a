use async_trait::async_trait;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use neighborly_application::GoalRepository;
use neighborly_core::{AppError, AppResult};
use neighborly_domain::{Goal, GoalId};

/// PostgreSQL-backed read adapter for resident goals.
#[derive(Clone)]
pub struct PostgresGoalRepository {
    pool: PgPool,
}

impl PostgresGoalRepository {
    /// Creates a repository with the provided connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct GoalRow {
    id: Uuid,
    owner_subject: String,
    title: String,
}

#[async_trait]
impl GoalRepository for PostgresGoalRepository {
    async fn find_goal(&self, owner_subject: &str, goal_id: GoalId) -> AppResult<Option<Goal>> {
        let row = sqlx::query_as::<_, GoalRow>(
            r#"
            SELECT id, owner_subject, title
            FROM goals
            WHERE id = $1 AND owner_subject = $2
            "#,
        )
        .bind(goal_id.as_uuid())
        .bind(owner_subject)
        .fetch_optional(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to load goal: {error}")))?;

        row.map(|row| Goal::new(GoalId::from_uuid(row.id), row.owner_subject, row.title))
            .transpose()
    }
}
