use neighborly_application::{GenerationAuditRecord, GenerationAuditRepository};
use neighborly_domain::{AuditStatus, GenerationKind, ProviderKind, ProviderTag};
use sqlx::PgPool;
use sqlx::migrate::Migrator;
use sqlx::postgres::PgPoolOptions;
use uuid::Uuid;

use super::PostgresGenerationAuditRepository;

static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

async fn test_pool() -> Option<PgPool> {
    let Ok(database_url) = std::env::var("DATABASE_URL") else {
        return None;
    };

    let pool = match PgPoolOptions::new()
        .max_connections(2)
        .connect(database_url.as_str())
        .await
    {
        Ok(pool) => pool,
        Err(error) => panic!("failed to connect to DATABASE_URL in test: {error}"),
    };

    if let Err(error) = MIGRATOR.run(&pool).await {
        panic!("failed to run migrations for postgres generation audit tests: {error}");
    }

    Some(pool)
}

#[tokio::test]
async fn append_record_persists_all_columns() {
    let Some(pool) = test_pool().await else {
        return;
    };

    let repository = PostgresGenerationAuditRepository::new(pool.clone());
    let subject = format!("audit-{}", Uuid::new_v4());
    let submission_id = Uuid::new_v4().to_string();

    let appended = repository
        .append_record(GenerationAuditRecord {
            subject: subject.clone(),
            goal_id: None,
            kind: GenerationKind::Feedback,
            provider: ProviderTag::ProviderFallback(ProviderKind::Gemini),
            prompt: "Goal: newsletter".to_owned(),
            response: "Thanks for sharing.".to_owned(),
            status: AuditStatus::Error,
            error: Some("provider rate limit reached: HTTP 429".to_owned()),
            submission_id: Some(submission_id.clone()),
            file_name: Some("draft.txt".to_owned()),
            content: Some("Newsletter draft for the spring potluck.".to_owned()),
        })
        .await;
    assert!(appended.is_ok());

    let row = sqlx::query_as::<
        _,
        (
            String,
            String,
            String,
            Option<String>,
            Option<String>,
            Option<String>,
        ),
    >(
        r#"
            SELECT kind, provider, status, submission_id, file_name, content
            FROM generation_audit_log
            WHERE subject = $1
            "#,
    )
    .bind(subject.as_str())
    .fetch_one(&pool)
    .await;

    let Ok((kind, provider, status, stored_submission_id, file_name, content)) = row else {
        panic!("audit row should exist");
    };
    assert_eq!(kind, "feedback");
    assert_eq!(provider, "gemini:fallback");
    assert_eq!(status, "error");
    assert_eq!(stored_submission_id.as_deref(), Some(submission_id.as_str()));
    assert_eq!(file_name.as_deref(), Some("draft.txt"));
    assert_eq!(
        content.as_deref(),
        Some("Newsletter draft for the spring potluck.")
    );
}
