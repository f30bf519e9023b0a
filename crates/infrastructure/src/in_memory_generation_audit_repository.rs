use async_trait::async_trait;
use neighborly_application::{GenerationAuditRecord, GenerationAuditRepository};
use neighborly_core::AppResult;
use tokio::sync::RwLock;

/// In-memory generation audit log for development runs and tests.
#[derive(Default)]
pub struct InMemoryGenerationAuditRepository {
    records: RwLock<Vec<GenerationAuditRecord>>,
}

impl InMemoryGenerationAuditRepository {
    /// Creates an empty audit log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a snapshot of all records in append order.
    pub async fn records(&self) -> Vec<GenerationAuditRecord> {
        self.records.read().await.clone()
    }
}

#[async_trait]
impl GenerationAuditRepository for InMemoryGenerationAuditRepository {
    async fn append_record(&self, record: GenerationAuditRecord) -> AppResult<()> {
        self.records.write().await.push(record);
        Ok(())
    }
}
