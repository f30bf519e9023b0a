use async_trait::async_trait;
use neighborly_core::AppResult;
use neighborly_domain::{Goal, GoalId};

/// Read port onto the external goal store.
#[async_trait]
pub trait GoalRepository: Send + Sync {
    /// Returns one goal owned by the subject, if it exists.
    async fn find_goal(&self, owner_subject: &str, goal_id: GoalId) -> AppResult<Option<Goal>>;
}
