use std::collections::HashMap;

use async_trait::async_trait;
use neighborly_application::GoalRepository;
use neighborly_core::AppResult;
use neighborly_domain::{Goal, GoalId};
use tokio::sync::RwLock;

/// In-memory goal store for development runs and tests.
#[derive(Default)]
pub struct InMemoryGoalRepository {
    goals: RwLock<HashMap<GoalId, Goal>>,
}

impl InMemoryGoalRepository {
    /// Creates an empty goal store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces one goal.
    pub async fn insert_goal(&self, goal: Goal) {
        self.goals.write().await.insert(goal.id(), goal);
    }
}

#[async_trait]
impl GoalRepository for InMemoryGoalRepository {
    async fn find_goal(&self, owner_subject: &str, goal_id: GoalId) -> AppResult<Option<Goal>> {
        Ok(self
            .goals
            .read()
            .await
            .get(&goal_id)
            .filter(|goal| goal.owner_subject() == owner_subject)
            .cloned())
    }
}
