use std::fmt::{Display, Formatter};

use neighborly_core::{AppError, AppResult, NonEmptyString};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a resident goal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GoalId(Uuid);

impl GoalId {
    /// Creates a new random goal identifier.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates a goal identifier from an existing UUID value.
    #[must_use]
    pub fn from_uuid(value: Uuid) -> Self {
        Self(value)
    }

    /// Parses a transport value into a goal identifier.
    pub fn parse(value: &str) -> AppResult<Self> {
        Uuid::parse_str(value.trim())
            .map(Self)
            .map_err(|_| AppError::Validation(format!("invalid goal id '{}'", value.trim())))
    }

    /// Returns the underlying UUID value.
    #[must_use]
    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for GoalId {
    fn default() -> Self {
        Self::new()
    }
}

impl Display for GoalId {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        write!(formatter, "{}", self.0)
    }
}

/// Resident goal that can seed event suggestions and submission reviews.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Goal {
    id: GoalId,
    owner_subject: String,
    title: NonEmptyString,
}

impl Goal {
    /// Creates a goal owned by the given subject.
    pub fn new(
        id: GoalId,
        owner_subject: impl Into<String>,
        title: impl Into<String>,
    ) -> AppResult<Self> {
        Ok(Self {
            id,
            owner_subject: owner_subject.into(),
            title: NonEmptyString::new(title)?,
        })
    }

    /// Returns the goal identifier.
    #[must_use]
    pub fn id(&self) -> GoalId {
        self.id
    }

    /// Returns the subject that owns the goal.
    #[must_use]
    pub fn owner_subject(&self) -> &str {
        self.owner_subject.as_str()
    }

    /// Returns the goal title.
    #[must_use]
    pub fn title(&self) -> &str {
        self.title.as_str()
    }
}
