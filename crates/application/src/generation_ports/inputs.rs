use neighborly_domain::{EventSuggestion, GoalId, ProviderTag};

/// Caller input for community event suggestions.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SuggestEventInput {
    /// Optional goal whose title seeds the suggestion.
    pub goal_id: Option<String>,
    /// Optional explicit subject.
    pub subject: Option<String>,
    /// Optional free-text focus.
    pub focus: Option<String>,
    /// Optional occasion such as a holiday.
    pub occasion: Option<String>,
}

/// Community event suggestion returned to the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuggestedEvent {
    /// Validated suggestion.
    pub suggestion: EventSuggestion,
    /// Goal the suggestion was built from.
    pub goal_id: Option<GoalId>,
    /// Focus echoed back to the caller.
    pub focus: Option<String>,
    /// Path that produced the suggestion.
    pub provider: ProviderTag,
}

/// Caller input for submission feedback.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReviewSubmissionInput {
    /// Optional goal the submission relates to.
    pub goal_id: Option<String>,
    /// Optional explicit subject.
    pub subject: Option<String>,
    /// Submitted text.
    pub content: Option<String>,
    /// Optional name of the submitted file.
    pub file_name: Option<String>,
}

/// Submission feedback returned to the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionReview {
    /// Feedback text.
    pub feedback: String,
    /// Path that produced the feedback.
    pub provider: ProviderTag,
    /// Goal the submission was linked to.
    pub goal_id: Option<GoalId>,
    /// Submitted file name, empty when none was given.
    pub file_name: String,
    /// Identifier assigned to this submission.
    pub submission_id: String,
}
