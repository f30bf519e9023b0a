//! Domain rules applied to every generated candidate.
//!
//! Candidates describing a solo assignment, or too short to be useful, are
//! rejected outright and replaced with the deterministic fallback. Candidates
//! that only lack a community cue are patched with an invitation sentence.
//! Every result, fallback included, then goes through lexical sanitation and
//! length clamping.

use std::fmt::{Display, Formatter};

use crate::fallback::{fallback_event, fallback_feedback};
use crate::generation::{EventSuggestion, FeedbackReview};
use crate::occasion::Occasion;
use crate::text::{clip_chars, replace_ignore_case};

/// Markers of "solo task" phrasing that disqualify an event candidate.
pub const BANNED_MARKERS: [&str; 9] = [
    "challenge",
    "task",
    "habit",
    "journal",
    "daily",
    "checklist",
    "deep dive",
    "ship",
    "deliver",
];

/// Terms showing that a description involves the building community.
pub const COMMUNITY_CUES: [&str; 6] = [
    "neighbor",
    "resident",
    "community",
    "block",
    "courtyard",
    "building",
];

/// Sentence appended to descriptions that lack any community cue.
pub const NEIGHBOR_INVITATION: &str = "Invite your neighbors in the building to join in.";

/// Descriptions at or below this many characters are rejected.
pub const SHORT_DESCRIPTION_CHARS: usize = 30;

/// Feedback below this many characters is rejected.
pub const MIN_FEEDBACK_CHARS: usize = 30;

/// Longest accepted title, in characters.
pub const MAX_TITLE_CHARS: usize = 80;

/// Longest accepted description or feedback, in characters.
pub const MAX_BODY_CHARS: usize = 900;

const SANITIZED_TERMS: [(&str, &str); 4] = [
    ("challenge", "event"),
    ("task", "event"),
    ("habit", "routine"),
    ("journal", "story"),
];

/// Unvalidated event text parsed from a provider answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventCandidate {
    /// Candidate title.
    pub title: String,
    /// Candidate description.
    pub description: String,
}

/// Unvalidated feedback text parsed from a provider answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedbackCandidate {
    /// Candidate feedback.
    pub feedback: String,
}

/// Reason a candidate was discarded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    /// Title or description contained a banned marker.
    BannedMarker(&'static str),
    /// Description was too short to describe an event.
    DescriptionTooShort(usize),
    /// Feedback was too short to be actionable.
    FeedbackTooShort(usize),
}

impl Display for Rejection {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BannedMarker(marker) => {
                write!(formatter, "candidate contains banned marker '{marker}'")
            }
            Self::DescriptionTooShort(length) => write!(
                formatter,
                "candidate description has {length} characters; more than {SHORT_DESCRIPTION_CHARS} required"
            ),
            Self::FeedbackTooShort(length) => write!(
                formatter,
                "candidate feedback has {length} characters; at least {MIN_FEEDBACK_CHARS} required"
            ),
        }
    }
}

/// Validated value plus whether the fallback had to stand in for the candidate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Validated<T> {
    value: T,
    rejection: Option<Rejection>,
}

impl<T> Validated<T> {
    /// Returns whether the candidate was replaced by fallback output.
    #[must_use]
    pub fn substituted(&self) -> bool {
        self.rejection.is_some()
    }

    /// Returns the rejection reason when the candidate was replaced.
    #[must_use]
    pub fn rejection(&self) -> Option<Rejection> {
        self.rejection
    }

    /// Returns the validated value.
    #[must_use]
    pub fn value(&self) -> &T {
        &self.value
    }

    /// Splits into the validated value and the optional rejection.
    #[must_use]
    pub fn into_parts(self) -> (T, Option<Rejection>) {
        (self.value, self.rejection)
    }
}

/// Validates a provider event candidate for the given subject and occasion.
#[must_use]
pub fn validate_event(
    candidate: EventCandidate,
    subject: &str,
    occasion: Option<&Occasion>,
) -> Validated<EventSuggestion> {
    let title = candidate.title.trim();
    let description = candidate.description.trim();

    let rejection = banned_marker(&format!("{title}\n{description}"))
        .map(Rejection::BannedMarker)
        .or_else(|| {
            let length = description.chars().count();
            (length <= SHORT_DESCRIPTION_CHARS).then_some(Rejection::DescriptionTooShort(length))
        });

    match rejection {
        Some(rejection) => Validated {
            value: finalize_event(fallback_event(subject, occasion)),
            rejection: Some(rejection),
        },
        None => Validated {
            value: finalize_event(EventSuggestion {
                title: title.to_owned(),
                description: description.to_owned(),
                occasion: occasion.map(|occasion| occasion.as_str().to_owned()),
            }),
            rejection: None,
        },
    }
}

/// Validates a provider feedback candidate.
#[must_use]
pub fn validate_feedback(
    candidate: FeedbackCandidate,
    summary: Option<&str>,
) -> Validated<FeedbackReview> {
    let feedback = candidate.feedback.trim();
    let length = feedback.chars().count();

    if length < MIN_FEEDBACK_CHARS {
        return Validated {
            value: finalize_feedback(fallback_feedback(summary)),
            rejection: Some(Rejection::FeedbackTooShort(length)),
        };
    }

    Validated {
        value: finalize_feedback(FeedbackReview {
            feedback: feedback.to_owned(),
        }),
        rejection: None,
    }
}

/// Applies sanitation, the community cue patch, and length bounds.
#[must_use]
pub fn finalize_event(suggestion: EventSuggestion) -> EventSuggestion {
    let title = clip_chars(sanitize(&suggestion.title).trim(), MAX_TITLE_CHARS);
    let description = with_community_cue(sanitize(&suggestion.description).trim());

    EventSuggestion {
        title,
        description,
        occasion: suggestion.occasion,
    }
}

/// Applies length bounds to feedback.
#[must_use]
pub fn finalize_feedback(review: FeedbackReview) -> FeedbackReview {
    FeedbackReview {
        feedback: clip_chars(review.feedback.trim(), MAX_BODY_CHARS),
    }
}

/// Returns the first banned marker found in the text.
#[must_use]
pub fn banned_marker(text: &str) -> Option<&'static str> {
    let lowered = text.to_lowercase();
    BANNED_MARKERS
        .iter()
        .copied()
        .find(|marker| lowered.contains(marker))
}

/// Returns whether the text mentions the building community.
#[must_use]
pub fn has_community_cue(text: &str) -> bool {
    let lowered = text.to_lowercase();
    COMMUNITY_CUES.iter().any(|cue| lowered.contains(cue))
}

fn sanitize(text: &str) -> String {
    SANITIZED_TERMS
        .iter()
        .fold(text.to_owned(), |text, (needle, replacement)| {
            replace_ignore_case(&text, needle, replacement)
        })
}

fn with_community_cue(description: &str) -> String {
    if has_community_cue(description) {
        return clip_chars(description, MAX_BODY_CHARS);
    }

    let room = MAX_BODY_CHARS - NEIGHBOR_INVITATION.len() - 2;
    let body = clip_chars(description, room);
    let separator = if body.ends_with(['.', '!', '?']) {
        " "
    } else {
        ". "
    };

    format!("{body}{separator}{NEIGHBOR_INVITATION}")
}
