//! Offline, deterministic generators used when no provider answer is usable.

use crate::generation::{EventSuggestion, FeedbackReview};
use crate::occasion::Occasion;
use crate::text::{clean, clip_chars, stable_index};

/// Longest topic interpolated into a template, in characters.
pub const FALLBACK_TOPIC_MAX_CHARS: usize = 60;

const DEFAULT_EVENT_TOPIC: &str = "your building";
const DEFAULT_FEEDBACK_TOPIC: &str = "your work";

struct TemplateText {
    title: String,
    description: String,
}

type EventTemplate = fn(&str, Option<&str>) -> TemplateText;

const EVENT_TEMPLATES: [EventTemplate; 4] = [courtyard_social, giving_drive, walkabout, game_night];

/// Builds an event suggestion without any external calls.
///
/// The template is picked by a stable hash of `subject:occasion-label`, so the
/// same pair always yields byte-identical output.
#[must_use]
pub fn fallback_event(subject: &str, occasion: Option<&Occasion>) -> EventSuggestion {
    let subject = subject.trim();
    let label = Occasion::label(occasion);
    let index = stable_index(&format!("{subject}:{label}"), EVENT_TEMPLATES.len());

    let topic = topic_or(subject, DEFAULT_EVENT_TOPIC);
    let text = EVENT_TEMPLATES[index](&topic, occasion.map(Occasion::as_str));

    EventSuggestion {
        title: text.title,
        description: text.description,
        occasion: occasion.map(|occasion| occasion.as_str().to_owned()),
    }
}

/// Builds submission feedback without any external calls.
#[must_use]
pub fn fallback_feedback(summary: Option<&str>) -> FeedbackReview {
    let topic = topic_or(
        clean(summary)
            .unwrap_or_default()
            .trim_end_matches(['.', '!', '?']),
        DEFAULT_FEEDBACK_TOPIC,
    );

    FeedbackReview {
        feedback: format!(
            "Thanks for sharing \"{topic}\". Strengths: the intent is clear and the effort shows. \
To improve, tighten the structure, state the outcome you want up front, and add one concrete \
example. Next step: revise one small section with these notes and share it again for review."
        ),
    }
}

fn topic_or(value: &str, default: &str) -> String {
    let value = value.trim();
    if value.is_empty() {
        return default.to_owned();
    }

    clip_chars(value, FALLBACK_TOPIC_MAX_CHARS)
}

fn for_occasion(occasion: Option<&str>) -> String {
    occasion
        .map(|occasion| format!(" for {occasion}"))
        .unwrap_or_default()
}

fn courtyard_social(topic: &str, occasion: Option<&str>) -> TemplateText {
    TemplateText {
        title: match occasion {
            Some(occasion) => format!("{occasion} courtyard social: {topic}"),
            None => format!("Courtyard social: {topic}"),
        },
        description: format!(
            "Set up a few tables in the courtyard{} and invite neighbors to swap ideas about \
{topic}. Bring snacks to share, wear name stickers, and leave with one plan to meet again.",
            for_occasion(occasion)
        ),
    }
}

fn giving_drive(topic: &str, occasion: Option<&str>) -> TemplateText {
    TemplateText {
        title: match occasion {
            Some(occasion) => format!("{occasion} neighbor giving drive: {topic}"),
            None => format!("Neighbor giving drive: {topic}"),
        },
        description: format!(
            "Place a labeled donation box in the lobby for one week{} and ask residents to \
contribute items connected to {topic}. Close the drive with a short meetup where everyone sorts \
the donations together.",
            for_occasion(occasion)
        ),
    }
}

fn walkabout(topic: &str, occasion: Option<&str>) -> TemplateText {
    TemplateText {
        title: match occasion {
            Some(occasion) => format!("{occasion} block walkabout: {topic}"),
            None => format!("Block walkabout: {topic}"),
        },
        description: format!(
            "Gather residents at the front entrance for a 45-minute stroll around the block{}, \
pausing at spots that relate to {topic}. Finish with a quick circle where each neighbor shares \
one idea for the building.",
            for_occasion(occasion)
        ),
    }
}

fn game_night(topic: &str, occasion: Option<&str>) -> TemplateText {
    TemplateText {
        title: match occasion {
            Some(occasion) => format!("{occasion} community game night: {topic}"),
            None => format!("Community game night: {topic}"),
        },
        description: format!(
            "Host a relaxed game night in the common room{} with board games and one themed \
round about {topic}. Ask each household to bring a snack and a neighbor they have not met yet.",
            for_occasion(occasion)
        ),
    }
}
