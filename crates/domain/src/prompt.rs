//! Deterministic prompt rendering for provider calls.

use crate::generation::{EventRequest, FeedbackRequest};
use crate::occasion::Occasion;

/// Summary placeholder used when a submission arrives without text.
pub const DEFAULT_SUBMISSION_SUMMARY: &str = "A short submission was provided.";

/// Sampling temperature for event suggestions.
pub const EVENT_TEMPERATURE: f32 = 0.7;

/// Sampling temperature for submission feedback.
pub const FEEDBACK_TEMPERATURE: f32 = 0.55;

/// Upper bound on provider output tokens for every call type.
pub const MAX_OUTPUT_TOKENS: u32 = 400;

/// System instruction steering event generation toward compact JSON.
pub const EVENT_SYSTEM_INSTRUCTION: &str = "You plan friendly events for residents who share a \
building. Always describe something neighbors do together, never a solo assignment. Reply with \
one compact JSON object and nothing else.";

/// System instruction steering feedback generation toward compact JSON.
pub const FEEDBACK_SYSTEM_INSTRUCTION: &str = "You are a supportive reviewer. Keep feedback \
concise, actionable, and kind. Reply with one compact JSON object and nothing else.";

const EVENT_TEMPLATE: &str = r#"You help residents of a shared apartment building turn personal goals into community events.
- Subject: "{subject}"
- Focus: "{focus}"
- Occasion: "{occasion}"

Suggest one event that neighbors attend together in or around the building.
If the occasion is "none", do not tie the event to a holiday.

Respond with a compact JSON object:
{
  "title": "short event title (max 70 chars)",
  "description": "2-3 sentences: where neighbors gather, what they do together, and how to join",
  "occasion": "the occasion the event celebrates, or none"
}"#;

const FEEDBACK_TEMPLATE: &str = r#"You are an expert reviewer providing concise, kind feedback.
- Goal: "{subject}"
- Submission summary: "{summary}"

Respond as JSON with:
{
  "feedback": "2-4 sentences with strengths, specific improvements, and one next step"
}"#;

/// Renders the event suggestion prompt.
#[must_use]
pub fn event_prompt(request: &EventRequest) -> String {
    render(
        EVENT_TEMPLATE,
        &[
            ("subject", request.subject()),
            ("focus", request.focus()),
            ("occasion", Occasion::label(request.occasion())),
        ],
    )
}

/// Renders the submission feedback prompt.
#[must_use]
pub fn feedback_prompt(request: &FeedbackRequest) -> String {
    render(
        FEEDBACK_TEMPLATE,
        &[
            ("subject", request.subject()),
            (
                "summary",
                request.summary().unwrap_or(DEFAULT_SUBMISSION_SUMMARY),
            ),
        ],
    )
}

/// Substitutes `{name}` placeholders in a single left-to-right pass.
///
/// Substituted values are never rescanned, so user text containing braces
/// cannot inject further placeholders. Unknown `{...}` spans are kept verbatim.
fn render(template: &str, values: &[(&str, &str)]) -> String {
    let mut output = String::with_capacity(template.len() + 128);
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        output.push_str(&rest[..open]);
        let after_open = &rest[open + 1..];

        let placeholder = after_open.find('}').and_then(|close| {
            let name = &after_open[..close];
            values
                .iter()
                .find(|(key, _)| *key == name)
                .map(|(_, value)| (close, *value))
        });

        match placeholder {
            Some((close, value)) => {
                output.push_str(value);
                rest = &after_open[close + 1..];
            }
            None => {
                output.push('{');
                rest = after_open;
            }
        }
    }

    output.push_str(rest);
    output
}
