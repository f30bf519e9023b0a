use neighborly_core::{AppError, AppResult};
use serde::{Deserialize, Serialize};

use crate::text::{clean, clip_chars, title_case};

/// Maximum accepted occasion length in characters.
pub const OCCASION_MAX_LENGTH: usize = 80;

/// Prompt label rendered when a request carries no occasion.
pub const NO_OCCASION_LABEL: &str = "none";

/// Holiday or celebration an event is planned around, normalized to title case.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Occasion(String);

impl Occasion {
    /// Parses caller input, rejecting values longer than [`OCCASION_MAX_LENGTH`].
    ///
    /// Blank input and the literal `none` both mean "no occasion".
    pub fn parse(value: Option<&str>) -> AppResult<Option<Self>> {
        let Some(value) = clean(value) else {
            return Ok(None);
        };

        if value.chars().count() > OCCASION_MAX_LENGTH {
            return Err(AppError::Validation(format!(
                "occasion is too long; use at most {OCCASION_MAX_LENGTH} characters"
            )));
        }

        Ok(Self::from_clean(value))
    }

    /// Normalizes caller input without failing, clipping over-long values.
    #[must_use]
    pub fn normalize(value: Option<&str>) -> Option<Self> {
        clean(value).and_then(|value| Self::from_clean(&clip_chars(value, OCCASION_MAX_LENGTH)))
    }

    fn from_clean(value: &str) -> Option<Self> {
        if value.eq_ignore_ascii_case(NO_OCCASION_LABEL) {
            return None;
        }

        Some(Self(title_case(value)))
    }

    /// Returns the normalized occasion text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// Returns the prompt label for an optional occasion.
    #[must_use]
    pub fn label(occasion: Option<&Self>) -> &str {
        occasion.map_or(NO_OCCASION_LABEL, Self::as_str)
    }
}

impl From<Occasion> for String {
    fn from(value: Occasion) -> Self {
        value.0
    }
}
