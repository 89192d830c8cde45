//! Language and mood catalogs
//!
//! The selection screen offers a fixed language list and a fixed manual
//! mood list. Manual input is validated against these sets; detection
//! results are accepted verbatim because the detection service owns its
//! own label space.

use serde::Serialize;

use crate::error::{Error, Result};

/// Languages offered by the selection screen, in display order.
pub const LANGUAGES: &[&str] = &[
    "English",
    "Hindi",
    "Punjabi",
    "Kannada",
    "Tamil",
    "Telugu",
    "Malayalam",
    "Marathi",
    "Bengali",
    "Gujarati",
    "Odia",
    "Assamese",
    "Urdu",
    "Arabic",
    "Spanish",
    "French",
    "German",
    "Italian",
    "Portuguese",
    "Russian",
    "Chinese",
    "Japanese",
    "Korean",
    "Turkish",
    "Vietnamese",
    "Thai",
    "Indonesian",
    "Persian",
    "Swahili",
];

/// Mood labels offered by the manual selector, in display order.
///
/// Labels match case-sensitively. The playlist service receives whatever
/// label the session holds, so casing is preserved end to end.
pub const MOODS: &[&str] = &[
    "HAPPY",
    "SAD",
    "CALM",
    "ANGRY",
    "FEAR",
    "Mass",
    "Romantic",
    "Energetic",
    "Peaceful",
    "DISGUST",
    "CONFUSED",
    "EXCITED",
    "RELAXED",
    "BORED",
    "NEUTRAL",
    "ANXIOUS",
    "LOVING",
    "SILLY",
    "CONTENT",
    "FRUSTRATED",
    "TIRED",
    "SURPRISED",
];

/// A language from the fixed catalog.
///
/// Construction goes through [`Language::parse`], so any held value is a
/// catalog member. Serializes as a plain string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Language(String);

impl Language {
    /// Validate a label against the catalog.
    pub fn parse(value: &str) -> Result<Self> {
        if LANGUAGES.contains(&value) {
            Ok(Language(value.to_string()))
        } else {
            Err(Error::Validation(format!("unknown language: {}", value)))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for Language {
    /// The selection screen opens with English preselected.
    fn default() -> Self {
        Language(LANGUAGES[0].to_string())
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// True when `label` is one of the manual-selector moods.
pub fn is_known_mood(label: &str) -> bool {
    MOODS.contains(&label)
}
