//! Dominant-script detection for message text.

use std::fmt;

use serde::{Deserialize, Serialize};
use stencil_core::constants::LANGUAGE_DOMINANCE_RATIO;

/// Language of a message, judged by which script dominates its letters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    Arabic,
    English,
    Mixed,
    Unknown,
}

impl Language {
    /// Short code written into template files.
    pub fn code(self) -> &'static str {
        match self {
            Self::Arabic => "ar",
            Self::English => "en",
            Self::Mixed => "mixed",
            Self::Unknown => "unknown",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Classify `text` by the share of Arabic-block versus ASCII letters.
///
/// A script dominates when it holds more than 70% of the counted letters.
/// Text with no letters of either script is `Unknown`.
pub fn detect_language(text: &str) -> Language {
    let (arabic, latin) = text.chars().fold((0usize, 0usize), |(ar, en), c| {
        if ('\u{0600}'..='\u{06FF}').contains(&c) {
            (ar + 1, en)
        } else if c.is_ascii_alphabetic() {
            (ar, en + 1)
        } else {
            (ar, en)
        }
    });

    let total = arabic + latin;
    if total == 0 {
        return Language::Unknown;
    }
    let share = |n: usize| n as f64 / total as f64;
    if share(arabic) > LANGUAGE_DOMINANCE_RATIO {
        Language::Arabic
    } else if share(latin) > LANGUAGE_DOMINANCE_RATIO {
        Language::English
    } else {
        Language::Mixed
    }
}
