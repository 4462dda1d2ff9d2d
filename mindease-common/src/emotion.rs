//! Emotion keyword extraction for the image path
//!
//! The generative model is asked for "the main emotion in one word", but the
//! reply is free text. The label is recovered by case-insensitive substring
//! matching against four keyword groups checked in a fixed order; the first
//! group with any hit wins, so "happy but scared" resolves to happiness.
//!
//! Known weak point: plain substring matching has no notion of word
//! boundaries or negation ("unhappy" matches happiness). Kept as-is so labels
//! stay compatible with earlier assessments.

use serde::Serialize;
use std::fmt;

/// Emotion label recorded for the image signal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Emotion {
    Happiness,
    Sadness,
    Anger,
    Fear,
    Neutral,
}

/// Keyword groups in priority order
const KEYWORD_GROUPS: [(Emotion, &[&str]); 4] = [
    (Emotion::Happiness, &["happy", "happiness", "joy"]),
    (Emotion::Sadness, &["sad", "sadness", "sorrow", "depressed"]),
    (Emotion::Anger, &["anger", "angry", "furious"]),
    (Emotion::Fear, &["fear", "afraid", "scared"]),
];

impl Emotion {
    pub fn as_str(&self) -> &'static str {
        match self {
            Emotion::Happiness => "happiness",
            Emotion::Sadness => "sadness",
            Emotion::Anger => "anger",
            Emotion::Fear => "fear",
            Emotion::Neutral => "neutral",
        }
    }
}

impl fmt::Display for Emotion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Map free-form model output to an emotion label
///
/// First matching keyword group wins; no match yields [`Emotion::Neutral`].
pub fn extract_emotion_keyword(free_text: &str) -> Emotion {
    let lowered = free_text.to_lowercase();

    KEYWORD_GROUPS
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|word| lowered.contains(word)))
        .map(|(emotion, _)| *emotion)
        .unwrap_or(Emotion::Neutral)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_group_wins_on_tie() {
        assert_eq!(
            extract_emotion_keyword("I feel so happy and a bit scared"),
            Emotion::Happiness
        );
    }

    #[test]
    fn test_anger_keywords() {
        assert_eq!(extract_emotion_keyword("I am furious"), Emotion::Anger);
        assert_eq!(extract_emotion_keyword("Anger."), Emotion::Anger);
    }

    #[test]
    fn test_no_match_is_neutral() {
        assert_eq!(
            extract_emotion_keyword("It was a plain afternoon"),
            Emotion::Neutral
        );
        assert_eq!(extract_emotion_keyword(""), Emotion::Neutral);
    }

    #[test]
    fn test_case_insensitive() {
        assert_eq!(extract_emotion_keyword("JOY"), Emotion::Happiness);
        assert_eq!(extract_emotion_keyword("Sorrow"), Emotion::Sadness);
        assert_eq!(extract_emotion_keyword("Afraid"), Emotion::Fear);
    }

    #[test]
    fn test_sadness_outranks_fear() {
        assert_eq!(
            extract_emotion_keyword("depressed and afraid"),
            Emotion::Sadness
        );
    }

    #[test]
    fn test_substring_match_has_no_word_boundaries() {
        // Documented weak point
        assert_eq!(extract_emotion_keyword("Unhappy"), Emotion::Happiness);
    }

    #[test]
    fn test_display_matches_label() {
        assert_eq!(Emotion::Fear.to_string(), "fear");
        assert_eq!(Emotion::Neutral.as_str(), "neutral");
    }
}
