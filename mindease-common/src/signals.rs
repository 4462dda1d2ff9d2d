//! Session signals and assessment prompt composition
//!
//! A mood-analysis session tracks up to three independently obtained
//! classification results. Each starts Unknown and becomes Known once its
//! producing analysis succeeds; a later success for the same kind replaces
//! the stored label. Nothing in this module reverts a Known signal.
//!
//! The assessment prompt reasons only over Known signals. Unknown ones are
//! rendered with [`UNKNOWN_MARKER`] and the prompt names them explicitly as
//! inputs to ignore, so missing data is never read as a neutral reading.

use serde::Serialize;

/// Marker rendered in the prompt for a signal with no value
pub const UNKNOWN_MARKER: &str = "Unknown";

/// Closed set of mental health categories offered to the model
pub const ASSESSMENT_CATEGORIES: [&str; 4] = ["Healthy", "Mild Stress", "Anxiety", "Depression"];

/// System role sent with the assessment prompt
pub const ASSESSMENT_SYSTEM_PROMPT: &str = "You are a mental health AI assistant.";

/// Source of a classification signal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SignalKind {
    /// Sentiment of user-entered text
    TextSentiment,
    /// Sentiment of a recognized spoken utterance
    SpeechSentiment,
    /// Dominant emotion extracted from an image description
    ImageEmotion,
}

impl SignalKind {
    /// All kinds, in prompt order
    pub const ALL: [SignalKind; 3] = [
        SignalKind::TextSentiment,
        SignalKind::SpeechSentiment,
        SignalKind::ImageEmotion,
    ];

    /// Human-readable name used in the assessment prompt
    pub fn display_name(&self) -> &'static str {
        match self {
            SignalKind::TextSentiment => "Text Sentiment",
            SignalKind::SpeechSentiment => "Speech Sentiment",
            SignalKind::ImageEmotion => "Facial Emotion",
        }
    }
}

/// Current state of one signal
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "label", rename_all = "snake_case")]
pub enum Signal {
    /// No successful analysis yet
    #[default]
    Unknown,
    /// Label from the most recent successful analysis
    Known(String),
}

impl Signal {
    pub fn is_known(&self) -> bool {
        matches!(self, Signal::Known(_))
    }

    /// Stored label, if any
    pub fn label(&self) -> Option<&str> {
        match self {
            Signal::Known(label) => Some(label),
            Signal::Unknown => None,
        }
    }

    /// Value as rendered in the assessment prompt
    pub fn prompt_value(&self) -> &str {
        self.label().unwrap_or(UNKNOWN_MARKER)
    }
}

/// Per-session signal state for the mood analyzer
///
/// Owned by the session and passed by reference into each analysis
/// operation. Provider failures never reach this struct, so a failed
/// analysis cannot disturb a previously Known value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SessionSignals {
    text_sentiment: Signal,
    speech_sentiment: Signal,
    image_emotion: Signal,
}

impl SessionSignals {
    /// Create state with all three signals Unknown
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a label for `kind`, replacing any previous value
    pub fn record(&mut self, kind: SignalKind, label: impl Into<String>) {
        let label = label.into();
        tracing::debug!(kind = ?kind, label = %label, "Recording signal");
        *self.slot_mut(kind) = Signal::Known(label);
    }

    pub fn get(&self, kind: SignalKind) -> &Signal {
        match kind {
            SignalKind::TextSentiment => &self.text_sentiment,
            SignalKind::SpeechSentiment => &self.speech_sentiment,
            SignalKind::ImageEmotion => &self.image_emotion,
        }
    }

    fn slot_mut(&mut self, kind: SignalKind) -> &mut Signal {
        match kind {
            SignalKind::TextSentiment => &mut self.text_sentiment,
            SignalKind::SpeechSentiment => &mut self.speech_sentiment,
            SignalKind::ImageEmotion => &mut self.image_emotion,
        }
    }

    /// Kinds currently holding a value, in prompt order
    pub fn known_kinds(&self) -> Vec<SignalKind> {
        SignalKind::ALL
            .into_iter()
            .filter(|kind| self.get(*kind).is_known())
            .collect()
    }

    /// Kinds still Unknown, in prompt order
    pub fn unknown_kinds(&self) -> Vec<SignalKind> {
        SignalKind::ALL
            .into_iter()
            .filter(|kind| !self.get(*kind).is_known())
            .collect()
    }

    /// Compose the natural-language assessment instruction
    ///
    /// Lists every signal (label or [`UNKNOWN_MARKER`]), then the fixed
    /// classification instruction. When some signals are Unknown the prompt
    /// names them as ignored and names the ones to reason from. With no
    /// Known signal at all, the prompt opens with a "no data available"
    /// framing but still asks for a recommendation.
    pub fn compose_assessment_prompt(&self) -> String {
        let known = self.known_kinds();
        let unknown = self.unknown_kinds();

        let mut lines = Vec::with_capacity(12);
        lines.push("Based on the user's inputs:".to_string());
        for kind in SignalKind::ALL {
            lines.push(format!(
                "- {}: {}",
                kind.display_name(),
                self.get(kind).prompt_value()
            ));
        }
        lines.push(String::new());

        if known.is_empty() {
            lines.push(
                "No data available: none of the inputs could be analyzed for this user."
                    .to_string(),
            );
        }

        lines.push(format!(
            "Based on these inputs, classify their mental health status ({}), if possible.",
            ASSESSMENT_CATEGORIES.join(", ")
        ));
        lines.push(format!(
            "If any of the above inputs is {}, just ignore it and predict on the basis of known inputs only. \
             Do not treat an {} input as a neutral or negative reading.",
            UNKNOWN_MARKER, UNKNOWN_MARKER
        ));

        if !unknown.is_empty() {
            lines.push(format!("Ignore: {}.", join_names(&unknown)));
            if known.is_empty() {
                lines.push(
                    "Do not guess a classification without evidence; say that more input is needed."
                        .to_string(),
                );
            } else {
                lines.push(format!("Reason only from: {}.", join_names(&known)));
            }
        }

        lines.push(
            "Also, provide a short, actionable mental health assistance recommendation.".to_string(),
        );

        lines.join("\n")
    }
}

fn join_names(kinds: &[SignalKind]) -> String {
    kinds
        .iter()
        .map(|k| k.display_name())
        .collect::<Vec<_>>()
        .join(", ")
}
