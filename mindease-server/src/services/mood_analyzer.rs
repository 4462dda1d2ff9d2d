//! Mood analyzer
//!
//! Three independent analysis paths each feed one session signal:
//! - text → sentiment → TextSentiment
//! - recorded speech → transcript → sentiment → SpeechSentiment
//! - image → caption → one-word emotion → keyword label → ImageEmotion
//!
//! The assessment fans the current signals into one prompt for the
//! generative model and returns its reply unmodified. Nothing is retried
//! automatically; the user repeats the action to try again.

use mindease_common::signals::ASSESSMENT_SYSTEM_PROMPT;
use mindease_common::{extract_emotion_keyword, ChatMessage, Emotion, SessionSignals, SignalKind};
use serde::Serialize;
use tracing::{info, warn};

use super::AnalysisError;
use crate::providers::speech::is_supported_language;
use crate::providers::{Providers, SUPPORTED_LANGUAGES};

/// System role for the image emotion question
pub const IMAGE_EMOTION_SYSTEM_PROMPT: &str =
    "You are an expert in analyzing emotions in images.";

/// Image formats accepted for upload, by sniffed MIME type
pub const ACCEPTED_IMAGE_TYPES: [&str; 2] = ["image/jpeg", "image/png"];

/// Outcome of the text path
#[derive(Debug, Clone, Serialize)]
pub struct TextAnalysis {
    pub sentiment: String,
}

/// Outcome of the speech path
#[derive(Debug, Clone, Serialize)]
pub struct SpeechAnalysis {
    pub recognized_text: String,
    pub sentiment: String,
}

/// Outcome of the image path
#[derive(Debug, Clone, Serialize)]
pub struct ImageAnalysis {
    /// Caption from the vision service (or the fallback text)
    pub description: String,
    pub face_count: usize,
    /// Unparsed model answer to the emotion question
    pub raw_answer: String,
    /// Label recorded for the image signal
    pub emotion: Emotion,
}

/// Advisory text returned by the generative model, unmodified
#[derive(Debug, Clone, Serialize)]
pub struct AssessmentResult {
    pub assessment: String,
}

/// Mood analysis service
pub struct MoodAnalyzer {
    providers: Providers,
}

impl MoodAnalyzer {
    pub fn new(providers: Providers) -> Self {
        Self { providers }
    }

    /// Classify user-entered text and record the TextSentiment signal
    pub async fn analyze_text(
        &self,
        signals: &mut SessionSignals,
        text: &str,
    ) -> Result<TextAnalysis, AnalysisError> {
        if text.trim().is_empty() {
            return Err(AnalysisError::InputMissing("Please enter some text.".to_string()));
        }

        let sentiment = self
            .providers
            .sentiment
            .analyze_sentiment(text)
            .await
            .map_err(|e| {
                warn!("Text sentiment analysis failed: {}", e);
                AnalysisError::from(e)
            })?;

        signals.record(SignalKind::TextSentiment, sentiment.clone());
        info!(sentiment = %sentiment, "Text sentiment recorded");

        Ok(TextAnalysis { sentiment })
    }

    /// Transcribe a recorded utterance, classify it, and record SpeechSentiment
    pub async fn analyze_speech(
        &self,
        signals: &mut SessionSignals,
        audio: &[u8],
        language: &str,
    ) -> Result<SpeechAnalysis, AnalysisError> {
        if !is_supported_language(language) {
            return Err(AnalysisError::InvalidInput(format!(
                "Unsupported language '{}'. Choose one of: {}",
                language,
                SUPPORTED_LANGUAGES.join(", ")
            )));
        }
        if audio.is_empty() {
            return Err(AnalysisError::InputMissing(
                "No audio was recorded.".to_string(),
            ));
        }

        let recognized_text = self
            .providers
            .speech
            .recognize(audio, language)
            .await
            .map_err(|e| {
                warn!(language = %language, "Speech recognition failed: {}", e);
                AnalysisError::from(e)
            })?;

        let sentiment = self
            .providers
            .sentiment
            .analyze_sentiment(&recognized_text)
            .await
            .map_err(|e| {
                warn!("Speech sentiment analysis failed: {}", e);
                AnalysisError::from(e)
            })?;

        signals.record(SignalKind::SpeechSentiment, sentiment.clone());
        info!(sentiment = %sentiment, language = %language, "Speech sentiment recorded");

        Ok(SpeechAnalysis {
            recognized_text,
            sentiment,
        })
    }

    /// Describe an uploaded image, extract its dominant emotion, and record ImageEmotion
    pub async fn analyze_image(
        &self,
        signals: &mut SessionSignals,
        image: &[u8],
    ) -> Result<ImageAnalysis, AnalysisError> {
        if image.is_empty() {
            return Err(AnalysisError::InputMissing(
                "Please upload an image.".to_string(),
            ));
        }

        let mime = infer::get(image).map(|kind| kind.mime_type());
        if !mime.is_some_and(|m| ACCEPTED_IMAGE_TYPES.contains(&m)) {
            return Err(AnalysisError::InvalidInput(format!(
                "Unsupported image type {}; upload a JPG or PNG file.",
                mime.unwrap_or("(unrecognized)")
            )));
        }

        let description = self.providers.vision.describe(image).await.map_err(|e| {
            warn!("Image description failed: {}", e);
            AnalysisError::from(e)
        })?;

        let messages = [
            ChatMessage::system(IMAGE_EMOTION_SYSTEM_PROMPT),
            ChatMessage::user(emotion_question(&description.caption)),
        ];
        let raw_answer = self.providers.text.generate(&messages).await.map_err(|e| {
            warn!("Image emotion question failed: {}", e);
            AnalysisError::from(e)
        })?;

        let emotion = extract_emotion_keyword(&raw_answer);
        signals.record(SignalKind::ImageEmotion, emotion.as_str());
        info!(emotion = %emotion, "Image emotion recorded");

        Ok(ImageAnalysis {
            description: description.caption,
            face_count: description.face_count,
            raw_answer,
            emotion,
        })
    }

    /// Ask the generative model for an assessment over the current signals
    ///
    /// Never blocked by Unknown signals. Signals are read only.
    pub async fn request_assessment(
        &self,
        signals: &SessionSignals,
    ) -> Result<AssessmentResult, AnalysisError> {
        let prompt = signals.compose_assessment_prompt();
        info!(
            known = signals.known_kinds().len(),
            "Requesting mental health assessment"
        );

        let messages = [
            ChatMessage::system(ASSESSMENT_SYSTEM_PROMPT),
            ChatMessage::user(prompt),
        ];

        let assessment = self.providers.text.generate(&messages).await.map_err(|e| {
            warn!("Assessment request failed: {}", e);
            AnalysisError::ServiceUnavailable(e.to_string())
        })?;

        Ok(AssessmentResult { assessment })
    }
}

fn emotion_question(description: &str) -> String {
    format!(
        "Analyze this image description and provide the main emotion in one word: {}",
        description
    )
}
