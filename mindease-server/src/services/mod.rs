//! Page services
//!
//! Each service operation takes the per-session state it works on by
//! reference. Provider failures are mapped to [`AnalysisError`] before any
//! state is touched, so a failed call leaves the session exactly as it was.

pub mod chatbot;
pub mod mood_analyzer;
pub mod sessions;

pub use chatbot::MedicalChatbot;
pub use mood_analyzer::MoodAnalyzer;
pub use sessions::{Session, SessionStore};

use crate::providers::ProviderError;
use thiserror::Error;

/// Failure of a user-triggered analysis
#[derive(Debug, Error)]
pub enum AnalysisError {
    /// Required input was empty; no provider call was made
    #[error("Input missing: {0}")]
    InputMissing(String),

    /// Input present but not acceptable (language, file type)
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Provider call failed or returned an unusable payload
    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),

    /// Speech recognizer returned no usable text
    #[error("No speech recognized: {0}")]
    NoRecognitionResult(String),
}

impl From<ProviderError> for AnalysisError {
    fn from(err: ProviderError) -> Self {
        match err {
            ProviderError::NoMatch(detail) => AnalysisError::NoRecognitionResult(detail),
            other => AnalysisError::ServiceUnavailable(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_match_maps_to_no_recognition_result() {
        let err = AnalysisError::from(ProviderError::NoMatch("silence".to_string()));
        assert!(matches!(err, AnalysisError::NoRecognitionResult(ref d) if d == "silence"));
    }

    #[test]
    fn test_other_provider_errors_map_to_service_unavailable() {
        let errors = vec![
            ProviderError::NotConfigured("AZURE_KEY"),
            ProviderError::NetworkError("connection refused".to_string()),
            ProviderError::ApiError(500, "boom".to_string()),
            ProviderError::ServiceError("bad".to_string()),
            ProviderError::ParseError("eof".to_string()),
            ProviderError::EmptyResponse("none".to_string()),
        ];

        for err in errors {
            assert!(matches!(
                AnalysisError::from(err),
                AnalysisError::ServiceUnavailable(_)
            ));
        }
    }
}
