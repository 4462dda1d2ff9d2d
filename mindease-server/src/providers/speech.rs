//! Speech-to-text client (short audio REST)
//!
//! `POST {endpoint}/speech/recognition/conversation/cognitiveservices/v1`
//! with a 16 kHz mono PCM WAV body. The browser records and encodes the
//! utterance; this client only forwards it.

use async_trait::async_trait;
use serde::Deserialize;

use super::{
    error_from_response, network_error, require, ProviderError, SpeechRecognizer,
    SUBSCRIPTION_KEY_HEADER,
};

const RECOGNITION_PATH: &str = "/speech/recognition/conversation/cognitiveservices/v1";
const WAV_CONTENT_TYPE: &str = "audio/wav; codecs=audio/pcm; samplerate=16000";

/// Recognition languages offered on the mood page
pub const SUPPORTED_LANGUAGES: [&str; 10] = [
    "en-US", "hi-IN", "fr-FR", "es-ES", "de-DE", "it-IT", "pt-PT", "zh-CN", "ja-JP", "ko-KR",
];

pub fn is_supported_language(language: &str) -> bool {
    SUPPORTED_LANGUAGES.contains(&language)
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct RecognitionResponse {
    recognition_status: String,
    #[serde(default)]
    display_text: Option<String>,
}

/// Azure speech recognition client
pub struct AzureSpeechClient {
    http_client: reqwest::Client,
    endpoint: String,
    key: Option<String>,
}

impl AzureSpeechClient {
    pub fn new(http_client: reqwest::Client, endpoint: String, key: Option<String>) -> Self {
        Self {
            http_client,
            endpoint,
            key,
        }
    }
}

/// Map a recognition status to recognized text or an error
fn interpret(response: RecognitionResponse) -> Result<String, ProviderError> {
    match response.recognition_status.as_str() {
        "Success" => {
            let text = response.display_text.unwrap_or_default();
            if text.trim().is_empty() {
                Err(ProviderError::NoMatch(
                    "Speech was recognized but produced no text".to_string(),
                ))
            } else {
                Ok(text)
            }
        }
        "NoMatch" => Err(ProviderError::NoMatch(
            "Speech was detected but could not be matched to any words".to_string(),
        )),
        "InitialSilenceTimeout" => Err(ProviderError::NoMatch(
            "Only silence was detected at the start of the recording".to_string(),
        )),
        "BabbleTimeout" => Err(ProviderError::NoMatch(
            "Only noise was detected at the start of the recording".to_string(),
        )),
        "Error" => Err(ProviderError::ServiceError(
            "Recognition service reported an internal error".to_string(),
        )),
        other => Err(ProviderError::ServiceError(format!(
            "Unexpected recognition status: {}",
            other
        ))),
    }
}

#[async_trait]
impl SpeechRecognizer for AzureSpeechClient {
    async fn recognize(&self, audio: &[u8], language: &str) -> Result<String, ProviderError> {
        let key = require(&self.key, "AZURE_KEY")?;
        let url = format!("{}{}", self.endpoint, RECOGNITION_PATH);

        tracing::debug!(
            url = %url,
            language = %language,
            audio_bytes = audio.len(),
            "Querying speech recognition API"
        );

        let response = self
            .http_client
            .post(&url)
            .query(&[("language", language), ("format", "simple")])
            .header(SUBSCRIPTION_KEY_HEADER, key)
            .header(reqwest::header::CONTENT_TYPE, WAV_CONTENT_TYPE)
            .header(reqwest::header::ACCEPT, "application/json")
            .body(audio.to_vec())
            .send()
            .await
            .map_err(network_error)?;

        if !response.status().is_success() {
            return Err(error_from_response(response).await);
        }

        let parsed: RecognitionResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::ParseError(e.to_string()))?;

        tracing::info!(status = %parsed.recognition_status, "Speech recognition complete");

        interpret(parsed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response(status: &str, text: Option<&str>) -> RecognitionResponse {
        RecognitionResponse {
            recognition_status: status.to_string(),
            display_text: text.map(str::to_string),
        }
    }

    #[test]
    fn test_supported_languages() {
        assert_eq!(SUPPORTED_LANGUAGES.len(), 10);
        assert!(is_supported_language("en-US"));
        assert!(is_supported_language("ko-KR"));
        assert!(!is_supported_language("en-GB"));
        assert!(!is_supported_language("en-us"));
    }

    #[test]
    fn test_success_returns_display_text() {
        let text = interpret(response("Success", Some("I feel tired today."))).unwrap();
        assert_eq!(text, "I feel tired today.");
    }

    #[test]
    fn test_no_match_statuses() {
        for status in ["NoMatch", "InitialSilenceTimeout", "BabbleTimeout"] {
            let err = interpret(response(status, None)).unwrap_err();
            assert!(matches!(err, ProviderError::NoMatch(_)), "{status}");
        }
    }

    #[test]
    fn test_success_with_blank_text_is_no_match() {
        let err = interpret(response("Success", Some("  "))).unwrap_err();
        assert!(matches!(err, ProviderError::NoMatch(_)));
    }

    #[test]
    fn test_error_status_is_service_error() {
        let err = interpret(response("Error", None)).unwrap_err();
        assert!(matches!(err, ProviderError::ServiceError(_)));
    }

    #[test]
    fn test_response_parses_pascal_case() {
        let parsed: RecognitionResponse = serde_json::from_str(
            r#"{"RecognitionStatus": "Success", "DisplayText": "Hello.", "Offset": 1000, "Duration": 5000}"#,
        )
        .unwrap();
        assert_eq!(parsed.recognition_status, "Success");
        assert_eq!(parsed.display_text.as_deref(), Some("Hello."));
    }
}
