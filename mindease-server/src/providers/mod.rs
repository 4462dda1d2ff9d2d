//! Hosted AI provider clients
//!
//! Each upstream service sits behind an async trait so the analysis services
//! can be exercised with in-process fakes. The Azure implementations share
//! one `reqwest::Client` with an explicit request timeout.
//!
//! Providers:
//! - [`SentimentAnalyzer`]: Text Analytics sentiment
//! - [`SpeechRecognizer`]: short-audio speech-to-text
//! - [`ImageDescriber`]: Computer Vision image description
//! - [`TextGenerator`]: Azure OpenAI chat completions

pub mod openai;
pub mod speech;
pub mod text_analytics;
pub mod vision;

pub use openai::AzureOpenAiClient;
pub use speech::{AzureSpeechClient, SUPPORTED_LANGUAGES};
pub use text_analytics::TextAnalyticsClient;
pub use vision::{VisionClient, NO_DESCRIPTION};

use async_trait::async_trait;
use mindease_common::config::AzureConfig;
use mindease_common::ChatMessage;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

const USER_AGENT: &str = concat!("MindEase/", env!("CARGO_PKG_VERSION"));

/// Header carrying the cognitive services subscription key
pub(crate) const SUBSCRIPTION_KEY_HEADER: &str = "Ocp-Apim-Subscription-Key";

/// Provider client errors
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("{0} is not configured")]
    NotConfigured(&'static str),

    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("API error {0}: {1}")]
    ApiError(u16, String),

    #[error("Service error: {0}")]
    ServiceError(String),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Empty response: {0}")]
    EmptyResponse(String),

    /// Speech recognizer heard nothing usable
    #[error("No speech recognized: {0}")]
    NoMatch(String),
}

/// Classifies the sentiment of a piece of text
#[async_trait]
pub trait SentimentAnalyzer: Send + Sync {
    /// Returns a sentiment label (positive, neutral, negative, mixed)
    async fn analyze_sentiment(&self, text: &str) -> Result<String, ProviderError>;
}

/// Transcribes a short recorded utterance
#[async_trait]
pub trait SpeechRecognizer: Send + Sync {
    /// `audio` is a 16 kHz mono PCM WAV file; `language` a locale code
    async fn recognize(&self, audio: &[u8], language: &str) -> Result<String, ProviderError>;
}

/// Caption produced for an uploaded image
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImageDescription {
    /// First caption, or [`NO_DESCRIPTION`] when the service had none
    pub caption: String,
    /// Number of faces detected
    pub face_count: usize,
}

/// Describes image content in natural language
#[async_trait]
pub trait ImageDescriber: Send + Sync {
    async fn describe(&self, image: &[u8]) -> Result<ImageDescription, ProviderError>;
}

/// Generates free-form text from a conversation
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Returns the first completion's content
    async fn generate(&self, messages: &[ChatMessage]) -> Result<String, ProviderError>;
}

/// Bundle of provider implementations used by the services
#[derive(Clone)]
pub struct Providers {
    pub sentiment: Arc<dyn SentimentAnalyzer>,
    pub speech: Arc<dyn SpeechRecognizer>,
    pub vision: Arc<dyn ImageDescriber>,
    pub text: Arc<dyn TextGenerator>,
}

impl Providers {
    /// Build Azure-backed providers from resolved configuration
    ///
    /// Missing settings do not fail construction; the affected client
    /// reports [`ProviderError::NotConfigured`] when called.
    pub fn azure(config: &AzureConfig) -> Result<Self, ProviderError> {
        let http_client = build_http_client(config.request_timeout)?;

        Ok(Self {
            sentiment: Arc::new(TextAnalyticsClient::new(
                http_client.clone(),
                config.text_endpoint.clone(),
                config.key.clone(),
            )),
            speech: Arc::new(AzureSpeechClient::new(
                http_client.clone(),
                config.effective_speech_endpoint(),
                config.key.clone(),
            )),
            vision: Arc::new(VisionClient::new(
                http_client.clone(),
                config.effective_vision_endpoint().map(str::to_string),
                config.key.clone(),
            )),
            text: Arc::new(AzureOpenAiClient::new(
                http_client,
                config.openai_endpoint.clone(),
                config.key.clone(),
                config.gpt_deployment.clone(),
                config.api_version.clone(),
            )),
        })
    }
}

/// HTTP client shared by the Azure providers
pub fn build_http_client(timeout: Duration) -> Result<reqwest::Client, ProviderError> {
    reqwest::Client::builder()
        .user_agent(USER_AGENT)
        .timeout(timeout)
        .build()
        .map_err(|e| ProviderError::NetworkError(e.to_string()))
}

pub(crate) fn require<'a>(
    value: &'a Option<String>,
    name: &'static str,
) -> Result<&'a str, ProviderError> {
    value.as_deref().ok_or(ProviderError::NotConfigured(name))
}

/// Azure error envelope: `{"error": {"code": "...", "message": "..."}}`
#[derive(Debug, Deserialize)]
pub(crate) struct AzureErrorEnvelope {
    pub error: AzureErrorDetail,
}

#[derive(Debug, Deserialize)]
pub(crate) struct AzureErrorDetail {
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

impl AzureErrorDetail {
    pub fn describe(&self) -> String {
        match (&self.code, &self.message) {
            (Some(code), Some(message)) => format!("{}: {}", code, message),
            (None, Some(message)) => message.clone(),
            (Some(code), None) => code.clone(),
            (None, None) => "unspecified error".to_string(),
        }
    }
}

/// Turn a non-success response into an [`ProviderError::ApiError`]
///
/// Uses the Azure error message when the body carries one.
pub(crate) async fn error_from_response(response: reqwest::Response) -> ProviderError {
    let status = response.status().as_u16();
    let body = response.text().await.unwrap_or_default();

    let message = serde_json::from_str::<AzureErrorEnvelope>(&body)
        .map(|envelope| envelope.error.describe())
        .unwrap_or(body);

    ProviderError::ApiError(status, message)
}

pub(crate) fn network_error(e: reqwest::Error) -> ProviderError {
    if e.is_timeout() {
        ProviderError::NetworkError(format!("request timed out: {}", e))
    } else {
        ProviderError::NetworkError(e.to_string())
    }
}
