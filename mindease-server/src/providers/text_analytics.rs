//! Text Analytics sentiment client
//!
//! `POST {endpoint}/text/analytics/v3.1/sentiment` with a single document.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::{
    error_from_response, network_error, require, AzureErrorDetail, ProviderError,
    SentimentAnalyzer, SUBSCRIPTION_KEY_HEADER,
};

const SENTIMENT_PATH: &str = "/text/analytics/v3.1/sentiment";
const DOCUMENT_ID: &str = "1";

#[derive(Debug, Serialize)]
struct SentimentRequest<'a> {
    documents: [SentimentDocument<'a>; 1],
}

#[derive(Debug, Serialize)]
struct SentimentDocument<'a> {
    id: &'a str,
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct SentimentResponse {
    #[serde(default)]
    documents: Vec<DocumentSentiment>,
    #[serde(default)]
    errors: Vec<DocumentError>,
}

#[derive(Debug, Deserialize)]
struct DocumentSentiment {
    sentiment: String,
}

#[derive(Debug, Deserialize)]
struct DocumentError {
    error: AzureErrorDetail,
}

/// Azure Text Analytics client
pub struct TextAnalyticsClient {
    http_client: reqwest::Client,
    endpoint: Option<String>,
    key: Option<String>,
}

impl TextAnalyticsClient {
    pub fn new(http_client: reqwest::Client, endpoint: Option<String>, key: Option<String>) -> Self {
        Self {
            http_client,
            endpoint,
            key,
        }
    }
}

#[async_trait]
impl SentimentAnalyzer for TextAnalyticsClient {
    async fn analyze_sentiment(&self, text: &str) -> Result<String, ProviderError> {
        let endpoint = require(&self.endpoint, "AZURE_TEXT_ENDPOINT")?;
        let key = require(&self.key, "AZURE_KEY")?;
        let url = format!("{}{}", endpoint, SENTIMENT_PATH);

        tracing::debug!(url = %url, text_len = text.len(), "Querying sentiment API");

        let body = SentimentRequest {
            documents: [SentimentDocument {
                id: DOCUMENT_ID,
                text,
            }],
        };

        let response = self
            .http_client
            .post(&url)
            .header(SUBSCRIPTION_KEY_HEADER, key)
            .json(&body)
            .send()
            .await
            .map_err(network_error)?;

        if !response.status().is_success() {
            return Err(error_from_response(response).await);
        }

        let parsed: SentimentResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::ParseError(e.to_string()))?;

        if let Some(document) = parsed.documents.first() {
            let sentiment = document.sentiment.trim().to_lowercase();
            if sentiment.is_empty() {
                return Err(ProviderError::EmptyResponse("blank sentiment label".to_string()));
            }
            tracing::info!(sentiment = %sentiment, "Sentiment analysis complete");
            return Ok(sentiment);
        }

        match parsed.errors.first() {
            Some(doc_error) => Err(ProviderError::ServiceError(doc_error.error.describe())),
            None => Err(ProviderError::EmptyResponse(
                "no document in sentiment response".to_string(),
            )),
        }
    }
}
