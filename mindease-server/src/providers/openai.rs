//! Azure OpenAI chat completions client
//!
//! `POST {endpoint}/openai/deployments/{deployment}/chat/completions?api-version=...`

use async_trait::async_trait;
use mindease_common::ChatMessage;
use serde::{Deserialize, Serialize};

use super::{error_from_response, network_error, require, ProviderError, TextGenerator};

#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    messages: &'a [ChatMessage],
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

impl ChatCompletionResponse {
    fn first_content(self) -> Result<String, ProviderError> {
        let choice = self
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| ProviderError::EmptyResponse("no choices in completion".to_string()))?;

        choice
            .message
            .content
            .filter(|content| !content.trim().is_empty())
            .ok_or_else(|| ProviderError::EmptyResponse("completion has no content".to_string()))
    }
}

/// Azure OpenAI client bound to one deployment
pub struct AzureOpenAiClient {
    http_client: reqwest::Client,
    endpoint: Option<String>,
    key: Option<String>,
    deployment: String,
    api_version: String,
}

impl AzureOpenAiClient {
    pub fn new(
        http_client: reqwest::Client,
        endpoint: Option<String>,
        key: Option<String>,
        deployment: String,
        api_version: String,
    ) -> Self {
        Self {
            http_client,
            endpoint,
            key,
            deployment,
            api_version,
        }
    }
}

#[async_trait]
impl TextGenerator for AzureOpenAiClient {
    async fn generate(&self, messages: &[ChatMessage]) -> Result<String, ProviderError> {
        let endpoint = require(&self.endpoint, "AZURE_OPENAI_ENDPOINT")?;
        let key = require(&self.key, "AZURE_KEY")?;
        let url = format!(
            "{}/openai/deployments/{}/chat/completions",
            endpoint, self.deployment
        );

        tracing::debug!(
            url = %url,
            deployment = %self.deployment,
            message_count = messages.len(),
            "Querying chat completions API"
        );

        let response = self
            .http_client
            .post(&url)
            .query(&[("api-version", self.api_version.as_str())])
            .header("api-key", key)
            .json(&ChatCompletionRequest { messages })
            .send()
            .await
            .map_err(network_error)?;

        if !response.status().is_success() {
            return Err(error_from_response(response).await);
        }

        let parsed: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::ParseError(e.to_string()))?;

        let content = parsed.first_content()?;
        tracing::info!(reply_len = content.len(), "Chat completion received");

        Ok(content)
    }
}
