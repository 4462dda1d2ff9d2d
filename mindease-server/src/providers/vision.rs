//! Computer Vision image description client
//!
//! `POST {endpoint}/vision/v3.2/analyze?visualFeatures=Faces,Description`

use async_trait::async_trait;
use serde::de::IgnoredAny;
use serde::Deserialize;

use super::{
    error_from_response, network_error, require, ImageDescriber, ImageDescription,
    ProviderError, SUBSCRIPTION_KEY_HEADER,
};

const ANALYZE_PATH: &str = "/vision/v3.2/analyze";

/// Caption used when the service returns none
pub const NO_DESCRIPTION: &str = "No description available.";

#[derive(Debug, Deserialize)]
struct AnalyzeResponse {
    #[serde(default)]
    description: Option<Description>,
    #[serde(default)]
    faces: Vec<IgnoredAny>,
}

#[derive(Debug, Deserialize)]
struct Description {
    #[serde(default)]
    captions: Vec<Caption>,
}

#[derive(Debug, Deserialize)]
struct Caption {
    text: String,
}

impl AnalyzeResponse {
    fn into_description(self) -> ImageDescription {
        let caption = self
            .description
            .and_then(|d| d.captions.into_iter().next())
            .map(|c| c.text)
            .filter(|text| !text.trim().is_empty())
            .unwrap_or_else(|| NO_DESCRIPTION.to_string());

        ImageDescription {
            caption,
            face_count: self.faces.len(),
        }
    }
}

/// Azure Computer Vision client
pub struct VisionClient {
    http_client: reqwest::Client,
    endpoint: Option<String>,
    key: Option<String>,
}

impl VisionClient {
    pub fn new(http_client: reqwest::Client, endpoint: Option<String>, key: Option<String>) -> Self {
        Self {
            http_client,
            endpoint,
            key,
        }
    }
}

#[async_trait]
impl ImageDescriber for VisionClient {
    async fn describe(&self, image: &[u8]) -> Result<ImageDescription, ProviderError> {
        let endpoint = require(&self.endpoint, "AZURE_VISION_ENDPOINT")?;
        let key = require(&self.key, "AZURE_KEY")?;
        let url = format!("{}{}", endpoint, ANALYZE_PATH);

        tracing::debug!(url = %url, image_bytes = image.len(), "Querying vision API");

        let response = self
            .http_client
            .post(&url)
            .query(&[("visualFeatures", "Faces,Description"), ("language", "en")])
            .header(SUBSCRIPTION_KEY_HEADER, key)
            .header(reqwest::header::CONTENT_TYPE, "application/octet-stream")
            .body(image.to_vec())
            .send()
            .await
            .map_err(network_error)?;

        if !response.status().is_success() {
            return Err(error_from_response(response).await);
        }

        let parsed: AnalyzeResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::ParseError(e.to_string()))?;

        let description = parsed.into_description();
        tracing::info!(
            faces = description.face_count,
            caption_len = description.caption.len(),
            "Image description complete"
        );

        Ok(description)
    }
}
