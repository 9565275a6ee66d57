use async_trait::async_trait;
use serde_json::json;

use crate::error::{AppError, Result};
use crate::models::GeneratedImage;

use super::ImageGenerator;

/// Text-to-image model hosted on the Hugging Face inference API
pub struct HuggingFaceGenerator {
    client: reqwest::Client,
    url: String,
    api_key: String,
}

impl HuggingFaceGenerator {
    pub fn new(client: reqwest::Client, url: &str, api_key: &str) -> Self {
        Self {
            client,
            url: url.to_string(),
            api_key: api_key.to_string(),
        }
    }
}

#[async_trait]
impl ImageGenerator for HuggingFaceGenerator {
    /// One POST, no retry. Anything but a 200 carrying image bytes is a failure.
    async fn generate(&self, prompt: &str) -> Result<GeneratedImage> {
        tracing::debug!("Requesting image from {}", self.url);

        let response = self
            .client
            .post(&self.url)
            .bearer_auth(&self.api_key)
            .json(&json!({ "inputs": prompt }))
            .send()
            .await
            .map_err(AppError::Inference)?;

        let status = response.status();
        if status != reqwest::StatusCode::OK {
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(
                "Inference endpoint returned {}: {}",
                status,
                body.chars().take(200).collect::<String>()
            );
            return Err(AppError::GenerationFailed(status.as_u16()));
        }

        let bytes = response.bytes().await.map_err(AppError::Inference)?.to_vec();
        let size = bytes.len();
        let image = GeneratedImage::decode(bytes).ok_or(AppError::NotAnImage)?;

        tracing::info!(
            "Generated {} image ({} bytes)",
            image.format.extension(),
            size
        );

        Ok(image)
    }
}
