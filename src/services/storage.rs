use async_trait::async_trait;
use std::sync::Arc;

use crate::error::{AppError, Result};

use super::{google_error_message, BlobStore, TokenSource};

/// Percent-encode each segment of an object path, keeping `/` separators
pub fn encode_object_path(path: &str) -> String {
    path.split('/')
        .map(|segment| urlencoding::encode(segment).into_owned())
        .collect::<Vec<_>>()
        .join("/")
}

/// Public download URL of an object in a bucket
pub fn public_url(base_url: &str, bucket: &str, path: &str) -> String {
    format!("{}/{}/{}", base_url, bucket, encode_object_path(path))
}

/// Image bytes in a Cloud Storage bucket via the JSON upload API
pub struct CloudStorage {
    client: reqwest::Client,
    tokens: Arc<TokenSource>,
    base_url: String,
    bucket: String,
}

impl CloudStorage {
    pub fn new(
        client: reqwest::Client,
        tokens: Arc<TokenSource>,
        base_url: &str,
        bucket: &str,
    ) -> Self {
        Self {
            client,
            tokens,
            base_url: base_url.to_string(),
            bucket: bucket.to_string(),
        }
    }
}

#[async_trait]
impl BlobStore for CloudStorage {
    async fn upload(&self, path: &str, data: Vec<u8>, content_type: &str) -> Result<String> {
        let size = data.len();
        let token = self.tokens.access_token().await?;
        let response = self
            .client
            .post(format!(
                "{}/upload/storage/v1/b/{}/o",
                self.base_url, self.bucket
            ))
            .query(&[("uploadType", "media"), ("name", path)])
            .bearer_auth(token)
            .header(reqwest::header::CONTENT_TYPE, content_type)
            .body(data)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::Provider {
                service: "storage",
                status: status.as_u16(),
                message: google_error_message(&body),
            });
        }

        tracing::info!("Uploaded {} ({} bytes) to {}", path, size, self.bucket);

        Ok(public_url(&self.base_url, &self.bucket, path))
    }
}
