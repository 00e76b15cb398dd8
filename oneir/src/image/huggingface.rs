//! HuggingFace Inference API image client (text-to-image models such as FLUX.1-schnell).

use std::time::Duration;

use async_trait::async_trait;
use serde_json::json;

use super::{GeneratedImage, ImageGenerator};
use crate::error::DreamError;
use crate::gemini::http_client;
use crate::retry::RetryPolicy;

/// POSTs `{inputs, options: {wait_for_model: true}}` to `{base}/models/{model}`; the
/// response body is the image itself.
pub struct HuggingFaceImageClient {
    client: reqwest::Client,
    api_base: String,
    api_key: String,
    model: String,
    retry: RetryPolicy,
}

impl HuggingFaceImageClient {
    pub fn new(
        api_base: impl Into<String>,
        api_key: impl Into<String>,
        model: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, DreamError> {
        Ok(Self {
            client: http_client(timeout)?,
            api_base: api_base.into(),
            api_key: api_key.into(),
            model: model.into(),
            retry: RetryPolicy::default(),
        })
    }

    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    async fn request(&self, url: &str, prompt: &str) -> Result<GeneratedImage, DreamError> {
        let res = self
            .client
            .post(url)
            .bearer_auth(&self.api_key)
            .json(&json!({
                "inputs": prompt,
                "options": { "wait_for_model": true },
            }))
            .send()
            .await
            .map_err(DreamError::from_transport)?;
        let status = res.status();
        if !status.is_success() {
            let body = res.text().await.unwrap_or_default();
            return Err(DreamError::UpstreamStatus {
                status: status.as_u16(),
                body,
            });
        }
        let mime = res
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(|v| v.split(';').next().unwrap_or(v).to_string());
        if mime.as_deref().is_some_and(|m| !m.starts_with("image/")) {
            let body = res.text().await.unwrap_or_default();
            return Err(DreamError::UpstreamMalformed(format!(
                "expected an image, got {}: {}",
                mime.unwrap_or_default(),
                body
            )));
        }
        let bytes = res.bytes().await.map_err(DreamError::from_transport)?;
        if bytes.is_empty() {
            return Err(DreamError::UpstreamMalformed("empty image body".into()));
        }
        Ok(GeneratedImage::new(bytes.to_vec(), mime.as_deref()))
    }
}

#[async_trait]
impl ImageGenerator for HuggingFaceImageClient {
    async fn generate(&self, prompt: &str) -> Result<GeneratedImage, DreamError> {
        let url = format!("{}/models/{}", self.api_base.trim_end_matches('/'), self.model);
        let image = self
            .retry
            .run("huggingface image", || self.request(&url, prompt))
            .await?;
        tracing::info!(model = %self.model, bytes = image.bytes.len(), "huggingface image received");
        Ok(image)
    }

    fn provider_name(&self) -> &str {
        "huggingface"
    }
}
