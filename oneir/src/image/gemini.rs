//! Gemini image generation: `generateContent` with the IMAGE response modality.

use std::time::Duration;

use async_trait::async_trait;
use base64::Engine;

use super::{GeneratedImage, ImageGenerator};
use crate::error::DreamError;
use crate::gemini::{generate_content, http_client, GenerateContentRequest};
use crate::retry::RetryPolicy;

pub struct GeminiImageClient {
    client: reqwest::Client,
    api_base: String,
    api_key: String,
    model: String,
    retry: RetryPolicy,
}

impl GeminiImageClient {
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
}

#[async_trait]
impl ImageGenerator for GeminiImageClient {
    async fn generate(&self, prompt: &str) -> Result<GeneratedImage, DreamError> {
        let body = &GenerateContentRequest::image(prompt);
        let (client, base, key, model) = (
            &self.client,
            self.api_base.as_str(),
            self.api_key.as_str(),
            self.model.as_str(),
        );
        let res = self
            .retry
            .run("gemini image", || async move {
                generate_content(client, base, key, model, body).await
            })
            .await?;

        let inline = res.inline_data().ok_or_else(|| {
            DreamError::UpstreamMalformed(format!("{} returned no image data", model))
        })?;
        let bytes = base64::engine::general_purpose::STANDARD
            .decode(inline.data.trim())
            .map_err(|e| DreamError::UpstreamMalformed(format!("image data is not base64: {}", e)))?;
        tracing::info!(model, bytes = bytes.len(), "gemini image received");
        Ok(GeneratedImage::new(bytes, inline.mime_type.as_deref()))
    }

    fn provider_name(&self) -> &str {
        "gemini"
    }
}
