//! Gemini text client with per-model retry and a model fallback chain.

use std::time::Duration;

use async_trait::async_trait;

use super::TextGenerator;
use crate::error::DreamError;
use crate::gemini::{generate_content, http_client, GenerateContentRequest};
use crate::retry::RetryPolicy;

/// Calls `generateContent` on the primary model, then on each fallback model in order,
/// returning the first answer with text.
pub struct GeminiTextClient {
    client: reqwest::Client,
    api_base: String,
    api_key: String,
    model: String,
    fallback_models: Vec<String>,
    retry: RetryPolicy,
}

impl GeminiTextClient {
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
            fallback_models: Vec::new(),
            retry: RetryPolicy::default(),
        })
    }

    pub fn with_fallback_models(mut self, models: Vec<String>) -> Self {
        self.fallback_models = models;
        self
    }

    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    fn models(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.model.as_str()).chain(self.fallback_models.iter().map(String::as_str))
    }

    async fn generate_with(&self, model: &str, prompt: &str) -> Result<String, DreamError> {
        let body = &GenerateContentRequest::text(prompt);
        let (client, base, key) = (&self.client, self.api_base.as_str(), self.api_key.as_str());
        let what = format!("gemini {}", model);
        self.retry
            .run(&what, || async move {
                let res = generate_content(client, base, key, model, body).await?;
                res.text().ok_or_else(|| {
                    DreamError::UpstreamMalformed(format!("{} returned no text", model))
                })
            })
            .await
    }
}

#[async_trait]
impl TextGenerator for GeminiTextClient {
    async fn generate(&self, prompt: &str) -> Result<String, DreamError> {
        let mut last_err = None;
        for model in self.models() {
            match self.generate_with(model, prompt).await {
                Ok(text) => {
                    tracing::info!(model, chars = text.len(), "gemini interpretation received");
                    return Ok(text);
                }
                Err(e) => {
                    tracing::warn!(model, error = %e, "gemini model failed");
                    last_err = Some(e);
                }
            }
        }
        Err(last_err
            .unwrap_or_else(|| DreamError::UpstreamUnavailable("no gemini model configured".into())))
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}
