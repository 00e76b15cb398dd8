use async_trait::async_trait;

use super::{GeneratedImage, ImageGenerator};
use crate::error::DreamError;

/// Returns the same bytes for every prompt, or always fails.
pub struct MockImageGenerator {
    outcome: Result<GeneratedImage, String>,
}

impl MockImageGenerator {
    pub fn new(bytes: Vec<u8>, mime_type: &str) -> Self {
        Self {
            outcome: Ok(GeneratedImage::new(bytes, Some(mime_type))),
        }
    }

    /// A generator whose every call fails with `UpstreamUnavailable(message)`.
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            outcome: Err(message.into()),
        }
    }
}

impl Default for MockImageGenerator {
    /// The PNG signature bytes; enough for data-URL plumbing.
    fn default() -> Self {
        Self::new(vec![0x89, b'P', b'N', b'G', 0x0d, 0x0a, 0x1a, 0x0a], "image/png")
    }
}

#[async_trait]
impl ImageGenerator for MockImageGenerator {
    async fn generate(&self, prompt: &str) -> Result<GeneratedImage, DreamError> {
        if prompt.trim().is_empty() {
            return Err(DreamError::MissingInput("image prompt"));
        }
        self.outcome
            .clone()
            .map_err(DreamError::UpstreamUnavailable)
    }

    fn provider_name(&self) -> &str {
        "mock"
    }
}
