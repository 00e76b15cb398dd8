//! Image generation backends and the [`Visualization`] record built from their output.

mod gemini;
mod huggingface;
mod mock;

pub use gemini::GeminiImageClient;
pub use huggingface::HuggingFaceImageClient;
pub use mock::MockImageGenerator;

use async_trait::async_trait;
use base64::Engine;
use serde::{Deserialize, Serialize};

use crate::error::DreamError;

const DEFAULT_MIME_TYPE: &str = "image/png";
const VISUALIZATION_DESCRIPTION: &str = "AI-generated visualization based on your dream description";

/// Raw image bytes from a backend.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GeneratedImage {
    pub bytes: Vec<u8>,
    pub mime_type: String,
}

impl GeneratedImage {
    pub fn new(bytes: Vec<u8>, mime_type: Option<&str>) -> Self {
        let mime_type = mime_type
            .map(str::trim)
            .filter(|m| m.starts_with("image/"))
            .unwrap_or(DEFAULT_MIME_TYPE)
            .to_string();
        Self { bytes, mime_type }
    }

    /// `data:<mime>;base64,<payload>`.
    pub fn data_url(&self) -> String {
        format!(
            "data:{};base64,{}",
            self.mime_type,
            base64::engine::general_purpose::STANDARD.encode(&self.bytes)
        )
    }
}

/// Turns a short prompt into an image.
#[async_trait]
pub trait ImageGenerator: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<GeneratedImage, DreamError>;

    /// Provider name for logs and `/health`.
    fn provider_name(&self) -> &str;
}

/// A generated dream image, ready to hand to a client.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Visualization {
    pub id: String,
    pub title: String,
    pub description: String,
    /// `data:` URL holding the image.
    pub image_url: String,
    pub created_at: String,
}

impl Visualization {
    pub fn from_image(image: &GeneratedImage, style: Option<&str>) -> Self {
        let title = match style.map(str::trim).filter(|s| !s.is_empty()) {
            Some(style) => format!("Dream Visualization ({} style)", style),
            None => "Dream Visualization".to_string(),
        };
        Self {
            id: format!("vis-{}", uuid::Uuid::new_v4()),
            title,
            description: VISUALIZATION_DESCRIPTION.to_string(),
            image_url: image.data_url(),
            created_at: chrono::Utc::now().to_rfc3339(),
        }
    }
}
