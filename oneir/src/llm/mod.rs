//! Text generation backends.
//!
//! [`crate::DreamAnalyzer`] depends only on [`TextGenerator`]; implementations are
//! [`GeminiTextClient`] (real API) and [`MockTextGenerator`] (fixed or canned answers, no
//! network).

mod gemini;
mod mock;

pub use gemini::GeminiTextClient;
pub use mock::MockTextGenerator;

use async_trait::async_trait;

use crate::error::DreamError;

/// Given a prompt, returns the model's raw answer text.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String, DreamError>;

    /// Model identifier for logs and `/health`.
    fn model_name(&self) -> &str;
}
