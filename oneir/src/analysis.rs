//! [`DreamAnalyzer`]: validation, prompt, upstream call, parse, symbol policy.
//!
//! The parser and matcher are pure; everything that can fail or needs logging lives here.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::DreamError;
use crate::image::{
    GeminiImageClient, HuggingFaceImageClient, ImageGenerator, Visualization,
};
use crate::interpretation::{
    build_image_prompt, build_prompt, default_parser, DreamInterpretationRequest,
    ParsedInterpretation, ResponseParser,
};
use crate::llm::{GeminiTextClient, MockTextGenerator, TextGenerator};
use crate::symbols::{SymbolMatch, SymbolTable};
use env_config::{ImageProvider, LlmProvider, Settings};

pub const DEFAULT_MAX_SYMBOLS: usize = 5;
pub const DEFAULT_IMAGE_PROMPT_MAX_LEN: usize = 100;

/// Shown when the dictionary finds nothing in the dream text.
pub fn generic_symbols() -> Vec<SymbolMatch> {
    vec![
        SymbolMatch::new("Dream", "A reflection of your subconscious mind"),
        SymbolMatch::new("Emotions", "Feelings that are being processed in your dream"),
        SymbolMatch::new("Thoughts", "Ideas and concerns from your waking life"),
    ]
}

/// One interpreted dream.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DreamInterpretation {
    pub id: String,
    pub created_at: String,
    pub interpretation: ParsedInterpretation,
    /// Dictionary matches for the dream text, capped; generic entries when nothing matched.
    pub symbols: Vec<SymbolMatch>,
}

/// Interpretation plus an optional image. Image failure does not fail the analysis.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DreamAnalysis {
    pub interpretation: DreamInterpretation,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub visualization: Option<Visualization>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub visualization_error: Option<String>,
}

pub struct DreamAnalyzer {
    text: Arc<dyn TextGenerator>,
    offline: Option<Arc<dyn TextGenerator>>,
    image: Option<Arc<dyn ImageGenerator>>,
    parser: Box<dyn ResponseParser>,
    symbols: SymbolTable,
    max_symbols: usize,
    image_prompt_max_len: usize,
}

impl DreamAnalyzer {
    /// Analyzer over `text` with the default parser chain and the built-in symbol table.
    pub fn new(text: Arc<dyn TextGenerator>) -> Self {
        Self {
            text,
            offline: None,
            image: None,
            parser: Box::new(default_parser()),
            symbols: SymbolTable::builtin().clone(),
            max_symbols: DEFAULT_MAX_SYMBOLS,
            image_prompt_max_len: DEFAULT_IMAGE_PROMPT_MAX_LEN,
        }
    }

    pub fn with_image_generator(mut self, image: Arc<dyn ImageGenerator>) -> Self {
        self.image = Some(image);
        self
    }

    /// Generator used when the primary one fails.
    pub fn with_offline_fallback(mut self, offline: Arc<dyn TextGenerator>) -> Self {
        self.offline = Some(offline);
        self
    }

    pub fn with_parser(mut self, parser: Box<dyn ResponseParser>) -> Self {
        self.parser = parser;
        self
    }

    pub fn with_symbol_table(mut self, symbols: SymbolTable) -> Self {
        self.symbols = symbols;
        self
    }

    /// At least one symbol is always kept.
    pub fn with_max_symbols(mut self, max_symbols: usize) -> Self {
        self.max_symbols = max_symbols.max(1);
        self
    }

    /// Zero is treated as one so the description is never dropped.
    pub fn with_image_prompt_max_len(mut self, len: usize) -> Self {
        self.image_prompt_max_len = len.max(1);
        self
    }

    /// Wires generators from settings. A missing API key disables the backend that needs it
    /// (with a warning) instead of failing startup, except when there is nothing to fall
    /// back to.
    pub fn from_settings(settings: &Settings) -> Result<Self, DreamError> {
        let canned: Arc<dyn TextGenerator> = Arc::new(MockTextGenerator::canned());

        let text: Arc<dyn TextGenerator> = match (settings.llm_provider, &settings.gemini_api_key) {
            (LlmProvider::Mock, _) => canned.clone(),
            (LlmProvider::Gemini, Some(key)) => Arc::new(
                GeminiTextClient::new(
                    &settings.gemini_api_base,
                    key,
                    &settings.text_model,
                    settings.http_timeout,
                )?
                .with_fallback_models(settings.text_fallback_models.clone()),
            ),
            (LlmProvider::Gemini, None) if settings.offline_fallback => {
                tracing::warn!("GEMINI_API_KEY is not set; serving canned interpretations");
                canned.clone()
            }
            (LlmProvider::Gemini, None) => {
                return Err(DreamError::UpstreamUnavailable(
                    "GEMINI_API_KEY is not set".to_string(),
                ))
            }
        };

        let image: Option<Arc<dyn ImageGenerator>> = match settings.image_provider {
            ImageProvider::None => None,
            ImageProvider::Gemini => match &settings.gemini_api_key {
                Some(key) => Some(Arc::new(GeminiImageClient::new(
                    &settings.gemini_api_base,
                    key,
                    &settings.image_model,
                    settings.http_timeout,
                )?)),
                None => {
                    tracing::warn!("GEMINI_API_KEY is not set; image generation disabled");
                    None
                }
            },
            ImageProvider::HuggingFace => match &settings.huggingface_api_key {
                Some(key) => Some(Arc::new(HuggingFaceImageClient::new(
                    &settings.huggingface_api_base,
                    key,
                    &settings.image_model,
                    settings.http_timeout,
                )?)),
                None => {
                    tracing::warn!("HUGGINGFACE_API_KEY is not set; image generation disabled");
                    None
                }
            },
        };

        let is_canned = Arc::ptr_eq(&text, &canned);
        let mut analyzer = Self::new(text)
            .with_max_symbols(settings.max_symbols)
            .with_image_prompt_max_len(settings.image_prompt_max_len);
        if settings.offline_fallback && !is_canned {
            analyzer = analyzer.with_offline_fallback(canned);
        }
        if let Some(image) = image {
            analyzer = analyzer.with_image_generator(image);
        }
        Ok(analyzer)
    }

    pub fn text_model(&self) -> &str {
        self.text.model_name()
    }

    /// `None` when image generation is disabled.
    pub fn image_provider(&self) -> Option<&str> {
        self.image.as_deref().map(|g| g.provider_name())
    }

    pub fn max_symbols(&self) -> usize {
        self.max_symbols
    }

    /// Dictionary matches capped to `max_symbols`, or [`generic_symbols`] when nothing
    /// matched.
    pub fn symbols(&self, text: &str) -> Vec<SymbolMatch> {
        let mut found = self.symbols.find_in_text(text);
        if found.is_empty() {
            return generic_symbols();
        }
        found.truncate(self.max_symbols);
        found
    }

    async fn generate_text(&self, prompt: &str) -> Result<String, DreamError> {
        match self.text.generate(prompt).await {
            Ok(raw) => Ok(raw),
            Err(e) => match &self.offline {
                Some(offline) if !matches!(e, DreamError::MissingInput(_)) => {
                    tracing::warn!(error = %e, model = self.text.model_name(), "text generation failed, using offline interpretation");
                    offline.generate(prompt).await
                }
                _ => Err(e),
            },
        }
    }

    /// Validates, prompts the text model, parses the answer, and matches symbols.
    pub async fn interpret(
        &self,
        request: &DreamInterpretationRequest,
    ) -> Result<DreamInterpretation, DreamError> {
        request.validate()?;
        let prompt = build_prompt(&request.description);
        tracing::debug!(prompt_chars = prompt.len(), "interpretation prompt built");

        let raw = self.generate_text(&prompt).await?;
        let interpretation = self.parser.parse(&raw);
        if interpretation == ParsedInterpretation::fallback() {
            tracing::warn!(raw_chars = raw.len(), "model answer had no recognisable sections");
        }

        let symbols = self.symbols(&request.description);
        tracing::info!(symbols = symbols.len(), "dream interpreted");
        Ok(DreamInterpretation {
            id: format!("interp-{}", uuid::Uuid::new_v4()),
            created_at: chrono::Utc::now().to_rfc3339(),
            interpretation,
            symbols,
        })
    }

    /// Builds the image prompt from `description` and renders it.
    pub async fn visualize(
        &self,
        description: &str,
        style: Option<&str>,
    ) -> Result<Visualization, DreamError> {
        if description.trim().is_empty() {
            return Err(DreamError::MissingInput("image prompt"));
        }
        let image = self.image.as_ref().ok_or_else(|| {
            DreamError::UpstreamUnavailable("image generation is not configured".to_string())
        })?;
        let prompt = build_image_prompt(description, style, self.image_prompt_max_len);
        tracing::debug!(prompt = %prompt, provider = image.provider_name(), "image prompt built");
        let generated = image.generate(&prompt).await?;
        Ok(Visualization::from_image(&generated, style))
    }

    /// Interpretation and visualization concurrently; only the interpretation must succeed.
    pub async fn analyze(
        &self,
        request: &DreamInterpretationRequest,
        style: Option<&str>,
    ) -> Result<DreamAnalysis, DreamError> {
        request.validate()?;
        let (interpretation, visualization) = tokio::join!(
            self.interpret(request),
            self.visualize(&request.description, style)
        );
        let interpretation = interpretation?;
        let (visualization, visualization_error) = match visualization {
            Ok(v) => (Some(v), None),
            Err(e) => {
                tracing::warn!(error = %e, "visualization failed");
                (None, Some(e.to_string()))
            }
        };
        Ok(DreamAnalysis {
            interpretation,
            visualization,
            visualization_error,
        })
    }
}
