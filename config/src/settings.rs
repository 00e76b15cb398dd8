//! Typed settings read from the environment after [`crate::load_and_apply`].
//!
//! Every value has a default; unset or unparsable values fall back to it.

use std::time::Duration;

pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:5000";
pub const DEFAULT_GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_TEXT_MODEL: &str = "gemini-2.0-flash";
pub const DEFAULT_TEXT_FALLBACK_MODELS: &str = "gemini-pro";
pub const DEFAULT_GEMINI_IMAGE_MODEL: &str = "gemini-2.0-flash-preview-image-generation";
pub const DEFAULT_HUGGINGFACE_IMAGE_MODEL: &str = "black-forest-labs/FLUX.1-schnell";
pub const DEFAULT_HUGGINGFACE_API_BASE: &str = "https://api-inference.huggingface.co";
pub const DEFAULT_CORS_ORIGINS: &str = "http://localhost:3000,https://oneir-vision.vercel.app";
pub const DEFAULT_JOURNAL_DB: &str = "journal.db";
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_MAX_SYMBOLS: usize = 5;
pub const DEFAULT_IMAGE_PROMPT_MAX_LEN: usize = 100;

/// Which text-generation backend interprets dreams.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum LlmProvider {
    #[default]
    Gemini,
    /// Canned offline interpretations; no network.
    Mock,
}

impl std::str::FromStr for LlmProvider {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "gemini" => Ok(Self::Gemini),
            "mock" => Ok(Self::Mock),
            other => Err(format!("unknown llm provider: {} (use gemini or mock)", other)),
        }
    }
}

/// Which image-generation backend renders dreams.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum ImageProvider {
    #[default]
    Gemini,
    HuggingFace,
    None,
}

impl ImageProvider {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Gemini => "gemini",
            Self::HuggingFace => "huggingface",
            Self::None => "none",
        }
    }
}

impl std::str::FromStr for ImageProvider {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "gemini" => Ok(Self::Gemini),
            "huggingface" | "hf" => Ok(Self::HuggingFace),
            "none" | "off" => Ok(Self::None),
            other => Err(format!(
                "unknown image provider: {} (use gemini, huggingface, or none)",
                other
            )),
        }
    }
}

#[derive(Clone, Debug)]
pub struct Settings {
    pub bind_addr: String,
    pub cors_origins: Vec<String>,
    pub journal_db: String,

    pub llm_provider: LlmProvider,
    pub gemini_api_key: Option<String>,
    pub gemini_api_base: String,
    pub text_model: String,
    pub text_fallback_models: Vec<String>,
    /// Serve canned interpretations when every upstream model fails.
    pub offline_fallback: bool,

    pub image_provider: ImageProvider,
    pub image_model: String,
    pub huggingface_api_key: Option<String>,
    pub huggingface_api_base: String,

    pub http_timeout: Duration,
    pub max_symbols: usize,
    pub image_prompt_max_len: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}

fn split_list(s: &str) -> Vec<String> {
    s.split(',')
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(String::from)
        .collect()
}

/// Raw env value awaiting a typed parse; unparsable values read as `None`.
struct ParsedValue(Option<String>);

impl ParsedValue {
    fn get<T: std::str::FromStr>(self) -> Option<T> {
        self.0.and_then(|v| v.trim().parse().ok())
    }

    /// Like [`Self::get`], but zero also reads as `None`.
    fn positive<T: std::str::FromStr + PartialOrd + Default>(self) -> Option<T> {
        self.get().filter(|n: &T| *n > T::default())
    }
}

fn parse_bool(s: &str) -> Option<bool> {
    match s.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

impl Settings {
    /// Reads settings from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads settings through `lookup` (key -> value). Empty values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let parsed = |key: &str| ParsedValue(get(key));

        let image_provider: ImageProvider = parsed("ONEIR_IMAGE_PROVIDER").get().unwrap_or_default();
        let image_model = get("ONEIR_IMAGE_MODEL").unwrap_or_else(|| match image_provider {
            ImageProvider::HuggingFace => DEFAULT_HUGGINGFACE_IMAGE_MODEL.to_string(),
            _ => DEFAULT_GEMINI_IMAGE_MODEL.to_string(),
        });

        Self {
            bind_addr: get("ONEIR_BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string()),
            cors_origins: split_list(
                &get("ONEIR_CORS_ORIGINS").unwrap_or_else(|| DEFAULT_CORS_ORIGINS.to_string()),
            ),
            journal_db: get("ONEIR_JOURNAL_DB").unwrap_or_else(|| DEFAULT_JOURNAL_DB.to_string()),
            llm_provider: parsed("ONEIR_LLM_PROVIDER").get().unwrap_or_default(),
            gemini_api_key: get("GEMINI_API_KEY"),
            gemini_api_base: get("GEMINI_API_BASE")
                .unwrap_or_else(|| DEFAULT_GEMINI_API_BASE.to_string()),
            text_model: get("ONEIR_TEXT_MODEL").unwrap_or_else(|| DEFAULT_TEXT_MODEL.to_string()),
            text_fallback_models: split_list(
                &get("ONEIR_TEXT_FALLBACK_MODELS")
                    .unwrap_or_else(|| DEFAULT_TEXT_FALLBACK_MODELS.to_string()),
            ),
            offline_fallback: get("ONEIR_OFFLINE_FALLBACK")
                .and_then(|v| parse_bool(&v))
                .unwrap_or(true),
            image_provider,
            image_model,
            huggingface_api_key: get("HUGGINGFACE_API_KEY"),
            huggingface_api_base: get("HUGGINGFACE_API_BASE")
                .unwrap_or_else(|| DEFAULT_HUGGINGFACE_API_BASE.to_string()),
            http_timeout: Duration::from_secs(
                parsed("ONEIR_HTTP_TIMEOUT_SECS").positive().unwrap_or(DEFAULT_HTTP_TIMEOUT_SECS),
            ),
            max_symbols: parsed("ONEIR_MAX_SYMBOLS").positive().unwrap_or(DEFAULT_MAX_SYMBOLS),
            image_prompt_max_len: parsed("ONEIR_IMAGE_PROMPT_MAX_LEN")
                .positive()
                .unwrap_or(DEFAULT_IMAGE_PROMPT_MAX_LEN),
        }
    }
}
