//! Dream interpretation contract: request validation, prompt construction, and parsing of
//! the model's free-text answer into a [`ParsedInterpretation`].
//!
//! - [`prompt`]: [`build_prompt`], [`build_image_prompt`].
//! - [`parse`]: [`ResponseParser`] and its label / markdown / JSON implementations.

pub mod parse;
pub mod prompt;

use serde::{Deserialize, Serialize};

use crate::error::DreamError;

pub use parse::{
    default_parser, ChainParser, ExtractedSections, JsonSectionParser, LabeledSectionParser,
    MarkdownSectionParser, ResponseParser,
};
pub use prompt::{build_image_prompt, build_prompt, DEFAULT_IMAGE_STYLE};

pub const FALLBACK_OVERALL_MEANING: &str = "No interpretation available";
pub const FALLBACK_SYMBOL_NAME: &str = "Dream Symbol";
pub const FALLBACK_SYMBOL_MEANING: &str = "No symbols analysis available";
pub const FALLBACK_PSYCHOLOGICAL_INSIGHTS: &str = "No psychological analysis available";
pub const FALLBACK_EMOTIONAL_THEMES: &str = "No emotional insights available";
pub const FALLBACK_ACTIONABLE_ADVICE: &str = "No advice available";

/// A dream submitted for interpretation.
///
/// `dreamText` (the original backend field) is accepted for `description`, and `mood`
/// for `moods`.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DreamInterpretationRequest {
    #[serde(alias = "dreamText", default)]
    pub description: String,
    /// ISO-8601 date the dream happened, if the user gave one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(alias = "mood", default)]
    pub moods: Vec<String>,
}

impl DreamInterpretationRequest {
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            ..Self::default()
        }
    }

    /// Rejects an empty or whitespace-only description.
    pub fn validate(&self) -> Result<(), DreamError> {
        if self.description.trim().is_empty() {
            return Err(DreamError::MissingInput("dream description"));
        }
        Ok(())
    }
}

/// One symbol reported by the model, e.g. `Forest | the unknown`.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct KeySymbol {
    pub symbol: String,
    pub meaning: String,
}

impl KeySymbol {
    pub fn new(symbol: impl Into<String>, meaning: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            meaning: meaning.into(),
        }
    }
}

/// The model's interpretation split into sections. Every field is always non-empty:
/// missing sections carry their `FALLBACK_*` value.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ParsedInterpretation {
    pub overall_meaning: String,
    pub key_symbols: Vec<KeySymbol>,
    pub psychological_insights: String,
    pub emotional_themes: String,
    pub actionable_advice: String,
}

impl ParsedInterpretation {
    /// All five fields at their fallback values.
    pub fn fallback() -> Self {
        ExtractedSections::default().into_parsed()
    }

    /// True when the symbols are the single placeholder entry.
    pub fn has_fallback_symbols(&self) -> bool {
        self.key_symbols == fallback_key_symbols()
    }
}

pub(crate) fn fallback_key_symbols() -> Vec<KeySymbol> {
    vec![KeySymbol::new(FALLBACK_SYMBOL_NAME, FALLBACK_SYMBOL_MEANING)]
}

/// Keeps the first symbol of each name, comparing names case-insensitively.
pub(crate) fn dedup_key_symbols(symbols: Vec<KeySymbol>) -> Vec<KeySymbol> {
    let mut seen = std::collections::HashSet::new();
    symbols
        .into_iter()
        .filter(|s| seen.insert(s.symbol.to_lowercase()))
        .collect()
}
