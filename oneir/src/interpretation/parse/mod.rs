//! Parsers that split a model answer into interpretation sections.
//!
//! A parser only *locates* sections ([`ResponseParser::extract`]); fallbacks are applied
//! once, in [`ExtractedSections::into_parsed`]. That split lets [`ChainParser`] combine
//! several formats field by field without a fallback string masking a later parser's hit.

mod json;
mod labeled;
mod markdown;

pub use json::JsonSectionParser;
pub use labeled::LabeledSectionParser;
pub use markdown::MarkdownSectionParser;

use super::{
    dedup_key_symbols, fallback_key_symbols, KeySymbol, ParsedInterpretation,
    FALLBACK_ACTIONABLE_ADVICE, FALLBACK_EMOTIONAL_THEMES, FALLBACK_OVERALL_MEANING,
    FALLBACK_PSYCHOLOGICAL_INSIGHTS,
};

/// Sections located in a raw answer. `None` means "not found"; present values are trimmed
/// and non-empty, and `key_symbols` is non-empty when `Some`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ExtractedSections {
    pub overall_meaning: Option<String>,
    pub key_symbols: Option<Vec<KeySymbol>>,
    pub psychological_insights: Option<String>,
    pub emotional_themes: Option<String>,
    pub actionable_advice: Option<String>,
}

impl ExtractedSections {
    /// True when no section was located.
    pub fn is_empty(&self) -> bool {
        self.overall_meaning.is_none()
            && self.key_symbols.is_none()
            && self.psychological_insights.is_none()
            && self.emotional_themes.is_none()
            && self.actionable_advice.is_none()
    }

    /// Field-wise merge; values already in `self` win.
    pub fn or(self, other: ExtractedSections) -> ExtractedSections {
        ExtractedSections {
            overall_meaning: self.overall_meaning.or(other.overall_meaning),
            key_symbols: self.key_symbols.or(other.key_symbols),
            psychological_insights: self.psychological_insights.or(other.psychological_insights),
            emotional_themes: self.emotional_themes.or(other.emotional_themes),
            actionable_advice: self.actionable_advice.or(other.actionable_advice),
        }
    }

    /// Fills every missing section with its fallback.
    pub fn into_parsed(self) -> ParsedInterpretation {
        ParsedInterpretation {
            overall_meaning: self
                .overall_meaning
                .unwrap_or_else(|| FALLBACK_OVERALL_MEANING.to_string()),
            key_symbols: self
                .key_symbols
                .map(dedup_key_symbols)
                .filter(|s| !s.is_empty())
                .unwrap_or_else(fallback_key_symbols),
            psychological_insights: self
                .psychological_insights
                .unwrap_or_else(|| FALLBACK_PSYCHOLOGICAL_INSIGHTS.to_string()),
            emotional_themes: self
                .emotional_themes
                .unwrap_or_else(|| FALLBACK_EMOTIONAL_THEMES.to_string()),
            actionable_advice: self
                .actionable_advice
                .unwrap_or_else(|| FALLBACK_ACTIONABLE_ADVICE.to_string()),
        }
    }
}

/// Turns raw model text into sections. Implementations must be pure: no I/O, no logging,
/// and the same input always yields the same output.
pub trait ResponseParser: Send + Sync {
    /// Locates whatever sections this format can find.
    fn extract(&self, raw: &str) -> ExtractedSections;

    /// Extracts and applies fallbacks. Never fails.
    fn parse(&self, raw: &str) -> ParsedInterpretation {
        self.extract(raw).into_parsed()
    }
}

/// Runs parsers in order; for each field the first parser that located it wins.
pub struct ChainParser {
    parsers: Vec<Box<dyn ResponseParser>>,
}

impl ChainParser {
    pub fn new(parsers: Vec<Box<dyn ResponseParser>>) -> Self {
        Self { parsers }
    }

    pub fn push(mut self, parser: impl ResponseParser + 'static) -> Self {
        self.parsers.push(Box::new(parser));
        self
    }
}

impl ResponseParser for ChainParser {
    fn extract(&self, raw: &str) -> ExtractedSections {
        self.parsers
            .iter()
            .fold(ExtractedSections::default(), |acc, p| acc.or(p.extract(raw)))
    }
}

/// JSON first (structured output), then the labelled format the prompt asks for, then
/// numbered markdown headings.
pub fn default_parser() -> ChainParser {
    ChainParser::new(Vec::new())
        .push(JsonSectionParser)
        .push(LabeledSectionParser::default())
        .push(MarkdownSectionParser)
}

/// Trims and maps an empty string to `None`.
pub(crate) fn non_empty(s: &str) -> Option<String> {
    let t = s.trim();
    if t.is_empty() {
        None
    } else {
        Some(t.to_string())
    }
}
