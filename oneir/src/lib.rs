//! # Oneir
//!
//! Core of OneirVision: turns a dream description into a structured interpretation and
//! an optional image.
//!
//! ## Flow
//!
//! 1. [`DreamInterpretationRequest::validate`] rejects empty input.
//! 2. [`build_prompt`] asks the text model for labelled sections.
//! 3. A [`TextGenerator`] returns raw text; on failure the analyzer can fall back to canned
//!    offline answers.
//! 4. A [`ResponseParser`] splits the text into a [`ParsedInterpretation`] that always has
//!    all five fields (missing sections get fixed fallback strings).
//! 5. [`SymbolTable::find_in_text`] matches dictionary symbols in the dream text; the
//!    analyzer caps them and substitutes [`generic_symbols`] when nothing matched.
//!
//! [`DreamAnalyzer`] ties these together and adds image generation via [`ImageGenerator`].
//!
//! ## Main modules
//!
//! - [`interpretation`]: request and result types, [`build_prompt`], [`build_image_prompt`],
//!   parsers ([`LabeledSectionParser`], [`MarkdownSectionParser`], [`JsonSectionParser`],
//!   [`ChainParser`]).
//! - [`symbols`]: [`SymbolTable`], [`find_symbols_in_text`].
//! - [`llm`]: [`TextGenerator`], [`GeminiTextClient`], [`MockTextGenerator`].
//! - [`image`]: [`ImageGenerator`], [`GeminiImageClient`], [`HuggingFaceImageClient`],
//!   [`MockImageGenerator`], [`Visualization`].
//! - [`retry`]: [`RetryPolicy`] applied to every upstream call.
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use oneir::{DreamAnalyzer, DreamInterpretationRequest, MockTextGenerator};
//!
//! # async fn run() -> Result<(), oneir::DreamError> {
//! let analyzer = DreamAnalyzer::new(Arc::new(MockTextGenerator::canned()));
//! let result = analyzer
//!     .interpret(&DreamInterpretationRequest::new("I was flying over a dark forest"))
//!     .await?;
//! println!("{}", result.interpretation.overall_meaning);
//! # Ok(())
//! # }
//! ```

pub mod analysis;
pub mod error;
mod gemini;
pub mod image;
pub mod interpretation;
pub mod llm;
pub mod retry;
pub mod symbols;

pub use analysis::{generic_symbols, DreamAnalysis, DreamAnalyzer, DreamInterpretation};
pub use error::DreamError;
pub use image::{
    GeminiImageClient, GeneratedImage, HuggingFaceImageClient, ImageGenerator,
    MockImageGenerator, Visualization,
};
pub use interpretation::{
    build_image_prompt, build_prompt, default_parser, ChainParser, DreamInterpretationRequest,
    ExtractedSections, JsonSectionParser, KeySymbol, LabeledSectionParser,
    MarkdownSectionParser, ParsedInterpretation, ResponseParser, DEFAULT_IMAGE_STYLE,
};
pub use llm::{GeminiTextClient, MockTextGenerator, TextGenerator};
pub use retry::RetryPolicy;
pub use symbols::{capitalize, find_symbols_in_text, SymbolEntry, SymbolMatch, SymbolTable};
