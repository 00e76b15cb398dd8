//! Parser for answers laid out as numbered markdown headings:
//!
//! ```text
//! ## 1. Overall Meaning
//! ## 2. Key Symbols
//! - **Water**: emotions
//! ## 3. Psychological Insights
//! ## 4. Emotional Themes
//! ## 5. Actionable Advice
//! ```

use once_cell::sync::Lazy;
use regex::Regex;

use super::labeled::parse_symbol_lines;
use super::{non_empty, ExtractedSections, ResponseParser};
use crate::interpretation::{dedup_key_symbols, KeySymbol};

static HEADING_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?m)^[ \t]*#{1,6}[ \t]*(?:\d+[.)][ \t]*)?(.+?)[ \t]*$")
        .expect("markdown heading regex is invalid")
});

/// `- **Name**: meaning` (also `- **Name:** meaning`).
static BULLET_SYMBOL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?m)^[ \t]*[-*•][ \t]+\*\*([^*]+)\*\*[ \t]*:?[ \t]*([^:\s].*?)[ \t]*$")
        .expect("symbol bullet regex is invalid")
});

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Heading {
    Overall,
    Symbols,
    Insights,
    Emotions,
    Advice,
}

fn classify(heading: &str) -> Option<Heading> {
    let h = heading.to_lowercase();
    if h.contains("symbol") {
        Some(Heading::Symbols)
    } else if h.contains("psycholog") || h.contains("insight") {
        Some(Heading::Insights)
    } else if h.contains("emotion") {
        Some(Heading::Emotions)
    } else if h.contains("advice") || h.contains("action") {
        Some(Heading::Advice)
    } else if h.contains("meaning") || h.contains("interpretation") || h.contains("summary") {
        Some(Heading::Overall)
    } else {
        None
    }
}

/// Classifies `#` headings by keyword; a section runs until the next heading.
#[derive(Clone, Copy, Debug, Default)]
pub struct MarkdownSectionParser;

impl ResponseParser for MarkdownSectionParser {
    fn extract(&self, raw: &str) -> ExtractedSections {
        let headings: Vec<(Option<Heading>, usize, usize)> = HEADING_RE
            .captures_iter(raw)
            .filter_map(|caps| {
                let whole = caps.get(0)?;
                let text = caps.get(1)?.as_str();
                Some((classify(text), whole.start(), whole.end()))
            })
            .collect();

        let mut out = ExtractedSections::default();
        for (i, &(kind, _, body_start)) in headings.iter().enumerate() {
            let Some(kind) = kind else { continue };
            let body_end = headings.get(i + 1).map_or(raw.len(), |next| next.1);
            let body = &raw[body_start..body_end];
            match kind {
                Heading::Overall if out.overall_meaning.is_none() => {
                    out.overall_meaning = non_empty(body)
                }
                Heading::Symbols if out.key_symbols.is_none() => {
                    let symbols = parse_bullet_symbols(body);
                    out.key_symbols = (!symbols.is_empty()).then_some(symbols);
                }
                Heading::Insights if out.psychological_insights.is_none() => {
                    out.psychological_insights = non_empty(body)
                }
                Heading::Emotions if out.emotional_themes.is_none() => {
                    out.emotional_themes = non_empty(body)
                }
                Heading::Advice if out.actionable_advice.is_none() => {
                    out.actionable_advice = non_empty(body)
                }
                _ => {}
            }
        }
        out
    }
}

fn parse_bullet_symbols(block: &str) -> Vec<KeySymbol> {
    let mut symbols: Vec<KeySymbol> = BULLET_SYMBOL_RE
        .captures_iter(block)
        .filter_map(|caps| {
            let name = caps.get(1)?.as_str().trim().trim_end_matches(':').trim();
            let meaning = caps.get(2)?.as_str().trim();
            (!name.is_empty()).then(|| KeySymbol::new(name, meaning))
        })
        .collect();
    symbols.extend(parse_symbol_lines(block));
    dedup_key_symbols(symbols)
}

#[cfg(test)]
mod tests {
    use super::*;

    const NUMBERED: &str = "\
## 1. Overall Meaning
Your dream points to a transition.

## 2. Key Symbols
- **Water**: Emotions and the subconscious
- **Door:** A new opportunity

## 3. Psychological Insights
You are integrating change.

## 4. Emotional Themes
Hope, with some anxiety.

## 5. Actionable Advice
Take one small step this week.
";

    #[test]
    fn numbered_headings() {
        let p = MarkdownSectionParser.parse(NUMBERED);
        assert_eq!(p.overall_meaning, "Your dream points to a transition.");
        assert_eq!(
            p.key_symbols,
            vec![
                KeySymbol::new("Water", "Emotions and the subconscious"),
                KeySymbol::new("Door", "A new opportunity"),
            ]
        );
        assert_eq!(p.psychological_insights, "You are integrating change.");
        assert_eq!(p.emotional_themes, "Hope, with some anxiety.");
        assert_eq!(p.actionable_advice, "Take one small step this week.");
    }

    #[test]
    fn unknown_headings_end_the_previous_section() {
        let raw = "# Overall Meaning\nshort\n# Aside\nnot part of it";
        let s = MarkdownSectionParser.extract(raw);
        assert_eq!(s.overall_meaning.as_deref(), Some("short"));
        assert!(s.actionable_advice.is_none());
    }

    #[test]
    fn bullet_without_meaning_is_skipped() {
        let symbols = parse_bullet_symbols("- **Snake**:\n- **Moon**: intuition");
        assert_eq!(symbols, vec![KeySymbol::new("Moon", "intuition")]);
    }

    #[test]
    fn plain_text_has_no_sections() {
        assert!(MarkdownSectionParser.extract("INTERPRETATION: x").is_empty());
    }
}
