//! Parser for the `LABEL:` format requested by [`crate::interpretation::build_prompt`].

use once_cell::sync::Lazy;
use regex::Regex;

use super::{non_empty, ExtractedSections, ResponseParser};
use crate::interpretation::KeySymbol;

/// A label at the start of a line, optionally wrapped in markdown (`## `, `- `, `**`, `1.`),
/// followed by a colon. Longer aliases come first so `KEY SYMBOLS` is not read as `SYMBOLS`.
static LABEL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?im)^[ \t>#*_\-]*(?:\d+[.)][ \t]*)?(?:\*\*|__)?[ \t]*(OVERALL MEANING|INTERPRETATION|KEY SYMBOLS|SYMBOLS|PSYCHOLOGICAL INSIGHTS|INSIGHTS|EMOTIONAL THEMES|EMOTIONS|ACTIONABLE ADVICE|ADVICE)[ \t]*(?:\*\*|__)?[ \t]*:[ \t]*(?:\*\*|__)?",
    )
    .expect("section label regex is invalid")
});

/// List decoration in front of a symbol line: bullets and `1.` / `1)` numbering.
static LIST_PREFIX_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*(?:(?:[-*•+]|\d+[.)])\s*)*").expect("list prefix regex is invalid")
});

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Section {
    Overall,
    Symbols,
    Insights,
    Emotions,
    Advice,
}

impl Section {
    fn from_label(label: &str) -> Option<Self> {
        match label.to_ascii_uppercase().as_str() {
            "INTERPRETATION" | "OVERALL MEANING" => Some(Self::Overall),
            "SYMBOLS" | "KEY SYMBOLS" => Some(Self::Symbols),
            "INSIGHTS" | "PSYCHOLOGICAL INSIGHTS" => Some(Self::Insights),
            "EMOTIONS" | "EMOTIONAL THEMES" => Some(Self::Emotions),
            "ADVICE" | "ACTIONABLE ADVICE" => Some(Self::Advice),
            _ => None,
        }
    }
}

/// Splits on known uppercase labels. Each section runs from its label to the next label of
/// any kind; when a label repeats, its first occurrence wins.
#[derive(Clone, Copy, Debug, Default)]
pub struct LabeledSectionParser;

impl LabeledSectionParser {
    /// `(section, body)` pairs in document order.
    fn sections<'a>(&self, raw: &'a str) -> Vec<(Section, &'a str)> {
        let hits: Vec<(Section, usize, usize)> = LABEL_RE
            .captures_iter(raw)
            .filter_map(|caps| {
                let whole = caps.get(0)?;
                let section = Section::from_label(caps.get(1)?.as_str())?;
                Some((section, whole.start(), whole.end()))
            })
            .collect();

        hits.iter()
            .enumerate()
            .map(|(i, &(section, _, body_start))| {
                let body_end = hits.get(i + 1).map_or(raw.len(), |next| next.1);
                (section, &raw[body_start..body_end])
            })
            .collect()
    }
}

impl ResponseParser for LabeledSectionParser {
    fn extract(&self, raw: &str) -> ExtractedSections {
        let mut out = ExtractedSections::default();
        let mut seen: Vec<Section> = Vec::new();
        for (section, body) in self.sections(raw) {
            if seen.contains(&section) {
                continue;
            }
            seen.push(section);
            match section {
                Section::Overall => out.overall_meaning = non_empty(body),
                Section::Symbols => {
                    let symbols = parse_symbol_lines(body);
                    out.key_symbols = (!symbols.is_empty()).then_some(symbols);
                }
                Section::Insights => out.psychological_insights = non_empty(body),
                Section::Emotions => out.emotional_themes = non_empty(body),
                Section::Advice => out.actionable_advice = non_empty(body),
            }
        }
        out
    }
}

/// `name | meaning` per line. Lines without a `|`, or with an empty side, are dropped.
pub(crate) fn parse_symbol_lines(block: &str) -> Vec<KeySymbol> {
    let symbols = block
        .lines()
        .filter_map(|line| {
            let line = LIST_PREFIX_RE.replace(line, "");
            let (name, meaning) = line.split_once('|')?;
            let name = name.trim().trim_matches(|c| c == '*' || c == '_').trim();
            let meaning = meaning.trim().trim_matches(|c| c == '*' || c == '_').trim();
            if name.is_empty() || meaning.is_empty() {
                return None;
            }
            Some(KeySymbol::new(name, meaning))
        })
        .collect();
    crate::interpretation::dedup_key_symbols(symbols)
}
