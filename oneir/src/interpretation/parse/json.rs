//! Parser for structured (JSON) answers, optionally inside a ```` ```json ```` fence.

use serde_json::{Map, Value};

use super::labeled::parse_symbol_lines;
use super::{non_empty, ExtractedSections, ResponseParser};
use crate::interpretation::{dedup_key_symbols, KeySymbol};

const OVERALL_KEYS: &[&str] = &["overallMeaning", "overall_meaning", "interpretation", "summary"];
const SYMBOL_KEYS: &[&str] = &["keySymbols", "key_symbols", "symbols"];
const INSIGHT_KEYS: &[&str] = &[
    "psychologicalInsights",
    "psychological_insights",
    "insights",
    "psychological",
];
const EMOTION_KEYS: &[&str] = &["emotionalThemes", "emotional_themes", "emotions", "emotional"];
const ADVICE_KEYS: &[&str] = &["actionableAdvice", "actionable_advice", "advice"];

/// Reads a JSON object with camelCase, snake_case or short keys. Anything that is not a JSON
/// object yields no sections.
#[derive(Clone, Copy, Debug, Default)]
pub struct JsonSectionParser;

impl ResponseParser for JsonSectionParser {
    fn extract(&self, raw: &str) -> ExtractedSections {
        let Some(obj) = find_object(raw) else {
            return ExtractedSections::default();
        };
        ExtractedSections {
            overall_meaning: text_field(&obj, OVERALL_KEYS),
            key_symbols: symbols_field(&obj),
            psychological_insights: text_field(&obj, INSIGHT_KEYS),
            emotional_themes: text_field(&obj, EMOTION_KEYS),
            actionable_advice: text_field(&obj, ADVICE_KEYS),
        }
    }
}

/// The body of a code fence when present, else the outermost `{...}` span.
fn find_object(raw: &str) -> Option<Map<String, Value>> {
    let trimmed = raw.trim();
    let candidate = match trimmed.find("```") {
        Some(open) => {
            let after = &trimmed[open + 3..];
            let body_start = after.find('\n').map_or(0, |i| i + 1);
            let body = &after[body_start..];
            body.find("```").map_or(body, |close| &body[..close])
        }
        None => {
            let start = trimmed.find('{')?;
            let end = trimmed.rfind('}')?;
            if end < start {
                return None;
            }
            &trimmed[start..=end]
        }
    };
    match serde_json::from_str::<Value>(candidate.trim()).ok()? {
        Value::Object(map) => Some(map),
        _ => None,
    }
}

fn first_key<'a>(obj: &'a Map<String, Value>, keys: &[&str]) -> Option<&'a Value> {
    keys.iter().find_map(|k| obj.get(*k))
}

/// A string, or an array of strings joined by newlines.
fn text_field(obj: &Map<String, Value>, keys: &[&str]) -> Option<String> {
    match first_key(obj, keys)? {
        Value::String(s) => non_empty(s),
        Value::Array(items) => {
            let lines: Vec<&str> = items.iter().filter_map(Value::as_str).collect();
            non_empty(&lines.join("\n"))
        }
        _ => None,
    }
}

/// Accepts `[{symbol, meaning}]`, `[{name, meaning}]`, `["Name | meaning"]` or
/// `{"Name": "meaning"}`.
fn symbols_field(obj: &Map<String, Value>) -> Option<Vec<KeySymbol>> {
    let symbols: Vec<KeySymbol> = match first_key(obj, SYMBOL_KEYS)? {
        Value::Array(items) => items.iter().flat_map(symbol_item).collect(),
        Value::Object(map) => map
            .iter()
            .filter_map(|(name, meaning)| pair(name, meaning.as_str()?))
            .collect(),
        Value::String(s) => parse_symbol_lines(s),
        _ => Vec::new(),
    };
    let symbols = dedup_key_symbols(symbols);
    (!symbols.is_empty()).then_some(symbols)
}

fn symbol_item(item: &Value) -> Vec<KeySymbol> {
    match item {
        Value::Object(o) => {
            let name = o
                .get("symbol")
                .or_else(|| o.get("name"))
                .and_then(Value::as_str);
            let meaning = o.get("meaning").and_then(Value::as_str);
            match (name, meaning) {
                (Some(n), Some(m)) => pair(n, m).into_iter().collect(),
                _ => Vec::new(),
            }
        }
        Value::String(s) => parse_symbol_lines(s),
        _ => Vec::new(),
    }
}

fn pair(name: &str, meaning: &str) -> Option<KeySymbol> {
    let (name, meaning) = (name.trim(), meaning.trim());
    (!name.is_empty() && !meaning.is_empty()).then(|| KeySymbol::new(name, meaning))
}
