//! Dictionary-based symbol matching.
//!
//! Matching is plain case-insensitive substring containment, so `cat` also hits
//! "category". That is the matcher's contract; callers that want word boundaries should
//! supply their own [`SymbolTable`].

mod table;

use std::collections::HashSet;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

/// One dictionary row. `symbol` is stored lowercase.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SymbolEntry {
    pub symbol: String,
    pub meaning: String,
}

/// A dictionary hit, with the symbol name capitalized for display.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SymbolMatch {
    pub symbol: String,
    pub meaning: String,
}

impl SymbolMatch {
    pub fn new(symbol: impl Into<String>, meaning: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            meaning: meaning.into(),
        }
    }
}

/// Ordered symbol dictionary. Match output follows table order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SymbolTable {
    entries: Vec<SymbolEntry>,
}

static BUILTIN_TABLE: Lazy<SymbolTable> =
    Lazy::new(|| SymbolTable::new(table::BUILTIN.iter().copied()));

impl SymbolTable {
    /// Builds a table as given; duplicate rows are kept (output is deduplicated instead).
    pub fn new<S, M>(entries: impl IntoIterator<Item = (S, M)>) -> Self
    where
        S: Into<String>,
        M: Into<String>,
    {
        Self {
            entries: entries
                .into_iter()
                .map(|(s, m)| SymbolEntry {
                    symbol: s.into().to_lowercase(),
                    meaning: m.into(),
                })
                .collect(),
        }
    }

    /// The built-in dictionary (animals, nature, objects, actions, body parts, colors).
    pub fn builtin() -> &'static SymbolTable {
        &BUILTIN_TABLE
    }

    pub fn entries(&self) -> &[SymbolEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Every entry whose symbol occurs in `text`, ignoring case. Unique by symbol name;
    /// the first table row wins. Not capped.
    pub fn find_in_text(&self, text: &str) -> Vec<SymbolMatch> {
        if text.is_empty() {
            return Vec::new();
        }
        let haystack = text.to_lowercase();
        let mut seen = HashSet::new();
        self.entries
            .iter()
            .filter(|e| !e.symbol.is_empty() && haystack.contains(e.symbol.as_str()))
            .filter(|e| seen.insert(e.symbol.as_str()))
            .map(|e| SymbolMatch::new(capitalize(&e.symbol), e.meaning.clone()))
            .collect()
    }
}

/// [`SymbolTable::find_in_text`] over the built-in table.
pub fn find_symbols_in_text(text: &str) -> Vec<SymbolMatch> {
    SymbolTable::builtin().find_in_text(text)
}

/// Upper-cases the first character only.
pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
