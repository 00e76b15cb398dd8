//! Plain-text rendering of results for the terminal.

use std::fmt::Write;

use oneir::{DreamAnalysis, DreamInterpretation, SymbolMatch};

pub fn symbols(symbols: &[SymbolMatch]) -> String {
    let mut out = String::new();
    for s in symbols {
        let _ = writeln!(out, "- {}: {}", s.symbol, s.meaning);
    }
    out
}

pub fn interpretation(result: &DreamInterpretation) -> String {
    let p = &result.interpretation;
    let mut out = String::new();
    let _ = writeln!(out, "Overall meaning\n  {}\n", p.overall_meaning);
    let _ = writeln!(out, "Key symbols");
    for k in &p.key_symbols {
        let _ = writeln!(out, "  - {}: {}", k.symbol, k.meaning);
    }
    let _ = writeln!(out, "\nPsychological insights\n  {}\n", p.psychological_insights);
    let _ = writeln!(out, "Emotional themes\n  {}\n", p.emotional_themes);
    let _ = writeln!(out, "Actionable advice\n  {}\n", p.actionable_advice);
    let _ = writeln!(out, "Dictionary symbols");
    for line in symbols(&result.symbols).lines() {
        let _ = writeln!(out, "  {}", line);
    }
    out
}

pub fn analysis(result: &DreamAnalysis) -> String {
    let mut out = interpretation(&result.interpretation);
    match (&result.visualization, &result.visualization_error) {
        (Some(v), _) => {
            let _ = writeln!(
                out,
                "\n{} ({} bytes as data URL)",
                v.title,
                v.image_url.len()
            );
        }
        (None, Some(e)) => {
            let _ = writeln!(out, "\nNo visualization: {}", e);
        }
        (None, None) => {}
    }
    out
}
