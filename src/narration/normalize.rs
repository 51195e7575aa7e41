//! Rule-based cleanup of model output into narration text.
//!
//! The generation model is instructed to return only the script, but it
//! still prepends conversational filler often enough that we strip known
//! preambles here before the whitespace and punctuation cleanup.

use once_cell::sync::Lazy;
use regex::Regex;

/// Preamble rules, tried in priority order.
///
/// Each rule fires at most once and matches from the start of the whole
/// string, spanning lines (`.` matches newlines, case-insensitive).
static PREAMBLE_RULES: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"^here's a polished,? production-ready script.*?:",
        r"^here is a polished,? production-ready script.*?:",
        r"^here's your structured.*?narration.*?:",
        r"^based on the (provided raw input|raw transcript).*?:",
        r"^final output:?",
        r"^here is the text.*?:",
        r"^sure,? here is the structured text.*?:",
    ]
    .iter()
    .map(|pattern| {
        Regex::new(&format!("(?is){}", pattern)).expect("invalid preamble rule")
    })
    .collect()
});

static WHITESPACE_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());
static SPACE_BEFORE_PUNCT: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+([.,!?])").unwrap());

/// Clean raw model output into a single-line narration string.
///
/// Strips known preambles, flattens newlines, collapses whitespace runs,
/// removes spaces before punctuation and trims. Total over all inputs:
/// empty or whitespace-only text yields an empty string. Idempotent once
/// no preamble rule matches.
pub fn normalize(raw: &str) -> String {
    let mut text = raw.trim().to_string();

    for rule in PREAMBLE_RULES.iter() {
        if let Some(matched) = rule.find(&text) {
            let rest = text[matched.end()..].trim().to_string();
            text = rest;
        }
    }

    let text = text.replace('\n', " ");
    let text = WHITESPACE_RUN.replace_all(&text, " ");
    let text = SPACE_BEFORE_PUNCT.replace_all(&text, "$1");

    text.trim().to_string()
}
