use lazy_static::lazy_static;
use regex::Regex;
use std::collections::HashMap;

lazy_static! {
    static ref WORD_RE: Regex = Regex::new(r"\w+").unwrap();
}

fn word_counts(text: &str) -> HashMap<String, usize> {
    let mut counts = HashMap::new();
    for word in WORD_RE.find_iter(text) {
        *counts.entry(word.as_str().to_string()).or_insert(0) += 1;
    }
    counts
}

/// Relevance of a section: how many times the keywords occur in it.
///
/// Matching is on whole lowercased words. Every keyword contributes the count
/// of its word, so a keyword listed twice counts twice.
pub fn score_section(text: &str, keywords: &[String]) -> usize {
    if keywords.is_empty() {
        return 0;
    }
    let counts = word_counts(&text.to_lowercase());
    keywords
        .iter()
        .map(|kw| counts.get(&kw.to_lowercase()).copied().unwrap_or(0))
        .sum()
}
