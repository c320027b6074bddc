//! Rule-based parsing of one free-text task sentence
//!
//! This is the guaranteed-available fallback path: it never fails, it only
//! degrades (empty assignee, medium priority, default 5 PM due time, raw
//! input as title). Title extraction cuts the sentence at the earliest stop
//! token; assignee extraction is an ordered first-match-wins chain.

use crate::core::types::ParsedTask;
use crate::parse::dates;
use crate::parse::names::{Gazetteer, NameRecognizer};
use crate::parse::priority;
use chrono::NaiveDateTime;
use once_cell::sync::Lazy;
use regex::Regex;

/// Single-word stop tokens that end the title
const STOP_WORDS: &[&str] = &[
    "assigned", "by", "cob", "eod", "eom", "eow", "for", "friday", "monday", "p1", "p2", "p3",
    "p4", "saturday", "sunday", "thursday", "today", "tomorrow", "tonight", "tuesday",
    "wednesday", "with",
];

/// Capitalized words that are date vocabulary, not names
pub(crate) const DATE_WORDS: &[&str] = &[
    "april", "august", "december", "february", "friday", "january", "july", "june", "march",
    "may", "monday", "november", "october", "saturday", "september", "sunday", "thursday",
    "today", "tomorrow", "tonight", "tuesday", "wednesday",
];

static WORD_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\S+").expect("valid word pattern"));

// Preposition-led assignee: "for Aman", "with Sarah Jones", "assigned to Rajeev".
// Second word joins only when capitalized, so "for Aman by 11pm" stays "Aman".
static ASSIGNEE_PREP_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?:\b[Ff]or\b|\b[Ww]ith\b|\b[Aa]ssigned\s+to\b)\s+([A-Za-z]+(?:\s+[A-Z][a-z]+)?)")
        .expect("valid assignee pattern")
});

static CAPITALIZED_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b([A-Z][a-z]+)(?:\s+([A-Z][a-z]+))?\b").expect("valid name pattern"));

/// Parser for one free-text task sentence
pub struct SingleTaskParser<N: NameRecognizer = Gazetteer> {
    recognizer: N,
}

impl SingleTaskParser {
    pub fn new() -> Self {
        Self {
            recognizer: Gazetteer,
        }
    }
}

impl Default for SingleTaskParser {
    fn default() -> Self {
        Self::new()
    }
}

impl<N: NameRecognizer> SingleTaskParser<N> {
    /// Swap the gazetteer for another name-recognition capability
    pub fn with_recognizer(recognizer: N) -> Self {
        Self { recognizer }
    }

    /// Parse a sentence into a structured task relative to `now`. Never fails.
    pub fn parse(&self, text: &str, now: NaiveDateTime) -> ParsedTask {
        let text = text.trim();
        let title = self.extract_title(text);
        let assignee = extract_assignee(text).unwrap_or_default();
        let resolved = dates::resolve(text, now);
        let classified = priority::classify(text);
        let (due_date_formatted, due_time_formatted) =
            ParsedTask::format_display(resolved.due, resolved.time_specified);

        ParsedTask {
            title,
            assignee,
            due_date: ParsedTask::format_iso(resolved.due),
            priority: classified.priority,
            due_date_formatted,
            due_time_formatted,
            time_specified: resolved.time_specified,
            priority_text: classified.label,
            priority_reason: classified.reason,
            context: None,
        }
    }

    /// Everything before the earliest stop token or likely name; the whole
    /// input when no token is found or the prefix trims to empty
    fn extract_title(&self, text: &str) -> String {
        let matches: Vec<_> = WORD_RE.find_iter(text).collect();
        let mut cut = text.len();

        for (i, m) in matches.iter().enumerate() {
            let word = normalize_word(m.as_str());
            if word.is_empty() {
                continue;
            }
            let next_is_week = matches
                .get(i + 1)
                .map(|n| normalize_word(n.as_str()) == "week")
                .unwrap_or(false);
            let is_stop = STOP_WORDS.binary_search(&word.as_str()).is_ok()
                || ((word == "next" || word == "this") && next_is_week)
                || self.recognizer.is_likely_name(&word);
            if is_stop {
                cut = m.start();
                break;
            }
        }

        let title = text[..cut].trim();
        if title.is_empty() {
            text.to_string()
        } else {
            title.to_string()
        }
    }
}

fn normalize_word(raw: &str) -> String {
    raw.trim_matches(|c: char| !c.is_alphanumeric())
        .to_lowercase()
}

/// Assignee chain, first match wins: preposition-led name, then the first
/// capitalized word (or pair) that is not sentence-initial and not date
/// vocabulary
fn extract_assignee(text: &str) -> Option<String> {
    for caps in ASSIGNEE_PREP_RE.captures_iter(text) {
        let name = caps.get(1)?.as_str();
        let first = name.split_whitespace().next().unwrap_or(name);
        // "by Monday" reads like "for Monday" to the regex; keep looking
        if DATE_WORDS.binary_search(&first.to_lowercase().as_str()).is_ok() {
            continue;
        }
        return Some(name.to_string());
    }

    for m in CAPITALIZED_RE.captures_iter(text) {
        let full = m.get(0)?;
        if full.start() == 0 {
            continue; // sentence-initial word is almost never the assignee
        }
        let first = m.get(1)?.as_str();
        if DATE_WORDS.binary_search(&first.to_lowercase().as_str()).is_ok() {
            continue;
        }
        let mut name = first.to_string();
        if let Some(second) = m.get(2) {
            if DATE_WORDS
                .binary_search(&second.as_str().to_lowercase().as_str())
                .is_err()
            {
                name.push(' ');
                name.push_str(second.as_str());
            }
        }
        return Some(name);
    }
    None
}
