//! Meeting-transcript segmentation
//!
//! A transcript blob goes through ordered normalization passes (speaker
//! labels, timestamps, turn boundaries, punctuation repair) before being
//! split into candidate sentence segments. Order matters: each pass runs
//! over the whole text before the next.

use once_cell::sync::Lazy;
use regex::Regex;

// [Name]: / (Name): -> Name:
static BRACKET_SPEAKER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[([^\]\[]+)\]\s*:").expect("valid speaker pattern"));
static PAREN_SPEAKER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\(([^)(]+)\)\s*:").expect("valid speaker pattern"));

// [H:MM], [H:MM:SS], (H:MM), (H:MM:SS)
static BRACKET_TIMESTAMP_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[\d{1,2}:\d{2}(?::\d{2})?\]").expect("valid timestamp pattern"));
static PAREN_TIMESTAMP_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\(\d{1,2}:\d{2}(?::\d{2})?\)").expect("valid timestamp pattern"));

// newline-prefixed speaker turn: terminate the previous turn with a period
static TURN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\n\s*([A-Z][A-Za-z]*)\s*:").expect("valid turn pattern"));

static MULTI_PERIOD_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\.{2,}").expect("valid pattern"));
static MISSING_SPACE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"([.!?])([A-Za-z])").expect("valid pattern"));

static SPLIT_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[.!?]+\s+").expect("valid pattern"));

/// Split a transcript blob into candidate task sentences.
/// Empty or whitespace-only input yields an empty list.
pub fn segment(transcript: &str) -> Vec<String> {
    if transcript.trim().is_empty() {
        return Vec::new();
    }

    let text = BRACKET_SPEAKER_RE.replace_all(transcript, "$1: ");
    let text = PAREN_SPEAKER_RE.replace_all(&text, "$1: ");
    let text = BRACKET_TIMESTAMP_RE.replace_all(&text, " ");
    let text = PAREN_TIMESTAMP_RE.replace_all(&text, " ");
    let text = TURN_RE.replace_all(&text, ". $1: ");
    let text = MULTI_PERIOD_RE.replace_all(&text, ".");
    let text = MISSING_SPACE_RE.replace_all(&text, "$1 $2");

    SPLIT_RE
        .split(&text)
        .map(|s| s.trim().trim_end_matches(['.', '!', '?']).trim())
        .filter(|s| !s.is_empty())
        .map(|s| s.to_string())
        .collect()
}
