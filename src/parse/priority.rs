//! Keyword-driven priority classification
//!
//! An ordered rule table, first match wins: explicit P1..P4 tokens beat
//! urgency words, which beat importance words, which beat low-priority
//! words. No signal means P3.

use crate::core::types::Priority;
use once_cell::sync::Lazy;
use regex::Regex;

static EXPLICIT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\bp([1-4])\b").expect("valid priority pattern"));

const URGENCY_WORDS: &[&str] = &["urgent", "asap", "emergency", "critical", "immediately"];
const IMPORTANCE_WORDS: &[&str] = &["important", "high priority", "significant", "key", "major"];
const LOW_WORDS: &[&str] = &["low priority", "whenever"];

/// Classification result with display strings for the UI
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassifiedPriority {
    pub priority: Priority,
    /// Human label: High / Medium-High / Medium / Low
    pub label: String,
    /// Short natural-language justification, display only
    pub reason: String,
}

/// Detect a priority signal in free text; None when nothing matched
pub fn detect(text: &str) -> Option<Priority> {
    if let Some(caps) = EXPLICIT_RE.captures(text) {
        let level: u8 = caps.get(1)?.as_str().parse().ok()?;
        return Priority::from_level(level);
    }
    let lower = text.to_lowercase();
    if URGENCY_WORDS.iter().any(|w| lower.contains(w)) {
        return Some(Priority::P1);
    }
    if IMPORTANCE_WORDS.iter().any(|w| lower.contains(w)) {
        return Some(Priority::P2);
    }
    if LOW_WORDS.iter().any(|w| lower.contains(w)) {
        return Some(Priority::P4);
    }
    None
}

/// Classify free text into a priority with display strings
pub fn classify(text: &str) -> ClassifiedPriority {
    let (priority, reason) = match detect(text) {
        Some(p) if EXPLICIT_RE.is_match(text) => (p, format!("Explicit {} tag in the text", p)),
        Some(Priority::P1) => (Priority::P1, "Urgency wording found".to_string()),
        Some(Priority::P2) => (Priority::P2, "Importance wording found".to_string()),
        Some(Priority::P4) => (Priority::P4, "Low-priority wording found".to_string()),
        Some(p) => (p, format!("Matched {} signal", p)),
        None => (Priority::P3, "No priority signal, defaulting to medium".to_string()),
    };
    ClassifiedPriority {
        priority,
        label: priority.label().to_string(),
        reason,
    }
}
