//! Task extraction from transcript segments
//!
//! Each segment passes a task-likelihood gate, then gets its assignee,
//! description and date/priority cues pulled out. The cleaned pieces are
//! reassembled into a canonical sentence and handed to the single-task
//! parser, so title/date logic lives in one place. One bad segment never
//! aborts the batch; results come back in source order.

use crate::core::types::ParsedTask;
use crate::parse::priority;
use crate::parse::single::{SingleTaskParser, DATE_WORDS};
use crate::transcript::segment::segment;
use chrono::NaiveDateTime;
use once_cell::sync::Lazy;
use regex::Regex;

static TASK_INDICATOR_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)\b(?:take|finish|review|complete|handle|prepare|send|deliver|update|fix|create|write|check|please|should|must|will|needs?\s+to|work\s+on|follow\s+up|assigned|take\s+care)\b",
    )
    .expect("valid indicator pattern")
});

static TIME_INDICATOR_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)\b(?:by|before|due|deadline|tomorrow|today|tonight|next\s+week|this\s+week|eod|eow|eom|cob|monday|tuesday|wednesday|thursday|friday|saturday|sunday|\d{1,2}\s*(?:am|pm))\b",
    )
    .expect("valid time pattern")
});

static PRONOUN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\b(?:you|he|she|they|we)\b").expect("valid pronoun pattern"));
static CAPITALIZED_WORD_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b[A-Z][a-z]+\b").expect("valid pattern"));
static ASSIGNED_TO_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\bassigned\s+to\b").expect("valid pattern"));

/// Assignee patterns in precedence order, capture group 1 is the name
static ASSIGNEE_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        // "Aman: finish the deck"
        r"^\s*([A-Z][a-z]+)\s*:",
        // "Aman please/will/should ..."
        r"\b([A-Z][a-z]+)\s+(?:please|will|should|can|could|must|needs?\s+to)\b",
        // "Aman you take ..."
        r"\b([A-Z][a-z]+)\s+[Yy]ou\b",
        // "Aman to handle ..."
        r"\b([A-Z][a-z]+)\s+(?:to|will|should|please)\b",
        // "Aman is going to ..."
        r"\b([A-Z][a-z]+)\s+(?:is\s+going\s+to|is\s+to|has\s+to|shall)\b",
        // "assigned to Aman", "goes to Aman"
        r"(?:\b[Aa]ssigned\s+(?:to|for)|\b[Gg]oes\s+to)\s+([A-Z][a-z]+)",
        // "Aman's task/job"
        r"\b([A-Z][a-z]+)'s\s+(?:task|job|responsibility)\b",
    ]
    .into_iter()
    .map(|p| Regex::new(p).expect("valid assignee pattern"))
    .collect()
});

/// Leading filler phrases stripped from descriptions, longest first
static FILLER_RES: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"^(?i:can\s+you|could\s+you|you\s+need\s+to|you\s+should|you\s+will|needs?\s+to|can|you|please|will|should|must|to)\s+",
    ]
    .into_iter()
    .map(|p| Regex::new(p).expect("valid filler pattern"))
    .collect()
});

/// Trailing due-date sub-phrases stripped from descriptions
static TRAILING_DATE_RES: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"(?i)(?:^|\s)by\s+.*$",
        r"(?i)(?:^|\s)before\s+.*$",
        r"(?i)(?:^|\s)due\s+.*$",
        r"(?i)(?:^|\s)deadline\s*.*$",
        r"(?i)(?:^|\s)on\s+(?:monday|tuesday|wednesday|thursday|friday|saturday|sunday)\b.*$",
    ]
    .into_iter()
    .map(|p| Regex::new(p).expect("valid trailing pattern"))
    .collect()
});

/// Due-date phrase patterns in precedence order
static DUE_PHRASE_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"(?i)\bby\s+([^,.;]+)",
        r"(?i)\bbefore\s+([^,.;]+)",
        r"(?i)\bdue\s+(?:on\s+)?([^,.;]+)",
        r"(?i)\bdeadline\s*:?\s*([^,.;]+)",
        r"(?i)\b(tomorrow|today|tonight|next\s+week|this\s+week)\b",
        r"(?i)\b(monday|tuesday|wednesday|thursday|friday|saturday|sunday)\b",
        r"(?i)\b(end\s+of\s+(?:day|week|month)|eod|eow|eom|cob)\b",
    ]
    .into_iter()
    .map(|p| Regex::new(p).expect("valid due pattern"))
    .collect()
});

static WHITESPACE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid ws pattern"));

/// Extracts structured tasks from meeting-transcript text
pub struct MeetingTaskExtractor {
    parser: SingleTaskParser,
}

impl MeetingTaskExtractor {
    pub fn new() -> Self {
        Self {
            parser: SingleTaskParser::new(),
        }
    }

    /// Extract every task-like segment from a transcript, in source order.
    /// A transcript with no accepted segments is a valid empty result.
    pub fn extract(&self, transcript: &str, now: NaiveDateTime) -> Vec<ParsedTask> {
        let mut tasks = Vec::new();
        for seg in segment(transcript) {
            if let Some(task) = self.extract_from_segment(&seg, now) {
                tasks.push(task);
            }
        }
        tracing::debug!("extracted {} task(s) from transcript", tasks.len());
        tasks
    }

    fn extract_from_segment(&self, seg: &str, now: NaiveDateTime) -> Option<ParsedTask> {
        if !contains_task_assignment(seg) {
            return None;
        }

        let assignee = extract_assignee(seg).unwrap_or_default();
        let description = extract_task_description(seg, &assignee);
        // nothing actionable left once the cues are stripped: reassembling
        // would only wrap scaffolding around an empty title
        if description.is_empty() {
            return None;
        }
        let due_phrase = extract_due_phrase(seg).unwrap_or_default();
        let priority = priority::detect(seg);

        // Reassemble a canonical sentence so the single-task pipeline does
        // the final structuring; clauses only when their value is non-empty.
        let mut sentence = description.clone();
        if !assignee.is_empty() {
            sentence.push_str(&format!(" assigned to {}", assignee));
        }
        if !due_phrase.is_empty() {
            sentence.push_str(&format!(" by {}", due_phrase));
        }
        if let Some(p) = priority {
            sentence.push_str(&format!(" with {} priority", p));
        }

        let mut task = self.parser.parse(&sentence, now);
        if task.assignee.is_empty() && !assignee.is_empty() {
            task.assignee = assignee;
        }
        if task.title.trim().is_empty() {
            return None;
        }
        task.context = Some(seg.to_string());
        Some(task)
    }
}

impl Default for MeetingTaskExtractor {
    fn default() -> Self {
        Self::new()
    }
}

/// Gate: does this segment look like a task assignment?
fn contains_task_assignment(seg: &str) -> bool {
    let has_indicator = TASK_INDICATOR_RE.is_match(seg);
    if !has_indicator {
        return false;
    }
    let has_capitalized = CAPITALIZED_WORD_RE.is_match(seg);
    if has_capitalized {
        return true;
    }
    let has_time = TIME_INDICATOR_RE.is_match(seg);
    let has_assignee_hint =
        seg.contains(':') || PRONOUN_RE.is_match(seg) || ASSIGNED_TO_RE.is_match(seg);
    has_time || has_assignee_hint
}

/// First matching assignee pattern wins; date vocabulary never counts
fn extract_assignee(seg: &str) -> Option<String> {
    for re in ASSIGNEE_PATTERNS.iter() {
        if let Some(caps) = re.captures(seg) {
            let name = caps.get(1)?.as_str();
            if DATE_WORDS.binary_search(&name.to_lowercase().as_str()).is_ok() {
                continue;
            }
            return Some(name.to_string());
        }
    }
    None
}

/// Strip assignee prefix, leading fillers and trailing due-date phrases
fn extract_task_description(seg: &str, assignee: &str) -> String {
    let mut desc = seg.trim().to_string();

    if !assignee.is_empty() {
        if let Some(rest) = desc.strip_prefix(assignee) {
            desc = rest.trim_start().trim_start_matches(':').trim_start().to_string();
        }
    }

    loop {
        let mut stripped = false;
        for re in FILLER_RES.iter() {
            if let std::borrow::Cow::Owned(next) = re.replace(&desc, "") {
                desc = next;
                stripped = true;
            }
        }
        if !stripped {
            break;
        }
    }

    for re in TRAILING_DATE_RES.iter() {
        if let std::borrow::Cow::Owned(next) = re.replace(&desc, "") {
            desc = next;
        }
    }

    WHITESPACE_RE.replace_all(desc.trim(), " ").to_string()
}

/// Pull the raw due-date phrase out of the original segment text
fn extract_due_phrase(seg: &str) -> Option<String> {
    for re in DUE_PHRASE_PATTERNS.iter() {
        if let Some(caps) = re.captures(seg) {
            let phrase = caps.get(1)?.as_str().trim();
            if !phrase.is_empty() {
                return Some(phrase.to_string());
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::Priority;
    use chrono::NaiveDate;

    fn now() -> NaiveDateTime {
        // a Tuesday
        NaiveDate::from_ymd_opt(2026, 8, 25)
            .unwrap()
            .and_hms_opt(10, 0, 0)
            .unwrap()
    }

    #[test]
    fn test_meeting_scenario_two_tasks_in_order() {
        let e = MeetingTaskExtractor::new();
        let tasks = e.extract(
            "Aman you take the landing page by 10pm tomorrow. Rajeev you take care of client follow-up by Wednesday.",
            now(),
        );
        assert_eq!(tasks.len(), 2);
        assert_eq!(tasks[0].assignee, "Aman");
        assert_eq!(tasks[1].assignee, "Rajeev");
        assert!(tasks[0].title.contains("landing page"));
        assert!(tasks[1].title.contains("client follow-up"));
        // 10pm tomorrow
        assert_eq!(tasks[0].due_date, "2026-08-26T22:00:00");
        // the Wednesday after the Tuesday reference
        assert!(tasks[1].due_date.starts_with("2026-08-26"));
    }

    #[test]
    fn test_non_task_segment_dropped() {
        let e = MeetingTaskExtractor::new();
        let tasks = e.extract("The weather was nice today.", now());
        assert!(tasks.is_empty());
    }

    #[test]
    fn test_empty_transcript() {
        let e = MeetingTaskExtractor::new();
        assert!(e.extract("", now()).is_empty());
        assert!(e.extract("   \n ", now()).is_empty());
    }

    #[test]
    fn test_speaker_prefix_assignee() {
        let e = MeetingTaskExtractor::new();
        let tasks = e.extract("[Priya]: please review the design doc by Friday.", now());
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].assignee, "Priya");
        assert!(tasks[0].title.contains("review the design doc"));
    }

    #[test]
    fn test_priority_cue_survives_reassembly() {
        let e = MeetingTaskExtractor::new();
        let tasks = e.extract("Aman you should fix the urgent login bug by tomorrow.", now());
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].priority, Priority::P1);
        assert_eq!(tasks[0].assignee, "Aman");
    }

    #[test]
    fn test_context_carries_original_segment() {
        let e = MeetingTaskExtractor::new();
        let tasks = e.extract("Rajeev will prepare the quarterly report by Friday.", now());
        assert_eq!(tasks.len(), 1);
        let ctx = tasks[0].context.as_deref().unwrap();
        assert!(ctx.contains("Rajeev will prepare"));
    }

    #[test]
    fn test_junk_segments_do_not_block_good_ones() {
        let e = MeetingTaskExtractor::new();
        let tasks = e.extract(
            "Hmm okay. ??? !!! Aman you take the landing page by tomorrow. Just vibes here.",
            now(),
        );
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].assignee, "Aman");
    }

    #[test]
    fn test_gate_requires_indicator() {
        assert!(!contains_task_assignment("Lovely sunny morning everyone"));
        assert!(contains_task_assignment("Aman you take the landing page"));
        assert!(contains_task_assignment("someone should check the logs by friday"));
    }

    #[test]
    fn test_assignee_chain_precedence() {
        assert_eq!(extract_assignee("Priya: handle the rollout"), Some("Priya".into()));
        assert_eq!(extract_assignee("Aman please send the invoice"), Some("Aman".into()));
        assert_eq!(extract_assignee("Rajeev you own the demo"), Some("Rajeev".into()));
        assert_eq!(
            extract_assignee("the deck goes to Meera this week"),
            Some("Meera".into())
        );
        assert_eq!(
            extract_assignee("that's Vikram's job now"),
            Some("Vikram".into())
        );
        assert_eq!(extract_assignee("nobody in particular"), None);
    }

    #[test]
    fn test_description_cleanup() {
        let desc = extract_task_description("Aman you take the landing page by 10pm tomorrow", "Aman");
        assert_eq!(desc, "take the landing page");

        let desc = extract_task_description("Priya: please update the docs before Friday", "Priya");
        assert_eq!(desc, "update the docs");
    }

    #[test]
    fn test_date_only_segment_produces_no_task() {
        // cleanup strips this segment to nothing; no task, no scaffolding title
        let e = MeetingTaskExtractor::new();
        let tasks = e.extract("Aman will by Friday.", now());
        assert!(tasks.is_empty());
    }

    #[test]
    fn test_description_that_is_only_a_date_phrase_strips_fully() {
        assert_eq!(extract_task_description("Aman will by Friday", "Aman"), "");
    }

    #[test]
    fn test_due_phrase_extraction() {
        assert_eq!(
            extract_due_phrase("take the landing page by 10pm tomorrow"),
            Some("10pm tomorrow".into())
        );
        assert_eq!(
            extract_due_phrase("wrap this up before Friday please"),
            Some("Friday please".into())
        );
        assert_eq!(extract_due_phrase("check the dashboard tomorrow"), Some("tomorrow".into()));
        assert_eq!(extract_due_phrase("no dates here"), None);
    }
}
