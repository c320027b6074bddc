//! Shared task types produced and consumed across parsing paths
//!
//! `ParsedTask` is the output of every parsing path (rule-based, transcript,
//! remote model). `Task` is the persisted entity a UI layer promotes a
//! `ParsedTask` into at user confirmation; the core never mutates a `Task`
//! after creation.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Task priority, P1 most urgent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Priority {
    P1,
    P2,
    P3,
    P4,
}

impl Default for Priority {
    fn default() -> Self {
        Self::P3
    }
}

impl Priority {
    /// Human-readable label for UI display
    pub fn label(&self) -> &'static str {
        match self {
            Priority::P1 => "High",
            Priority::P2 => "Medium-High",
            Priority::P3 => "Medium",
            Priority::P4 => "Low",
        }
    }

    pub fn from_level(level: u8) -> Option<Self> {
        match level {
            1 => Some(Priority::P1),
            2 => Some(Priority::P2),
            3 => Some(Priority::P3),
            4 => Some(Priority::P4),
            _ => None,
        }
    }
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Priority::P1 => "P1",
            Priority::P2 => "P2",
            Priority::P3 => "P3",
            Priority::P4 => "P4",
        };
        write!(f, "{}", s)
    }
}

/// Structured extraction result, before persistence
///
/// `due_date` is an ISO-8601 local instant and is never in the past at the
/// moment of parsing (roll-forward correction). Wire names are camelCase
/// because this struct doubles as the remote model's response schema.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedTask {
    /// Non-empty, trimmed task title
    pub title: String,
    /// Empty string means unassigned
    #[serde(default)]
    pub assignee: String,
    /// ISO-8601 due instant, always in the future at parse time
    pub due_date: String,
    pub priority: Priority,
    /// Long-form date for display, e.g. "June 20, 2026"
    #[serde(default)]
    pub due_date_formatted: String,
    /// 12-hour clock time, present only when a time-of-day was explicit
    #[serde(default)]
    pub due_time_formatted: Option<String>,
    #[serde(default)]
    pub time_specified: bool,
    /// Priority label for display (High / Medium-High / Medium / Low)
    #[serde(default)]
    pub priority_text: String,
    /// Short justification of the priority choice, display only
    #[serde(default)]
    pub priority_reason: String,
    /// Original transcript segment this task came from, if any
    #[serde(default)]
    pub context: Option<String>,
}

impl ParsedTask {
    /// ISO-8601 rendering used for `due_date` across all paths
    pub fn format_iso(due: NaiveDateTime) -> String {
        due.format("%Y-%m-%dT%H:%M:%S").to_string()
    }

    /// Display strings derived from a resolved due instant
    pub fn format_display(due: NaiveDateTime, time_specified: bool) -> (String, Option<String>) {
        let date = due.format("%B %-d, %Y").to_string();
        let time = if time_specified {
            Some(due.format("%-I:%M %p").to_string())
        } else {
            None
        };
        (date, time)
    }
}

/// Lifecycle state of a persisted task
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TaskStatus {
    Pending,
    InProgress,
    Completed,
}

/// Persisted task entity, owned by the UI layer after promotion
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: Uuid,
    #[serde(flatten)]
    pub parsed: ParsedTask,
    pub status: TaskStatus,
    /// ISO instant, set once at creation
    pub created_at: String,
    #[serde(default)]
    pub description: Option<String>,
}

impl Task {
    /// Promote a parse result into a persisted task
    pub fn from_parsed(parsed: ParsedTask, now: NaiveDateTime) -> Self {
        Self {
            id: Uuid::new_v4(),
            parsed,
            status: TaskStatus::Pending,
            created_at: ParsedTask::format_iso(now),
            description: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d).unwrap().and_hms_opt(h, min, 0).unwrap()
    }

    #[test]
    fn test_priority_default_is_p3() {
        assert_eq!(Priority::default(), Priority::P3);
    }

    #[test]
    fn test_priority_serde_rendering() {
        let json = serde_json::to_string(&Priority::P1).unwrap();
        assert_eq!(json, "\"P1\"");
        let back: Priority = serde_json::from_str("\"P4\"").unwrap();
        assert_eq!(back, Priority::P4);
    }

    #[test]
    fn test_format_display_time_only_when_specified() {
        let due = at(2026, 6, 20, 23, 0);
        let (date, time) = ParsedTask::format_display(due, true);
        assert_eq!(date, "June 20, 2026");
        assert_eq!(time.as_deref(), Some("11:00 PM"));

        let (_, none) = ParsedTask::format_display(due, false);
        assert!(none.is_none());
    }

    #[test]
    fn test_task_promotion_sets_created_at_once() {
        let parsed = ParsedTask {
            title: "Call client".into(),
            assignee: "Rajeev".into(),
            due_date: "2026-08-31T17:00:00".into(),
            priority: Priority::P3,
            due_date_formatted: "August 31, 2026".into(),
            due_time_formatted: None,
            time_specified: false,
            priority_text: "Medium".into(),
            priority_reason: "No priority signal found".into(),
            context: None,
        };
        let task = Task::from_parsed(parsed, at(2026, 8, 30, 12, 0));
        assert_eq!(task.status, TaskStatus::Pending);
        assert_eq!(task.created_at, "2026-08-30T12:00:00");
    }

    #[test]
    fn test_task_status_kebab_case() {
        let json = serde_json::to_string(&TaskStatus::InProgress).unwrap();
        assert_eq!(json, "\"in-progress\"");
    }
}
