//! Model-assisted task parsing
//!
//! Sends raw text plus a fixed schema instruction (with today's date) to
//! the hosted model, validates the structured response, and re-applies the
//! future-date correction since the model is not deterministic. Failures
//! are typed; callers are expected to catch them and fall back to the
//! rule-based path.

use crate::core::error::{Result, TaskError};
use crate::core::types::{ParsedTask, Priority};
use crate::parse::dates;
use crate::remote::client::RemoteClient;
use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};
use serde::Deserialize;

/// Adapter owning the model client; configuration is resolved once at
/// construction and never mutated
pub struct RemoteParsingAdapter {
    client: RemoteClient,
}

/// Raw task object as returned by the model, before validation
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RemoteTask {
    title: Option<String>,
    #[serde(default)]
    assignee: Option<String>,
    due_date: Option<String>,
    priority: Option<Priority>,
    #[serde(default)]
    time_specified: bool,
}

impl RemoteParsingAdapter {
    pub fn new(client: RemoteClient) -> Self {
        Self { client }
    }

    /// Build an adapter from environment configuration; Err(NoCredential)
    /// when no API key is set
    pub fn from_env() -> Result<Self> {
        Ok(Self::new(RemoteClient::from_env()?))
    }

    /// Parse one sentence into a structured task via the hosted model
    pub async fn parse_one(&self, text: &str, now: NaiveDateTime) -> Result<ParsedTask> {
        let system = single_task_prompt(now);
        let response = self.client.complete(&system, text).await?;
        let json = extract_json_object(&response)?;
        let raw: RemoteTask = serde_json::from_str(json)
            .map_err(|e| TaskError::MalformedResponse(format!("{}: {}", e, json)))?;
        validate(raw, now)
    }

    /// Parse transcript text into a list of structured tasks.
    /// A malformed element is filled with safe defaults, never dropped;
    /// an unparseable response fails the whole call.
    pub async fn parse_many(&self, text: &str, now: NaiveDateTime) -> Result<Vec<ParsedTask>> {
        let system = task_list_prompt(now);
        let response = self.client.complete(&system, text).await?;
        tasks_from_list_response(&response, now)
    }
}

/// Turn a raw model response into a task list: extract the array, validate
/// each element independently, substitute defaults for malformed ones
fn tasks_from_list_response(response: &str, now: NaiveDateTime) -> Result<Vec<ParsedTask>> {
    let json = extract_json_array(response)?;
    let elements: Vec<serde_json::Value> = serde_json::from_str(json)
        .map_err(|e| TaskError::MalformedResponse(format!("{}: {}", e, json)))?;

    let tasks = elements
        .into_iter()
        .map(|value| {
            serde_json::from_value::<RemoteTask>(value)
                .ok()
                .and_then(|raw| validate(raw, now).ok())
                .unwrap_or_else(|| {
                    tracing::warn!("malformed task element in model response, using defaults");
                    default_task(now)
                })
        })
        .collect();
    Ok(tasks)
}

/// Check required fields, repair the date into the future, and assemble the
/// final task
fn validate(raw: RemoteTask, now: NaiveDateTime) -> Result<ParsedTask> {
    let title = raw
        .title
        .as_deref()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .ok_or_else(|| TaskError::MalformedResponse("missing title".into()))?
        .to_string();
    let due_str = raw
        .due_date
        .as_deref()
        .ok_or_else(|| TaskError::MalformedResponse("missing dueDate".into()))?;
    let priority = raw
        .priority
        .ok_or_else(|| TaskError::MalformedResponse("missing priority".into()))?;

    let due = parse_instant(due_str)
        .ok_or_else(|| TaskError::MalformedResponse(format!("bad dueDate: {}", due_str)))?;
    // Year-increment-only correction on model-returned dates
    let due = dates::roll_forward_year(due, now);

    let (due_date_formatted, due_time_formatted) =
        ParsedTask::format_display(due, raw.time_specified);

    Ok(ParsedTask {
        title,
        assignee: raw.assignee.unwrap_or_default(),
        due_date: ParsedTask::format_iso(due),
        priority,
        due_date_formatted,
        due_time_formatted,
        time_specified: raw.time_specified,
        priority_text: priority.label().to_string(),
        priority_reason: "Classified by model".to_string(),
        context: None,
    })
}

/// Safe defaults for a malformed list element: untitled, tomorrow, medium
fn default_task(now: NaiveDateTime) -> ParsedTask {
    let due = (now + Duration::days(1))
        .date()
        .and_time(NaiveTime::from_hms_opt(dates::DEFAULT_DUE_HOUR, 0, 0).unwrap_or_default());
    let (due_date_formatted, _) = ParsedTask::format_display(due, false);
    ParsedTask {
        title: "Untitled Task".to_string(),
        assignee: String::new(),
        due_date: ParsedTask::format_iso(due),
        priority: Priority::P3,
        due_date_formatted,
        due_time_formatted: None,
        time_specified: false,
        priority_text: Priority::P3.label().to_string(),
        priority_reason: "Defaulted after malformed model output".to_string(),
        context: None,
    }
}

/// Accepts the ISO forms models actually produce
fn parse_instant(s: &str) -> Option<NaiveDateTime> {
    let s = s.trim().trim_end_matches('Z');
    NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S")
        .or_else(|_| NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M"))
        .ok()
        .or_else(|| {
            NaiveDate::parse_from_str(s, "%Y-%m-%d").ok().map(|d| {
                d.and_time(NaiveTime::from_hms_opt(dates::DEFAULT_DUE_HOUR, 0, 0).unwrap_or_default())
            })
        })
}

/// Extract a JSON object from a model response (handles surrounding text)
fn extract_json_object(response: &str) -> Result<&str> {
    let start = response
        .find('{')
        .ok_or_else(|| TaskError::MalformedResponse("no JSON object in response".into()))?;
    let end = response
        .rfind('}')
        .ok_or_else(|| TaskError::MalformedResponse("no closing brace in response".into()))?;
    // the only closing brace may sit before the only opening one
    if end < start {
        return Err(TaskError::MalformedResponse(
            "unbalanced braces in response".into(),
        ));
    }
    Ok(&response[start..=end])
}

/// Extract a JSON array from a model response
fn extract_json_array(response: &str) -> Result<&str> {
    let start = response
        .find('[')
        .ok_or_else(|| TaskError::MalformedResponse("no JSON array in response".into()))?;
    let end = response
        .rfind(']')
        .ok_or_else(|| TaskError::MalformedResponse("no closing bracket in response".into()))?;
    if end < start {
        return Err(TaskError::MalformedResponse(
            "unbalanced brackets in response".into(),
        ));
    }
    Ok(&response[start..=end])
}

fn single_task_prompt(now: NaiveDateTime) -> String {
    format!(
        r#"You are parsing one task description into structured JSON.
Today's date is {today}.

OUTPUT FORMAT (JSON only, no explanation):
{{
  "title": "short task title",
  "assignee": "person's name or empty string",
  "dueDate": "ISO-8601 local date-time, never in the past",
  "priority": "P1|P2|P3|P4",
  "timeSpecified": true when the text names a clock time
}}

Rules:
- P1 is most urgent, P3 is the default when no signal exists.
- Use 17:00 for the due time when no time is named.
- Resolve relative dates (tomorrow, Friday, end of month) against today.

Example:
"Call client Rajeev tomorrow 5pm" -> {{"title": "Call client", "assignee": "Rajeev", "dueDate": "{tomorrow}T17:00:00", "priority": "P3", "timeSpecified": true}}
"#,
        today = now.format("%Y-%m-%d"),
        tomorrow = (now + Duration::days(1)).format("%Y-%m-%d"),
    )
}

fn task_list_prompt(now: NaiveDateTime) -> String {
    format!(
        r#"You are extracting action items from meeting-transcript text.
Today's date is {today}.

OUTPUT FORMAT (JSON array only, no explanation; empty array when no tasks):
[
  {{
    "title": "short task title",
    "assignee": "person's name or empty string",
    "dueDate": "ISO-8601 local date-time, never in the past",
    "priority": "P1|P2|P3|P4",
    "timeSpecified": true when the text names a clock time
  }}
]

Rules:
- One element per distinct action item, in the order they appear.
- P3 and 17:00 are the defaults when no signal exists.
- Skip chatter that assigns nobody anything.
"#,
        today = now.format("%Y-%m-%d"),
    )
}
