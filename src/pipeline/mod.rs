//! Dual-path parse orchestration
//!
//! Per request: try the remote model when one is configured, fall back to
//! the rule-based path on any remote failure. The local path never fails,
//! so the caller always gets a result; a remote failure surfaces only as a
//! non-fatal warning on the outcome.

use crate::core::types::ParsedTask;
use crate::parse::SingleTaskParser;
use crate::remote::RemoteParsingAdapter;
use crate::transcript::MeetingTaskExtractor;
use chrono::NaiveDateTime;

/// Which path produced the result
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParsePath {
    Remote,
    Local,
}

/// A parse result plus how it was obtained
#[derive(Debug)]
pub struct ParseOutcome<T> {
    pub value: T,
    pub path: ParsePath,
    /// Set when the remote path was tried and failed
    pub warning: Option<String>,
}

/// Chooses the remote adapter when available, falls back to local parsing
pub struct Orchestrator {
    remote: Option<RemoteParsingAdapter>,
    single: SingleTaskParser,
    meeting: MeetingTaskExtractor,
}

impl Orchestrator {
    /// Rule-based parsing only, no network
    pub fn local_only() -> Self {
        Self {
            remote: None,
            single: SingleTaskParser::new(),
            meeting: MeetingTaskExtractor::new(),
        }
    }

    pub fn with_remote(adapter: RemoteParsingAdapter) -> Self {
        Self {
            remote: Some(adapter),
            ..Self::local_only()
        }
    }

    /// Remote-enabled when a credential is configured, local-only otherwise
    pub fn from_env() -> Self {
        match RemoteParsingAdapter::from_env() {
            Ok(adapter) => Self::with_remote(adapter),
            Err(_) => {
                tracing::warn!("no API credential configured, parsing locally only");
                Self::local_only()
            }
        }
    }

    pub fn has_remote(&self) -> bool {
        self.remote.is_some()
    }

    /// Parse one task sentence; always succeeds
    pub async fn parse_single(&self, text: &str, now: NaiveDateTime) -> ParseOutcome<ParsedTask> {
        if let Some(remote) = &self.remote {
            match remote.parse_one(text, now).await {
                Ok(task) => {
                    return ParseOutcome {
                        value: task,
                        path: ParsePath::Remote,
                        warning: None,
                    }
                }
                Err(e) => {
                    tracing::warn!("remote parse failed, falling back to local: {}", e);
                    return ParseOutcome {
                        value: self.single.parse(text, now),
                        path: ParsePath::Local,
                        warning: Some(e.to_string()),
                    };
                }
            }
        }
        ParseOutcome {
            value: self.single.parse(text, now),
            path: ParsePath::Local,
            warning: None,
        }
    }

    /// Parse a transcript into tasks; always succeeds, possibly empty
    pub async fn parse_transcript(
        &self,
        text: &str,
        now: NaiveDateTime,
    ) -> ParseOutcome<Vec<ParsedTask>> {
        if let Some(remote) = &self.remote {
            match remote.parse_many(text, now).await {
                Ok(tasks) => {
                    return ParseOutcome {
                        value: tasks,
                        path: ParsePath::Remote,
                        warning: None,
                    }
                }
                Err(e) => {
                    tracing::warn!("remote extraction failed, falling back to local: {}", e);
                    return ParseOutcome {
                        value: self.meeting.extract(text, now),
                        path: ParsePath::Local,
                        warning: Some(e.to_string()),
                    };
                }
            }
        }
        ParseOutcome {
            value: self.meeting.extract(text, now),
            path: ParsePath::Local,
            warning: None,
        }
    }
}
