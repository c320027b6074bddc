//! Taskscribe - natural language task extraction
//!
//! Converts free-form English (single task sentences or meeting
//! transcripts) into structured task records through a deterministic
//! rule-based pipeline, with an optional model-assisted path and automatic
//! fallback between the two.

pub mod core;
pub mod parse;
pub mod pipeline;
pub mod remote;
pub mod transcript;

pub use crate::core::error::{Result, TaskError};
pub use crate::core::types::{ParsedTask, Priority, Task, TaskStatus};
pub use crate::pipeline::{Orchestrator, ParseOutcome, ParsePath};
